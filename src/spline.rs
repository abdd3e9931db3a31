//! Interpolating cubic splines with analytic derivatives.
//!
//! The spline passes through every sample and uses not-a-knot end
//! conditions, so any cubic polynomial is reproduced exactly and its
//! second derivative is recovered without truncation error. Two samples
//! give a line and three give a single parabola.

use crate::error::{PhotonicsError, Result};

/// Piecewise cubic `s(x) = a + b·t + c·t² + d·t³` with `t = x - x[i]` on
/// interval `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    knots: Vec<f64>,
    coeffs: Vec<[f64; 4]>,
}

impl CubicSpline {
    /// Fit through `(x, y)` where `x` is strictly increasing.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        validate(x, y)?;
        let moments = moments(x, y);

        let coeffs = (0..x.len() - 1)
            .map(|i| {
                let h = x[i + 1] - x[i];
                let (m0, m1) = (moments[i], moments[i + 1]);
                [
                    y[i],
                    (y[i + 1] - y[i]) / h - h * (2.0 * m0 + m1) / 6.0,
                    m0 / 2.0,
                    (m1 - m0) / (6.0 * h),
                ]
            })
            .collect();

        Ok(CubicSpline {
            knots: x.to_vec(),
            coeffs,
        })
    }

    /// Fit through pairs given in any order; they are sorted by `x` first.
    pub fn from_unsorted(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(length_mismatch(x, y));
        }
        let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        Self::new(&xs, &ys)
    }

    /// Domain covered by the samples.
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// Value at `x`. Points outside the domain extend the end pieces.
    pub fn evaluate(&self, x: f64) -> f64 {
        let i = self.interval(x);
        let t = x - self.knots[i];
        let [a, b, c, d] = self.coeffs[i];
        a + t * (b + t * (c + t * d))
    }

    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// The `order`-th derivative as a new piecewise polynomial.
    pub fn derivative(&self, order: usize) -> Self {
        let mut coeffs = self.coeffs.clone();
        for _ in 0..order {
            for [a, b, c, d] in coeffs.iter_mut() {
                *a = *b;
                *b = 2.0 * *c;
                *c = 3.0 * *d;
                *d = 0.0;
            }
        }
        CubicSpline {
            knots: self.knots.clone(),
            coeffs,
        }
    }

    fn interval(&self, x: f64) -> usize {
        let last = self.coeffs.len() - 1;
        self.knots
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(last)
    }
}

fn length_mismatch(x: &[f64], y: &[f64]) -> PhotonicsError {
    PhotonicsError::LengthMismatch {
        left: "x",
        left_len: x.len(),
        right: "y",
        right_len: y.len(),
    }
}

fn validate(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(length_mismatch(x, y));
    }
    if x.len() < 2 {
        return Err(PhotonicsError::InsufficientSamples {
            required: 2,
            actual: x.len(),
        });
    }
    if let Some(i) = x.iter().chain(y).position(|v| !v.is_finite()) {
        return Err(PhotonicsError::InvalidSamples(format!(
            "non-finite spline sample at position {}",
            i % x.len()
        )));
    }
    if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
        return Err(PhotonicsError::InvalidSamples(format!(
            "spline abscissae must be strictly increasing (index {})",
            i + 1
        )));
    }
    Ok(())
}

/// Second derivatives at the knots.
fn moments(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    match n {
        2 => vec![0.0; 2],
        3 => vec![2.0 * (slope[1] - slope[0]) / (h[0] + h[1]); 3],
        _ => {
            // Unknowns M[1..n-1]; the end moments are eliminated through the
            // not-a-knot conditions (continuous third derivative at x[1] and
            // x[n-2]).
            let m = n - 2;
            let mut sub = vec![0.0; m];
            let mut diag = vec![0.0; m];
            let mut sup = vec![0.0; m];
            let mut rhs = vec![0.0; m];

            for r in 0..m {
                let i = r + 1;
                sub[r] = h[i - 1];
                diag[r] = 2.0 * (h[i - 1] + h[i]);
                sup[r] = h[i];
                rhs[r] = 6.0 * (slope[i] - slope[i - 1]);
            }

            let (h0, h1) = (h[0], h[1]);
            diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
            sup[0] = (h1 * h1 - h0 * h0) / h1;

            let (a, b) = (h[n - 3], h[n - 2]);
            sub[m - 1] = (a * a - b * b) / a;
            diag[m - 1] = (a + b) * (2.0 * a + b) / a;

            let inner = solve_tridiagonal(&sub, &diag, &sup, &rhs);

            let mut moments = Vec::with_capacity(n);
            moments.push(inner[0] + h0 / h1 * (inner[0] - inner[1]));
            moments.extend_from_slice(&inner);
            moments.push(inner[m - 1] + b / a * (inner[m - 1] - inner[m - 2]));
            moments
        }
    }
}

/// Thomas algorithm; `sub[0]` and `sup[last]` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - sub[i] * c[i - 1];
        c[i] = if i + 1 < n { sup[i] / denom } else { 0.0 };
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / denom;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d[i] - c[i] * x[i + 1];
    }
    x
}
