//! Refractive-index spectra, tabulated or synthesised from Sellmeier
//! coefficients.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{PhotonicsError, Result};
use crate::resample::{linspace, outside_range};
use crate::spline::CubicSpline;
use crate::units::{Unit, WavelengthArray, WavelengthUnit};

/// Real (`n`) and imaginary (`k`) index over a wavelength axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefractiveIndex {
    n: Vec<f64>,
    k: Vec<f64>,
    wl: WavelengthArray,
}

impl RefractiveIndex {
    pub fn new(n: Vec<f64>, k: Vec<f64>, wl: WavelengthArray) -> Result<Self> {
        for (name, len) in [("n", n.len()), ("k", k.len())] {
            if len != wl.len() {
                return Err(PhotonicsError::LengthMismatch {
                    left: name,
                    left_len: len,
                    right: "wavelengths",
                    right_len: wl.len(),
                });
            }
        }
        Ok(RefractiveIndex { n, k, wl })
    }

    pub fn from_complex(nk: &[Complex64], wl: WavelengthArray) -> Result<Self> {
        let n = nk.iter().map(|c| c.re).collect();
        let k = nk.iter().map(|c| c.im).collect();
        Self::new(n, k, wl)
    }

    pub fn n(&self) -> &[f64] {
        &self.n
    }

    pub fn k(&self) -> &[f64] {
        &self.k
    }

    pub fn wl(&self) -> &WavelengthArray {
        &self.wl
    }

    /// `n + k`, summed as real numbers.
    pub fn nk(&self) -> Vec<f64> {
        self.n.iter().zip(&self.k).map(|(n, k)| n + k).collect()
    }

    /// `n + ik` at every sample.
    pub fn complex(&self) -> Vec<Complex64> {
        self.n
            .iter()
            .zip(&self.k)
            .map(|(&n, &k)| Complex64::new(n, k))
            .collect()
    }

    /// Interpolated `n` at `wavelength` given in `unit`.
    pub fn n_at(&self, wavelength: f64, unit: WavelengthUnit) -> Result<f64> {
        self.interpolate(&self.n, wavelength, unit)
    }

    /// Interpolated `k` at `wavelength` given in `unit`.
    pub fn k_at(&self, wavelength: f64, unit: WavelengthUnit) -> Result<f64> {
        self.interpolate(&self.k, wavelength, unit)
    }

    /// Interpolated `n + k` at `wavelength` given in `unit`.
    pub fn nk_at(&self, wavelength: f64, unit: WavelengthUnit) -> Result<f64> {
        self.interpolate(&self.nk(), wavelength, unit)
    }

    fn interpolate(&self, values: &[f64], wavelength: f64, unit: WavelengthUnit) -> Result<f64> {
        let (min, max) = match (self.wl.min(), self.wl.max()) {
            (Some(min), Some(max)) => (min, max),
            _ => {
                return Err(PhotonicsError::InvalidSamples(
                    "refractive index has no finite wavelengths".into(),
                ))
            }
        };
        let (lo, hi) = (min.in_unit(unit), max.in_unit(unit));
        if outside_range(wavelength, lo, hi) {
            return Err(PhotonicsError::out_of_range(wavelength, lo, hi, unit.symbol()));
        }
        let spline = CubicSpline::from_unsorted(self.wl.values(), values)?;
        Ok(spline.evaluate(unit.to_canonical(wavelength)))
    }

    /// n² = A0 + Σ Aᵢ·λ² / (λ² − Bᵢ²), λ in µm.
    pub fn from_sellmeier(
        a0: f64,
        a: &[f64],
        b: &[f64],
        wl_from_to_um: (f64, f64),
        n_points: usize,
    ) -> Result<Self> {
        Self::sellmeier_with(a0, a, b, wl_from_to_um, n_points, |a, b, l2| a * l2 / (l2 - b * b))
    }

    /// n² = A0 + Σ Aᵢ / (λ² − Bᵢ²), λ in µm.
    pub fn from_alt_sellmeier(
        a0: f64,
        a: &[f64],
        b: &[f64],
        wl_from_to_um: (f64, f64),
        n_points: usize,
    ) -> Result<Self> {
        Self::sellmeier_with(a0, a, b, wl_from_to_um, n_points, |a, b, l2| a / (l2 - b * b))
    }

    fn sellmeier_with(
        a0: f64,
        a: &[f64],
        b: &[f64],
        (from_um, to_um): (f64, f64),
        n_points: usize,
        term: impl Fn(f64, f64, f64) -> f64,
    ) -> Result<Self> {
        if a.len() != b.len() {
            return Err(PhotonicsError::LengthMismatch {
                left: "A",
                left_len: a.len(),
                right: "B",
                right_len: b.len(),
            });
        }
        let wl_um = linspace(from_um, to_um, n_points);
        let n: Vec<f64> = wl_um
            .iter()
            .map(|&l| {
                let l2 = l * l;
                let sum: f64 = a.iter().zip(b).map(|(&ai, &bi)| term(ai, bi, l2)).sum();
                (a0 + sum).sqrt()
            })
            .collect();
        log::debug!(
            "Sellmeier index synthesised over {from_um}..{to_um} um ({n_points} points)"
        );
        let k = vec![0.0; n.len()];
        Self::new(n, k, WavelengthArray::from_unit(wl_um, WavelengthUnit::Um))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SILICA_A: [f64; 3] = [0.6961663, 0.4079426, 0.8974794];
    const SILICA_B: [f64; 3] = [0.0684043, 0.1162414, 9.896161];

    fn flat_index() -> RefractiveIndex {
        let wl = WavelengthArray::new(linspace(1e-6, 2e-6, 100), "m").unwrap();
        RefractiveIndex::new(vec![1.5; 100], vec![0.0; 100], wl).unwrap()
    }

    #[test]
    fn construction_checks_lengths() {
        let wl = WavelengthArray::new(vec![1.0, 2.0], "um").unwrap();
        assert!(matches!(
            RefractiveIndex::new(vec![1.5; 3], vec![0.0; 2], wl),
            Err(PhotonicsError::LengthMismatch { left: "n", .. })
        ));
        let ri = flat_index();
        assert_eq!(ri.n().len(), ri.k().len());
        assert_eq!(ri.wl().len(), 100);
    }

    #[test]
    fn from_complex_splits_parts() {
        let wl = WavelengthArray::new(linspace(1.0, 2.0, 10), "um").unwrap();
        let nk = vec![Complex64::new(1.5, 0.1); 10];
        let ri = RefractiveIndex::from_complex(&nk, wl).unwrap();
        assert_relative_eq!(ri.n()[4], 1.5);
        assert_relative_eq!(ri.k()[4], 0.1);
        assert_relative_eq!(ri.nk()[0], 1.6);
        assert_eq!(ri.complex()[9], Complex64::new(1.5, 0.1));
    }

    #[test]
    fn interpolation_is_range_checked() {
        let ri = flat_index();
        assert_relative_eq!(ri.n_at(1.5, WavelengthUnit::Um).unwrap(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(ri.k_at(1500.0, WavelengthUnit::Nm).unwrap(), 0.0, epsilon = 1e-12);
        assert!(matches!(
            ri.nk_at(2.5, WavelengthUnit::Um),
            Err(PhotonicsError::OutOfRange { .. })
        ));
        assert!(ri.n_at(0.5, WavelengthUnit::Um).is_err());
    }

    #[test]
    fn range_edges_match_in_another_unit() {
        let wl = WavelengthArray::new(linspace(1.5, 1.6, 11), "um").unwrap();
        let ri = RefractiveIndex::new(vec![1.45; 11], vec![0.0; 11], wl).unwrap();
        assert_relative_eq!(ri.n_at(1600.0, WavelengthUnit::Nm).unwrap(), 1.45, epsilon = 1e-12);
        assert_relative_eq!(ri.n_at(1500.0, WavelengthUnit::Nm).unwrap(), 1.45, epsilon = 1e-12);
        assert!(ri.n_at(1600.001, WavelengthUnit::Nm).is_err());
    }

    #[test]
    fn sellmeier_fused_silica() {
        let ri = RefractiveIndex::from_sellmeier(1.0, &SILICA_A, &SILICA_B, (0.5, 2.0), 100).unwrap();
        assert_eq!(ri.n().len(), 100);
        assert!(ri.k().iter().all(|&k| k == 0.0));
        // Fused silica is ~1.444 at 1.55 µm.
        let n = ri.n_at(1.55, WavelengthUnit::Um).unwrap();
        assert_relative_eq!(n, 1.444, max_relative = 1e-3);
        // Normal dispersion: index falls with wavelength here.
        assert!(ri.n().windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn alternative_sellmeier_form() {
        let ri = RefractiveIndex::from_alt_sellmeier(2.0, &[0.01], &[0.1], (1.0, 2.0), 5).unwrap();
        let expected = (2.0_f64 + 0.01 / (1.0 - 0.01)).sqrt();
        assert_relative_eq!(ri.n()[0], expected, max_relative = 1e-12);
    }

    #[test]
    fn sellmeier_coefficient_mismatch() {
        let err = RefractiveIndex::from_sellmeier(1.0, &[1.0, 2.0, 3.0], &[1.0, 2.0], (0.5, 2.0), 10);
        assert!(matches!(err, Err(PhotonicsError::LengthMismatch { .. })));
        let err = RefractiveIndex::from_alt_sellmeier(1.0, &[1.0, 2.0, 3.0], &[1.0, 2.0], (0.5, 2.0), 10);
        assert!(matches!(err, Err(PhotonicsError::LengthMismatch { .. })));
    }
}
