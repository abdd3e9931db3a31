//! Uniform grids used to regularise irregular samples before spline fitting.

use crate::error::{PhotonicsError, Result};

/// Default number of grid points for [`equally_spaced`].
pub const DEFAULT_POINTS: usize = 51;

/// `points` evenly spaced values from `start` to `stop`, both inclusive.
///
/// The last value is set to `stop` exactly so callers can rely on the grid
/// covering the sampled range.
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (points - 1) as f64;
            let mut grid: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
            grid[points - 1] = stop;
            grid
        }
    }
}

/// Evenly spaced grid spanning `[min, max]` of `values`, always ascending.
///
/// Fails with [`PhotonicsError::InsufficientSamples`] when `values` or the
/// requested grid has fewer than two points.
pub fn equally_spaced(values: &[f64], points: usize) -> Result<Vec<f64>> {
    if values.len() < 2 {
        return Err(PhotonicsError::InsufficientSamples {
            required: 2,
            actual: values.len(),
        });
    }
    if points < 2 {
        return Err(PhotonicsError::InsufficientSamples {
            required: 2,
            actual: points,
        });
    }
    let (min, max) = min_max(values)
        .ok_or_else(|| PhotonicsError::InvalidSamples("no finite values to resample".into()))?;
    Ok(linspace(min, max, points))
}

/// Whether `value` lies outside `[min, max]`, allowing a few ulps of slack
/// at each edge. NaN is always outside.
///
/// Bounds converted between units rarely land on the exact float the caller
/// typed, so `1600 nm` must still match an axis that ends at `1.6 µm`.
pub(crate) fn outside_range(value: f64, min: f64, max: f64) -> bool {
    let slack = 8.0 * f64::EPSILON * min.abs().max(max.abs());
    value.is_nan() || value < min - slack || value > max + slack
}

/// Minimum and maximum of the finite entries.
pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_includes_both_ends() {
        let grid = linspace(1.0, 2.0, 5);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], 1.0);
        assert_eq!(grid[4], 2.0);
        assert_relative_eq!(grid[2], 1.5);
    }

    #[test]
    fn grid_is_ascending_for_descending_input() {
        let grid = equally_spaced(&[5.0, 3.0, 4.0, 1.0], 9).unwrap();
        assert_eq!(grid.first().copied(), Some(1.0));
        assert_eq!(grid.last().copied(), Some(5.0));
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_sample_is_rejected() {
        let err = equally_spaced(&[1.0], 51).unwrap_err();
        assert_eq!(
            err,
            PhotonicsError::InsufficientSamples {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn grid_of_one_point_is_rejected() {
        assert!(equally_spaced(&[1.0, 2.0], 1).is_err());
    }
}
