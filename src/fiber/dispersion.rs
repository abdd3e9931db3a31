use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DerivationOptions;
use crate::constants::{C_MS, PI, S_M2_TO_PS_NM_KM};
use crate::error::{PhotonicsError, Result};
use crate::resample::outside_range;
use crate::spline::CubicSpline;
use crate::units::{DispersionUnit, Unit, Wavelength, WavelengthArray, WavelengthUnit};

// ---------------------------------------------------------------------------
// Dispersion – D(λ) sampled over a wavelength axis
// ---------------------------------------------------------------------------

/// Chromatic dispersion samples, stored in s/m².
///
/// Deserialisation runs the same checks as [`Dispersion::new`] and
/// [`Dispersion::with_central_wavelength`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DispersionRecord")]
pub struct Dispersion {
    wavelengths: WavelengthArray,
    values: Vec<f64>,
    central_wavelength: Option<Wavelength>,
}

/// Unchecked wire form of [`Dispersion`].
#[derive(Deserialize)]
struct DispersionRecord {
    wavelengths: WavelengthArray,
    values: Vec<f64>,
    #[serde(default)]
    central_wavelength: Option<Wavelength>,
}

impl TryFrom<DispersionRecord> for Dispersion {
    type Error = PhotonicsError;

    fn try_from(record: DispersionRecord) -> Result<Self> {
        let dispersion = Dispersion::new(record.wavelengths, record.values, DispersionUnit::SPerM2)?;
        match record.central_wavelength {
            Some(wavelength) => dispersion.with_central_wavelength(wavelength),
            None => Ok(dispersion),
        }
    }
}

impl Dispersion {
    /// Wrap precomputed samples given in `unit`.
    pub fn new(wavelengths: WavelengthArray, values: Vec<f64>, unit: DispersionUnit) -> Result<Self> {
        check_lengths("values", values.len(), wavelengths.len())?;
        if wavelengths.len() < 2 {
            return Err(PhotonicsError::InsufficientSamples {
                required: 2,
                actual: wavelengths.len(),
            });
        }
        let values = values.into_iter().map(|v| unit.to_canonical(v)).collect();
        Ok(Dispersion {
            wavelengths,
            values,
            central_wavelength: None,
        })
    }

    /// Attach a central wavelength; it must lie inside the sampled range.
    pub fn with_central_wavelength(mut self, wavelength: Wavelength) -> Result<Self> {
        self.check_wavelength_limit(wavelength.as_m(), WavelengthUnit::M)?;
        self.central_wavelength = Some(wavelength);
        Ok(self)
    }

    /// D(λ) = -(λ/c) · d²n_eff/dλ², with default [`DerivationOptions`].
    pub fn from_neff(neff: &[f64], wavelengths: &WavelengthArray) -> Result<Self> {
        Self::from_neff_with(neff, wavelengths, &DerivationOptions::default())
    }

    pub fn from_neff_with(
        neff: &[f64],
        wavelengths: &WavelengthArray,
        options: &DerivationOptions,
    ) -> Result<Self> {
        check_lengths("neff", neff.len(), wavelengths.len())?;
        check_derivation_input(wavelengths.len(), options)?;

        let wl = wavelengths.values();
        let d2 = regularised_second_derivative(wl, neff, options.grid_points)?;
        log::debug!(
            "neff fit: {} samples regularised onto {} grid points",
            wl.len(),
            options.grid_points
        );

        let values: Vec<f64> = wl.iter().map(|&l| -(l / C_MS) * d2.evaluate(l)).collect();
        check_smoothness(wl, &values, options.smoothness_threshold)?;

        Ok(Dispersion {
            wavelengths: wavelengths.clone(),
            values,
            central_wavelength: None,
        })
    }

    /// D(λ) = -(2πc/λ²) · d²β/dω², with default [`DerivationOptions`].
    pub fn from_propagation_constant(beta: &[f64], wavelengths: &WavelengthArray) -> Result<Self> {
        Self::from_propagation_constant_with(beta, wavelengths, &DerivationOptions::default())
    }

    pub fn from_propagation_constant_with(
        beta: &[f64],
        wavelengths: &WavelengthArray,
        options: &DerivationOptions,
    ) -> Result<Self> {
        check_lengths("beta", beta.len(), wavelengths.len())?;
        check_derivation_input(wavelengths.len(), options)?;

        // ω falls as λ grows; the fit sorts the pairs so ω is increasing.
        let omega = wavelengths.to_omega();
        let d2 = regularised_second_derivative(omega.values(), beta, options.grid_points)?;
        log::debug!(
            "beta fit: {} samples regularised onto {} angular-frequency grid points",
            omega.len(),
            options.grid_points
        );

        let wl = wavelengths.values();
        let values: Vec<f64> = wl
            .iter()
            .zip(omega.values())
            .map(|(&l, &w)| -(2.0 * PI * C_MS) / (l * l) * d2.evaluate(w))
            .collect();
        check_smoothness(wl, &values, options.smoothness_threshold)?;

        Ok(Dispersion {
            wavelengths: wavelengths.clone(),
            values,
            central_wavelength: None,
        })
    }

    pub fn wavelengths(&self) -> &WavelengthArray {
        &self.wavelengths
    }

    pub fn central_wavelength(&self) -> Option<Wavelength> {
        self.central_wavelength
    }

    /// Stored values in s/m².
    pub fn as_s_m2(&self) -> &[f64] {
        &self.values
    }

    /// Stored values in ps/(nm·km).
    pub fn as_ps_nm_km(&self) -> Vec<f64> {
        self.values.iter().map(|v| v * S_M2_TO_PS_NM_KM).collect()
    }

    /// β2 = -λ²/(2πc) · D at every sample, s²/m.
    pub fn beta2(&self) -> Vec<f64> {
        self.wavelengths
            .values()
            .iter()
            .zip(&self.values)
            .map(|(&l, &d)| -(l * l) / (2.0 * PI * C_MS) * d)
            .collect()
    }

    /// Shortest and longest sampled wavelength, `None` when no sample is
    /// finite.
    pub fn range(&self) -> Option<(Wavelength, Wavelength)> {
        Some((self.wavelengths.min()?, self.wavelengths.max()?))
    }

    /// Interpolated dispersion at `wavelength` (given in `unit`), reported
    /// in `out`.
    pub fn evaluate(&self, wavelength: f64, unit: WavelengthUnit, out: DispersionUnit) -> Result<f64> {
        self.check_wavelength_limit(wavelength, unit)?;
        log::info!("Dispersion unit: {out}");
        let spline = CubicSpline::from_unsorted(self.wavelengths.values(), &self.values)?;
        Ok(out.from_canonical(spline.evaluate(unit.to_canonical(wavelength))))
    }

    /// Dispersion in s/m² at `wavelength`.
    pub fn value_at(&self, wavelength: Wavelength) -> Result<f64> {
        self.evaluate(wavelength.as_m(), WavelengthUnit::M, DispersionUnit::SPerM2)
    }

    /// Dispersion in ps/(nm·km) at a wavelength given in nm.
    pub fn ps_nm_km_at(&self, wavelength_nm: f64) -> Result<f64> {
        self.evaluate(wavelength_nm, WavelengthUnit::Nm, DispersionUnit::PsPerNmKm)
    }

    /// Dispersion in ps/(nm·km) at the central wavelength, if one is set.
    pub fn at_central_wavelength(&self) -> Option<Result<f64>> {
        self.central_wavelength
            .map(|wl| self.evaluate(wl.as_m(), WavelengthUnit::M, DispersionUnit::PsPerNmKm))
    }

    /// Interpolated β2 in s²/m at `wavelength` (given in `unit`).
    pub fn beta2_at(&self, wavelength: f64, unit: WavelengthUnit) -> Result<f64> {
        self.check_wavelength_limit(wavelength, unit)?;
        log::info!("Group-velocity dispersion unit: s^2/m");
        let spline = CubicSpline::from_unsorted(self.wavelengths.values(), &self.beta2())?;
        Ok(spline.evaluate(unit.to_canonical(wavelength)))
    }

    /// Bounds are converted to the caller's unit and compared there.
    fn check_wavelength_limit(&self, wavelength: f64, unit: WavelengthUnit) -> Result<()> {
        let (min, max) = self.range().ok_or_else(|| {
            PhotonicsError::InvalidSamples("dispersion has no finite wavelengths".into())
        })?;
        let (lo, hi) = (min.in_unit(unit), max.in_unit(unit));
        if outside_range(wavelength, lo, hi) {
            return Err(PhotonicsError::out_of_range(wavelength, lo, hi, unit.symbol()));
        }
        Ok(())
    }
}

impl fmt::Display for Dispersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range() {
            Some((min, max)) => write!(
                f,
                "Dispersion: {} samples from {:.3} nm to {:.3} nm",
                self.values.len(),
                min.as_nm(),
                max.as_nm()
            ),
            None => write!(f, "Dispersion: {} samples", self.values.len()),
        }
    }
}

// -- derivation helpers --

fn check_lengths(name: &'static str, len: usize, axis_len: usize) -> Result<()> {
    if len != axis_len {
        return Err(PhotonicsError::LengthMismatch {
            left: name,
            left_len: len,
            right: "wavelengths",
            right_len: axis_len,
        });
    }
    Ok(())
}

fn check_derivation_input(len: usize, options: &DerivationOptions) -> Result<()> {
    options.validate()?;
    if len < options.min_samples {
        return Err(PhotonicsError::InsufficientSamples {
            required: options.min_samples,
            actual: len,
        });
    }
    Ok(())
}

/// Fit `y(x)` through the raw samples, resample it onto an equally spaced
/// ascending grid, refit, and return the second derivative of the refit.
fn regularised_second_derivative(x: &[f64], y: &[f64], grid_points: usize) -> Result<CubicSpline> {
    let raw = CubicSpline::from_unsorted(x, y)?;
    let grid = crate::resample::equally_spaced(x, grid_points)?;
    let regular = raw.evaluate_many(&grid);
    Ok(CubicSpline::new(&grid, &regular)?.derivative(2))
}

/// Every rise between neighbours (ordered by ascending wavelength) must stay
/// below `threshold` ps/(nm·km). Falling curves pass however steep they are;
/// NaN values fail the check.
fn check_smoothness(wavelengths: &[f64], values: &[f64], threshold: f64) -> Result<()> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| wavelengths[a].total_cmp(&wavelengths[b]));

    for (pos, pair) in order.windows(2).enumerate() {
        let jump = (values[pair[1]] - values[pair[0]]) * S_M2_TO_PS_NM_KM;
        if !(jump < threshold) {
            log::warn!(
                "Bad fitting: dispersion jumps by {jump:.3} ps/(nm.km) at sample {}",
                pos + 1
            );
            return Err(PhotonicsError::NumericalInstability {
                index: pos + 1,
                jump,
                threshold,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const A: f64 = 1.6e9; // curvature of neff, 1/m²
    const L0: f64 = 1.55e-6;

    fn grid_nm(from: f64, to: f64, n: usize) -> WavelengthArray {
        WavelengthArray::from_unit(crate::resample::linspace(from, to, n), WavelengthUnit::Nm)
    }

    fn quadratic_neff(wl: &WavelengthArray) -> Vec<f64> {
        wl.values()
            .iter()
            .map(|&l| 1.45 - 2e4 * (l - L0) - A * (l - L0).powi(2))
            .collect()
    }

    #[test]
    fn neff_quadratic_gives_analytic_dispersion() {
        let wl = grid_nm(1500.0, 1600.0, 25);
        let disp = Dispersion::from_neff(&quadratic_neff(&wl), &wl).unwrap();
        for (&l, &d) in wl.values().iter().zip(disp.as_s_m2()) {
            let expected = -(l / C_MS) * (-2.0 * A);
            assert_relative_eq!(d, expected, max_relative = 1e-2);
        }
    }

    #[test]
    fn descending_axis_is_handled() {
        let wl = grid_nm(1600.0, 1500.0, 20);
        let disp = Dispersion::from_neff(&quadratic_neff(&wl), &wl).unwrap();
        let expected = -(1.55e-6 / C_MS) * (-2.0 * A);
        let at = Wavelength::from_unit(1550.0, WavelengthUnit::Nm);
        assert_relative_eq!(disp.value_at(at).unwrap(), expected, max_relative = 1e-2);
    }

    #[test]
    fn noisy_neff_is_unstable() {
        let wl = grid_nm(1500.0, 1600.0, 20);
        let neff: Vec<f64> = quadratic_neff(&wl)
            .iter()
            .enumerate()
            .map(|(i, n)| if i % 2 == 0 { n + 1e-4 } else { n - 1e-4 })
            .collect();
        let err = Dispersion::from_neff(&neff, &wl).unwrap_err();
        assert!(err.is_data_quality(), "{err}");
    }

    #[test]
    fn length_mismatch_is_reported_before_fitting() {
        let wl = grid_nm(1500.0, 1600.0, 9);
        let neff = vec![1.45; 10];
        assert_eq!(
            Dispersion::from_neff(&neff, &wl).unwrap_err(),
            PhotonicsError::LengthMismatch {
                left: "neff",
                left_len: 10,
                right: "wavelengths",
                right_len: 9
            }
        );
        assert!(matches!(
            Dispersion::from_propagation_constant(&neff, &wl),
            Err(PhotonicsError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn too_few_samples_are_rejected() {
        let wl = grid_nm(1500.0, 1600.0, 3);
        assert!(matches!(
            Dispersion::from_neff(&[1.45, 1.44, 1.43], &wl),
            Err(PhotonicsError::InsufficientSamples { required: 4, actual: 3 })
        ));
    }

    #[test]
    fn beta_quadratic_in_omega_gives_analytic_dispersion() {
        let wl = grid_nm(1500.0, 1600.0, 30);
        let w0 = 2.0 * PI * C_MS / L0;
        let beta1 = 1.46 / C_MS;
        let beta2 = -2.0e-26; // s²/m
        let beta: Vec<f64> = wl
            .to_omega()
            .values()
            .iter()
            .map(|&w| 1.45 * w0 / C_MS + beta1 * (w - w0) + 0.5 * beta2 * (w - w0).powi(2))
            .collect();

        let disp = Dispersion::from_propagation_constant(&beta, &wl).unwrap();
        for (&l, &d) in wl.values().iter().zip(disp.as_s_m2()) {
            let expected = -(2.0 * PI * C_MS) / (l * l) * beta2;
            assert_relative_eq!(d, expected, max_relative = 1e-2);
        }
        for b2 in disp.beta2() {
            assert_relative_eq!(b2, beta2, max_relative = 1e-2);
        }
        assert_relative_eq!(
            disp.beta2_at(1550.0, WavelengthUnit::Nm).unwrap(),
            beta2,
            max_relative = 1e-2
        );
    }

    #[test]
    fn evaluation_outside_range_names_bounds() {
        let wl = grid_nm(1500.0, 1600.0, 11);
        let disp = Dispersion::new(wl, vec![17.0; 11], DispersionUnit::PsPerNmKm).unwrap();

        let err = disp.ps_nm_km_at(1400.0).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, PhotonicsError::OutOfRange { .. }));
        assert!(msg.contains("1500") && msg.contains("1600"), "{msg}");

        assert!(disp.beta2_at(1.7, WavelengthUnit::Um).is_err());
        assert!(disp.evaluate(f64::NAN, WavelengthUnit::Nm, DispersionUnit::SPerM2).is_err());
    }

    #[test]
    fn evaluation_at_range_edges_and_in_units() {
        let wl = grid_nm(1500.0, 1600.0, 11);
        let disp = Dispersion::new(wl, vec![17.0; 11], DispersionUnit::PsPerNmKm).unwrap();
        assert_relative_eq!(disp.ps_nm_km_at(1500.0).unwrap(), 17.0, max_relative = 1e-9);
        assert_relative_eq!(disp.ps_nm_km_at(1600.0).unwrap(), 17.0, max_relative = 1e-9);
        assert_relative_eq!(
            disp.evaluate(1.55, WavelengthUnit::Um, DispersionUnit::SPerM2).unwrap(),
            17e-6,
            max_relative = 1e-9
        );
        assert_relative_eq!(disp.as_ps_nm_km()[3], 17.0, max_relative = 1e-12);
    }

    #[test]
    fn central_wavelength_must_be_in_range() {
        let wl = grid_nm(1500.0, 1600.0, 11);
        let disp = Dispersion::new(wl, vec![17.0; 11], DispersionUnit::PsPerNmKm).unwrap();
        let outside = Wavelength::from_unit(1700.0, WavelengthUnit::Nm);
        assert!(disp.clone().with_central_wavelength(outside).is_err());

        let disp = disp
            .with_central_wavelength(Wavelength::from_unit(1550.0, WavelengthUnit::Nm))
            .unwrap();
        let at_center = disp.at_central_wavelength().unwrap().unwrap();
        assert_relative_eq!(at_center, 17.0, max_relative = 1e-9);
    }

    #[test]
    fn direct_construction_checks_lengths() {
        let wl = grid_nm(1500.0, 1600.0, 5);
        assert!(matches!(
            Dispersion::new(wl, vec![1.0; 4], DispersionUnit::SPerM2),
            Err(PhotonicsError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn steeply_falling_dispersion_is_accepted() {
        // n = 1.45 + K·(λ − λ0)³ gives D = -(6K/c)·λ·(λ − λ0), which falls
        // by about 60 ps/(nm·km) per 5 nm step across this window.
        const K: f64 = 3.87e17;
        let wl = grid_nm(1500.0, 1600.0, 21);
        let falling: Vec<f64> = wl.values().iter().map(|&l| 1.45 + K * (l - L0).powi(3)).collect();
        let disp = Dispersion::from_neff(&falling, &wl).unwrap();
        let d = disp.as_ps_nm_km();
        for (&l, &got) in wl.values().iter().zip(&d) {
            let expected = -(6.0 * K / C_MS) * l * (l - L0) * S_M2_TO_PS_NM_KM;
            assert!((got - expected).abs() < 1.0, "{got} vs {expected}");
        }
        assert!(d.windows(2).all(|w| w[1] - w[0] < -50.0));

        // The same curve mirrored rises just as fast and is refused.
        let rising: Vec<f64> = wl.values().iter().map(|&l| 1.45 - K * (l - L0).powi(3)).collect();
        match Dispersion::from_neff(&rising, &wl) {
            Err(PhotonicsError::NumericalInstability { jump, .. }) => assert!(jump > 50.0),
            other => panic!("expected NumericalInstability, got {other:?}"),
        }
    }

    #[test]
    fn noisy_beta_is_unstable() {
        let wl = grid_nm(1500.0, 1600.0, 20);
        let w0 = 2.0 * PI * C_MS / L0;
        let beta: Vec<f64> = wl
            .to_omega()
            .values()
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let smooth = 1.45 * w0 / C_MS + 1.46 / C_MS * (w - w0) - 1.0e-26 * (w - w0).powi(2);
                if i % 2 == 0 {
                    smooth + 1.0
                } else {
                    smooth - 1.0
                }
            })
            .collect();
        let err = Dispersion::from_propagation_constant(&beta, &wl).unwrap_err();
        assert!(err.is_data_quality(), "{err}");
    }

    #[test]
    fn micrometre_axis_accepts_nanometre_edges() {
        let wl = WavelengthArray::new(crate::resample::linspace(1.5, 1.6, 11), "um").unwrap();
        let disp = Dispersion::new(wl, vec![17.0; 11], DispersionUnit::PsPerNmKm).unwrap();
        assert_relative_eq!(disp.ps_nm_km_at(1600.0).unwrap(), 17.0, max_relative = 1e-9);
        assert_relative_eq!(disp.ps_nm_km_at(1500.0).unwrap(), 17.0, max_relative = 1e-9);
        assert!(disp.beta2_at(1600.0, WavelengthUnit::Nm).is_ok());
        assert!(matches!(
            disp.ps_nm_km_at(1600.01),
            Err(PhotonicsError::OutOfRange { .. })
        ));
    }

    #[test]
    fn deserialising_rechecks_samples() {
        let wl = grid_nm(1500.0, 1600.0, 11);
        let disp = Dispersion::new(wl, vec![17.0; 11], DispersionUnit::PsPerNmKm)
            .unwrap()
            .with_central_wavelength(Wavelength::from_unit(1550.0, WavelengthUnit::Nm))
            .unwrap();
        let json = serde_json::to_value(&disp).unwrap();

        let back: Dispersion = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back.wavelengths().len(), 11);
        assert_relative_eq!(back.at_central_wavelength().unwrap().unwrap(), 17.0, max_relative = 1e-9);

        let mut short = json.clone();
        short["values"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<Dispersion>(short).is_err());

        let mut off_axis = json;
        off_axis["central_wavelength"] =
            serde_json::to_value(Wavelength::from_unit(1700.0, WavelengthUnit::Nm)).unwrap();
        let err = serde_json::from_value::<Dispersion>(off_axis).unwrap_err();
        assert!(err.to_string().contains("outside the available range"), "{err}");
    }
}
