use serde::{Deserialize, Serialize};

use super::dispersion::Dispersion;
use crate::constants::C_MS;
use crate::error::{PhotonicsError, Result};
use crate::units::{AngularFrequencyArray, Axis, WavelengthArray};

/// β (or β2) sampled over a wavelength or an angular-frequency axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PropagationRecord")]
pub struct PropagationConstant {
    axis: Axis,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct PropagationRecord {
    axis: Axis,
    values: Vec<f64>,
}

impl TryFrom<PropagationRecord> for PropagationConstant {
    type Error = PhotonicsError;

    fn try_from(record: PropagationRecord) -> Result<Self> {
        PropagationConstant::new(record.values, record.axis)
    }
}

impl PropagationConstant {
    /// `axis` must be a wavelength or angular-frequency axis of the same
    /// length as `values`.
    pub fn new(values: Vec<f64>, axis: Axis) -> Result<Self> {
        check_axis_kind(&axis)?;
        check_lengths("values", values.len(), &axis)?;
        Ok(PropagationConstant { axis, values })
    }

    /// Pointwise `neff · ω / c` over `axis`, converted to angular frequency
    /// when given as wavelength. The result keeps the caller's axis.
    pub fn beta2_from_neff(neff: &[f64], axis: impl Into<Axis>) -> Result<Self> {
        let axis = axis.into();
        check_axis_kind(&axis)?;
        check_lengths("neff", neff.len(), &axis)?;

        let omega = axis.to_omega();
        let values = neff
            .iter()
            .zip(omega.values())
            .map(|(&n, &w)| n * w / C_MS)
            .collect();
        Ok(PropagationConstant { axis, values })
    }

    /// β = ω · neff / c over an angular-frequency axis.
    pub fn from_neff_omega(neff: &[f64], omega: &AngularFrequencyArray) -> Result<Self> {
        let axis = Axis::AngularFrequency(omega.clone());
        check_lengths("neff", neff.len(), &axis)?;

        let values = omega
            .values()
            .iter()
            .zip(neff)
            .map(|(&w, &n)| w * n / C_MS)
            .collect();
        Ok(PropagationConstant { axis, values })
    }

    /// Same as [`PropagationConstant::from_neff_omega`] for an axis whose
    /// kind is only known at runtime.
    pub fn from_neff_axis(neff: &[f64], omega: &Axis) -> Result<Self> {
        Self::from_neff_omega(neff, omega.as_angular_frequencies()?)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    pub fn wavelengths(&self) -> Option<&WavelengthArray> {
        self.axis.as_wavelengths().ok()
    }

    pub fn omegas(&self) -> Option<&AngularFrequencyArray> {
        self.axis.as_angular_frequencies().ok()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Derive D(λ) from these β samples.
    pub fn to_dispersion(&self) -> Result<Dispersion> {
        Dispersion::from_propagation_constant(&self.values, &self.axis.to_wavelengths())
    }
}

fn check_axis_kind(axis: &Axis) -> Result<()> {
    match axis {
        Axis::Wavelength(_) | Axis::AngularFrequency(_) => Ok(()),
        other => Err(PhotonicsError::TypeMismatch {
            expected: "wavelength or angular frequency",
            found: other.kind_name(),
        }),
    }
}

fn check_lengths(name: &'static str, len: usize, axis: &Axis) -> Result<()> {
    if len != axis.len() {
        return Err(PhotonicsError::LengthMismatch {
            left: name,
            left_len: len,
            right: axis.kind_name(),
            right_len: axis.len(),
        });
    }
    Ok(())
}
