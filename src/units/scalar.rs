use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::kind::{AngularFrequencyKind, FrequencyKind, Kind, WavelengthKind, WavenumberKind};
use super::unit::{AngularFrequencyUnit, FrequencyUnit, Unit, WavelengthUnit, WavenumberUnit};
use crate::constants::{C_MS, PI};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Closed-form identities shared by scalars and arrays (canonical units)
// ---------------------------------------------------------------------------

pub(super) fn wl_to_freq(m: f64) -> f64 {
    C_MS / m
}

pub(super) fn wl_to_omega(m: f64) -> f64 {
    2.0 * PI * C_MS / m
}

pub(super) fn wl_to_wavenumber(m: f64) -> f64 {
    1.0 / m
}

pub(super) fn freq_to_wl(hz: f64) -> f64 {
    C_MS / hz
}

pub(super) fn freq_to_omega(hz: f64) -> f64 {
    2.0 * PI * hz
}

pub(super) fn freq_to_wavenumber(hz: f64) -> f64 {
    hz / C_MS
}

pub(super) fn omega_to_wl(rad_s: f64) -> f64 {
    2.0 * PI * C_MS / rad_s
}

pub(super) fn omega_to_freq(rad_s: f64) -> f64 {
    rad_s / (2.0 * PI)
}

pub(super) fn omega_to_wavenumber(rad_s: f64) -> f64 {
    rad_s / (2.0 * PI * C_MS)
}

pub(super) fn wavenumber_to_wl(per_m: f64) -> f64 {
    1.0 / per_m
}

pub(super) fn wavenumber_to_freq(per_m: f64) -> f64 {
    C_MS * per_m
}

pub(super) fn wavenumber_to_omega(per_m: f64) -> f64 {
    2.0 * PI * C_MS * per_m
}

// ---------------------------------------------------------------------------
// Quantity – one canonical value tagged with its kind
// ---------------------------------------------------------------------------

/// A scalar physical quantity stored in the canonical unit of `K`.
///
/// Conversions between kinds that divide by the stored value (for example
/// wavelength → frequency) follow IEEE semantics: a zero value converts to
/// infinity rather than failing.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Quantity<K: Kind> {
    value: f64,
    #[serde(skip)]
    kind: PhantomData<K>,
}

pub type Wavelength = Quantity<WavelengthKind>;
pub type Frequency = Quantity<FrequencyKind>;
pub type AngularFrequency = Quantity<AngularFrequencyKind>;
pub type Wavenumber = Quantity<WavenumberKind>;

impl<K: Kind> Quantity<K> {
    /// Construct from a value and a unit symbol such as `"nm"` or `"THz"`.
    pub fn new(value: f64, unit: &str) -> Result<Self> {
        let unit: K::Unit = unit.parse()?;
        Ok(Self::from_unit(value, unit))
    }

    /// Construct from a value in a typed unit.
    pub fn from_unit(value: f64, unit: K::Unit) -> Self {
        Self::from_canonical(unit.to_canonical(value))
    }

    pub(crate) fn from_canonical(value: f64) -> Self {
        Quantity {
            value,
            kind: PhantomData,
        }
    }

    /// Value in the canonical unit.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value expressed in `unit`.
    pub fn in_unit(&self, unit: K::Unit) -> f64 {
        unit.from_canonical(self.value)
    }
}

impl<K: Kind> fmt::Debug for Quantity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} {}", K::NAME, self.value, K::Unit::CANONICAL)
    }
}

impl<K: Kind> fmt::Display for Quantity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, K::Unit::CANONICAL)
    }
}

impl Wavelength {
    pub fn as_m(&self) -> f64 {
        self.value
    }

    pub fn as_um(&self) -> f64 {
        self.in_unit(WavelengthUnit::Um)
    }

    pub fn as_nm(&self) -> f64 {
        self.in_unit(WavelengthUnit::Nm)
    }

    pub fn to_freq(&self) -> Frequency {
        Frequency::from_canonical(wl_to_freq(self.value))
    }

    pub fn to_omega(&self) -> AngularFrequency {
        AngularFrequency::from_canonical(wl_to_omega(self.value))
    }

    pub fn to_wavenumber(&self) -> Wavenumber {
        Wavenumber::from_canonical(wl_to_wavenumber(self.value))
    }
}

impl Frequency {
    #[allow(non_snake_case)]
    pub fn as_Hz(&self) -> f64 {
        self.value
    }

    #[allow(non_snake_case)]
    pub fn as_THz(&self) -> f64 {
        self.in_unit(FrequencyUnit::THz)
    }

    #[allow(non_snake_case)]
    pub fn as_GHz(&self) -> f64 {
        self.in_unit(FrequencyUnit::GHz)
    }

    #[allow(non_snake_case)]
    pub fn as_MHz(&self) -> f64 {
        self.in_unit(FrequencyUnit::MHz)
    }

    pub fn to_wl(&self) -> Wavelength {
        Wavelength::from_canonical(freq_to_wl(self.value))
    }

    pub fn to_omega(&self) -> AngularFrequency {
        AngularFrequency::from_canonical(freq_to_omega(self.value))
    }

    pub fn to_wavenumber(&self) -> Wavenumber {
        Wavenumber::from_canonical(freq_to_wavenumber(self.value))
    }
}

impl AngularFrequency {
    pub fn as_rad_s(&self) -> f64 {
        self.value
    }

    pub fn as_rad_ps(&self) -> f64 {
        self.in_unit(AngularFrequencyUnit::RadPerPs)
    }

    pub fn to_wl(&self) -> Wavelength {
        Wavelength::from_canonical(omega_to_wl(self.value))
    }

    pub fn to_freq(&self) -> Frequency {
        Frequency::from_canonical(omega_to_freq(self.value))
    }

    pub fn to_wavenumber(&self) -> Wavenumber {
        Wavenumber::from_canonical(omega_to_wavenumber(self.value))
    }
}

impl Wavenumber {
    pub fn as_per_m(&self) -> f64 {
        self.value
    }

    pub fn as_per_cm(&self) -> f64 {
        self.in_unit(WavenumberUnit::PerCm)
    }

    pub fn as_per_um(&self) -> f64 {
        self.in_unit(WavenumberUnit::PerUm)
    }

    pub fn to_wl(&self) -> Wavelength {
        Wavelength::from_canonical(wavenumber_to_wl(self.value))
    }

    pub fn to_freq(&self) -> Frequency {
        Frequency::from_canonical(wavenumber_to_freq(self.value))
    }

    pub fn to_omega(&self) -> AngularFrequency {
        AngularFrequency::from_canonical(wavenumber_to_omega(self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhotonicsError;
    use approx::assert_relative_eq;

    #[test]
    fn wavelength_scales_into_meters() {
        let wl = Wavelength::new(1000.0, "nm").unwrap();
        assert_relative_eq!(wl.as_m(), 1e-6);
        assert_relative_eq!(wl.as_nm(), 1000.0);
        assert_relative_eq!(wl.as_um(), 1.0);
    }

    #[test]
    fn frequency_scales_into_hertz() {
        let f = Frequency::new(100.0, "GHz").unwrap();
        assert_relative_eq!(f.as_Hz(), 1e11);
        assert_relative_eq!(f.as_GHz(), 100.0);
        assert_relative_eq!(f.as_THz(), 0.1);
    }

    #[test]
    fn angular_frequency_rad_per_ps() {
        let w = AngularFrequency::new(628.0, "rad/ps").unwrap();
        assert_relative_eq!(w.as_rad_s(), 628e-12);
        assert_relative_eq!(w.as_rad_ps(), 628.0);
    }

    #[test]
    fn invalid_units_fail_before_construction() {
        assert!(matches!(
            Wavelength::new(1000.0, "cm"),
            Err(PhotonicsError::InvalidUnit { .. })
        ));
        assert!(matches!(
            Frequency::new(10.0, "kHz"),
            Err(PhotonicsError::InvalidUnit { .. })
        ));
        assert!(matches!(
            AngularFrequency::new(1.0, "deg/s"),
            Err(PhotonicsError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn wavelength_to_frequency_and_back() {
        for nm in [400.0, 1310.0, 1550.0, 2000.0] {
            let wl = Wavelength::from_unit(nm, WavelengthUnit::Nm);
            assert_relative_eq!(wl.to_freq().to_wl().as_m(), wl.as_m(), max_relative = 1e-14);
            assert_relative_eq!(wl.to_omega().to_wl().as_m(), wl.as_m(), max_relative = 1e-14);
            assert_relative_eq!(
                wl.to_wavenumber().to_wl().as_m(),
                wl.as_m(),
                max_relative = 1e-14
            );
        }
    }

    #[test]
    fn frequency_to_angular_and_back() {
        let f = Frequency::new(193.414, "THz").unwrap();
        assert_relative_eq!(f.to_omega().to_freq().as_Hz(), f.as_Hz(), max_relative = 1e-14);
        assert_relative_eq!(f.to_omega().as_rad_s(), 2.0 * PI * 193.414e12, max_relative = 1e-14);
    }

    #[test]
    fn frequency_to_wavelength_cross_check() {
        let f = Frequency::new(193.414, "THz").unwrap();
        assert_relative_eq!(f.to_wl().as_m(), C_MS / 193.414e12, max_relative = 1e-14);
    }

    #[test]
    fn wavenumber_conversions_agree() {
        let k = Wavenumber::new(6451.6, "1/cm").unwrap();
        assert_relative_eq!(k.as_per_m(), 645_160.0, max_relative = 1e-14);
        assert_relative_eq!(k.to_freq().as_Hz(), k.to_wl().to_freq().as_Hz(), max_relative = 1e-12);
        assert_relative_eq!(
            k.to_omega().as_rad_s(),
            k.to_freq().to_omega().as_rad_s(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn zero_wavelength_converts_to_infinity() {
        let wl = Wavelength::new(0.0, "m").unwrap();
        assert!(wl.to_freq().as_Hz().is_infinite());
        assert!(Frequency::new(0.0, "Hz").unwrap().to_wl().as_m().is_infinite());
    }

    #[test]
    fn conversions_return_new_values() {
        let wl = Wavelength::new(1550.0, "nm").unwrap();
        let _ = wl.to_freq();
        assert_relative_eq!(wl.as_nm(), 1550.0);
    }
}
