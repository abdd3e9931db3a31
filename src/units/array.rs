use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::kind::{AngularFrequencyKind, FrequencyKind, Kind, WavelengthKind, WavenumberKind};
use super::scalar::{self, Quantity};
use super::unit::{AngularFrequencyUnit, FrequencyUnit, Unit, WavelengthUnit, WavenumberUnit};
use crate::error::{PhotonicsError, Result};
use crate::resample;

// ---------------------------------------------------------------------------
// QuantityArray – an immutable, ordered buffer of canonical values
// ---------------------------------------------------------------------------

/// Ordered samples of one physical kind, stored in its canonical unit.
///
/// The buffer is owned and never exposed mutably; every conversion returns a
/// new array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityArray<K: Kind> {
    values: Vec<f64>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

pub type WavelengthArray = QuantityArray<WavelengthKind>;
pub type FrequencyArray = QuantityArray<FrequencyKind>;
pub type AngularFrequencyArray = QuantityArray<AngularFrequencyKind>;
pub type WavenumberArray = QuantityArray<WavenumberKind>;

impl<K: Kind> QuantityArray<K> {
    /// Construct from raw samples and a unit symbol.
    pub fn new(values: impl Into<Vec<f64>>, unit: &str) -> Result<Self> {
        let unit: K::Unit = unit.parse()?;
        Ok(Self::from_unit(values, unit))
    }

    /// Construct from raw samples in a typed unit.
    pub fn from_unit(values: impl Into<Vec<f64>>, unit: K::Unit) -> Self {
        let mut values = values.into();
        for v in &mut values {
            *v = unit.to_canonical(*v);
        }
        Self::from_canonical(values)
    }

    pub(crate) fn from_canonical(values: Vec<f64>) -> Self {
        QuantityArray {
            values,
            kind: PhantomData,
        }
    }

    fn map_into<T: Kind>(&self, f: impl Fn(f64) -> f64) -> QuantityArray<T> {
        QuantityArray::from_canonical(self.values.iter().map(|&v| f(v)).collect())
    }

    /// Canonical values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values expressed in `unit`.
    pub fn in_unit(&self, unit: K::Unit) -> Vec<f64> {
        self.values.iter().map(|&v| unit.from_canonical(v)).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Quantity<K>> {
        self.values.get(index).map(|&v| Quantity::from_canonical(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = Quantity<K>> + '_ {
        self.values.iter().map(|&v| Quantity::from_canonical(v))
    }

    /// Smallest finite sample.
    pub fn min(&self) -> Option<Quantity<K>> {
        resample::min_max(&self.values).map(|(lo, _)| Quantity::from_canonical(lo))
    }

    /// Largest finite sample.
    pub fn max(&self) -> Option<Quantity<K>> {
        resample::min_max(&self.values).map(|(_, hi)| Quantity::from_canonical(hi))
    }

    /// `points` values evenly spaced from the minimum to the maximum sample.
    ///
    /// The grid is ascending for every kind, whatever the order of the
    /// stored samples.
    pub fn to_equally_spaced(&self, points: usize) -> Result<Self> {
        resample::equally_spaced(&self.values, points).map(Self::from_canonical)
    }

    /// A new array holding the samples at `indices`.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self::from_canonical(
            indices
                .iter()
                .filter_map(|&i| self.values.get(i).copied())
                .collect(),
        )
    }
}

impl<K: Kind> FromIterator<Quantity<K>> for QuantityArray<K> {
    fn from_iter<I: IntoIterator<Item = Quantity<K>>>(iter: I) -> Self {
        Self::from_canonical(iter.into_iter().map(|q| q.value()).collect())
    }
}

impl WavelengthArray {
    pub fn as_m(&self) -> Vec<f64> {
        self.values.clone()
    }

    pub fn as_um(&self) -> Vec<f64> {
        self.in_unit(WavelengthUnit::Um)
    }

    pub fn as_nm(&self) -> Vec<f64> {
        self.in_unit(WavelengthUnit::Nm)
    }

    pub fn to_freq(&self) -> FrequencyArray {
        self.map_into(scalar::wl_to_freq)
    }

    pub fn to_omega(&self) -> AngularFrequencyArray {
        self.map_into(scalar::wl_to_omega)
    }

    pub fn to_wavenumber(&self) -> WavenumberArray {
        self.map_into(scalar::wl_to_wavenumber)
    }
}

impl FrequencyArray {
    #[allow(non_snake_case)]
    pub fn as_Hz(&self) -> Vec<f64> {
        self.values.clone()
    }

    #[allow(non_snake_case)]
    pub fn as_THz(&self) -> Vec<f64> {
        self.in_unit(FrequencyUnit::THz)
    }

    #[allow(non_snake_case)]
    pub fn as_GHz(&self) -> Vec<f64> {
        self.in_unit(FrequencyUnit::GHz)
    }

    #[allow(non_snake_case)]
    pub fn as_MHz(&self) -> Vec<f64> {
        self.in_unit(FrequencyUnit::MHz)
    }

    pub fn to_wl(&self) -> WavelengthArray {
        self.map_into(scalar::freq_to_wl)
    }

    pub fn to_omega(&self) -> AngularFrequencyArray {
        self.map_into(scalar::freq_to_omega)
    }

    pub fn to_wavenumber(&self) -> WavenumberArray {
        self.map_into(scalar::freq_to_wavenumber)
    }
}

impl AngularFrequencyArray {
    pub fn as_rad_s(&self) -> Vec<f64> {
        self.values.clone()
    }

    pub fn as_rad_ps(&self) -> Vec<f64> {
        self.in_unit(AngularFrequencyUnit::RadPerPs)
    }

    pub fn to_wl(&self) -> WavelengthArray {
        self.map_into(scalar::omega_to_wl)
    }

    pub fn to_freq(&self) -> FrequencyArray {
        self.map_into(scalar::omega_to_freq)
    }

    pub fn to_wavenumber(&self) -> WavenumberArray {
        self.map_into(scalar::omega_to_wavenumber)
    }
}

impl WavenumberArray {
    pub fn as_per_m(&self) -> Vec<f64> {
        self.values.clone()
    }

    pub fn as_per_cm(&self) -> Vec<f64> {
        self.in_unit(WavenumberUnit::PerCm)
    }

    pub fn as_per_um(&self) -> Vec<f64> {
        self.in_unit(WavenumberUnit::PerUm)
    }

    pub fn to_wl(&self) -> WavelengthArray {
        self.map_into(scalar::wavenumber_to_wl)
    }

    pub fn to_freq(&self) -> FrequencyArray {
        self.map_into(scalar::wavenumber_to_freq)
    }

    pub fn to_omega(&self) -> AngularFrequencyArray {
        self.map_into(scalar::wavenumber_to_omega)
    }
}

// ---------------------------------------------------------------------------
// Axis – a quantity array whose kind is only known at runtime
// ---------------------------------------------------------------------------

/// A sample axis of any kind, e.g. the first column of a loaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Axis {
    Wavelength(WavelengthArray),
    Frequency(FrequencyArray),
    AngularFrequency(AngularFrequencyArray),
    Wavenumber(WavenumberArray),
}

impl Axis {
    /// Build an axis from a kind name (`wavelength`, `frequency`, `omega`,
    /// `wavenumber`), raw values and a unit symbol.
    pub fn parse(kind: &str, values: Vec<f64>, unit: &str) -> Result<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "wavelength" | "wl" | "lambda" => Ok(Axis::Wavelength(WavelengthArray::new(values, unit)?)),
            "frequency" | "freq" => Ok(Axis::Frequency(FrequencyArray::new(values, unit)?)),
            "omega" | "angular_frequency" => Ok(Axis::AngularFrequency(AngularFrequencyArray::new(
                values, unit,
            )?)),
            "wavenumber" | "k" => Ok(Axis::Wavenumber(WavenumberArray::new(values, unit)?)),
            other => Err(PhotonicsError::InvalidSamples(format!(
                "unknown axis kind '{other}'"
            ))),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Axis::Wavelength(_) => WavelengthKind::NAME,
            Axis::Frequency(_) => FrequencyKind::NAME,
            Axis::AngularFrequency(_) => AngularFrequencyKind::NAME,
            Axis::Wavenumber(_) => WavenumberKind::NAME,
        }
    }

    /// Canonical values regardless of kind.
    pub fn values(&self) -> &[f64] {
        match self {
            Axis::Wavelength(a) => a.values(),
            Axis::Frequency(a) => a.values(),
            Axis::AngularFrequency(a) => a.values(),
            Axis::Wavenumber(a) => a.values(),
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    pub fn as_wavelengths(&self) -> Result<&WavelengthArray> {
        match self {
            Axis::Wavelength(a) => Ok(a),
            other => Err(PhotonicsError::TypeMismatch {
                expected: WavelengthKind::NAME,
                found: other.kind_name(),
            }),
        }
    }

    pub fn as_angular_frequencies(&self) -> Result<&AngularFrequencyArray> {
        match self {
            Axis::AngularFrequency(a) => Ok(a),
            other => Err(PhotonicsError::TypeMismatch {
                expected: AngularFrequencyKind::NAME,
                found: other.kind_name(),
            }),
        }
    }

    /// The same samples as wavelengths, converting when needed.
    pub fn to_wavelengths(&self) -> WavelengthArray {
        match self {
            Axis::Wavelength(a) => a.clone(),
            Axis::Frequency(a) => a.to_wl(),
            Axis::AngularFrequency(a) => a.to_wl(),
            Axis::Wavenumber(a) => a.to_wl(),
        }
    }

    /// The same samples as angular frequencies, converting when needed.
    pub fn to_omega(&self) -> AngularFrequencyArray {
        match self {
            Axis::Wavelength(a) => a.to_omega(),
            Axis::Frequency(a) => a.to_omega(),
            Axis::AngularFrequency(a) => a.clone(),
            Axis::Wavenumber(a) => a.to_omega(),
        }
    }

    /// A new axis of the same kind holding the samples at `indices`.
    pub fn select(&self, indices: &[usize]) -> Self {
        match self {
            Axis::Wavelength(a) => Axis::Wavelength(a.select(indices)),
            Axis::Frequency(a) => Axis::Frequency(a.select(indices)),
            Axis::AngularFrequency(a) => Axis::AngularFrequency(a.select(indices)),
            Axis::Wavenumber(a) => Axis::Wavenumber(a.select(indices)),
        }
    }
}

impl From<WavelengthArray> for Axis {
    fn from(a: WavelengthArray) -> Self {
        Axis::Wavelength(a)
    }
}

impl From<FrequencyArray> for Axis {
    fn from(a: FrequencyArray) -> Self {
        Axis::Frequency(a)
    }
}

impl From<AngularFrequencyArray> for Axis {
    fn from(a: AngularFrequencyArray) -> Self {
        Axis::AngularFrequency(a)
    }
}

impl From<WavenumberArray> for Axis {
    fn from(a: WavenumberArray) -> Self {
        Axis::Wavenumber(a)
    }
}
