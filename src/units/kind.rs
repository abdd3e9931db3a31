use std::fmt;

use serde::{Deserialize, Serialize};

use super::unit::{AngularFrequencyUnit, FrequencyUnit, Unit, WavelengthUnit, WavenumberUnit};

/// Marker for one physical kind. Quantities of different kinds never mix
/// without an explicit `to_*` conversion.
pub trait Kind: Copy + Default + fmt::Debug + PartialEq + PartialOrd + 'static {
    type Unit: Unit;

    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WavelengthKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrequencyKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AngularFrequencyKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WavenumberKind;

impl Kind for WavelengthKind {
    type Unit = WavelengthUnit;
    const NAME: &'static str = "wavelength";
}

impl Kind for FrequencyKind {
    type Unit = FrequencyUnit;
    const NAME: &'static str = "frequency";
}

impl Kind for AngularFrequencyKind {
    type Unit = AngularFrequencyUnit;
    const NAME: &'static str = "angular frequency";
}

impl Kind for WavenumberKind {
    type Unit = WavenumberUnit;
    const NAME: &'static str = "wavenumber";
}
