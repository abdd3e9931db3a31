use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PhotonicsError, Result};

// ---------------------------------------------------------------------------
// Unit trait – a named multiplicative scale into the canonical unit
// ---------------------------------------------------------------------------

/// A unit of one physical kind.
///
/// `factor()` converts a value given in this unit into the canonical unit of
/// the kind by multiplication; dividing by it converts back.
pub trait Unit: Copy + fmt::Debug + fmt::Display + FromStr<Err = PhotonicsError> + 'static {
    /// The canonical (storage) unit.
    const CANONICAL: Self;

    /// Human readable kind name used in error messages.
    const KIND: &'static str;

    /// Every recognised unit, in display order.
    const ALL: &'static [Self];

    fn factor(self) -> f64;

    fn symbol(self) -> &'static str;

    /// Convert `value` given in this unit into the canonical unit.
    fn to_canonical(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Convert a canonical `value` into this unit.
    fn from_canonical(self, value: f64) -> f64 {
        value / self.factor()
    }
}

fn parse_unit<U: Unit>(s: &str) -> Result<U> {
    U::ALL
        .iter()
        .copied()
        .find(|u| u.symbol() == s)
        .ok_or_else(|| invalid_unit::<U>(s))
}

fn invalid_unit<U: Unit>(s: &str) -> PhotonicsError {
    let expected = U::ALL
        .iter()
        .map(|u| format!("'{}'", u.symbol()))
        .collect::<Vec<_>>()
        .join(", ");
    PhotonicsError::InvalidUnit {
        kind: U::KIND,
        unit: s.to_string(),
        expected,
    }
}

// ---------------------------------------------------------------------------
// Wavelength
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WavelengthUnit {
    Nm,
    Um,
    M,
}

impl Unit for WavelengthUnit {
    const CANONICAL: Self = WavelengthUnit::M;
    const KIND: &'static str = "wavelength";
    const ALL: &'static [Self] = &[WavelengthUnit::Nm, WavelengthUnit::Um, WavelengthUnit::M];

    fn factor(self) -> f64 {
        match self {
            WavelengthUnit::Nm => 1e-9,
            WavelengthUnit::Um => 1e-6,
            WavelengthUnit::M => 1.0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            WavelengthUnit::Nm => "nm",
            WavelengthUnit::Um => "um",
            WavelengthUnit::M => "m",
        }
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyUnit {
    THz,
    GHz,
    MHz,
    Hz,
}

impl Unit for FrequencyUnit {
    const CANONICAL: Self = FrequencyUnit::Hz;
    const KIND: &'static str = "frequency";
    const ALL: &'static [Self] = &[
        FrequencyUnit::THz,
        FrequencyUnit::GHz,
        FrequencyUnit::MHz,
        FrequencyUnit::Hz,
    ];

    fn factor(self) -> f64 {
        match self {
            FrequencyUnit::THz => 1e12,
            FrequencyUnit::GHz => 1e9,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::Hz => 1.0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            FrequencyUnit::THz => "THz",
            FrequencyUnit::GHz => "GHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::Hz => "Hz",
        }
    }
}

// ---------------------------------------------------------------------------
// Angular frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngularFrequencyUnit {
    RadPerS,
    RadPerPs,
}

impl Unit for AngularFrequencyUnit {
    const CANONICAL: Self = AngularFrequencyUnit::RadPerS;
    const KIND: &'static str = "angular frequency";
    const ALL: &'static [Self] = &[AngularFrequencyUnit::RadPerS, AngularFrequencyUnit::RadPerPs];

    // rad/ps keeps the library's historical scale: 628 rad/ps reads back as
    // 628e-12 rad/s, and `as_rad_ps` is the exact inverse.
    fn factor(self) -> f64 {
        match self {
            AngularFrequencyUnit::RadPerS => 1.0,
            AngularFrequencyUnit::RadPerPs => 1e-12,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            AngularFrequencyUnit::RadPerS => "rad/s",
            AngularFrequencyUnit::RadPerPs => "rad/ps",
        }
    }
}

// ---------------------------------------------------------------------------
// Wavenumber (k = 1/λ)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WavenumberUnit {
    PerM,
    PerCm,
    PerUm,
}

impl Unit for WavenumberUnit {
    const CANONICAL: Self = WavenumberUnit::PerM;
    const KIND: &'static str = "wavenumber";
    const ALL: &'static [Self] = &[WavenumberUnit::PerM, WavenumberUnit::PerCm, WavenumberUnit::PerUm];

    fn factor(self) -> f64 {
        match self {
            WavenumberUnit::PerM => 1.0,
            WavenumberUnit::PerCm => 1e2,
            WavenumberUnit::PerUm => 1e6,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            WavenumberUnit::PerM => "1/m",
            WavenumberUnit::PerCm => "1/cm",
            WavenumberUnit::PerUm => "1/um",
        }
    }
}

// ---------------------------------------------------------------------------
// Time (pulse durations and periods)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    S,
    Ns,
    Ps,
    Fs,
    As,
}

impl Unit for TimeUnit {
    const CANONICAL: Self = TimeUnit::S;
    const KIND: &'static str = "time";
    const ALL: &'static [Self] = &[TimeUnit::S, TimeUnit::Ns, TimeUnit::Ps, TimeUnit::Fs, TimeUnit::As];

    fn factor(self) -> f64 {
        match self {
            TimeUnit::S => 1.0,
            TimeUnit::Ns => 1e-9,
            TimeUnit::Ps => 1e-12,
            TimeUnit::Fs => 1e-15,
            TimeUnit::As => 1e-18,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            TimeUnit::S => "s",
            TimeUnit::Ns => "ns",
            TimeUnit::Ps => "ps",
            TimeUnit::Fs => "fs",
            TimeUnit::As => "as",
        }
    }
}

// ---------------------------------------------------------------------------
// Dispersion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispersionUnit {
    /// s/m², canonical.
    SPerM2,
    /// ps/(nm·km), the customary fiber unit.
    PsPerNmKm,
}

impl Unit for DispersionUnit {
    const CANONICAL: Self = DispersionUnit::SPerM2;
    const KIND: &'static str = "dispersion";
    const ALL: &'static [Self] = &[DispersionUnit::SPerM2, DispersionUnit::PsPerNmKm];

    fn factor(self) -> f64 {
        match self {
            DispersionUnit::SPerM2 => 1.0,
            DispersionUnit::PsPerNmKm => 1e-6,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            DispersionUnit::SPerM2 => "s/m^2",
            DispersionUnit::PsPerNmKm => "ps/nm.km",
        }
    }
}

// -- FromStr / Display for every unit --

impl FromStr for WavelengthUnit {
    type Err = PhotonicsError;

    fn from_str(s: &str) -> Result<Self> {
        parse_unit(s)
    }
}

impl FromStr for FrequencyUnit {
    type Err = PhotonicsError;

    fn from_str(s: &str) -> Result<Self> {
        parse_unit(s)
    }
}

impl FromStr for AngularFrequencyUnit {
    type Err = PhotonicsError;

    fn from_str(s: &str) -> Result<Self> {
        parse_unit(s)
    }
}

impl FromStr for WavenumberUnit {
    type Err = PhotonicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "m^-1" => Ok(WavenumberUnit::PerM),
            "cm^-1" => Ok(WavenumberUnit::PerCm),
            "um^-1" => Ok(WavenumberUnit::PerUm),
            _ => parse_unit(s),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = PhotonicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            // Older scripts spell attoseconds "os".
            "os" => Ok(TimeUnit::As),
            _ => parse_unit(s),
        }
    }
}

impl FromStr for DispersionUnit {
    type Err = PhotonicsError;

    fn from_str(s: &str) -> Result<Self> {
        parse_unit(s)
    }
}

macro_rules! display_symbol {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.symbol())
                }
            }
        )*
    };
}

display_symbol!(
    WavelengthUnit,
    FrequencyUnit,
    AngularFrequencyUnit,
    WavenumberUnit,
    TimeUnit,
    DispersionUnit
);

// ---------------------------------------------------------------------------
// Plain scale helpers
// ---------------------------------------------------------------------------

/// Convert a length between units.
pub fn convert_length(value: f64, from: WavelengthUnit, to: WavelengthUnit) -> f64 {
    to.from_canonical(from.to_canonical(value))
}

/// Convert a duration between units.
pub fn convert_time(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    to.from_canonical(from.to_canonical(value))
}
