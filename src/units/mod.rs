//! Unit-tagged quantities: wavelength, frequency, angular frequency and
//! wavenumber, as scalars and as ordered arrays.
//!
//! Conversion graph (canonical units on the nodes):
//! ```text
//!   Wavelength [m] ──── λ = c/f ──── Frequency [Hz]
//!        │ ╲                              │
//!    k = 1/λ  ╲ ω = 2πc/λ             ω = 2πf
//!        │      ╲                         │
//!   Wavenumber [1/m] ──────────── AngularFrequency [rad/s]
//! ```
//!
//! Every edge is a closed-form identity returning a new value; nothing is
//! mutated in place.

pub mod array;
pub mod kind;
pub mod scalar;
pub mod unit;

pub use array::{
    AngularFrequencyArray, Axis, FrequencyArray, QuantityArray, WavelengthArray, WavenumberArray,
};
pub use kind::{AngularFrequencyKind, FrequencyKind, Kind, WavelengthKind, WavenumberKind};
pub use scalar::{AngularFrequency, Frequency, Quantity, Wavelength, Wavenumber};
pub use unit::{
    convert_length, convert_time, AngularFrequencyUnit, DispersionUnit, FrequencyUnit, TimeUnit,
    Unit, WavelengthUnit, WavenumberUnit,
};
