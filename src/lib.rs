//! Photonics helpers: typed optical quantities, fiber dispersion from
//! effective-index or propagation-constant samples, refractive-index
//! spectra and pulse bookkeeping.
//!
//! ```text
//!   units ── Wavelength / Frequency / AngularFrequency / Wavenumber
//!     │
//!     ├── resample ── spline
//!     │                  │
//!     ▼                  ▼
//!   fiber ── Dispersion, PropagationConstant
//!     ▲
//!   data ── SampleTable from .csv / .json / .parquet
//! ```

pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod fiber;
pub mod materials;
pub mod pulse;
pub mod resample;
pub mod spline;
pub mod units;

pub use config::DerivationOptions;
pub use constants::{C_MS, PI};
pub use error::{PhotonicsError, Result};
pub use fiber::{Dispersion, PropagationConstant};
pub use materials::RefractiveIndex;
pub use pulse::{Pulse, RectangularPulse};
pub use units::{
    AngularFrequency, AngularFrequencyArray, Axis, Frequency, FrequencyArray, Wavelength,
    WavelengthArray, Wavenumber, WavenumberArray,
};
