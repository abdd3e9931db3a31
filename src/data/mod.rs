//! Data layer: sample tables, loading, and band selection.
//!
//! Architecture:
//! ```text
//!  .parquet / .json / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → SampleTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ SampleTable  │  kind[unit] axis + named columns
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  wavelength band → row indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  writer   │  SampleTable → file (same layouts)
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;

pub use loader::load_file;
pub use model::{AxisHeader, SampleTable};
pub use writer::write_file;
