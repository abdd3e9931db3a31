//! Fiber dispersion derived from effective-index or propagation-constant
//! samples.
//!
//! ```text
//!  neff(λ) ──┐                         ┌── fn / beta2_at
//!            ├─ spline → grid → spline ─┤
//!  β(ω)   ──┘        d²/dx²            └── Dispersion (s/m²)
//! ```

pub mod dispersion;
pub mod propagation;

pub use dispersion::Dispersion;
pub use propagation::PropagationConstant;
