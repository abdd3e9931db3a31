use thiserror::Error;

/// Errors raised by quantity construction and the fiber derivations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhotonicsError {
    #[error("Unsupported {kind} unit: '{unit}', use one of {expected}")]
    InvalidUnit {
        kind: &'static str,
        unit: String,
        expected: String,
    },

    #[error("Length mismatch: {left} has {left_len} values but {right} has {right_len}")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("Type mismatch: expected {expected} axis, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Wavelength {value} {unit} is outside the available range [{min}, {max}] {unit}")]
    OutOfRange {
        value: f64,
        min: f64,
        max: f64,
        unit: String,
    },

    #[error(
        "Numerical differentiation is not smooth: jump of {jump} ps/(nm.km) at sample {index} \
         exceeds {threshold}; consider deriving the dispersion another way"
    )]
    NumericalInstability {
        index: usize,
        jump: f64,
        threshold: f64,
    },

    #[error("Insufficient samples: at least {required} required, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("Invalid samples: {0}")]
    InvalidSamples(String),
}

impl PhotonicsError {
    /// Whether the error describes the quality of the input data rather than
    /// a misuse of the API.
    pub fn is_data_quality(&self) -> bool {
        matches!(self, PhotonicsError::NumericalInstability { .. })
    }

    /// Build an [`PhotonicsError::OutOfRange`] with bounds rounded for display.
    pub(crate) fn out_of_range(value: f64, min: f64, max: f64, unit: &str) -> Self {
        PhotonicsError::OutOfRange {
            value: round_significant(value),
            min: round_significant(min),
            max: round_significant(max),
            unit: unit.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PhotonicsError>;

/// Round to 9 significant digits so unit scaling noise
/// (1599.9999999999998) does not leak into messages.
fn round_significant(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let exp = x.abs().log10().floor() as i32;
    let shift = 8 - exp;
    if shift >= 0 {
        let scale = 10f64.powi(shift);
        (x * scale).round() / scale
    } else {
        let scale = 10f64.powi(-shift);
        (x / scale).round() * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_hides_scaling_noise() {
        assert_eq!(round_significant(1599.9999999999998), 1600.0);
        assert_eq!(round_significant(1.6000000000000001e-6), 1.6e-6);
        assert_eq!(round_significant(0.0), 0.0);
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = PhotonicsError::out_of_range(1400.0, 1500.0000000000002, 1599.9999999999998, "nm");
        let msg = err.to_string();
        assert!(msg.contains("1500"), "{msg}");
        assert!(msg.contains("1600"), "{msg}");
        assert!(!msg.contains("1599.99"), "{msg}");
    }

    #[test]
    fn only_instability_is_data_quality() {
        let unstable = PhotonicsError::NumericalInstability {
            index: 3,
            jump: 120.0,
            threshold: 50.0,
        };
        assert!(unstable.is_data_quality());
        assert!(!PhotonicsError::InvalidSamples("x".into()).is_data_quality());
    }
}
