use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PhotonicsError;
use crate::resample::DEFAULT_POINTS;

// ---------------------------------------------------------------------------
// Derivation options
// ---------------------------------------------------------------------------

/// Tuning of the spline-based dispersion derivations.
///
/// Missing fields in a JSON file fall back to [`Default`]:
///
/// ```json
/// { "grid_points": 101, "smoothness_threshold": 25.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationOptions {
    /// Size of the equally spaced grid the samples are regularised onto.
    pub grid_points: usize,

    /// Largest accepted jump between neighbouring dispersion values,
    /// ps/(nm·km).
    pub smoothness_threshold: f64,

    /// Fewest samples accepted for a second-derivative estimate.
    pub min_samples: usize,
}

impl Default for DerivationOptions {
    fn default() -> Self {
        Self {
            grid_points: DEFAULT_POINTS,
            smoothness_threshold: 50.0,
            min_samples: 4,
        }
    }
}

impl DerivationOptions {
    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading options file {}", path.display()))?;
        let options: DerivationOptions =
            serde_json::from_str(&text).context("parsing derivation options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> std::result::Result<(), PhotonicsError> {
        if self.grid_points < 4 {
            return Err(PhotonicsError::InvalidSamples(format!(
                "grid_points must be at least 4, got {}",
                self.grid_points
            )));
        }
        if self.min_samples < 2 {
            return Err(PhotonicsError::InvalidSamples(format!(
                "min_samples must be at least 2, got {}",
                self.min_samples
            )));
        }
        if !(self.smoothness_threshold > 0.0) {
            return Err(PhotonicsError::InvalidSamples(format!(
                "smoothness_threshold must be positive, got {}",
                self.smoothness_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let options = DerivationOptions::default();
        assert_eq!(options.grid_points, 51);
        assert_eq!(options.smoothness_threshold, 50.0);
        assert_eq!(options.min_samples, 4);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_points": 101 }}"#).unwrap();
        let options = DerivationOptions::from_json_file(file.path()).unwrap();
        assert_eq!(options.grid_points, 101);
        assert_eq!(options.smoothness_threshold, 50.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let options = DerivationOptions {
            grid_points: 2,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = DerivationOptions {
            smoothness_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
