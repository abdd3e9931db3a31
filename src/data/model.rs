use std::collections::BTreeMap;

use crate::error::{PhotonicsError, Result};
use crate::units::{AngularFrequencyUnit, Axis, FrequencyUnit, Unit, WavelengthUnit, WavenumberUnit};

// ---------------------------------------------------------------------------
// AxisHeader – `kind[unit]` column names
// ---------------------------------------------------------------------------

/// A parsed axis column header such as `wavelength[nm]` or `omega[rad/s]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisHeader {
    pub kind: String,
    pub unit: String,
}

impl AxisHeader {
    /// Parse `kind[unit]`; returns `None` for headers without a unit.
    pub fn parse(header: &str) -> Option<Self> {
        let header = header.trim();
        let open = header.find('[')?;
        let unit = header[open + 1..].strip_suffix(']')?;
        let kind = header[..open].trim();
        if kind.is_empty() || unit.is_empty() {
            return None;
        }
        Some(AxisHeader {
            kind: kind.to_string(),
            unit: unit.trim().to_string(),
        })
    }

    pub fn to_axis(&self, values: Vec<f64>) -> Result<Axis> {
        Axis::parse(&self.kind, values, &self.unit)
    }

    /// Header and values used when writing `axis` back out.
    pub fn for_axis(axis: &Axis) -> (Self, Vec<f64>) {
        let (kind, unit, values) = match axis {
            Axis::Wavelength(a) => ("wavelength", WavelengthUnit::Nm.symbol(), a.as_nm()),
            Axis::Frequency(a) => ("frequency", FrequencyUnit::THz.symbol(), a.as_THz()),
            Axis::AngularFrequency(a) => ("omega", AngularFrequencyUnit::RadPerS.symbol(), a.as_rad_s()),
            Axis::Wavenumber(a) => ("wavenumber", WavenumberUnit::PerCm.symbol(), a.as_per_cm()),
        };
        let header = AxisHeader {
            kind: kind.to_string(),
            unit: unit.to_string(),
        };
        (header, values)
    }
}

impl std::fmt::Display for AxisHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.kind, self.unit)
    }
}

// ---------------------------------------------------------------------------
// SampleTable – one axis plus named series of equal length
// ---------------------------------------------------------------------------

/// Tabulated fiber data: an axis column and any number of value columns
/// (`neff`, `beta`, ...) sampled on it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    pub axis: Axis,
    /// column_name → samples, each as long as `axis`.
    pub columns: BTreeMap<String, Vec<f64>>,
}

impl SampleTable {
    pub fn new(axis: Axis, columns: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        for (name, values) in &columns {
            if values.len() != axis.len() {
                return Err(PhotonicsError::InvalidSamples(format!(
                    "column '{name}' has {} values but the axis has {}",
                    values.len(),
                    axis.len()
                )));
            }
        }
        Ok(SampleTable { axis, columns })
    }

    /// Build from a header row and column-major data; exactly one header
    /// must be an axis header.
    pub fn from_columns(headers: &[String], data: Vec<Vec<f64>>) -> Result<Self> {
        let axis_positions: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| AxisHeader::parse(h).is_some())
            .map(|(i, _)| i)
            .collect();

        let axis_idx = match axis_positions.as_slice() {
            [i] => *i,
            [] => {
                return Err(PhotonicsError::InvalidSamples(
                    "no axis column of the form kind[unit] found".into(),
                ))
            }
            _ => {
                return Err(PhotonicsError::InvalidSamples(
                    "more than one axis column found".into(),
                ))
            }
        };

        let mut axis_values = None;
        let mut columns = BTreeMap::new();
        for (i, (header, values)) in headers.iter().zip(data).enumerate() {
            if i == axis_idx {
                axis_values = Some(values);
            } else {
                columns.insert(header.trim().to_string(), values);
            }
        }

        let header = AxisHeader::parse(&headers[axis_idx])
            .ok_or_else(|| PhotonicsError::InvalidSamples("axis header vanished".into()))?;
        let axis = header.to_axis(axis_values.unwrap_or_default())?;
        Self::new(axis, columns)
    }

    /// Samples of one named column.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns.get(name).map(Vec::as_slice).ok_or_else(|| {
            PhotonicsError::InvalidSamples(format!(
                "no column '{name}', available: {}",
                self.column_names().join(", ")
            ))
        })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }

    /// A new table holding only the rows at `indices`.
    pub fn select(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let picked = indices.iter().filter_map(|&i| values.get(i).copied()).collect();
                (name.clone(), picked)
            })
            .collect();
        SampleTable {
            axis: self.axis.select(indices),
            columns,
        }
    }

    /// Axis column first, then value columns in name order.
    pub fn to_columns(&self) -> (Vec<String>, Vec<Vec<f64>>) {
        let (header, axis_values) = AxisHeader::for_axis(&self.axis);
        let mut headers = vec![header.to_string()];
        let mut data = vec![axis_values];
        for (name, values) in &self.columns {
            headers.push(name.clone());
            data.push(values.clone());
        }
        (headers, data)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }
}
