use crate::resample::outside_range;
use crate::units::{Unit, Wavelength, WavelengthArray, WavelengthUnit};

use super::model::SampleTable;

/// Indices of samples whose wavelength lies in `[min, max]` (inclusive,
/// either order). NaN wavelengths never pass.
pub fn band_indices(wavelengths: &WavelengthArray, min: Wavelength, max: Wavelength) -> Vec<usize> {
    let (lo, hi) = if min.as_m() <= max.as_m() {
        (min.as_m(), max.as_m())
    } else {
        (max.as_m(), min.as_m())
    };
    wavelengths
        .as_m()
        .iter()
        .enumerate()
        .filter(|(_, &wl)| !outside_range(wl, lo, hi))
        .map(|(i, _)| i)
        .collect()
}

/// Restrict `table` to a wavelength band given in `unit`. Tables on an
/// angular-frequency axis are compared through their wavelengths.
pub fn select_band(table: &SampleTable, min: f64, max: f64, unit: WavelengthUnit) -> SampleTable {
    let wavelengths = table.axis.to_wavelengths();
    let indices = band_indices(
        &wavelengths,
        Wavelength::from_unit(min, unit),
        Wavelength::from_unit(max, unit),
    );
    log::debug!(
        "Band {min}..{max} {} keeps {} of {} samples",
        unit.symbol(),
        indices.len(),
        table.len()
    );
    table.select(&indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Axis;
    use std::collections::BTreeMap;

    #[test]
    fn band_is_inclusive_and_order_free() {
        let wl = WavelengthArray::new(vec![1500.0, 1550.0, f64::NAN, 1600.0, 1650.0], "nm").unwrap();
        let lo = Wavelength::new(1550.0, "nm").unwrap();
        let hi = Wavelength::new(1600.0, "nm").unwrap();
        assert_eq!(band_indices(&wl, lo, hi), vec![1, 3]);
        assert_eq!(band_indices(&wl, hi, lo), vec![1, 3]);
    }

    #[test]
    fn select_band_on_omega_axis() {
        let omega = WavelengthArray::new(vec![1500.0, 1550.0, 1600.0], "nm")
            .unwrap()
            .to_omega();
        let mut columns = BTreeMap::new();
        columns.insert("beta".to_string(), vec![1.0, 2.0, 3.0]);
        let table = SampleTable::new(Axis::from(omega), columns).unwrap();

        let band = select_band(&table, 1540.0, 1700.0, WavelengthUnit::Nm);
        assert_eq!(band.column("beta").unwrap(), &[2.0, 3.0]);
        assert!(band.axis.as_angular_frequencies().is_ok());
    }

    #[test]
    fn band_edges_given_in_another_unit() {
        let wl = WavelengthArray::new(crate::resample::linspace(1.5, 1.6, 11), "um").unwrap();
        let lo = Wavelength::new(1500.0, "nm").unwrap();
        let hi = Wavelength::new(1600.0, "nm").unwrap();
        assert_eq!(band_indices(&wl, lo, hi).len(), 11);
    }
}
