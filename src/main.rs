use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use photonics_helper::data::{filter, load_file, write_file, SampleTable};
use photonics_helper::units::{
    AngularFrequency, AngularFrequencyUnit, DispersionUnit, Frequency, FrequencyUnit, Unit,
    Wavelength, WavelengthUnit, Wavenumber, WavenumberUnit,
};
use photonics_helper::{DerivationOptions, Dispersion, PropagationConstant};

/// Unit conversion and fiber dispersion from tabulated samples
#[derive(Parser, Debug)]
#[command(name = "photonics-helper", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a value between wavelength, frequency, angular frequency and
    /// wavenumber units
    Convert {
        value: f64,

        /// Unit of VALUE, e.g. nm, THz, rad/s, 1/cm
        unit: String,

        /// Target unit
        #[arg(long)]
        to: String,
    },

    /// Derive the dispersion curve D(λ) from a sample table
    Dispersion {
        /// Table with a kind[unit] axis column (.csv, .json or .parquet)
        file: PathBuf,

        /// Column holding neff or β samples
        #[arg(long, default_value = "neff")]
        column: String,

        /// How to interpret the column
        #[arg(long, value_enum, default_value_t = Method::Neff)]
        method: Method,

        /// Evaluate D at these wavelengths (nm) instead of printing the curve
        #[arg(long, num_args = 1..)]
        at: Vec<f64>,

        /// Keep only samples between LO and HI nm before fitting
        #[arg(long, num_args = 2, value_names = ["LO", "HI"])]
        band: Option<Vec<f64>>,

        /// JSON file with derivation options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output unit: ps/nm.km or s/m^2
        #[arg(long, default_value = "ps/nm.km")]
        unit: String,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Compute β = neff·ω/c from a neff table
    Beta {
        file: PathBuf,

        #[arg(long, default_value = "neff")]
        column: String,

        /// Write the table with an added `beta` column here
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Effective refractive index over wavelength
    Neff,
    /// Propagation constant over wavelength or angular frequency
    Beta,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { value, unit, to } => convert(value, &unit, &to),
        Command::Dispersion {
            file,
            column,
            method,
            at,
            band,
            config,
            unit,
            format,
        } => {
            let options = match config {
                Some(path) => DerivationOptions::from_json_file(&path)?,
                None => DerivationOptions::default(),
            };
            let unit: DispersionUnit = unit.parse()?;
            let mut table = load_file(&file)?;
            if let Some(band) = band {
                table = filter::select_band(&table, band[0], band[1], WavelengthUnit::Nm);
            }
            let dispersion = derive(&table, &column, method, &options)?;
            if at.is_empty() {
                print_curve(&dispersion, unit, format)
            } else {
                print_points(&dispersion, &at, unit, format)
            }
        }
        Command::Beta {
            file,
            column,
            output,
        } => {
            let mut table = load_file(&file)?;
            let beta = PropagationConstant::beta2_from_neff(table.column(&column)?, table.axis.clone())?;
            table.columns.insert("beta".to_string(), beta.values().to_vec());
            match output {
                Some(path) => write_file(&table, &path),
                None => print_columns(&table),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

/// A scalar of whichever kind its unit symbol names.
#[derive(Debug, Clone, Copy)]
enum AnyQuantity {
    Wavelength(Wavelength),
    Frequency(Frequency),
    AngularFrequency(AngularFrequency),
    Wavenumber(Wavenumber),
}

fn parse_quantity(value: f64, unit: &str) -> Result<AnyQuantity> {
    if let Ok(u) = unit.parse::<WavelengthUnit>() {
        return Ok(AnyQuantity::Wavelength(Wavelength::from_unit(value, u)));
    }
    if let Ok(u) = unit.parse::<FrequencyUnit>() {
        return Ok(AnyQuantity::Frequency(Frequency::from_unit(value, u)));
    }
    if let Ok(u) = unit.parse::<AngularFrequencyUnit>() {
        return Ok(AnyQuantity::AngularFrequency(AngularFrequency::from_unit(value, u)));
    }
    if let Ok(u) = unit.parse::<WavenumberUnit>() {
        return Ok(AnyQuantity::Wavenumber(Wavenumber::from_unit(value, u)));
    }
    bail!("Unknown unit '{unit}'")
}

impl AnyQuantity {
    fn to_wl(self) -> Wavelength {
        match self {
            AnyQuantity::Wavelength(q) => q,
            AnyQuantity::Frequency(q) => q.to_wl(),
            AnyQuantity::AngularFrequency(q) => q.to_wl(),
            AnyQuantity::Wavenumber(q) => q.to_wl(),
        }
    }

    fn to_freq(self) -> Frequency {
        match self {
            AnyQuantity::Frequency(q) => q,
            AnyQuantity::Wavelength(q) => q.to_freq(),
            AnyQuantity::AngularFrequency(q) => q.to_freq(),
            AnyQuantity::Wavenumber(q) => q.to_freq(),
        }
    }

    fn to_omega(self) -> AngularFrequency {
        match self {
            AnyQuantity::AngularFrequency(q) => q,
            AnyQuantity::Wavelength(q) => q.to_omega(),
            AnyQuantity::Frequency(q) => q.to_omega(),
            AnyQuantity::Wavenumber(q) => q.to_omega(),
        }
    }

    fn to_wavenumber(self) -> Wavenumber {
        match self {
            AnyQuantity::Wavenumber(q) => q,
            AnyQuantity::Wavelength(q) => q.to_wavenumber(),
            AnyQuantity::Frequency(q) => q.to_wavenumber(),
            AnyQuantity::AngularFrequency(q) => q.to_wavenumber(),
        }
    }
}

fn convert(value: f64, unit: &str, to: &str) -> Result<()> {
    let quantity = parse_quantity(value, unit)?;
    let converted = if let Ok(u) = to.parse::<WavelengthUnit>() {
        quantity.to_wl().in_unit(u)
    } else if let Ok(u) = to.parse::<FrequencyUnit>() {
        quantity.to_freq().in_unit(u)
    } else if let Ok(u) = to.parse::<AngularFrequencyUnit>() {
        quantity.to_omega().in_unit(u)
    } else if let Ok(u) = to.parse::<WavenumberUnit>() {
        quantity.to_wavenumber().in_unit(u)
    } else {
        bail!("Unknown unit '{to}'")
    };
    println!("{value} {unit} = {converted} {to}");
    Ok(())
}

// ---------------------------------------------------------------------------
// dispersion
// ---------------------------------------------------------------------------

fn derive(
    table: &SampleTable,
    column: &str,
    method: Method,
    options: &DerivationOptions,
) -> Result<Dispersion> {
    let values = table.column(column)?;
    let dispersion = match method {
        Method::Neff => {
            let wavelengths = table
                .axis
                .as_wavelengths()
                .context("neff samples must be tabulated over wavelength")?;
            Dispersion::from_neff_with(values, wavelengths, options)?
        }
        Method::Beta => {
            let beta = PropagationConstant::new(values.to_vec(), table.axis.clone())?;
            Dispersion::from_propagation_constant_with(beta.values(), &beta.axis().to_wavelengths(), options)?
        }
    };
    Ok(dispersion)
}

#[derive(Serialize)]
struct CurveRow {
    wavelength_nm: f64,
    dispersion: f64,
}

#[derive(Serialize)]
struct CurveReport<'a> {
    unit: &'a str,
    rows: Vec<CurveRow>,
}

fn print_curve(dispersion: &Dispersion, unit: DispersionUnit, format: Format) -> Result<()> {
    let rows = dispersion
        .wavelengths()
        .as_nm()
        .into_iter()
        .zip(dispersion.as_s_m2())
        .map(|(wavelength_nm, &d)| CurveRow {
            wavelength_nm,
            dispersion: unit.from_canonical(d),
        })
        .collect();
    let curve = CurveReport {
        unit: unit.symbol(),
        rows,
    };
    report(curve, format)
}

fn print_points(dispersion: &Dispersion, at_nm: &[f64], unit: DispersionUnit, format: Format) -> Result<()> {
    let rows = at_nm
        .iter()
        .map(|&wl| {
            Ok(CurveRow {
                wavelength_nm: wl,
                dispersion: dispersion.evaluate(wl, WavelengthUnit::Nm, unit)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let curve = CurveReport {
        unit: unit.symbol(),
        rows,
    };
    report(curve, format)
}

fn report(curve: CurveReport<'_>, format: Format) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &curve)?;
            writeln!(out)?;
        }
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            let header = format!("dispersion[{}]", curve.unit);
            writer.write_record(["wavelength[nm]", header.as_str()])?;
            for row in &curve.rows {
                writer.write_record([row.wavelength_nm.to_string(), row.dispersion.to_string()])?;
            }
            writer.flush()?;
        }
        Format::Table => {
            writeln!(out, "{:>14}  {:>16}", "wavelength nm", curve.unit)?;
            for row in &curve.rows {
                writeln!(out, "{:>14.3}  {:>16.6e}", row.wavelength_nm, row.dispersion)?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// beta
// ---------------------------------------------------------------------------

fn print_columns(table: &SampleTable) -> Result<()> {
    let (headers, data) = table.to_columns();
    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
    writer.write_record(&headers)?;
    for row in 0..table.len() {
        writer.write_record(data.iter().map(|col| col[row].to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
