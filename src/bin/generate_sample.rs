use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use photonics_helper::data::{write_file, SampleTable};
use photonics_helper::units::Axis;
use photonics_helper::{PropagationConstant, RefractiveIndex};

const SILICA_A: [f64; 3] = [0.6961663, 0.4079426, 0.8974794];
const SILICA_B: [f64; 3] = [0.0684043, 0.1162414, 9.896161];

/// Write a synthetic single-mode fiber table (neff and β) for trying the
/// dispersion pipeline.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file; the extension picks the format (.csv, .json, .parquet)
    #[arg(default_value = "sample_fiber.parquet")]
    output: PathBuf,

    /// First wavelength, nm
    #[arg(long, default_value_t = 1300.0)]
    from_nm: f64,

    /// Last wavelength, nm
    #[arg(long, default_value_t = 1700.0)]
    to_nm: f64,

    #[arg(long, default_value_t = 201)]
    points: usize,

    /// Standard deviation of Gaussian noise added to neff
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Axis written to the table
    #[arg(long, value_enum, default_value_t = AxisKind::Wavelength)]
    axis: AxisKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AxisKind {
    Wavelength,
    Omega,
}

/// Silica material index minus a weakly wavelength-dependent guiding term.
fn fiber_neff(index: &RefractiveIndex, noise: &mut Noise, std_dev: f64) -> Vec<f64> {
    index
        .wl()
        .as_um()
        .iter()
        .zip(index.n())
        .map(|(&l, &n)| {
            let guiding = 0.0045 + 5e-4 * (l - 1.55).powi(2);
            n - guiding + noise.sample(std_dev)
        })
        .collect()
}

/// Seeded Gaussian noise: splitmix64 uniforms fed through Box-Muller, with
/// the second normal of each pair kept for the next call.
struct Noise {
    state: u64,
    spare: Option<f64>,
}

impl Noise {
    fn new(seed: u64) -> Self {
        Noise { state: seed, spare: None }
    }

    fn uniform(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        // 53 random bits in (0, 1]; never zero so ln() stays finite.
        ((z >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    fn sample(&mut self, std_dev: f64) -> f64 {
        if std_dev == 0.0 {
            return 0.0;
        }
        let z = match self.spare.take() {
            Some(z) => z,
            None => {
                let r = (-2.0 * self.uniform().ln()).sqrt();
                let theta = std::f64::consts::TAU * self.uniform();
                self.spare = Some(r * theta.sin());
                r * theta.cos()
            }
        };
        std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut noise = Noise::new(args.seed);

    let index = RefractiveIndex::from_sellmeier(
        1.0,
        &SILICA_A,
        &SILICA_B,
        (args.from_nm * 1e-3, args.to_nm * 1e-3),
        args.points,
    )?;
    let neff = fiber_neff(&index, &mut noise, args.noise);

    let axis = match args.axis {
        AxisKind::Wavelength => Axis::from(index.wl().clone()),
        AxisKind::Omega => Axis::from(index.wl().to_omega()),
    };
    let beta = PropagationConstant::beta2_from_neff(&neff, axis.clone())?;

    let mut columns = BTreeMap::new();
    columns.insert("neff".to_string(), neff);
    columns.insert("beta".to_string(), beta.values().to_vec());
    let table = SampleTable::new(axis, columns)?;

    write_file(&table, &args.output)?;

    println!(
        "Wrote {} samples ({}..{} nm, {} axis) to {}",
        table.len(),
        args.from_nm,
        args.to_nm,
        table.axis.kind_name(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_seeded_and_roughly_normal() {
        let draw = |seed| {
            let mut noise = Noise::new(seed);
            (0..20_000).map(|_| noise.sample(2.0)).collect::<Vec<f64>>()
        };
        let a = draw(7);
        assert_eq!(a, draw(7));
        assert_ne!(a[..10], draw(8)[..10]);

        let n = a.len() as f64;
        let mean = a.iter().sum::<f64>() / n;
        let var = a.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std {}", var.sqrt());
        assert!(a.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn zero_spread_adds_nothing() {
        let mut noise = Noise::new(42);
        assert!((0..100).all(|_| noise.sample(0.0) == 0.0));
    }
}
