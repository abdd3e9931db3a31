//! Optical pulse bookkeeping: duration, peak power, energy and repetition.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::units::{FrequencyUnit, TimeUnit, Unit, Wavelength};

/// A pulse train described by one pulse's duration and peak power.
///
/// Until a period or rate is set explicitly, the period is taken as twice
/// the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Seconds.
    duration: f64,
    duration_unit: TimeUnit,
    /// Watts.
    peak_power: f64,
    central_wavelength: Option<Wavelength>,
    /// Joules.
    energy: Option<f64>,
    /// Seconds.
    period: f64,
    /// Hertz.
    rate: f64,
}

impl Pulse {
    /// `unit` is one of `s`, `ns`, `ps`, `fs`, `as`.
    pub fn new(duration: f64, unit: &str, peak_power: f64) -> Result<Self> {
        let unit: TimeUnit = unit.parse()?;
        Ok(Self::from_unit(duration, unit, peak_power))
    }

    pub fn from_unit(duration: f64, unit: TimeUnit, peak_power: f64) -> Self {
        let duration_s = unit.to_canonical(duration);
        Pulse {
            duration: duration_s,
            duration_unit: unit,
            peak_power,
            central_wavelength: None,
            energy: None,
            period: 2.0 * duration_s,
            rate: 1.0 / (2.0 * duration_s),
        }
    }

    pub fn with_central_wavelength(mut self, wavelength: Wavelength) -> Self {
        self.central_wavelength = Some(wavelength);
        self
    }

    pub fn with_energy(mut self, energy_j: f64) -> Self {
        self.energy = Some(energy_j);
        self
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Duration in the unit it was given in.
    pub fn duration_in_input_unit(&self) -> f64 {
        self.duration_unit.from_canonical(self.duration)
    }

    /// Replace the duration (seconds). An implicit period follows it.
    pub fn set_duration(&mut self, duration_s: f64) {
        let implicit = self.has_default_period();
        self.duration = duration_s;
        if implicit {
            self.period = 2.0 * duration_s;
            self.rate = 1.0 / self.period;
        }
    }

    /// Peak power in watts.
    pub fn peak_power(&self) -> f64 {
        self.peak_power
    }

    pub fn set_peak_power(&mut self, watts: f64) {
        self.peak_power = watts;
    }

    pub fn central_wavelength(&self) -> Option<Wavelength> {
        self.central_wavelength
    }

    /// Energy in joules, when known.
    pub fn energy(&self) -> Option<f64> {
        self.energy
    }

    /// Repetition period in seconds.
    pub fn period(&self) -> f64 {
        if self.has_default_period() {
            log::info!("Pulse period is taken as twice the pulse duration; use set_period or set_rate to change it");
        }
        self.period
    }

    pub fn set_period(&mut self, value: f64, unit: &str) -> Result<()> {
        let unit: TimeUnit = unit.parse()?;
        self.period = unit.to_canonical(value);
        self.rate = 1.0 / self.period;
        Ok(())
    }

    /// Repetition rate in hertz.
    pub fn rate(&self) -> f64 {
        if self.has_default_period() {
            log::info!("Pulse rate is taken as 1/(2 x duration); use set_period or set_rate to change it");
        }
        self.rate
    }

    pub fn set_rate(&mut self, value: f64, unit: &str) -> Result<()> {
        let unit: FrequencyUnit = unit.parse()?;
        self.rate = unit.to_canonical(value);
        self.period = 1.0 / self.rate;
        Ok(())
    }

    /// Average power over the period, from peak power and duty cycle.
    pub fn average_power(&self) -> f64 {
        self.peak_power * self.duration / self.period
    }

    fn has_default_period(&self) -> bool {
        self.period == 2.0 * self.duration
    }
}

/// A pulse with a flat top of the given amplitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangularPulse {
    pulse: Pulse,
    amplitude: f64,
}

impl RectangularPulse {
    pub fn new(duration: f64, unit: &str, peak_power: f64) -> Result<Self> {
        Ok(RectangularPulse {
            pulse: Pulse::new(duration, unit, peak_power)?,
            amplitude: 1.0,
        })
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn pulse(&self) -> &Pulse {
        &self.pulse
    }

    pub fn pulse_mut(&mut self) -> &mut Pulse {
        &mut self.pulse
    }

    /// Explicit energy if set, otherwise peak power × duration.
    pub fn energy(&self) -> f64 {
        self.pulse
            .energy()
            .unwrap_or(self.pulse.peak_power() * self.pulse.duration())
    }
}
