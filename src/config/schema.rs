//! Configuration schema definitions

use crate::engine::DEFAULT_RATE_HZ;
use crate::mapping::{DeadzoneMapper, DEFAULT_DEADZONE, DEFAULT_MAX_PRESSURE};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration for miditrackpad
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackpadConfig {
    /// MIDI output settings
    #[serde(default)]
    pub midi: MidiSettings,

    /// Pressure mapping settings
    #[serde(default)]
    pub mapping: MappingSettings,

    /// Output loop settings
    #[serde(default)]
    pub output: OutputSettings,
}

impl TrackpadConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(port) = &self.midi.port {
            if port.trim().is_empty() {
                bail!("MIDI port name must not be empty");
            }
        }
        if self.midi.client_name.trim().is_empty() {
            bail!("MIDI client name must not be empty");
        }
        if self.midi.channel > 15 {
            bail!("MIDI channel must be between 0 and 15");
        }
        if self.midi.cc > 127 {
            bail!("CC number must be between 0 and 127");
        }

        if !self.mapping.deadzone.is_finite() || self.mapping.deadzone < 0.0 {
            bail!("Deadzone must be a non-negative number");
        }
        if !self.mapping.max_pressure.is_finite() || self.mapping.max_pressure <= self.mapping.deadzone {
            bail!(
                "Max pressure ({}) must be greater than the deadzone ({})",
                self.mapping.max_pressure,
                self.mapping.deadzone
            );
        }

        if !self.output.rate_hz.is_finite() || self.output.rate_hz <= 0.0 || self.output.rate_hz > 1000.0 {
            bail!("Output rate must be above 0 and at most 1000 Hz");
        }

        Ok(())
    }
}

/// MIDI output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidiSettings {
    /// Name of the virtual output port
    #[serde(default)]
    pub port: Option<String>,

    /// Client name shown by the MIDI subsystem (default: miditrackpad)
    #[serde(default = "default_client_name")]
    pub client_name: String,

    /// MIDI channel 0-15 (default: 0)
    #[serde(default)]
    pub channel: u8,

    /// Control change number 0-127 (default: 1, the modulation wheel)
    #[serde(default = "default_cc")]
    pub cc: u8,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            port: None,
            client_name: default_client_name(),
            channel: 0,
            cc: default_cc(),
        }
    }
}

fn default_client_name() -> String { "miditrackpad".to_string() }
fn default_cc() -> u8 { 1 }

/// Pressure mapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSettings {
    /// Pressure at or below which nothing is sent (default: 250)
    #[serde(default = "default_deadzone")]
    pub deadzone: f64,

    /// Pressure that maps to 127 (default: 1700)
    #[serde(default = "default_max_pressure")]
    pub max_pressure: f64,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            deadzone: default_deadzone(),
            max_pressure: default_max_pressure(),
        }
    }
}

impl MappingSettings {
    pub fn mapper(&self) -> DeadzoneMapper {
        DeadzoneMapper::new(self.deadzone, self.max_pressure)
    }
}

fn default_deadzone() -> f64 { DEFAULT_DEADZONE }
fn default_max_pressure() -> f64 { DEFAULT_MAX_PRESSURE }

/// Output loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Ticks per second (default: 60)
    #[serde(default = "default_rate_hz")]
    pub rate_hz: f64,

    /// Skip sends that repeat the previous value (default: false)
    #[serde(default)]
    pub suppress_unchanged: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
            suppress_unchanged: false,
        }
    }
}

impl OutputSettings {
    /// Time between ticks; fails unless `rate_hz` is a positive number
    pub fn period(&self) -> Result<Duration> {
        if !(self.rate_hz > 0.0) {
            bail!("Output rate must be above 0 Hz, got {}", self.rate_hz);
        }
        Ok(Duration::try_from_secs_f64(1.0 / self.rate_hz)?)
    }
}

fn default_rate_hz() -> f64 { DEFAULT_RATE_HZ }
