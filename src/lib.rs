//! miditrackpad - the trackpad as a pressure-sensitive MIDI controller
//!
//! Touch frames from the trackpad update a single pressure reading, and a
//! fixed-rate loop maps that reading to a MIDI control change.

pub mod config;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod sources;

pub use config::TrackpadConfig;
pub use engine::{MidiSink, OutputDriver, StopHandle};
pub use error::{Error, HardwareError, MidiError, Result};
pub use sources::{ActiveSession, PressureSource};
