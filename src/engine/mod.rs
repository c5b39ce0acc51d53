//! Output engine
//!
//! Runs the fixed-rate loop that turns pressure into MIDI control changes.

mod driver;
mod midi;

pub use driver::{default_period, OutputDriver, StopHandle, DEFAULT_RATE_HZ};
pub use midi::{list_midi_ports, ControlChange, MidiSink, VirtualPort};
