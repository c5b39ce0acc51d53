//! Mapping from raw pressure to MIDI control values

mod deadzone;
mod mapper;

pub use deadzone::{DeadzoneMapper, DEFAULT_DEADZONE, DEFAULT_MAX_PRESSURE};
pub use mapper::{Mapper, CONTROL_MAX};
