//! Pressure sources for the trackpad
//!
//! A `PressureSource` owns the touch-sensing session and keeps the most
//! recent pressure reading that the hardware reported.

mod backend;
mod frame;
#[cfg(target_os = "macos")]
mod multitouch;
mod pressure;
mod simulated;

pub use backend::{platform_backend, DeviceHandle, FrameHandler, TouchBackend, DEFAULT_START_MODE};
pub use frame::{Point, TouchFrame, TouchPoint, Vector};
#[cfg(target_os = "macos")]
pub use multitouch::MultitouchBackend;
pub use pressure::{ActiveSession, LatestPressure, PressureSource};
pub use simulated::{DeviceCall, SimulatedTrackpad};
