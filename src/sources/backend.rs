//! Hardware abstraction for touch-sensing devices

use super::frame::TouchFrame;
use crate::error::HardwareError;
use std::fmt;
use std::sync::Arc;

/// Default `start` mode understood by the multitouch driver
pub const DEFAULT_START_MODE: i32 = 0;

/// Handler invoked for every frame.
///
/// Backends call this from a thread they own, never the caller's.
pub type FrameHandler = Arc<dyn Fn(&TouchFrame<'_>) + Send + Sync>;

/// Opaque reference to an open device session
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(usize);

impl DeviceHandle {
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub(crate) fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceHandle({:#x})", self.0)
    }
}

/// The operations a touch-sensing subsystem has to offer.
///
/// Acquisition runs `create_session`, `register_callback`, `start`; release
/// mirrors it with `unregister_callback`, `stop`, `release`.
pub trait TouchBackend: Send + Sync {
    /// Whether a device is present right now
    fn is_available(&self) -> bool;

    /// Open a session on the default device
    fn create_session(&self) -> Result<DeviceHandle, HardwareError>;

    /// Bind a frame handler to the session
    fn register_callback(&self, handle: DeviceHandle, handler: FrameHandler);

    /// Begin frame delivery
    fn start(&self, handle: DeviceHandle, mode: i32) -> Result<(), HardwareError>;

    /// Halt frame delivery
    fn stop(&self, handle: DeviceHandle);

    /// Drop the handler bound by `register_callback`
    fn unregister_callback(&self, handle: DeviceHandle);

    /// Close the session; the handle is invalid afterwards
    fn release(&self, handle: DeviceHandle);
}

/// Backend for the platform the binary was built for
pub fn platform_backend() -> Arc<dyn TouchBackend> {
    #[cfg(target_os = "macos")]
    {
        Arc::new(super::multitouch::MultitouchBackend::new())
    }

    #[cfg(not(target_os = "macos"))]
    {
        Arc::new(super::simulated::SimulatedTrackpad::unavailable())
    }
}
