//! Latest-pressure tracking over a hardware session

use super::backend::{DeviceHandle, FrameHandler, TouchBackend, DEFAULT_START_MODE};
use super::frame::TouchFrame;
use crate::error::HardwareError;
use atomic_float::AtomicF64;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Cache-line aligned cell holding the most recent pressure reading.
///
/// Written by the frame callback thread, read by the output loop.
#[derive(Debug)]
#[repr(align(64))]
pub struct LatestPressure {
    value: AtomicF64,
}

impl LatestPressure {
    pub fn new(value: f64) -> Self {
        Self {
            value: AtomicF64::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.value.store(value, Ordering::Release);
    }
}

impl Default for LatestPressure {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Owner of the touch hardware
pub struct PressureSource {
    backend: Arc<dyn TouchBackend>,
    active: AtomicBool,
}

impl PressureSource {
    pub fn new(backend: Arc<dyn TouchBackend>) -> Self {
        Self {
            backend,
            active: AtomicBool::new(false),
        }
    }

    /// Whether a session is currently held
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Acquire the device and start receiving frames.
    ///
    /// Whatever was acquired before a failure is released before the error
    /// is returned. Each session reads its own pressure cell, so a handler
    /// from an earlier session can never write into this one.
    pub fn activate(&self) -> Result<ActiveSession<'_>, HardwareError> {
        if self.active.swap(true, Ordering::AcqRel) {
            return Err(HardwareError::AlreadyActive);
        }

        // From here on, dropping `session` undoes every step taken so far
        let mut session = ActiveSession {
            source: self,
            handle: None,
            registered: false,
            started: false,
            pressure: Arc::new(LatestPressure::default()),
        };

        if !self.backend.is_available() {
            return Err(HardwareError::Unavailable);
        }

        let handle = self.backend.create_session()?;
        debug!(?handle, "Created multitouch session");
        session.handle = Some(handle);

        let pressure = Arc::clone(&session.pressure);
        let handler: FrameHandler = Arc::new(move |frame: &TouchFrame<'_>| {
            pressure.set(frame.contact_pressure());
        });
        self.backend.register_callback(handle, handler);
        session.registered = true;
        debug!(?handle, "Registered frame callback");

        self.backend.start(handle, DEFAULT_START_MODE)?;
        session.started = true;
        info!("Multitouch device started");

        Ok(session)
    }
}

/// Scoped ownership of an acquired device session.
///
/// Dropping it unregisters the callback, stops the device and releases the
/// handle, in that order.
pub struct ActiveSession<'a> {
    source: &'a PressureSource,
    handle: Option<DeviceHandle>,
    registered: bool,
    started: bool,
    pressure: Arc<LatestPressure>,
}

impl ActiveSession<'_> {
    /// Most recent pressure reading, 0.0 until the first frame arrives
    pub fn latest_pressure(&self) -> f64 {
        self.pressure.get()
    }

    /// Release the session now instead of at scope exit
    pub fn deactivate(self) {
        drop(self);
    }

    fn release(&mut self) {
        let backend = &self.source.backend;

        if let Some(handle) = self.handle.take() {
            if self.registered {
                backend.unregister_callback(handle);
                debug!(?handle, "Unregistered frame callback");
            }
            if self.started {
                backend.stop(handle);
                debug!(?handle, "Stopped multitouch device");
            }
            backend.release(handle);
            debug!(?handle, "Released multitouch session");
        }

        self.registered = false;
        self.started = false;
        self.source.active.store(false, Ordering::Release);
    }
}

impl Drop for ActiveSession<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
