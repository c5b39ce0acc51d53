//! In-process stand-in for the multitouch driver.
//!
//! Used on platforms without the hardware, and by tests to inject frames and
//! inspect the device lifecycle.

use super::backend::{DeviceHandle, FrameHandler, TouchBackend};
use super::frame::{TouchFrame, TouchPoint};
use crate::error::HardwareError;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// One lifecycle call received by the simulated device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    Create(DeviceHandle),
    Register(DeviceHandle),
    Start(DeviceHandle, i32),
    Stop(DeviceHandle),
    Unregister(DeviceHandle),
    Release(DeviceHandle),
}

#[derive(Default)]
struct SimState {
    next_handle: usize,
    handler: Option<FrameHandler>,
    started: bool,
    frame_id: i32,
    calls: Vec<DeviceCall>,
}

/// Simulated trackpad implementing the full backend contract
pub struct SimulatedTrackpad {
    available: bool,
    fail_start: bool,
    epoch: Instant,
    state: Mutex<SimState>,
}

impl SimulatedTrackpad {
    /// A present, working device
    pub fn new() -> Self {
        Self::build(true, false)
    }

    /// A device that reports itself as absent
    pub fn unavailable() -> Self {
        Self::build(false, false)
    }

    /// A device that opens and registers but refuses to start
    pub fn failing_start() -> Self {
        Self::build(true, true)
    }

    fn build(available: bool, fail_start: bool) -> Self {
        Self {
            available,
            fail_start,
            epoch: Instant::now(),
            state: Mutex::new(SimState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Deliver a frame to the registered handler, as the driver thread would.
    ///
    /// Returns false when the device is not started or nothing is registered.
    pub fn push_frame(&self, touches: &[TouchPoint]) -> bool {
        let (handler, frame_id) = {
            let mut state = self.state();
            if !state.started {
                return false;
            }
            let Some(handler) = state.handler.clone() else {
                return false;
            };
            state.frame_id = state.frame_id.wrapping_add(1);
            (handler, state.frame_id)
        };

        let timestamp = self.epoch.elapsed().as_secs_f64();
        handler(&TouchFrame::new(touches, timestamp, frame_id));
        true
    }

    /// Every lifecycle call received so far, oldest first
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.state().calls.clone()
    }

    /// Whether a frame handler is currently bound
    pub fn has_handler(&self) -> bool {
        self.state().handler.is_some()
    }

    /// The currently bound frame handler, if any
    pub fn handler(&self) -> Option<FrameHandler> {
        self.state().handler.clone()
    }

    pub fn is_started(&self) -> bool {
        self.state().started
    }
}

impl Default for SimulatedTrackpad {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchBackend for SimulatedTrackpad {
    fn is_available(&self) -> bool {
        self.available
    }

    fn create_session(&self) -> Result<DeviceHandle, HardwareError> {
        if !self.available {
            return Err(HardwareError::SessionCreation);
        }
        let mut state = self.state();
        state.next_handle += 1;
        let handle = DeviceHandle::from_raw(state.next_handle);
        state.calls.push(DeviceCall::Create(handle));
        Ok(handle)
    }

    fn register_callback(&self, handle: DeviceHandle, handler: FrameHandler) {
        let mut state = self.state();
        state.handler = Some(handler);
        state.calls.push(DeviceCall::Register(handle));
    }

    fn start(&self, handle: DeviceHandle, mode: i32) -> Result<(), HardwareError> {
        let mut state = self.state();
        state.calls.push(DeviceCall::Start(handle, mode));
        if self.fail_start {
            return Err(HardwareError::Start("simulated start failure".to_string()));
        }
        state.started = true;
        Ok(())
    }

    fn stop(&self, handle: DeviceHandle) {
        let mut state = self.state();
        state.started = false;
        state.calls.push(DeviceCall::Stop(handle));
    }

    fn unregister_callback(&self, handle: DeviceHandle) {
        let mut state = self.state();
        state.handler = None;
        state.calls.push(DeviceCall::Unregister(handle));
    }

    fn release(&self, handle: DeviceHandle) {
        self.state().calls.push(DeviceCall::Release(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_frames_need_started_device() {
        let trackpad = SimulatedTrackpad::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let handle = trackpad.create_session().unwrap();
        let counter = Arc::clone(&hits);
        trackpad.register_callback(
            handle,
            Arc::new(move |_frame: &TouchFrame<'_>| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(!trackpad.push_frame(&[]));
        trackpad.start(handle, 0).unwrap();
        assert!(trackpad.is_started());
        assert!(trackpad.push_frame(&[]));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_frame_ids_increase() {
        let trackpad = SimulatedTrackpad::new();
        let last_id = Arc::new(Mutex::new(Vec::new()));

        let handle = trackpad.create_session().unwrap();
        let ids = Arc::clone(&last_id);
        trackpad.register_callback(
            handle,
            Arc::new(move |frame: &TouchFrame<'_>| {
                ids.lock().unwrap().push(frame.frame_id);
            }),
        );
        trackpad.start(handle, 0).unwrap();

        trackpad.push_frame(&[]);
        trackpad.push_frame(&[]);
        assert_eq!(*last_id.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_unavailable_device_has_no_session() {
        let trackpad = SimulatedTrackpad::unavailable();
        assert!(!trackpad.is_available());
        assert_eq!(
            trackpad.create_session(),
            Err(HardwareError::SessionCreation)
        );
    }
}
