//! MultitouchSupport binding (macOS)
//!
//! The private framework delivers contact frames on its own thread through a
//! plain C callback with no user pointer, so handlers live in a registry keyed
//! by device address.

use super::backend::{DeviceHandle, FrameHandler, TouchBackend};
use super::frame::{TouchFrame, TouchPoint};
use crate::error::HardwareError;
use std::os::raw::{c_double, c_int, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard};

type MTDeviceRef = *mut c_void;

type MTContactCallback =
    extern "C" fn(MTDeviceRef, *const TouchPoint, c_int, c_double, c_int);

#[link(name = "MultitouchSupport", kind = "framework")]
extern "C" {
    fn MTDeviceIsAvailable() -> bool;
    fn MTDeviceCreateDefault() -> MTDeviceRef;
    fn MTRegisterContactFrameCallback(device: MTDeviceRef, callback: MTContactCallback);
    fn MTUnregisterContactFrameCallback(device: MTDeviceRef, callback: MTContactCallback);
    fn MTDeviceStart(device: MTDeviceRef, mode: c_int);
    fn MTDeviceStop(device: MTDeviceRef);
    fn MTDeviceRelease(device: MTDeviceRef);
}

static HANDLERS: Mutex<Vec<(usize, FrameHandler)>> = Mutex::new(Vec::new());

fn handlers() -> MutexGuard<'static, Vec<(usize, FrameHandler)>> {
    HANDLERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

extern "C" fn on_contact_frame(
    device: MTDeviceRef,
    touches: *const TouchPoint,
    count: c_int,
    timestamp: c_double,
    frame_id: c_int,
) {
    let handler = handlers()
        .iter()
        .find(|(key, _)| *key == device as usize)
        .map(|(_, handler)| handler.clone());
    let Some(handler) = handler else {
        return;
    };

    let touches: &[TouchPoint] = if touches.is_null() || count <= 0 {
        &[]
    } else {
        // SAFETY: the driver passes `count` contiguous MTTouch records that
        // stay valid for the duration of the callback
        unsafe { std::slice::from_raw_parts(touches, count as usize) }
    };

    // Unwinding into the driver's thread is undefined behaviour
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        handler(&TouchFrame::new(touches, timestamp, frame_id));
    }));
}

/// Backend talking to the built-in trackpad
#[derive(Debug, Default)]
pub struct MultitouchBackend;

impl MultitouchBackend {
    pub fn new() -> Self {
        Self
    }

    fn device(handle: DeviceHandle) -> MTDeviceRef {
        handle.raw() as MTDeviceRef
    }
}

impl TouchBackend for MultitouchBackend {
    fn is_available(&self) -> bool {
        // SAFETY: takes no arguments and only queries the driver
        unsafe { MTDeviceIsAvailable() }
    }

    fn create_session(&self) -> Result<DeviceHandle, HardwareError> {
        // SAFETY: returns a retained device reference or null
        let device = unsafe { MTDeviceCreateDefault() };
        if device.is_null() {
            return Err(HardwareError::SessionCreation);
        }
        Ok(DeviceHandle::from_raw(device as usize))
    }

    fn register_callback(&self, handle: DeviceHandle, handler: FrameHandler) {
        {
            let mut registry = handlers();
            registry.retain(|(key, _)| *key != handle.raw());
            registry.push((handle.raw(), handler));
        }
        // SAFETY: the handle came from `create_session` and is not released yet
        unsafe { MTRegisterContactFrameCallback(Self::device(handle), on_contact_frame) };
    }

    fn start(&self, handle: DeviceHandle, mode: i32) -> Result<(), HardwareError> {
        // SAFETY: as above
        unsafe { MTDeviceStart(Self::device(handle), mode) };
        Ok(())
    }

    fn stop(&self, handle: DeviceHandle) {
        // SAFETY: as above
        unsafe { MTDeviceStop(Self::device(handle)) };
    }

    fn unregister_callback(&self, handle: DeviceHandle) {
        // SAFETY: as above
        unsafe { MTUnregisterContactFrameCallback(Self::device(handle), on_contact_frame) };
        handlers().retain(|(key, _)| *key != handle.raw());
    }

    fn release(&self, handle: DeviceHandle) {
        // SAFETY: last use of the handle
        unsafe { MTDeviceRelease(Self::device(handle)) };
    }
}
