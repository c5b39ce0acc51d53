//! Fixed-rate output loop
//!
//! Samples the latest pressure, maps it and forwards the control value to a
//! MIDI sink once per tick.

use super::midi::MidiSink;
use crate::error::Result;
use crate::mapping::{DeadzoneMapper, Mapper};
use crate::sources::ActiveSession;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, trace, warn};

/// Output rate of the reference controller
pub const DEFAULT_RATE_HZ: f64 = 60.0;

/// Tick period at `DEFAULT_RATE_HZ`
pub fn default_period() -> Duration {
    Duration::from_secs_f64(1.0 / DEFAULT_RATE_HZ)
}

/// Cloneable handle that ends a running loop from any thread
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Takes effect at the loop's next check, at most one tick later
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Drives pressure samples out as control changes
pub struct OutputDriver<M = DeadzoneMapper> {
    mapper: M,
    period: Duration,
    suppress_unchanged: bool,
    stop: StopHandle,
}

impl<M: Mapper> OutputDriver<M> {
    /// Create a driver ticking at 60 Hz that sends on every tick
    pub fn new(mapper: M) -> Self {
        Self {
            mapper,
            period: default_period(),
            suppress_unchanged: false,
            stop: StopHandle::new(),
        }
    }

    /// Set the time slept between ticks
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Only send when the control value differs from the last one sent
    pub fn with_change_suppression(mut self, suppress: bool) -> Self {
        self.suppress_unchanged = suppress;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stop the loop. Stopping is permanent for this driver.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }

    /// Run until stopped or until the sink fails.
    ///
    /// Blocks the calling thread. A sink failure stops the driver and is
    /// returned as is.
    pub fn run<S: MidiSink>(&self, session: &ActiveSession<'_>, sink: &mut S, cc: u8) -> Result<()> {
        info!(
            cc,
            period_ms = self.period.as_secs_f64() * 1000.0,
            suppress_unchanged = self.suppress_unchanged,
            "Sending pressure as control change"
        );

        let mut last_sent: Option<u8> = None;
        let mut ticks: u64 = 0;

        while self.is_running() {
            let pressure = session.latest_pressure();
            let value = self.mapper.map(pressure);

            if !(self.suppress_unchanged && last_sent == Some(value)) {
                if let Err(err) = sink.send_control_change(cc, value) {
                    warn!(%err, "Control change rejected, stopping output");
                    self.stop();
                    return Err(err.into());
                }
                trace!(cc, value, pressure, "Sent control change");
                last_sent = Some(value);
            }

            ticks += 1;
            thread::sleep(self.period);
        }

        info!(ticks, "Output loop stopped");
        Ok(())
    }
}

impl Default for OutputDriver {
    fn default() -> Self {
        Self::new(DeadzoneMapper::default())
    }
}
