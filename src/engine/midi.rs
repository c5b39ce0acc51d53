//! MIDI output for the trackpad.
//!
//! Encodes control changes and sends them to a virtual MIDI port.

use crate::error::MidiError;
use midir::{MidiOutput, MidiOutputConnection};

/// A MIDI control change: channel (0-15), controller (0-127), value (0-127)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlChange {
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

impl ControlChange {
    pub fn new(channel: u8, controller: u8, value: u8) -> Self {
        Self {
            channel,
            controller,
            value,
        }
    }

    /// Convert to raw MIDI bytes.
    pub fn to_bytes(&self) -> [u8; 3] {
        [
            0xB0 | (self.channel & 0x0F),
            self.controller & 0x7F,
            self.value & 0x7F,
        ]
    }
}

/// Destination for control value updates
pub trait MidiSink {
    /// Deliver one control change. Failures are reported, never retried.
    fn send_control_change(&mut self, controller: u8, value: u8) -> Result<(), MidiError>;
}

/// Software MIDI output other applications can connect to.
pub struct VirtualPort {
    conn: MidiOutputConnection,
    channel: u8,
    port_name: String,
}

impl VirtualPort {
    /// Open an output advertised as `port_name` that sends on `channel`.
    pub fn open(client_name: &str, port_name: &str, channel: u8) -> Result<Self, MidiError> {
        let midi_out = MidiOutput::new(client_name)?;
        let conn = Self::connect(midi_out, port_name)?;

        Ok(Self {
            conn,
            channel,
            port_name: port_name.to_string(),
        })
    }

    #[cfg(unix)]
    fn connect(midi_out: MidiOutput, port_name: &str) -> Result<MidiOutputConnection, MidiError> {
        use midir::os::unix::VirtualOutput;

        midi_out
            .create_virtual(port_name)
            .map_err(|e| MidiError::Connect(e.to_string()))
    }

    // No virtual ports here, so attach to an existing one (e.g. a loopMIDI port)
    #[cfg(not(unix))]
    fn connect(midi_out: MidiOutput, port_name: &str) -> Result<MidiOutputConnection, MidiError> {
        let port = midi_out
            .ports()
            .into_iter()
            .find(|p| {
                midi_out
                    .port_name(p)
                    .map(|n| n.contains(port_name))
                    .unwrap_or(false)
            })
            .ok_or_else(|| MidiError::PortNotFound(port_name.to_string()))?;

        midi_out
            .connect(&port, port_name)
            .map_err(|e| MidiError::Connect(e.to_string()))
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Close the port.
    pub fn close(self) {
        self.conn.close();
    }
}

impl MidiSink for VirtualPort {
    fn send_control_change(&mut self, controller: u8, value: u8) -> Result<(), MidiError> {
        let message = ControlChange::new(self.channel, controller, value);
        self.conn
            .send(&message.to_bytes())
            .map_err(|e| MidiError::Send(e.to_string()))
    }
}

/// List available MIDI output ports.
pub fn list_midi_ports() -> Result<Vec<String>, MidiError> {
    let midi_out = MidiOutput::new("miditrackpad list")?;
    let ports = midi_out.ports();

    let names: Vec<String> = ports
        .iter()
        .filter_map(|p| midi_out.port_name(p).ok())
        .collect();

    Ok(names)
}
