//! Error types for the pressure pipeline

use thiserror::Error;

/// Failures of the touch-sensing hardware session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HardwareError {
    /// The multitouch subsystem reports no device
    #[error("multitouch device not available")]
    Unavailable,

    /// The pressure source already holds an active session
    #[error("pressure source is already active")]
    AlreadyActive,

    /// The subsystem did not hand out a device reference
    #[error("failed to create multitouch device session")]
    SessionCreation,

    /// The device refused to start delivering frames
    #[error("failed to start multitouch device: {0}")]
    Start(String),
}

/// Failures of the MIDI output side
#[derive(Debug, Error)]
pub enum MidiError {
    #[error("failed to initialize MIDI client: {0}")]
    Init(#[from] midir::InitError),

    #[error("MIDI port '{0}' not found")]
    PortNotFound(String),

    #[error("failed to open MIDI port: {0}")]
    Connect(String),

    #[error("failed to send MIDI message: {0}")]
    Send(String),
}

/// Any error surfaced by the pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Hardware(#[from] HardwareError),

    #[error(transparent)]
    Midi(#[from] MidiError),
}

pub type Result<T> = std::result::Result<T, Error>;
