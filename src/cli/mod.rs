//! CLI interface for miditrackpad

use clap::{ArgAction, Parser};
use miditrackpad::config::TrackpadConfig;
use std::path::PathBuf;
use tracing::Level;

/// Use the trackpad as a pressure-sensitive MIDI controller
#[derive(Parser, Debug)]
#[command(name = "miditrackpad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// MIDI output port name
    #[arg(short, long, required_unless_present_any = ["list_ports", "config"])]
    pub port: Option<String>,

    /// MIDI Control Change number to send pressure data on (default: 1)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=127))]
    pub cc: Option<u8>,

    /// MIDI channel, 0-15 (default: 0)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=15))]
    pub channel: Option<u8>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List available MIDI output ports and exit
    #[arg(long)]
    pub list_ports: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Override configuration values with the flags that were given
    pub fn apply(&self, config: &mut TrackpadConfig) {
        if let Some(port) = &self.port {
            config.midi.port = Some(port.clone());
        }
        if let Some(cc) = self.cc {
            config.midi.cc = cc;
        }
        if let Some(channel) = self.channel {
            config.midi.channel = channel;
        }
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_and_default_cc() {
        let cli = Cli::try_parse_from(["miditrackpad", "--port", "Trackpad"]).unwrap();
        let mut config = TrackpadConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.midi.port.as_deref(), Some("Trackpad"));
        assert_eq!(config.midi.cc, 1);
        assert_eq!(cli.log_level(), Level::INFO);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["miditrackpad", "-p", "Pad", "-c", "74", "-vv"]).unwrap();
        assert_eq!(cli.port.as_deref(), Some("Pad"));
        assert_eq!(cli.cc, Some(74));
        assert_eq!(cli.log_level(), Level::TRACE);
    }

    #[test]
    fn test_port_is_required() {
        assert!(Cli::try_parse_from(["miditrackpad"]).is_err());
        assert!(Cli::try_parse_from(["miditrackpad", "--cc", "7"]).is_err());
    }

    #[test]
    fn test_list_ports_needs_no_port() {
        let cli = Cli::try_parse_from(["miditrackpad", "--list-ports"]).unwrap();
        assert!(cli.list_ports);
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_cc_out_of_range() {
        assert!(Cli::try_parse_from(["miditrackpad", "-p", "Pad", "-c", "128"]).is_err());
        assert!(Cli::try_parse_from(["miditrackpad", "-p", "Pad", "--channel", "16"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "miditrackpad", "--config", "pad.yaml", "--cc", "11", "--channel", "3",
        ])
        .unwrap();
        let mut config = TrackpadConfig::default();
        config.midi.port = Some("FromFile".to_string());
        cli.apply(&mut config);

        assert_eq!(config.midi.port.as_deref(), Some("FromFile"));
        assert_eq!(config.midi.cc, 11);
        assert_eq!(config.midi.channel, 3);
    }
}
