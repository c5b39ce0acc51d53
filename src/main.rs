//! miditrackpad - trackpad pressure as a MIDI control change stream

use anyhow::{bail, Context, Result};
use clap::Parser;
use miditrackpad::config::{self, TrackpadConfig};
use miditrackpad::engine::{self, OutputDriver, VirtualPort};
use miditrackpad::sources::{self, PressureSource};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level());

    if cli.list_ports {
        let ports = engine::list_midi_ports()?;
        if ports.is_empty() {
            println!("No MIDI output ports available");
        }
        for name in ports {
            println!("  - {}", name);
        }
        return Ok(());
    }

    let mut cfg = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            config::load_config(path)?
        }
        None => TrackpadConfig::default(),
    };
    cli.apply(&mut cfg);
    cfg.validate()?;

    let Some(port_name) = cfg.midi.port.clone() else {
        bail!("No MIDI port given, pass --port or set midi.port in the config file");
    };

    let mut port = VirtualPort::open(&cfg.midi.client_name, &port_name, cfg.midi.channel)
        .with_context(|| format!("failed to open MIDI port '{}'", port_name))?;
    info!(
        port = port.port_name(),
        channel = port.channel(),
        cc = cfg.midi.cc,
        "MIDI output opened"
    );

    let driver = OutputDriver::new(cfg.mapping.mapper())
        .with_period(cfg.output.period()?)
        .with_change_suppression(cfg.output.suppress_unchanged);

    let stop = driver.stop_handle();
    ctrlc::set_handler(move || {
        info!("Stopping MIDI output");
        stop.stop();
    })
    .context("failed to install Ctrl-C handler")?;

    let source = PressureSource::new(sources::platform_backend());
    let result = run(&source, &driver, &mut port, cfg.midi.cc);

    // The session is already released at this point, the port goes last
    port.close();
    result.context("pressure output stopped with an error")?;

    info!("Shut down cleanly");
    Ok(())
}

/// Hold the trackpad for as long as the output loop runs
fn run(
    source: &PressureSource,
    driver: &OutputDriver,
    port: &mut VirtualPort,
    cc: u8,
) -> miditrackpad::Result<()> {
    let session = source.activate()?;
    info!("Pressure source active, press Ctrl-C to stop");
    driver.run(&session, port, cc)
}

fn setup_logging(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();
}
