//! klaviatur - two-manual MIDI keyboard in the terminal
//!
//! Run with: cargo run -- --help

mod app;
mod keymap;
mod logging;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};

use app::{Klaviatur, OutputTarget};
use klaviatur::{output::MidiOutputs, EngineConfig, PerformanceState};

/// Play two MIDI manuals from the computer keyboard
#[derive(Parser, Debug)]
#[command(name = "klaviatur", version, about)]
struct Args {
    /// MIDI client name
    #[arg(long, env = "KLAVIATUR_CLIENT", default_value = "klaviatur")]
    client_name: String,

    /// Connect the lower manual to an existing output port (name substring)
    #[arg(long, requires = "upper_port")]
    lower_port: Option<String>,

    /// Connect the upper manual to an existing output port (name substring)
    #[arg(long, requires = "lower_port")]
    upper_port: Option<String>,

    /// Base octave of the lower manual
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(i32).range(0..=8))]
    lower_octave: i32,

    /// Base octave of the upper manual
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(i32).range(0..=8))]
    upper_octave: i32,

    /// MIDI channel of the lower manual (0-15)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=15))]
    lower_channel: u8,

    /// MIDI channel of the upper manual (0-15)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=15))]
    upper_channel: u8,

    /// Starting velocity of both manuals (0-127)
    #[arg(long, default_value_t = 127, value_parser = clap::value_parser!(u8).range(0..=127))]
    velocity: u8,

    /// Do not open MIDI ports, only log the notes
    #[arg(long)]
    dry_run: bool,

    /// Write logs to this file
    #[arg(long, env = "KLAVIATUR_LOG")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// List available MIDI output ports and exit
    #[arg(long)]
    list_ports: bool,
}

impl Args {
    fn engine_config(&self) -> EyreResult<EngineConfig> {
        let lower = PerformanceState::with_octave(self.lower_channel, self.lower_octave, self.velocity)
            .wrap_err("invalid lower manual settings")?;
        let upper = PerformanceState::with_octave(self.upper_channel, self.upper_octave, self.velocity)
            .wrap_err("invalid upper manual settings")?;
        Ok(EngineConfig {
            lower,
            upper,
            ..EngineConfig::default()
        })
    }

    fn output_target(&self) -> OutputTarget {
        if self.dry_run {
            return OutputTarget::DryRun;
        }
        match (&self.lower_port, &self.upper_port) {
            (Some(lower), Some(upper)) => OutputTarget::Connect {
                client_name: self.client_name.clone(),
                lower: lower.clone(),
                upper: upper.clone(),
            },
            _ => OutputTarget::Virtual {
                client_name: self.client_name.clone(),
            },
        }
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let _log_guard = logging::init(args.log_file.as_deref(), args.verbose)?;

    if args.list_ports {
        for name in MidiOutputs::list_ports(&args.client_name)? {
            println!("{}", name);
        }
        return Ok(());
    }

    Klaviatur::new(args.engine_config()?)
        .output(args.output_target())
        .run()
}
