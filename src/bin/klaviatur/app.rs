//! Klaviatur - application builder and runner

use std::io::stdout;

use color_eyre::eyre::{bail, Result as EyreResult, WrapErr};
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use tracing::info;

use klaviatur::{
    output::{MidiOutputs, TraceSink},
    EngineConfig, NoteSink, PerformanceEngine,
};

use super::keymap::HostKeymap;
use super::ui::UiApp;

/// Where the notes go
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// New virtual ports other programs can subscribe to
    Virtual { client_name: String },
    /// Existing ports, matched by name
    Connect {
        client_name: String,
        lower: String,
        upper: String,
    },
    /// Log only
    DryRun,
}

/// Main application builder
pub struct Klaviatur {
    config: EngineConfig,
    output: OutputTarget,
}

impl Klaviatur {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            output: OutputTarget::Virtual {
                client_name: "klaviatur".to_string(),
            },
        }
    }

    /// Choose the note destination
    pub fn output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    fn open_sink(&self) -> EyreResult<Box<dyn NoteSink>> {
        let sink: Box<dyn NoteSink> = match &self.output {
            OutputTarget::Virtual { client_name } => Box::new(open_virtual(client_name)?),
            OutputTarget::Connect {
                client_name,
                lower,
                upper,
            } => Box::new(
                MidiOutputs::connect(client_name, lower, upper)
                    .wrap_err("failed to connect MIDI outputs")?,
            ),
            OutputTarget::DryRun => Box::new(TraceSink),
        };
        Ok(sink)
    }

    /// Run the application (takes over the terminal until Escape)
    pub fn run(self) -> EyreResult<()> {
        let mut sink = self.open_sink()?;
        let keymap = HostKeymap::new(self.config.keys.clone());
        let engine = PerformanceEngine::new(self.config);

        let mut terminal = ratatui::init();
        let result = run_in_terminal(&mut terminal, engine, keymap, sink.as_mut());
        ratatui::restore();
        result
    }
}

fn run_in_terminal(
    terminal: &mut ratatui::DefaultTerminal,
    engine: PerformanceEngine,
    keymap: HostKeymap,
    sink: &mut dyn NoteSink,
) -> EyreResult<()> {
    if !supports_keyboard_enhancement().unwrap_or(false) {
        bail!("terminal does not report key releases; use one that supports the kitty keyboard protocol");
    }

    execute!(
        stdout(),
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        ),
        EnableFocusChange
    )
    .wrap_err("failed to configure terminal input")?;

    let mut app = UiApp::new(engine, keymap);
    let result = app.run(terminal, sink);

    let sent = app.release_all(sink);
    info!(sent, "released sounding notes on exit");

    execute!(stdout(), PopKeyboardEnhancementFlags, DisableFocusChange)
        .wrap_err("failed to restore terminal input")?;
    result
}

#[cfg(unix)]
fn open_virtual(client_name: &str) -> EyreResult<MidiOutputs> {
    MidiOutputs::open_virtual(client_name).wrap_err("failed to create virtual MIDI ports")
}

#[cfg(not(unix))]
fn open_virtual(_client_name: &str) -> EyreResult<MidiOutputs> {
    bail!("virtual MIDI ports are not available here; pass --lower-port and --upper-port")
}
