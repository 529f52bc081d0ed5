//! MIDI transport - two output connections, one per manual.

use midir::{MidiOutput, MidiOutputConnection, MidiOutputPort};
use tracing::{info, warn};

use super::{NoteEvent, NoteSink};
use crate::error::{Error, Result};
use crate::layout::Manual;

pub const LOWER_PORT_NAME: &str = "lower keys";
pub const UPPER_PORT_NAME: &str = "upper keys";

fn port_name(manual: Manual) -> &'static str {
    match manual {
        Manual::Lower => LOWER_PORT_NAME,
        Manual::Upper => UPPER_PORT_NAME,
    }
}

/// Output connections for both manuals
pub struct MidiOutputs {
    connections: [MidiOutputConnection; 2],
}

impl MidiOutputs {
    /// Create one virtual output port per manual for other programs to
    /// subscribe to
    #[cfg(unix)]
    pub fn open_virtual(client_name: &str) -> Result<Self> {
        use midir::os::unix::VirtualOutput;

        let open = |manual: Manual| -> Result<MidiOutputConnection> {
            let connection = MidiOutput::new(client_name)?.create_virtual(port_name(manual))?;
            info!(client = client_name, port = port_name(manual), "virtual MIDI port created");
            Ok(connection)
        };

        Ok(Self {
            connections: [open(Manual::Lower)?, open(Manual::Upper)?],
        })
    }

    /// Connect each manual to an existing output port whose name contains
    /// the given text (case-insensitive)
    pub fn connect(client_name: &str, lower: &str, upper: &str) -> Result<Self> {
        Ok(Self {
            connections: [
                connect_by_name(client_name, Manual::Lower, lower)?,
                connect_by_name(client_name, Manual::Upper, upper)?,
            ],
        })
    }

    /// Names of the output ports currently available
    pub fn list_ports(client_name: &str) -> Result<Vec<String>> {
        let output = MidiOutput::new(client_name)?;
        let names = output
            .ports()
            .iter()
            .map(|port| output.port_name(port))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

fn connect_by_name(client_name: &str, manual: Manual, wanted: &str) -> Result<MidiOutputConnection> {
    let output = MidiOutput::new(client_name)?;
    let needle = wanted.to_lowercase();
    let port: MidiOutputPort = output
        .ports()
        .into_iter()
        .find(|port| {
            output
                .port_name(port)
                .map(|name| name.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .ok_or_else(|| Error::PortNotFound(wanted.to_string()))?;

    let name = output.port_name(&port)?;
    let connection = output.connect(&port, port_name(manual))?;
    info!(manual = manual.name(), port = %name, "connected MIDI output");
    Ok(connection)
}

impl NoteSink for MidiOutputs {
    fn emit(&mut self, manual: Manual, event: NoteEvent) {
        let bytes = event.to_bytes();
        if let Err(e) = self.connections[manual.index()].send(&bytes) {
            warn!(manual = manual.name(), "MIDI send failed: {}", e);
        }
    }
}
