//! TUI module for klaviatur
//!
//! Draws the control panel and both manuals, and feeds terminal input to
//! the performance engine.

mod keyboard;
mod panel;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use tracing::debug;

use klaviatur::{NoteSink, Outcome, PerformanceEngine};

use super::keymap::HostKeymap;
use keyboard::render_keyboard;
use panel::render_panel;

/// UI application state
pub struct UiApp {
    engine: PerformanceEngine,
    keymap: HostKeymap,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(engine: PerformanceEngine, keymap: HostKeymap) -> Self {
        Self {
            engine,
            keymap,
            should_quit: false,
        }
    }

    /// Run the UI event loop.
    ///
    /// Blocks on terminal input; every event is processed to completion
    /// and the screen redrawn before the next one is read.
    pub fn run(&mut self, terminal: &mut DefaultTerminal, sink: &mut dyn NoteSink) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            let event = event::read()?;
            if let Some(input) = self.keymap.translate(&event) {
                let outcome = self.engine.process(&input, sink);
                if outcome == Outcome::Quit {
                    self.should_quit = true;
                } else if outcome != Outcome::Ignored {
                    debug!(?outcome, "processed");
                }
            }
        }

        Ok(())
    }

    /// Stop every sounding note
    pub fn release_all(&mut self, sink: &mut dyn NoteSink) -> usize {
        self.engine.release_all(sink)
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: panel, keyboard, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Panel
                Constraint::Length(7), // Keyboard
                Constraint::Min(0),
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let snapshot = self.engine.snapshot();
        render_panel(frame, chunks[0], &snapshot);
        render_keyboard(frame, chunks[1], &snapshot, self.engine.layout());

        let help = Paragraph::new(
            " [Esc] Quit  [Shift] Fine velocity  [Ctrl]/[Alt] + [0-9] [+] [-] Channel",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
