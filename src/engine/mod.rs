// Purpose: the performance engine - turns host key events into note events
// and control changes, one event at a time

pub mod control;
pub mod input;

pub use control::{ControlAction, ControlChange, Interpretation};
pub use input::{InputEvent, KeyInput, KeySymbol, KeyVector, Modifiers};

use tracing::{debug, info, trace, warn};

use crate::keyboard::KeyboardState;
use crate::layout::{HostKeyTable, KeyLayout, LogicalKey, Manual, NUM_KEYS};
use crate::output::{NoteEvent, NoteSink};
use crate::performance::PerformanceState;
use crate::translate::{absolute_note, to_semitone_offset};

/// Everything needed to start an engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Host assignment of physical codes to logical keys
    pub keys: HostKeyTable,
    pub lower: PerformanceState,
    pub upper: PerformanceState,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keys: HostKeyTable::evdev(),
            lower: PerformanceState::LOWER,
            upper: PerformanceState::UPPER,
        }
    }
}

/// Result of processing one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed
    Ignored,
    /// This many note events were sent
    Notes(usize),
    /// One field of one voice was changed
    Control {
        manual: Manual,
        change: ControlChange,
    },
    /// Orderly shutdown requested; the engine accepts no further input
    Quit,
}

/// Copy of the engine state for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub keyboard: KeyboardState,
    pub voices: [PerformanceState; 2],
    pub finished: bool,
}

impl Snapshot {
    pub fn voice(&self, manual: Manual) -> &PerformanceState {
        &self.voices[manual.index()]
    }
}

/// The key-to-note engine.
///
/// Owns the layout, the sounding-key state and both voices. Events are
/// processed to completion one at a time; note events go to the sink
/// passed with each event.
#[derive(Debug, Clone)]
pub struct PerformanceEngine {
    layout: KeyLayout,
    keyboard: KeyboardState,
    /// Channel and note of the Note On each sounding key actually sent
    sent: [Option<(u8, u8)>; NUM_KEYS],
    voices: [PerformanceState; 2],
    finished: bool,
}

impl PerformanceEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            layout: KeyLayout::new(&config.keys),
            keyboard: KeyboardState::new(),
            sent: [None; NUM_KEYS],
            voices: [config.lower, config.upper],
            finished: false,
        }
    }

    pub fn process<S: NoteSink + ?Sized>(&mut self, event: &InputEvent, sink: &mut S) -> Outcome {
        if self.finished {
            trace!(?event, "engine finished, event ignored");
            return Outcome::Ignored;
        }

        match event {
            InputEvent::KeyPress(input) => self.press(input, sink),
            InputEvent::KeyRelease(input) => self.release(input, sink),
            InputEvent::KeymapSync(vector) => Self::notes(self.sync(vector, sink)),
            InputEvent::CloseRequest => self.finish("close requested"),
        }
    }

    fn press<S: NoteSink + ?Sized>(&mut self, input: &KeyInput, sink: &mut S) -> Outcome {
        match control::interpret_press(&self.layout, input) {
            Interpretation::Note(key) => Self::notes(self.transition(key, true, sink) as usize),
            Interpretation::Control(manual, action) => {
                let change = action.apply(&mut self.voices[manual.index()]);
                debug!(manual = manual.name(), ?action, ?change, "control");
                Outcome::Control { manual, change }
            }
            Interpretation::Quit => self.finish("escape pressed"),
            Interpretation::Ignore => {
                trace!(code = input.code.0, symbol = ?input.symbol, "press ignored");
                Outcome::Ignored
            }
        }
    }

    /// Releases act on notes only, whatever modifiers are held, so a key
    /// pressed before a modifier still stops sounding
    fn release<S: NoteSink + ?Sized>(&mut self, input: &KeyInput, sink: &mut S) -> Outcome {
        match self.layout.logical(input.code) {
            Some(key) => Self::notes(self.transition(key, false, sink) as usize),
            None => Outcome::Ignored,
        }
    }

    fn notes(count: usize) -> Outcome {
        if count == 0 {
            Outcome::Ignored
        } else {
            Outcome::Notes(count)
        }
    }

    fn finish(&mut self, reason: &str) -> Outcome {
        info!(reason, "performance engine finished");
        self.finished = true;
        Outcome::Quit
    }

    /// Move a key to `down`, sending the note event if that is a change.
    ///
    /// Notes outside 0..=127 are dropped before the keyboard state is
    /// touched. Velocity and base note are read now, so a release uses the
    /// voice's current velocity.
    fn transition<S: NoteSink + ?Sized>(&mut self, key: LogicalKey, down: bool, sink: &mut S) -> bool {
        let manual = key.manual();
        let voice = self.voices[manual.index()];

        let Some(note) = absolute_note(voice.base_note(), to_semitone_offset(key)) else {
            trace!(key = key.index(), base_note = voice.base_note(), "note out of range, dropped");
            return false;
        };

        if self.keyboard.is_sounding(key) == down {
            trace!(key = key.index(), down, "redundant transition absorbed");
            return false;
        }

        self.keyboard.set_sounding(key, down);
        self.sent[key.index() as usize] = down.then_some((voice.channel(), note));
        let event = NoteEvent::new(down, voice.channel(), note, voice.velocity());
        debug!(
            manual = manual.name(),
            key = key.index(),
            slot = key.slot().name(),
            ?event,
            "note"
        );
        sink.emit(manual, event);
        true
    }

    /// Bring the keyboard state in line with a full key snapshot, lowest
    /// logical key first
    fn sync<S: NoteSink + ?Sized>(&mut self, vector: &KeyVector, sink: &mut S) -> usize {
        let mut sent = 0;
        for key in LogicalKey::all() {
            let down = self
                .layout
                .physical(key)
                .is_some_and(|code| vector.is_down(code));
            if down != self.keyboard.is_sounding(key) && self.transition(key, down, sink) {
                sent += 1;
            }
        }
        debug!(sent, "keymap synchronised");
        sent
    }

    /// Send a note off for every sounding key and clear the keyboard state.
    ///
    /// Each Note Off carries the channel and note its Note On went out
    /// with, not the voice's current ones.
    pub fn release_all<S: NoteSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut released = 0;
        for key in LogicalKey::all() {
            if !self.keyboard.is_sounding(key) {
                continue;
            }
            let Some((channel, note)) = self.sent[key.index() as usize].take() else {
                continue;
            };
            let manual = key.manual();
            let velocity = self.voices[manual.index()].velocity();
            let event = NoteEvent::new(false, channel, note, velocity);
            debug!(manual = manual.name(), key = key.index(), ?event, "cleanup release");
            sink.emit(manual, event);
            released += 1;
        }
        self.keyboard.clear();
        self.sent = [None; NUM_KEYS];
        released
    }

    /// Swap in a new host key table. Sounding keys keep sounding.
    pub fn rebuild_layout(&mut self, table: &HostKeyTable) {
        if table.is_empty() {
            warn!("empty host key table, no key will play a note");
        }
        self.layout.rebuild(table);
        info!(entries = table.len(), "key layout rebuilt");
    }

    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn voice(&self, manual: Manual) -> &PerformanceState {
        &self.voices[manual.index()]
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            keyboard: self.keyboard,
            voices: self.voices,
            finished: self.finished,
        }
    }
}

impl Default for PerformanceEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PhysicalCode;
    use crate::performance::Direction;

    const KEY_C: PhysicalCode = PhysicalCode(54);
    const KEY_G: PhysicalCode = PhysicalCode(94);

    type Recorder = Vec<(Manual, NoteEvent)>;

    fn press(code: PhysicalCode) -> InputEvent {
        InputEvent::KeyPress(KeyInput::plain(code))
    }

    fn release(code: PhysicalCode) -> InputEvent {
        InputEvent::KeyRelease(KeyInput::plain(code))
    }

    #[test]
    fn press_and_release_send_one_pair() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();

        assert_eq!(engine.process(&press(KEY_C), &mut sink), Outcome::Notes(1));
        assert_eq!(engine.process(&press(KEY_C), &mut sink), Outcome::Ignored);
        assert_eq!(engine.process(&release(KEY_C), &mut sink), Outcome::Notes(1));
        assert_eq!(engine.process(&release(KEY_C), &mut sink), Outcome::Ignored);

        assert_eq!(
            sink,
            vec![
                (Manual::Lower, NoteEvent::new(true, 0, 48, 127)),
                (Manual::Lower, NoteEvent::new(false, 0, 48, 127)),
            ]
        );
    }

    #[test]
    fn out_of_range_note_leaves_state_alone() {
        let config = EngineConfig {
            lower: PerformanceState::new(0, 0, 100).unwrap(),
            ..EngineConfig::default()
        };
        let mut engine = PerformanceEngine::new(config);
        let mut sink = Recorder::new();

        // G below C at base note 0 would be -5
        assert_eq!(engine.process(&press(KEY_G), &mut sink), Outcome::Ignored);
        assert!(sink.is_empty());
        assert!(engine.keyboard().is_silent());
    }

    #[test]
    fn release_uses_current_velocity() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();

        engine.process(&press(KEY_C), &mut sink);
        let f3 = InputEvent::KeyPress(KeyInput::new(
            PhysicalCode(69),
            KeySymbol::Function(3),
            Modifiers::NONE,
        ));
        assert_eq!(
            engine.process(&f3, &mut sink),
            Outcome::Control {
                manual: Manual::Lower,
                change: ControlChange::Velocity(117)
            }
        );
        engine.process(&release(KEY_C), &mut sink);

        assert_eq!(sink[1].1, NoteEvent::new(false, 0, 48, 117));
    }

    #[test]
    fn quit_is_terminal() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();
        let escape = InputEvent::KeyPress(KeyInput::new(
            PhysicalCode(9),
            KeySymbol::Escape,
            Modifiers::NONE,
        ));

        assert_eq!(engine.process(&escape, &mut sink), Outcome::Quit);
        assert!(engine.is_finished());
        assert_eq!(engine.process(&press(KEY_C), &mut sink), Outcome::Ignored);
        assert!(sink.is_empty());
    }

    #[test]
    fn close_request_is_terminal() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();
        assert_eq!(engine.process(&InputEvent::CloseRequest, &mut sink), Outcome::Quit);
        assert!(engine.snapshot().finished);
    }

    #[test]
    fn release_all_silences_everything() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();
        engine.process(&press(KEY_C), &mut sink);
        engine.process(&press(PhysicalCode(26)), &mut sink);

        sink.clear();
        assert_eq!(engine.release_all(&mut sink), 2);
        assert!(engine.keyboard().is_silent());
        assert_eq!(sink[0], (Manual::Lower, NoteEvent::new(false, 0, 48, 127)));
        assert_eq!(sink[1], (Manual::Upper, NoteEvent::new(false, 0, 72, 127)));
    }

    #[test]
    fn release_all_stops_the_note_that_was_sent() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();
        let f1 = InputEvent::KeyPress(KeyInput::new(
            PhysicalCode(67),
            KeySymbol::Function(1),
            Modifiers::NONE,
        ));

        engine.process(&press(KEY_G), &mut sink);
        for _ in 0..4 {
            engine.process(&f1, &mut sink);
        }
        assert_eq!(engine.voice(Manual::Lower).base_note(), 0);

        // at base note 0 the release resolves to -5 and is dropped
        assert_eq!(engine.process(&release(KEY_G), &mut sink), Outcome::Ignored);
        assert!(!engine.keyboard().is_silent());

        sink.clear();
        assert_eq!(engine.release_all(&mut sink), 1);
        assert_eq!(sink, vec![(Manual::Lower, NoteEvent::new(false, 0, 43, 127))]);
        assert!(engine.keyboard().is_silent());
        assert_eq!(engine.release_all(&mut sink), 0);
    }

    #[test]
    fn release_all_uses_channel_of_the_note_on() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();
        let ctrl_5 = InputEvent::KeyPress(KeyInput::new(
            PhysicalCode(14),
            KeySymbol::Digit(5),
            Modifiers::CONTROL,
        ));
        let f2 = InputEvent::KeyPress(KeyInput::new(
            PhysicalCode(68),
            KeySymbol::Function(2),
            Modifiers::NONE,
        ));

        engine.process(&press(KEY_C), &mut sink);
        engine.process(&ctrl_5, &mut sink);
        engine.process(&f2, &mut sink);

        sink.clear();
        engine.release_all(&mut sink);
        assert_eq!(sink, vec![(Manual::Lower, NoteEvent::new(false, 0, 48, 127))]);
    }

    #[test]
    fn ordinary_release_follows_current_state() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();
        let f2 = InputEvent::KeyPress(KeyInput::new(
            PhysicalCode(68),
            KeySymbol::Function(2),
            Modifiers::NONE,
        ));

        engine.process(&press(KEY_C), &mut sink);
        engine.process(&f2, &mut sink);
        engine.process(&release(KEY_C), &mut sink);
        assert_eq!(sink[1], (Manual::Lower, NoteEvent::new(false, 0, 60, 127)));

        // nothing left over for cleanup
        sink.clear();
        assert_eq!(engine.release_all(&mut sink), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn control_changes_show_in_snapshot() {
        let mut engine = PerformanceEngine::default();
        let mut sink = Recorder::new();
        let alt_up = InputEvent::KeyPress(KeyInput::new(
            PhysicalCode(70),
            KeySymbol::Function(4),
            Modifiers::ALT.with_shift(),
        ));
        engine.process(&alt_up, &mut sink);
        let big_down = InputEvent::KeyPress(KeyInput::new(
            PhysicalCode(73),
            KeySymbol::Function(7),
            Modifiers::NONE,
        ));
        engine.process(&big_down, &mut sink);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.voice(Manual::Upper).velocity(), 117);
        assert_eq!(snapshot.voice(Manual::Lower).velocity(), 127);
        assert!(sink.is_empty());

        let mut state = PerformanceState::UPPER;
        state.velocity_big_step(Direction::Down);
        assert_eq!(*snapshot.voice(Manual::Upper), state);
    }
}
