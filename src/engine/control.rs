//! Deciding what a key press means: a note, a control change, or quit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::input::{KeyInput, KeySymbol};
use crate::layout::{KeyLayout, LogicalKey, Manual};
use crate::performance::{Direction, PerformanceState};

/// A change to one field of a voice's performance state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlAction {
    TransposeDown,
    TransposeUp,
    /// `fine` selects the one-step change instead of the ten-step one
    Velocity { direction: Direction, fine: bool },
    ChannelIncrement,
    ChannelDecrement,
    ChannelSet(u8),
}

/// New value of the field a control action touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlChange {
    BaseNote(i32),
    Velocity(u8),
    Channel(u8),
}

impl ControlAction {
    pub fn apply(self, state: &mut PerformanceState) -> ControlChange {
        match self {
            ControlAction::TransposeDown => ControlChange::BaseNote(state.transpose_down()),
            ControlAction::TransposeUp => ControlChange::BaseNote(state.transpose_up()),
            ControlAction::Velocity {
                direction,
                fine: true,
            } => ControlChange::Velocity(state.velocity_small_step(direction)),
            ControlAction::Velocity {
                direction,
                fine: false,
            } => ControlChange::Velocity(state.velocity_big_step(direction)),
            ControlAction::ChannelIncrement => ControlChange::Channel(state.channel_increment()),
            ControlAction::ChannelDecrement => ControlChange::Channel(state.channel_decrement()),
            ControlAction::ChannelSet(digit) => ControlChange::Channel(state.channel_set(digit)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Note(LogicalKey),
    Control(Manual, ControlAction),
    Quit,
    Ignore,
}

/// F1..F4 and F5..F8 carry the same four actions
fn function_key_action(number: u8, fine: bool) -> Option<ControlAction> {
    if !(1..=8).contains(&number) {
        return None;
    }
    let action = match (number - 1) % 4 {
        0 => ControlAction::TransposeDown,
        1 => ControlAction::TransposeUp,
        2 => ControlAction::Velocity {
            direction: Direction::Down,
            fine,
        },
        _ => ControlAction::Velocity {
            direction: Direction::Up,
            fine,
        },
    };
    Some(action)
}

fn modified_action(symbol: KeySymbol, fine: bool) -> Option<ControlAction> {
    match symbol {
        KeySymbol::Function(number) => function_key_action(number, fine),
        KeySymbol::Plus => Some(ControlAction::ChannelIncrement),
        KeySymbol::Minus => Some(ControlAction::ChannelDecrement),
        KeySymbol::Digit(digit) if digit <= 9 => Some(ControlAction::ChannelSet(digit)),
        _ => None,
    }
}

/// Interpret a key press.
///
/// Control selects the lower voice and alt the upper one; with either held
/// the press is always a control event. Otherwise a mapped key plays a
/// note, and of the unmapped keys only Escape and F1..F8 mean anything.
pub fn interpret_press(layout: &KeyLayout, input: &KeyInput) -> Interpretation {
    let modifiers = input.modifiers;
    let fine = modifiers.shift;

    if modifiers.selects_voice() {
        let manual = if modifiers.control {
            Manual::Lower
        } else {
            Manual::Upper
        };
        return match modified_action(input.symbol, fine) {
            Some(action) => Interpretation::Control(manual, action),
            None => Interpretation::Ignore,
        };
    }

    if let Some(key) = layout.logical(input.code) {
        return Interpretation::Note(key);
    }

    match input.symbol {
        KeySymbol::Escape => Interpretation::Quit,
        KeySymbol::Function(number) => {
            let manual = if number <= 4 {
                Manual::Lower
            } else {
                Manual::Upper
            };
            match function_key_action(number, fine) {
                Some(action) => Interpretation::Control(manual, action),
                None => Interpretation::Ignore,
            }
        }
        _ => Interpretation::Ignore,
    }
}
