// Purpose: per-voice performance controls (channel, transpose, velocity)

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const MAX_CHANNEL: u8 = 15;
pub const MAX_VELOCITY: u8 = 127;
pub const MIN_BASE_NOTE: i32 = 0;
pub const MAX_BASE_NOTE: i32 = 104;
pub const OCTAVE: i32 = 12;

const SMALL_VELOCITY_STEP: i32 = 1;
const BIG_VELOCITY_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Down,
    Up,
}

/// Channel, transpose and velocity of one voice.
///
/// Every operation keeps its field in range and returns the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerformanceState {
    channel: u8,
    base_note: i32,
    velocity: u8,
}

impl PerformanceState {
    /// Lower manual starts at C3
    pub const LOWER: PerformanceState = PerformanceState {
        channel: 0,
        base_note: 48,
        velocity: MAX_VELOCITY,
    };

    /// Upper manual starts at C5
    pub const UPPER: PerformanceState = PerformanceState {
        channel: 0,
        base_note: 72,
        velocity: MAX_VELOCITY,
    };

    /// Build a state, rejecting values no control operation could reach
    pub fn new(channel: u8, base_note: i32, velocity: u8) -> Result<Self> {
        if channel > MAX_CHANNEL {
            return Err(Error::InvalidSetting(format!(
                "channel {} is above {}",
                channel, MAX_CHANNEL
            )));
        }
        if velocity > MAX_VELOCITY {
            return Err(Error::InvalidSetting(format!(
                "velocity {} is above {}",
                velocity, MAX_VELOCITY
            )));
        }
        if !(MIN_BASE_NOTE..=MAX_BASE_NOTE).contains(&base_note) || base_note % OCTAVE != 0 {
            return Err(Error::InvalidSetting(format!(
                "base note {} is not a multiple of {} in {}..={}",
                base_note, OCTAVE, MIN_BASE_NOTE, MAX_BASE_NOTE
            )));
        }
        Ok(Self {
            channel,
            base_note,
            velocity,
        })
    }

    /// Same as `new`, with the base note given as an octave number
    pub fn with_octave(channel: u8, octave: i32, velocity: u8) -> Result<Self> {
        Self::new(channel, octave * OCTAVE, velocity)
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn base_note(&self) -> i32 {
        self.base_note
    }

    /// Base note expressed in octaves, as shown on the panel
    pub fn base_octave(&self) -> i32 {
        self.base_note.div_euclid(OCTAVE)
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn transpose_down(&mut self) -> i32 {
        self.transpose(-OCTAVE)
    }

    pub fn transpose_up(&mut self) -> i32 {
        self.transpose(OCTAVE)
    }

    fn transpose(&mut self, semitones: i32) -> i32 {
        let next = self.base_note + semitones;
        if (MIN_BASE_NOTE..=MAX_BASE_NOTE).contains(&next) {
            self.base_note = next;
            debug!(base_note = next, "transposed");
        }
        self.base_note
    }

    pub fn velocity_small_step(&mut self, direction: Direction) -> u8 {
        self.step_velocity(direction, SMALL_VELOCITY_STEP)
    }

    pub fn velocity_big_step(&mut self, direction: Direction) -> u8 {
        self.step_velocity(direction, BIG_VELOCITY_STEP)
    }

    fn step_velocity(&mut self, direction: Direction, step: i32) -> u8 {
        let delta = match direction {
            Direction::Down => -step,
            Direction::Up => step,
        };
        let next = (self.velocity as i32 + delta).clamp(0, MAX_VELOCITY as i32) as u8;
        if next != self.velocity {
            self.velocity = next;
            debug!(velocity = next, "velocity changed");
        }
        self.velocity
    }

    pub fn channel_increment(&mut self) -> u8 {
        self.set_channel_wrapped(self.channel as i32 + 1)
    }

    pub fn channel_decrement(&mut self) -> u8 {
        self.set_channel_wrapped(self.channel as i32 - 1)
    }

    fn set_channel_wrapped(&mut self, channel: i32) -> u8 {
        self.channel = channel.rem_euclid(MAX_CHANNEL as i32 + 1) as u8;
        debug!(channel = self.channel, "channel changed");
        self.channel
    }

    /// Direct channel selection from a digit key; digits above 9 are ignored
    pub fn channel_set(&mut self, digit: u8) -> u8 {
        if digit <= 9 {
            self.channel = digit;
            debug!(channel = digit, "channel set");
        }
        self.channel
    }
}
