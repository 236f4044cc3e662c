//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without a soldered matrix.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPort`] | [`LinePort`] | Records every latch/mode write for order checks |
//! | [`MockButton`] | [`ButtonInput`] | Directly settable raw level |
//! | [`MockTimer`] | [`Clock`] + [`Sleep`] | Controllable time that advances on sleep |
//!
//! # Example
//!
//! ```rust
//! use charlie_ttt::display::MatrixDriver;
//! use charlie_ttt::game::LedColor;
//! use charlie_ttt::hal::{MockPort, MockTimer};
//! use charlie_ttt::traits::Clock;
//!
//! let mut driver = MatrixDriver::new(MockPort::new()).unwrap();
//! let mut timer = MockTimer::new();
//!
//! driver.light_cell(&mut timer, LedColor::Red, 0, 3).unwrap();
//!
//! // The mock saw the activation and the mandatory discharge.
//! assert_eq!(driver.port().lit_pairs(), [(0, 1)]);
//! assert!(driver.port().all_parked());
//! assert_eq!(timer.now_ms(), 3);
//! ```
//!
//! [`LinePort`]: crate::traits::LinePort
//! [`ButtonInput`]: crate::traits::ButtonInput
//! [`Clock`]: crate::traits::Clock
//! [`Sleep`]: crate::traits::Sleep

use crate::display::NUM_LINES;
use crate::traits::{ButtonInput, Clock, Level, LinePort, Mode, Sleep};

extern crate alloc;
use alloc::vec::Vec;

/// One recorded register write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortOp {
    /// Output latch written to the given level.
    Latch(Level),
    /// Direction switched to the given mode.
    Mode(Mode),
}

/// A register write together with the line it targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortEvent {
    /// Line ordinal, `0..5`.
    pub line: u8,
    /// What was written.
    pub op: PortOp,
}

/// Mock line port for testing.
///
/// Tracks the live latch/mode state of all five lines and records every
/// write in order, so tests can assert both the final electrical state and
/// the transition sequencing.
#[derive(Clone, Debug)]
pub struct MockPort {
    /// Current latch level per line.
    pub latch: [Level; NUM_LINES],
    /// Current direction mode per line.
    pub mode: [Mode; NUM_LINES],
    /// Every write, in call order.
    pub events: Vec<PortEvent>,
}

impl MockPort {
    /// Creates a port with all lines in input mode, latches low.
    pub fn new() -> Self {
        Self {
            latch: [Level::Low; NUM_LINES],
            mode: [Mode::Input; NUM_LINES],
            events: Vec::new(),
        }
    }

    /// Drops the recorded event trace (state is kept).
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// True when every line floats: input mode, latch low.
    pub fn all_parked(&self) -> bool {
        self.mode.iter().all(|&m| m == Mode::Input) && self.latch.iter().all(|&l| l == Level::Low)
    }

    /// Reconstructs the (source, sink) pairs that were driven, in order.
    ///
    /// A drive starts with a latch-high on the source; the sink is the next
    /// line switched to output after it.
    pub fn lit_pairs(&self) -> Vec<(u8, u8)> {
        let mut pairs = Vec::new();
        for (i, event) in self.events.iter().enumerate() {
            if event.op != PortOp::Latch(Level::High) {
                continue;
            }
            let source = event.line;
            let sink = self.events[i + 1..].iter().find_map(|e| {
                (e.op == PortOp::Mode(Mode::Output) && e.line != source).then_some(e.line)
            });
            if let Some(sink) = sink {
                pairs.push((source, sink));
            }
        }
        pairs
    }

    /// Checks the glitch-free transition contract over the whole trace:
    /// every mode switch must be immediately preceded (per line) by a latch
    /// write, and a switch to input requires that latch to be low.
    pub fn is_glitch_free(&self) -> bool {
        for (i, event) in self.events.iter().enumerate() {
            let PortOp::Mode(mode) = event.op else {
                continue;
            };
            let prior = self.events[..i].iter().rev().find(|e| e.line == event.line);
            match (mode, prior.map(|e| e.op)) {
                (Mode::Input, Some(PortOp::Latch(Level::Low))) => {}
                (Mode::Output, Some(PortOp::Latch(_))) => {}
                _ => return false,
            }
        }
        true
    }

    /// True when the trace ends with a full discharge: every line driven
    /// low, then every line parked in Hi-Z.
    pub fn all_lines_forced_low_before_final_park(&self) -> bool {
        let mut expected = Vec::new();
        for line in 0..NUM_LINES as u8 {
            expected.push(PortEvent {
                line,
                op: PortOp::Latch(Level::Low),
            });
            expected.push(PortEvent {
                line,
                op: PortOp::Mode(Mode::Output),
            });
        }
        for line in 0..NUM_LINES as u8 {
            expected.push(PortEvent {
                line,
                op: PortOp::Latch(Level::Low),
            });
            expected.push(PortEvent {
                line,
                op: PortOp::Mode(Mode::Input),
            });
        }
        self.events.len() >= expected.len()
            && self.events[self.events.len() - expected.len()..] == expected[..]
    }
}

impl Default for MockPort {
    fn default() -> Self {
        Self::new()
    }
}

impl LinePort for MockPort {
    type Error = ();

    fn set_latch(&mut self, line: u8, level: Level) -> Result<(), ()> {
        self.latch[line as usize] = level;
        self.events.push(PortEvent {
            line,
            op: PortOp::Latch(level),
        });
        Ok(())
    }

    fn set_mode(&mut self, line: u8, mode: Mode) -> Result<(), ()> {
        self.mode[line as usize] = mode;
        self.events.push(PortEvent {
            line,
            op: PortOp::Mode(mode),
        });
        Ok(())
    }
}

/// Mock button with a directly settable level.
///
/// # Example
///
/// ```rust
/// use charlie_ttt::hal::MockButton;
/// use charlie_ttt::traits::ButtonInput;
///
/// let mut button = MockButton::new();
/// assert!(!button.is_pressed());
///
/// button.set_pressed(true);
/// assert!(button.is_pressed());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MockButton {
    /// Current raw level (true = held down).
    pub pressed: bool,
}

impl MockButton {
    /// Creates a released button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw level.
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

impl ButtonInput for MockButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

/// Mock time source that doubles as the sleep provider.
///
/// Sleeping advances the clock by exactly the slept amount, matching the
/// contract real implementations must honor. Every sleep is recorded for
/// inspection.
///
/// # Example
///
/// ```rust
/// use charlie_ttt::hal::MockTimer;
/// use charlie_ttt::traits::{Clock, Sleep};
///
/// let mut timer = MockTimer::new();
/// timer.sleep_ms(3);
/// timer.advance(100);
/// assert_eq!(timer.now_ms(), 103);
/// assert_eq!(timer.sleeps, [3]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockTimer {
    current_ms: u64,
    /// Every sleep request, in call order.
    pub sleeps: Vec<u32>,
}

impl MockTimer {
    /// Creates a timer starting at 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock without recording a sleep.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }

    /// Total milliseconds spent sleeping.
    pub fn total_slept(&self) -> u64 {
        self.sleeps.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl Clock for MockTimer {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

impl Sleep for MockTimer {
    fn sleep_ms(&mut self, ms: u32) {
        self.current_ms += u64::from(ms);
        self.sleeps.push(ms);
    }
}
