//! End-of-game animation sequencer.
//!
//! Once a game reaches a terminal state the board stops rendering and this
//! sequencer takes over the matrix: a winner gets the full board lit in the
//! winning color, a stalemate gets an "X" pattern alternating between red
//! and green. After a fixed number of cycles the sequencer signals
//! completion so the owning loop can start a fresh game.
//!
//! # Example
//!
//! ```rust
//! use charlie_ttt::config::SequenceConfig;
//! use charlie_ttt::display::MatrixDriver;
//! use charlie_ttt::game::GameState;
//! use charlie_ttt::hal::{MockPort, MockTimer};
//! use charlie_ttt::sequence::EndGameSequencer;
//!
//! let mut driver = MatrixDriver::new(MockPort::new()).unwrap();
//! let mut timer = MockTimer::new();
//! let mut sequencer = EndGameSequencer::new(SequenceConfig::default());
//!
//! assert!(!sequencer.play(&mut driver, &mut timer, GameState::RedWins).unwrap());
//! assert!(!sequencer.play(&mut driver, &mut timer, GameState::RedWins).unwrap());
//! assert!(sequencer.play(&mut driver, &mut timer, GameState::RedWins).unwrap());
//! ```

use crate::config::SequenceConfig;
use crate::display::MatrixDriver;
use crate::game::{GameState, LedColor, NUM_CELLS};
use crate::traits::{LinePort, Sleep};

/// Every cell lit, for the winner animation.
const ALL_CELLS: [bool; NUM_CELLS] = [true; NUM_CELLS];

/// The stalemate "X": corners plus center.
const X_PATTERN: [bool; NUM_CELLS] = [
    true, false, true, //
    false, true, false, //
    true, false, true, //
];

/// Plays the terminal-state animation, one cycle per call.
///
/// Retains the last state it was invoked with and a cycle counter; passing
/// a different state restarts the animation from cycle zero.
#[derive(Clone, Copy, Debug)]
pub struct EndGameSequencer {
    last_state: Option<GameState>,
    cycles: u8,
    config: SequenceConfig,
}

impl EndGameSequencer {
    /// Creates an idle sequencer.
    pub const fn new(config: SequenceConfig) -> Self {
        Self {
            last_state: None,
            cycles: 0,
            config,
        }
    }

    /// Completed cycles of the animation currently playing.
    pub fn cycles_played(&self) -> u8 {
        self.cycles
    }

    /// Forgets any animation in progress.
    pub fn reset(&mut self) {
        self.last_state = None;
        self.cycles = 0;
    }

    /// Runs one animation cycle for `state`.
    ///
    /// A cycle lights the state's pattern for the configured "on" duration,
    /// then rests dark for the "off" duration. Returns `Ok(true)` once the
    /// configured number of cycles has completed — the internal counter is
    /// reset and the caller may reinitialize the game — and `Ok(false)`
    /// while the animation is still in progress.
    pub fn play<P: LinePort>(
        &mut self,
        driver: &mut MatrixDriver<P>,
        sleep: &mut impl Sleep,
        state: GameState,
    ) -> Result<bool, P::Error> {
        if self.last_state != Some(state) {
            self.last_state = Some(state);
            self.cycles = 0;
        }

        let (color, mask) = match state {
            GameState::RedWins => (LedColor::Red, &ALL_CELLS),
            GameState::GreenWins => (LedColor::Green, &ALL_CELLS),
            // Stalemate: the X alternates colors on successive cycles.
            _ => {
                let color = if self.cycles % 2 == 0 {
                    LedColor::Red
                } else {
                    LedColor::Green
                };
                (color, &X_PATTERN)
            }
        };

        driver.light_mask(sleep, color, mask, self.config.on_ms, self.config.slot_ms)?;
        driver.all_hi_z()?;
        sleep.sleep_ms(u32::from(self.config.off_ms));

        self.cycles += 1;
        if self.cycles >= self.config.cycles {
            self.cycles = 0;
            self.last_state = None;
            driver.all_hi_z()?;
            return Ok(true);
        }
        Ok(false)
    }
}
