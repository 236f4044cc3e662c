//! # charlie-ttt
//!
//! Two-player tic-tac-toe on a 9-cell two-color Charlieplexed LED matrix,
//! played with a single push button.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for line control, button input, and
//!   timing, with mock implementations for desktop testing
//! - **Charlieplexed driver**: 5 shared lines address 18 LEDs, one lit at a
//!   time, with a mandatory discharge step that kills ghosting
//! - **Single-button UI**: debounced short/double/long press gestures for
//!   navigate-forward / navigate-backward / commit
//! - **Total game logic**: cursor invariants, win/stalemate detection, and
//!   end-game animations with no panicking paths
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions (lines, button, clock, sleep)
//! - `display` - Charlieplexed driver and per-frame scheduler
//! - `button` - Debounced gesture detector state machine
//! - `game` - Board, cursor, and turn logic
//! - `sequence` - End-of-game animation sequencer
//! - `console` - Tick-driven controller that ties everything together
//! - `hal` - Concrete implementations (mock for testing, adapters for
//!   `embedded-hal` pins)
//!
//! ## Example
//!
//! ```rust
//! use charlie_ttt::{
//!     GameConsole, GameState,
//!     hal::{MockButton, MockPort, MockTimer},
//! };
//!
//! // Create a console with mock hardware
//! let mut console =
//!     GameConsole::new(MockPort::new(), MockButton::new(), MockTimer::new()).unwrap();
//!
//! // Hold the button past the long-press threshold, then release:
//! // Red commits a move on cell 0.
//! console.button_mut().set_pressed(true);
//! for _ in 0..1100 {
//!     console.tick().unwrap();
//! }
//! console.button_mut().set_pressed(false);
//! for _ in 0..30 {
//!     console.tick().unwrap();
//! }
//!
//! let snapshot = console.snapshot();
//! assert_eq!(snapshot.state, GameState::Ongoing);
//! assert!(snapshot.board.occupied(0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Debounced button gesture detection.
pub mod button;
/// Timing configuration for input, display, and animation.
pub mod config;
/// Tick-driven console controller that coordinates input, game, and display.
pub mod console;
/// Charlieplexed LED driver and display scheduler.
pub mod display;
/// Board state, cursor navigation, and win/stalemate detection.
pub mod game;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// End-of-game animation sequencer.
pub mod sequence;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use button::{ButtonGesture, GestureDetector};
pub use config::{ButtonConfig, Config, DisplayConfig, SequenceConfig};
pub use console::{GameConsole, GameSnapshot};
pub use display::{frame_plan, pair_for, render, MatrixDriver, Slot, FRAME_SLOTS, NUM_LINES};
pub use game::{Board, Game, GameState, LedColor, SeekDir, NUM_CELLS, WINNING_TRIPLES};
pub use sequence::EndGameSequencer;
pub use traits::{ButtonInput, Clock, Level, LinePort, Mode, Sleep};
