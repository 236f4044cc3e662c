//! The tick-driven game console that ties everything together.
//!
//! [`GameConsole`] owns the matrix driver, the button, the timer, and all
//! persistent component state (gesture detector, game, animation sequencer).
//! The embedding environment constructs it once and calls
//! [`tick`](GameConsole::tick) forever.
//!
//! # Overview
//!
//! Each tick:
//! - reads the raw button level and classifies it into a gesture,
//! - in `Ongoing`, applies the gesture to the game and renders one frame,
//! - in a terminal state, plays one animation cycle and starts a fresh game
//!   when the animation completes,
//! - ends with a short pacing sleep.
//!
//! # Example
//!
//! ```rust
//! use charlie_ttt::console::GameConsole;
//! use charlie_ttt::game::GameState;
//! use charlie_ttt::hal::{MockButton, MockPort, MockTimer};
//!
//! let mut console =
//!     GameConsole::new(MockPort::new(), MockButton::new(), MockTimer::new()).unwrap();
//!
//! // Nobody pressing anything: the game stays ongoing.
//! for _ in 0..10 {
//!     assert_eq!(console.tick().unwrap(), GameState::Ongoing);
//! }
//! ```

use crate::button::GestureDetector;
use crate::config::Config;
use crate::display::{self, MatrixDriver};
use crate::game::{Board, Game, GameState, LedColor};
use crate::sequence::EndGameSequencer;
use crate::traits::{ButtonInput, Clock, LinePort, Sleep};

/// Full console state snapshot for UIs/telemetry.
///
/// Implements `serde::Serialize` when the `serde` feature is enabled.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    /// The board as currently marked.
    pub board: Board,
    /// Candidate cell for the next move.
    pub cursor: u8,
    /// Player whose turn it is.
    pub current_color: LedColor,
    /// Overall game phase.
    pub state: GameState,
}

/// Main console controller.
///
/// # Type Parameters
///
/// - `P`: the line port ([`LinePort`])
/// - `B`: the button ([`ButtonInput`])
/// - `T`: the timer ([`Clock`] + [`Sleep`])
///
/// Single-threaded by design: the driver exclusively owns line state during
/// a render step and parks every line before the tick ends.
pub struct GameConsole<P: LinePort, B: ButtonInput, T: Clock + Sleep> {
    driver: MatrixDriver<P>,
    button: B,
    timer: T,
    detector: GestureDetector,
    game: Game,
    state: GameState,
    sequencer: EndGameSequencer,
    config: Config,
}

impl<P: LinePort, B: ButtonInput, T: Clock + Sleep> GameConsole<P, B, T> {
    /// Creates a console with default timing and a fresh game.
    pub fn new(port: P, button: B, timer: T) -> Result<Self, P::Error> {
        Self::with_config(port, button, timer, Config::default())
    }

    /// Creates a console with custom timing.
    ///
    /// Parks every line before returning.
    pub fn with_config(port: P, button: B, timer: T, config: Config) -> Result<Self, P::Error> {
        Ok(Self {
            driver: MatrixDriver::new(port)?,
            button,
            timer,
            detector: GestureDetector::new(config.button),
            game: Game::new(),
            state: GameState::Ongoing,
            sequencer: EndGameSequencer::new(config.sequence),
            config,
        })
    }

    /// Resets to a fresh game: empty board, cursor on cell 0, Red to move.
    pub fn initialize_game(&mut self) {
        self.game.initialize();
        self.detector.reset();
        self.state = GameState::Ongoing;
    }

    /// Runs one cooperative tick and returns the game state after it.
    pub fn tick(&mut self) -> Result<GameState, P::Error> {
        let pressed = self.button.is_pressed();
        let now = self.timer.now_ms();
        let gesture = self.detector.update(pressed, now);

        match self.state {
            GameState::Ongoing => {
                if let Some(gesture) = gesture {
                    self.state = self.game.apply_gesture(gesture);
                }
                let now = self.timer.now_ms();
                display::render(
                    &mut self.driver,
                    &mut self.timer,
                    self.game.board(),
                    self.game.cursor(),
                    self.game.current_color(),
                    now,
                    &self.config.display,
                )?;
            }
            GameState::RedWins | GameState::GreenWins | GameState::Stalemate => {
                let done = self
                    .sequencer
                    .play(&mut self.driver, &mut self.timer, self.state)?;
                if done {
                    self.initialize_game();
                }
            }
            GameState::Restart => self.initialize_game(),
        }

        self.timer.sleep_ms(self.config.tick_ms);
        Ok(self.state)
    }

    /// The current game phase.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The game engine (board, cursor, turn).
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Point-in-time copy of everything a UI needs.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: *self.game.board(),
            cursor: self.game.cursor(),
            current_color: self.game.current_color(),
            state: self.state,
        }
    }

    /// The timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Mutable access to the button (mock scripting, mostly).
    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    /// The matrix driver.
    pub fn driver(&self) -> &MatrixDriver<P> {
        &self.driver
    }

    /// Mutable access to the matrix driver.
    pub fn driver_mut(&mut self) -> &mut MatrixDriver<P> {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayConfig, SequenceConfig};
    use crate::hal::{MockButton, MockPort, MockTimer};

    /// Timing that makes one tick advance the clock by exactly 1 ms: zero
    /// LED holds, 1 ms pacing sleep.
    fn test_config() -> Config {
        Config::default()
            .with_display(
                DisplayConfig::default()
                    .with_cell_hold_ms(0)
                    .with_cursor_hold_ms(0),
            )
            .with_sequence(SequenceConfig::default().with_on_ms(10).with_off_ms(5))
    }

    fn console() -> GameConsole<MockPort, MockButton, MockTimer> {
        GameConsole::with_config(
            MockPort::new(),
            MockButton::new(),
            MockTimer::new(),
            test_config(),
        )
        .unwrap()
    }

    fn hold(console: &mut GameConsole<MockPort, MockButton, MockTimer>, ms: u64) {
        console.button_mut().set_pressed(true);
        for _ in 0..ms {
            console.tick().unwrap();
        }
    }

    fn release(console: &mut GameConsole<MockPort, MockButton, MockTimer>, ms: u64) {
        console.button_mut().set_pressed(false);
        for _ in 0..ms {
            console.tick().unwrap();
        }
    }

    #[test]
    fn fresh_console_is_ongoing_with_empty_board() {
        let console = console();
        let snapshot = console.snapshot();
        assert_eq!(snapshot.state, GameState::Ongoing);
        assert_eq!(snapshot.cursor, 0);
        assert_eq!(snapshot.current_color, LedColor::Red);
        assert!(!snapshot.board.is_full());
        assert!(console.driver().port().all_parked());
    }

    #[test]
    fn idle_ticks_keep_lines_parked() {
        let mut console = console();
        for _ in 0..100 {
            console.tick().unwrap();
        }
        assert!(console.driver().port().all_parked());
        assert!(console.driver().port().is_glitch_free());
    }

    #[test]
    fn short_press_moves_the_cursor() {
        let mut console = console();
        hold(&mut console, 50);
        release(&mut console, 600);
        assert_eq!(console.game().cursor(), 1);
        assert_eq!(console.game().current_color(), LedColor::Red);
    }

    #[test]
    fn double_press_moves_the_cursor_backward() {
        let mut console = console();
        hold(&mut console, 50);
        release(&mut console, 100);
        hold(&mut console, 50);
        release(&mut console, 600);
        assert_eq!(console.game().cursor(), 8);
    }

    #[test]
    fn long_press_commits_a_move() {
        let mut console = console();
        hold(&mut console, 1100);
        release(&mut console, 30);
        let snapshot = console.snapshot();
        assert!(snapshot.board.is_marked(LedColor::Red, 0));
        assert_eq!(snapshot.current_color, LedColor::Green);
        assert_eq!(snapshot.cursor, 1);
        assert_eq!(snapshot.state, GameState::Ongoing);
    }

    #[test]
    fn initialize_game_clears_everything() {
        let mut console = console();
        hold(&mut console, 1100);
        release(&mut console, 30);
        assert!(console.snapshot().board.occupied(0));

        console.initialize_game();
        let snapshot = console.snapshot();
        assert!(!snapshot.board.occupied(0));
        assert_eq!(snapshot.cursor, 0);
        assert_eq!(snapshot.current_color, LedColor::Red);
        assert_eq!(snapshot.state, GameState::Ongoing);
    }
}
