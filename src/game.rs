//! Board state, cursor navigation, and win/stalemate detection.
//!
//! This module owns all game rules: move legality, turn alternation, and the
//! terminal-state predicates. It is pure logic with no hardware access, so
//! everything here is testable on the desktop.
//!
//! # Example
//!
//! ```rust
//! use charlie_ttt::button::ButtonGesture;
//! use charlie_ttt::game::{Game, GameState, LedColor};
//!
//! let mut game = Game::new();
//! assert_eq!(game.current_color(), LedColor::Red);
//!
//! // Red commits cell 0, turn passes to Green.
//! let state = game.apply_gesture(ButtonGesture::Long);
//! assert_eq!(state, GameState::Ongoing);
//! assert_eq!(game.current_color(), LedColor::Green);
//! assert!(game.board().occupied(0));
//! ```

use crate::button::ButtonGesture;

/// Number of cells per color on the 3×3 board.
pub const NUM_CELLS: usize = 9;

/// The 8 winning cell triples: 3 rows, 3 columns, 2 diagonals.
pub const WINNING_TRIPLES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Player color, doubling as the LED color that renders the player's marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LedColor {
    /// The red player; moves first.
    #[default]
    Red,
    /// The green player.
    Green,
}

impl LedColor {
    /// Returns the other player.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            LedColor::Red => LedColor::Green,
            LedColor::Green => LedColor::Red,
        }
    }

    /// Returns the color as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LedColor::Red => "red",
            LedColor::Green => "green",
        }
    }
}

/// Overall game phase.
///
/// `Ongoing` is the only state in which player input mutates the board. The
/// three terminal states feed the end-game animation; `Restart` asks the
/// owning loop to reinitialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameState {
    /// Waiting for the game to be (re)initialized.
    #[default]
    Restart,
    /// Game in progress, accepting input.
    Ongoing,
    /// All cells occupied with no winning triple.
    Stalemate,
    /// Red completed a winning triple.
    RedWins,
    /// Green completed a winning triple.
    GreenWins,
}

impl GameState {
    /// The win state for the given player.
    #[inline]
    pub const fn win_for(color: LedColor) -> Self {
        match color {
            LedColor::Red => GameState::RedWins,
            LedColor::Green => GameState::GreenWins,
        }
    }

    /// The winning player, if this is a win state.
    pub const fn winner(&self) -> Option<LedColor> {
        match self {
            GameState::RedWins => Some(LedColor::Red),
            GameState::GreenWins => Some(LedColor::Green),
            _ => None,
        }
    }

    /// True for the states that end a game (wins and stalemate).
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameState::Stalemate | GameState::RedWins | GameState::GreenWins
        )
    }
}

/// Cursor scan direction for free-cell searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekDir {
    /// Ascending cell order, wrapping 8 → 0.
    Forward,
    /// Descending cell order, wrapping 0 → 8.
    Backward,
}

impl SeekDir {
    /// One cyclic step from `idx` in this direction.
    #[inline]
    pub const fn step(self, idx: u8) -> u8 {
        match self {
            SeekDir::Forward => (idx + 1) % NUM_CELLS as u8,
            SeekDir::Backward => {
                if idx == 0 {
                    NUM_CELLS as u8 - 1
                } else {
                    idx - 1
                }
            }
        }
    }
}

/// Per-color occupancy of the 9 cells.
///
/// A cell may legitimately be occupied by at most one color. The display
/// layer still resolves a double-marked cell (Red wins priority) as a
/// defensive rule; nothing in [`Game`] produces one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[bool; NUM_CELLS]; 2],
}

impl Board {
    /// Creates an empty board.
    pub const fn new() -> Self {
        Self {
            cells: [[false; NUM_CELLS]; 2],
        }
    }

    /// True if `color` has a mark at `cell`.
    #[inline]
    pub fn is_marked(&self, color: LedColor, cell: u8) -> bool {
        self.cells[color as usize][cell as usize]
    }

    /// True if either color has a mark at `cell`.
    #[inline]
    pub fn occupied(&self, cell: u8) -> bool {
        self.is_marked(LedColor::Red, cell) || self.is_marked(LedColor::Green, cell)
    }

    /// Places a mark for `color` at `cell`. Marks never come back off.
    pub fn mark(&mut self, color: LedColor, cell: u8) {
        debug_assert!((cell as usize) < NUM_CELLS);
        self.cells[color as usize][cell as usize] = true;
    }

    /// True when every cell is occupied.
    pub fn is_full(&self) -> bool {
        (0..NUM_CELLS as u8).all(|i| self.occupied(i))
    }

    /// True if `color` has completed any of the 8 winning triples.
    pub fn has_win(&self, color: LedColor) -> bool {
        WINNING_TRIPLES.iter().any(|triple| {
            triple.iter().all(|&cell| self.is_marked(color, cell))
        })
    }

    /// Finds the first free cell at or after `start`, scanning cyclically in
    /// `dir`. Returns `None` when the board is full.
    pub fn next_free_from(&self, start: u8, dir: SeekDir) -> Option<u8> {
        let mut idx = start;
        for _ in 0..NUM_CELLS {
            if !self.occupied(idx) {
                return Some(idx);
            }
            idx = dir.step(idx);
        }
        None
    }
}

/// The game engine: board, cursor, and whose turn it is.
///
/// Consumes classified button gestures and reports the resulting
/// [`GameState`]. All state transitions are total; an impossible situation
/// (cursor on an occupied cell, no free cell left) recovers deterministically
/// instead of erroring.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    board: Board,
    cursor: u8,
    current_color: LedColor,
}

impl Game {
    /// Creates a fresh game: empty board, cursor on cell 0, Red to move.
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            cursor: 0,
            current_color: LedColor::Red,
        }
    }

    /// Reconstructs a game from a saved position.
    ///
    /// The cursor is taken as-is; the next gesture revalidates it.
    pub const fn from_parts(board: Board, cursor: u8, current_color: LedColor) -> Self {
        Self {
            board,
            cursor,
            current_color,
        }
    }

    /// Resets to the initial state.
    pub fn initialize(&mut self) {
        *self = Self::new();
    }

    /// The board as currently marked.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The candidate cell for the next move.
    #[inline]
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// The player whose turn it is.
    #[inline]
    pub fn current_color(&self) -> LedColor {
        self.current_color
    }

    /// Applies one classified gesture and returns the resulting game state.
    ///
    /// - `Short` moves the cursor to the next free cell forward.
    /// - `Double` moves it backward.
    /// - `Long` commits a move on a free cursor cell and ends the turn;
    ///   on an occupied cell it degrades to a forward navigation.
    ///
    /// After navigation the cursor is revalidated (it must reference a free
    /// cell unless the board is full) and both colors are re-checked for a
    /// win before reporting `Ongoing`.
    pub fn apply_gesture(&mut self, gesture: ButtonGesture) -> GameState {
        match gesture {
            ButtonGesture::Short => self.move_cursor(SeekDir::Forward),
            ButtonGesture::Double => self.move_cursor(SeekDir::Backward),
            ButtonGesture::Long => {
                if !self.board.occupied(self.cursor) {
                    self.board.mark(self.current_color, self.cursor);
                    return self.end_turn();
                }
                // Committing on an occupied cell just navigates instead.
                self.move_cursor(SeekDir::Forward);
            }
        }

        // The cursor must always reference a free cell.
        if self.board.occupied(self.cursor) {
            match self.board.next_free_from(self.cursor, SeekDir::Forward) {
                Some(next) => self.cursor = next,
                None => return GameState::Stalemate,
            }
        }

        if self.board.has_win(LedColor::Red) {
            return GameState::RedWins;
        }
        if self.board.has_win(LedColor::Green) {
            return GameState::GreenWins;
        }
        if self.board.is_full() {
            return GameState::Stalemate;
        }
        GameState::Ongoing
    }

    /// Moves the cursor to the nearest free cell strictly after the current
    /// one in `dir`. The cursor stays put when no free cell exists.
    fn move_cursor(&mut self, dir: SeekDir) {
        let start = dir.step(self.cursor);
        if let Some(next) = self.board.next_free_from(start, dir) {
            self.cursor = next;
        }
    }

    /// Evaluates the just-committed move: win, stalemate, or pass the turn.
    fn end_turn(&mut self) -> GameState {
        if self.board.has_win(self.current_color) {
            return GameState::win_for(self.current_color);
        }
        if self.board.is_full() {
            return GameState::Stalemate;
        }

        self.current_color = self.current_color.opponent();
        self.move_cursor(SeekDir::Forward);
        GameState::Ongoing
    }
}
