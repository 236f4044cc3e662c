//! Timing configuration for input, display, and animation.
//!
//! Defaults carry the values the firmware shipped with; everything is
//! adjustable through builder-style setters.
//!
//! # Example
//!
//! ```rust
//! use charlie_ttt::config::{ButtonConfig, Config};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_button(ButtonConfig::default().with_long_press_ms(800))
//!     .with_tick_ms(2);
//! ```

/// Complete console configuration.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Button debounce and gesture thresholds.
    pub button: ButtonConfig,
    /// Multiplexing scan and cursor blink timing.
    pub display: DisplayConfig,
    /// End-game animation timing.
    pub sequence: SequenceConfig,
    /// Pacing sleep at the end of every tick, in milliseconds.
    pub tick_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            button: ButtonConfig::default(),
            display: DisplayConfig::default(),
            sequence: SequenceConfig::default(),
            tick_ms: 1,
        }
    }
}

impl Config {
    /// Set button configuration.
    pub fn with_button(mut self, button: ButtonConfig) -> Self {
        self.button = button;
        self
    }

    /// Set display configuration.
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Set animation configuration.
    pub fn with_sequence(mut self, sequence: SequenceConfig) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the per-tick pacing sleep.
    pub fn with_tick_ms(mut self, tick_ms: u32) -> Self {
        self.tick_ms = tick_ms;
        self
    }
}

/// Button debounce and gesture classification thresholds.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonConfig {
    /// Stability window a level change must survive, in milliseconds.
    pub debounce_ms: u64,
    /// Minimum held duration classified as a long press.
    pub long_press_ms: u64,
    /// How long after a release a second press still counts as a double.
    pub double_window_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            long_press_ms: 1000,
            double_window_ms: 500,
        }
    }
}

impl ButtonConfig {
    /// Set the debounce window.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the long-press threshold.
    pub fn with_long_press_ms(mut self, ms: u64) -> Self {
        self.long_press_ms = ms;
        self
    }

    /// Set the double-press window.
    pub fn with_double_window_ms(mut self, ms: u64) -> Self {
        self.double_window_ms = ms;
        self
    }
}

/// Multiplexing scan and cursor blink timing.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// How long each occupied cell stays lit per frame, in milliseconds.
    pub cell_hold_ms: u16,
    /// How long the cursor overlay stays lit per frame.
    pub cursor_hold_ms: u16,
    /// Cursor blink "on" phase duration.
    pub cursor_on_ms: u64,
    /// Cursor blink "off" phase duration.
    pub cursor_off_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_hold_ms: 3,
            cursor_hold_ms: 1,
            cursor_on_ms: 500,
            cursor_off_ms: 100,
        }
    }
}

impl DisplayConfig {
    /// Full cursor blink period (on + off).
    #[inline]
    pub fn cursor_period_ms(&self) -> u64 {
        self.cursor_on_ms + self.cursor_off_ms
    }

    /// Set the per-cell hold time.
    pub fn with_cell_hold_ms(mut self, ms: u16) -> Self {
        self.cell_hold_ms = ms;
        self
    }

    /// Set the cursor overlay hold time.
    pub fn with_cursor_hold_ms(mut self, ms: u16) -> Self {
        self.cursor_hold_ms = ms;
        self
    }

    /// Set the cursor blink phases.
    pub fn with_cursor_blink_ms(mut self, on_ms: u64, off_ms: u64) -> Self {
        self.cursor_on_ms = on_ms;
        self.cursor_off_ms = off_ms;
        self
    }
}

/// End-game animation timing.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceConfig {
    /// Lit phase of one animation cycle, in milliseconds.
    pub on_ms: u16,
    /// Dark rest phase of one animation cycle.
    pub off_ms: u16,
    /// Per-LED hold while scanning the lit pattern.
    pub slot_ms: u16,
    /// Cycles played before the sequencer signals completion.
    pub cycles: u8,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            on_ms: 1000,
            off_ms: 500,
            slot_ms: 2,
            cycles: 3,
        }
    }
}

impl SequenceConfig {
    /// Set the lit phase duration.
    pub fn with_on_ms(mut self, ms: u16) -> Self {
        self.on_ms = ms;
        self
    }

    /// Set the rest phase duration.
    pub fn with_off_ms(mut self, ms: u16) -> Self {
        self.off_ms = ms;
        self
    }

    /// Set the number of animation cycles.
    pub fn with_cycles(mut self, cycles: u8) -> Self {
        self.cycles = cycles;
        self
    }
}
