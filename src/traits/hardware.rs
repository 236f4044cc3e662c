//! Hardware abstraction traits for line control, button input, and timing.
//!
//! This module defines the core hardware interfaces that allow charlie-ttt to
//! run across different platforms (AVR-class boards, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`LinePort`] | Tri-state control of the shared Charlieplexing lines |
//! | [`ButtonInput`] | Raw digital read of the push button |
//! | [`Clock`] | Monotonic time source for `no_std` environments |
//! | [`Sleep`] | Blocking bounded delay that paces the multiplexing scan |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations from
//! [`crate::hal::mock`]. For real hardware, implement [`LinePort`] over your
//! MCU's port/direction registers; an adapter for `embedded-hal` input pins
//! is available behind the `embedded-hal` feature.
//!
//! # Example
//!
//! ```rust
//! use charlie_ttt::traits::LinePort;
//! use charlie_ttt::hal::MockPort;
//!
//! let mut port = MockPort::new();
//! port.set_high(0).unwrap();
//! port.set_low(1).unwrap();
//! port.set_hi_z(0).unwrap();
//! ```

/// Electrical level of a line's output latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Latch driven low.
    Low,
    /// Latch driven high.
    High,
}

/// Direction mode of a line.
///
/// `Input` with a low latch is high-impedance (no pull), which is how
/// unselected Charlieplexing lines must be parked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Input mode (high impedance when the latch is low).
    #[default]
    Input,
    /// Output mode (the latch level is driven onto the line).
    Output,
}

/// Raw access to the shared Charlieplexing lines.
///
/// Each line is backed by two bits of hardware state: an output latch and a
/// direction bit. Implement the two register writes for your platform; the
/// provided tri-state methods take care of the transition ordering.
///
/// # Transition ordering
///
/// The latch must always be written *before* the direction bit flips:
///
/// - Releasing a line to Hi-Z clears the latch first, so input mode is never
///   entered with a stale high latch (which would enable the pull-up).
/// - Driving a line asserts the latch first, so output mode is never enabled
///   with a stale level on the pin.
///
/// The default method bodies are the normative sequence; overriding them
/// while keeping the ordering intact is fine (e.g. to batch register writes).
///
/// # Example Implementation
///
/// ```rust,ignore
/// use charlie_ttt::traits::{Level, LinePort, Mode};
///
/// struct AvrPort { /* register handles */ }
///
/// impl LinePort for AvrPort {
///     type Error = ();
///
///     fn set_latch(&mut self, line: u8, level: Level) -> Result<(), ()> {
///         // PORTx bit write...
///         Ok(())
///     }
///
///     fn set_mode(&mut self, line: u8, mode: Mode) -> Result<(), ()> {
///         // DDRx bit write...
///         Ok(())
///     }
/// }
/// ```
pub trait LinePort {
    /// Error type for line operations.
    type Error;

    /// Write the output latch of a line without changing its mode.
    fn set_latch(&mut self, line: u8, level: Level) -> Result<(), Self::Error>;

    /// Switch a line between input and output mode.
    fn set_mode(&mut self, line: u8, mode: Mode) -> Result<(), Self::Error>;

    /// Park a line in high impedance.
    ///
    /// Clears the latch before switching to input mode so the pull-up is
    /// never momentarily enabled.
    fn set_hi_z(&mut self, line: u8) -> Result<(), Self::Error> {
        self.set_latch(line, Level::Low)?;
        self.set_mode(line, Mode::Input)
    }

    /// Drive a line low.
    fn set_low(&mut self, line: u8) -> Result<(), Self::Error> {
        self.set_latch(line, Level::Low)?;
        self.set_mode(line, Mode::Output)
    }

    /// Drive a line high.
    fn set_high(&mut self, line: u8) -> Result<(), Self::Error> {
        self.set_latch(line, Level::High)?;
        self.set_mode(line, Mode::Output)
    }
}

/// Raw button read.
///
/// Returns the instantaneous debounce-free level; the
/// [`GestureDetector`](crate::button::GestureDetector) turns the raw stream
/// into short/double/long gestures.
pub trait ButtonInput {
    /// Returns true while the button is physically held down.
    fn is_pressed(&mut self) -> bool;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for debounce windows, the cursor
/// blink and the end-game animation. On desktop, this can wrap
/// `std::time::Instant`. On embedded, use a hardware timer.
///
/// # Example
///
/// ```rust
/// use charlie_ttt::traits::Clock;
/// use charlie_ttt::hal::MockTimer;
///
/// let mut timer = MockTimer::new();
/// assert_eq!(timer.now_ms(), 0);
///
/// timer.advance(100);
/// assert_eq!(timer.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

/// Blocking bounded delay.
///
/// Used to hold an LED on for its multiplexing slot and to pace the main
/// tick. An implementation that also implements [`Clock`] must advance
/// `now_ms()` by exactly the slept amount, so every timing comparison in the
/// crate is measured against one counter.
pub trait Sleep {
    /// Suspend execution for the given number of milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}
