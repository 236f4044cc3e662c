//! Debounced button gesture detection.
//!
//! A single push button is the whole user interface, so raw levels are
//! classified into three gestures: a short press navigates forward, a double
//! press navigates backward, and a long press commits a move. Classification
//! is a state machine over elapsed-time comparisons only; no interrupts, no
//! edge hardware.
//!
//! # Example
//!
//! ```rust
//! use charlie_ttt::button::{ButtonGesture, GestureDetector};
//! use charlie_ttt::config::ButtonConfig;
//!
//! let mut detector = GestureDetector::new(ButtonConfig::default());
//!
//! // Hold for 50 ms, release, let the double-press window lapse.
//! let mut gesture = None;
//! for t in 0..700u64 {
//!     let pressed = t < 50;
//!     gesture = detector.update(pressed, t).or(gesture);
//! }
//! assert_eq!(gesture, Some(ButtonGesture::Short));
//! ```

use crate::config::ButtonConfig;

/// A classified button interaction.
///
/// Emitted at most once per physical interaction and consumed the same tick
/// it is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ButtonGesture {
    /// One press shorter than the long threshold, no second press.
    Short,
    /// Two short presses within the double-press window.
    Double,
    /// A press held at least the long threshold (first or second press).
    Long,
}

/// Detector state machine.
///
/// The second-press branch mirrors the first press/release debounce
/// sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum DetectorState {
    #[default]
    Idle,
    DebouncePress,
    Pressed,
    DebounceRelease,
    WaitSecond,
    DebounceSecondPress,
    SecondPressed,
    DebounceSecondRelease,
}

/// Debounced multi-click detector over a raw button level.
///
/// Feed it the instantaneous level and the shared clock every tick;
/// [`update`](Self::update) returns at most one gesture per call. Premature
/// releases inside a debounce window bounce back silently — they are contact
/// noise, not gestures.
#[derive(Clone, Copy, Debug)]
pub struct GestureDetector {
    state: DetectorState,
    /// Entry time of the current state, for debounce/window comparisons.
    entered_ms: u64,
    /// Confirm time of the press currently being measured.
    press_started_ms: u64,
    /// Duration of the first press, captured at release.
    first_press_ms: u64,
    /// Duration of the second press, captured at release.
    second_press_ms: u64,
    config: ButtonConfig,
}

impl GestureDetector {
    /// Creates a detector in the idle state.
    pub const fn new(config: ButtonConfig) -> Self {
        Self {
            state: DetectorState::Idle,
            entered_ms: 0,
            press_started_ms: 0,
            first_press_ms: 0,
            second_press_ms: 0,
            config,
        }
    }

    /// True while no interaction is in flight.
    pub fn is_idle(&self) -> bool {
        self.state == DetectorState::Idle
    }

    /// Discards any interaction in flight.
    pub fn reset(&mut self) {
        self.state = DetectorState::Idle;
    }

    /// Advances the state machine one tick.
    ///
    /// `pressed` is the raw level (true = held down) and `now_ms` the shared
    /// monotonic clock. Returns the gesture completed by this tick, if any.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<ButtonGesture> {
        let elapsed = now_ms.saturating_sub(self.entered_ms);

        match self.state {
            DetectorState::Idle => {
                if pressed {
                    self.enter(DetectorState::DebouncePress, now_ms);
                }
            }

            DetectorState::DebouncePress => {
                if !pressed {
                    // Bounce: released inside the debounce window.
                    self.state = DetectorState::Idle;
                } else if elapsed >= self.config.debounce_ms {
                    self.enter(DetectorState::Pressed, now_ms);
                    self.press_started_ms = now_ms;
                }
            }

            DetectorState::Pressed => {
                if !pressed {
                    self.first_press_ms = now_ms.saturating_sub(self.press_started_ms);
                    self.enter(DetectorState::DebounceRelease, now_ms);
                }
            }

            DetectorState::DebounceRelease => {
                if pressed {
                    // Bounce: the press is still going; keep measuring from
                    // the original confirm time.
                    self.state = DetectorState::Pressed;
                } else if elapsed >= self.config.debounce_ms {
                    if self.first_press_ms >= self.config.long_press_ms {
                        self.state = DetectorState::Idle;
                        return Some(ButtonGesture::Long);
                    }
                    // Short so far: open the double-press window.
                    self.enter(DetectorState::WaitSecond, now_ms);
                }
            }

            DetectorState::WaitSecond => {
                if pressed {
                    self.enter(DetectorState::DebounceSecondPress, now_ms);
                } else if elapsed >= self.config.double_window_ms {
                    self.state = DetectorState::Idle;
                    return Some(ButtonGesture::Short);
                }
            }

            DetectorState::DebounceSecondPress => {
                if !pressed {
                    // Bounce: back to waiting for a real second press.
                    self.state = DetectorState::WaitSecond;
                } else if elapsed >= self.config.debounce_ms {
                    self.enter(DetectorState::SecondPressed, now_ms);
                    self.press_started_ms = now_ms;
                }
            }

            DetectorState::SecondPressed => {
                if !pressed {
                    self.second_press_ms = now_ms.saturating_sub(self.press_started_ms);
                    self.enter(DetectorState::DebounceSecondRelease, now_ms);
                }
            }

            DetectorState::DebounceSecondRelease => {
                if pressed {
                    self.state = DetectorState::SecondPressed;
                } else if elapsed >= self.config.debounce_ms {
                    self.state = DetectorState::Idle;
                    if self.second_press_ms >= self.config.long_press_ms {
                        return Some(ButtonGesture::Long);
                    }
                    return Some(ButtonGesture::Double);
                }
            }
        }

        None
    }

    fn enter(&mut self, state: DetectorState, now_ms: u64) {
        self.state = state;
        self.entered_ms = now_ms;
    }
}
