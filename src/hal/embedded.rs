//! Adapters over `embedded-hal` 1.0 digital pins.
//!
//! The matrix lines need runtime tri-state switching, which `embedded-hal`
//! does not model portably, so [`LinePort`](crate::traits::LinePort) stays a
//! platform-specific implementation. The button, however, is a plain input
//! pin and adapts generically.

use crate::traits::ButtonInput;
use embedded_hal::digital::InputPin;

/// An active-low push button over any `embedded-hal` input pin.
///
/// The firmware wiring pulls the button line up internally and the switch
/// shorts it to ground, so "pressed" reads as a low level. A pin read error
/// is treated as released.
///
/// # Example
///
/// ```rust,ignore
/// use charlie_ttt::hal::ActiveLowButton;
/// use charlie_ttt::traits::ButtonInput;
///
/// let mut button = ActiveLowButton::new(gpio_pin);
/// if button.is_pressed() {
///     // ...
/// }
/// ```
#[derive(Debug)]
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    /// Wraps a configured input pin (pull-up expected).
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Releases the underlying pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> ButtonInput for ActiveLowButton<P> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
