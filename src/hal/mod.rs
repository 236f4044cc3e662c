//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits defined in
//! [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `embedded`: Adapters over `embedded-hal` 1.0 pins (requires the
//!   `embedded-hal` feature)

pub mod mock;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

pub use mock::*;

#[cfg(feature = "embedded-hal")]
pub use embedded::*;
