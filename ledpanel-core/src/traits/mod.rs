//! Hardware abstraction traits
//!
//! These traits define the interface between the command parser
//! and hardware-specific implementations.

pub mod clock;
pub mod strip;

pub use clock::Clock;
pub use strip::{PixelStrip, StripError};
