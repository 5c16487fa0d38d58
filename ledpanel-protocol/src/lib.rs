//! Ledpanel Serial Command Protocol
//!
//! This crate defines the byte stream a host sends to the LED panel
//! controller, and the diagnostic lines the controller answers with.
//!
//! # Protocol Overview
//!
//! Every command starts with a single ASCII command byte, optionally
//! followed by fixed-width upper- or lower-case hex fields:
//! ```text
//! ┌─────────┬──────────────┬───────────────┐
//! │ COMMAND │ NUM PARAM    │ COLOR         │
//! │ 1B      │ 4 hex digits │ 6 hex digits  │
//! └─────────┴──────────────┴───────────────┘
//! ```
//!
//! `I0010` sizes the strip to 16 pixels, `S0003ff0000` paints the first
//! three pixels red and latches, `P000100ff00` sets pixel 1 without
//! latching, `L` latches the buffered frame and `V` asks for the build line.
//!
//! There is no framing and no checksum: the controller decodes the stream
//! one byte at a time and resynchronizes on `I` or on any unknown command
//! byte.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod diagnostic;
pub mod hex;
pub mod request;

pub use command::Command;
pub use diagnostic::{BuildInfo, Diagnostic};
pub use hex::{COLOR_DIGITS, NUM_PARAM_DIGITS};
pub use request::{EncodeError, Request, MAX_REQUEST_LEN};
