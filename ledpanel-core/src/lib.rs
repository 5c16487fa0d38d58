//! Board-agnostic core logic for the LED panel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (pixel strip, millisecond clock)
//! - The byte-at-a-time command parser
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod parser;
pub mod traits;

pub use parser::CommandParser;
