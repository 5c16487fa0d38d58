//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ledpanel-core, plus the status channel writer:
//!
//! - Strip drivers (WS2801 over SPI)
//! - Status reporting (diagnostic lines over an async UART)

#![no_std]
#![deny(unsafe_code)]

pub mod status;
pub mod strip;
