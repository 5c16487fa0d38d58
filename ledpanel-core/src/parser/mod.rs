//! Serial command parser
//!
//! Decodes the host byte stream one byte at a time and applies the
//! commands to a pixel strip. The parser never buffers a whole message:
//! all in-flight data lives in the [`ParseState`] variant.

pub mod command_parser;
pub mod state;

pub use command_parser::CommandParser;
pub use state::ParseState;
