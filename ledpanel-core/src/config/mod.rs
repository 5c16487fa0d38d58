//! Configuration types
//!
//! Board-agnostic configuration structures, parsed from the `panel.toml`
//! embedded in the firmware image.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ConfigError};
pub use types::*;
