//! Configuration type definitions

use ledpanel_protocol::BuildInfo;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default serial baud rate
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Default minimum interval between two latches (ms)
pub const DEFAULT_LATCH_TIMEOUT_MS: u32 = 10;

/// Default SPI clock for the strip (Hz)
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Default upper bound for the strip length
pub const DEFAULT_MAX_PIXELS: u16 = 512;

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

/// Pixel strip configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StripConfig {
    /// Largest length INIT may configure; longer requests fail
    pub max_pixels: u16,
    /// SPI clock frequency in Hz
    pub spi_frequency_hz: u32,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            spi_frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
        }
    }
}

/// Latch rate limiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatchConfig {
    /// A latch is refused unless strictly more than this many ms
    /// elapsed since the previous one
    pub timeout_ms: u32,
}

impl Default for LatchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_LATCH_TIMEOUT_MS,
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub serial: SerialConfig,
    pub strip: StripConfig,
    pub latch: LatchConfig,
    /// Build identification (compiled in, not read from TOML)
    #[cfg_attr(feature = "serde", serde(skip))]
    pub build: BuildInfo,
}

impl PanelConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the build identification
    pub fn with_build(mut self, build: BuildInfo) -> Self {
        self.build = build;
        self
    }
}
