//! Command bytes understood by the controller

/// Top-level commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Configure the strip length (4 hex digits)
    Init,
    /// Report program name, build date and version
    Version,
    /// Transmit the buffered frame to the strip
    LatchFrame,
    /// Fill the first N pixels with one color and latch
    Shade,
    /// Set a single pixel, no latch
    Pixel,
    /// Raw full-frame upload (header only, payload is not decoded)
    RawFrame,
}

// Wire format values
pub const INIT: u8 = b'I';
pub const VERSION: u8 = b'V';
pub const LATCH_FRAME: u8 = b'L';
pub const SHADE: u8 = b'S';
pub const PIXEL: u8 = b'P';
pub const RAW_FRAME: u8 = b'W';

impl Command {
    /// Parse a command from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            INIT => Some(Command::Init),
            VERSION => Some(Command::Version),
            LATCH_FRAME => Some(Command::LatchFrame),
            SHADE => Some(Command::Shade),
            PIXEL => Some(Command::Pixel),
            RAW_FRAME => Some(Command::RawFrame),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Init => INIT,
            Command::Version => VERSION,
            Command::LatchFrame => LATCH_FRAME,
            Command::Shade => SHADE,
            Command::Pixel => PIXEL,
            Command::RawFrame => RAW_FRAME,
        }
    }

    /// Returns true if a 4-digit numeric parameter follows the command byte
    pub fn has_num_param(&self) -> bool {
        matches!(
            self,
            Command::Init | Command::Shade | Command::Pixel | Command::RawFrame
        )
    }

    /// Returns true if a 6-digit color follows the numeric parameter
    pub fn has_color(&self) -> bool {
        matches!(self, Command::Shade | Command::Pixel)
    }
}
