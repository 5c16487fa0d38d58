//! Diagnostic lines sent back to the host
//!
//! Every protocol-level error is reported as one short text line and the
//! decoder starts over. The `Display` output is the line without its
//! trailing newline.

use core::fmt;

/// Build identification returned by the VERSION command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuildInfo {
    /// Program name
    pub program: &'static str,
    /// Build date
    pub date: &'static str,
    /// Program version
    pub version: &'static str,
}

impl BuildInfo {
    pub const fn new(program: &'static str, date: &'static str, version: &'static str) -> Self {
        Self {
            program,
            date,
            version,
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new("ledpanel", "unknown", "0.0.0")
    }
}

/// Lines emitted on the status channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// `Init <hex>`: strip configured with this many pixels
    InitOk { pixels: u16 },
    /// `Init failed`: strip reported zero pixels after resizing
    InitFailed,
    /// `<program>: <date> <version>`
    Version(BuildInfo),
    /// `Init done <hex>`: re-init acknowledged, strip not resized
    InitDone { pixels: u16 },
    /// `euc:<hex>`: command has no parameter handler
    UnknownCommand { command: u8 },
    /// `enp:<hex>,c:<hex>`: numeric parameter larger than the strip
    ParamExceedsLength { param: u16, command: u8 },
    /// `enp=:<decimal>`: pixel index equal to the strip length
    PixelEqualsLength { param: u16 },
    /// `elt`: latch requested before the latch timeout elapsed
    LatchTooSoon,
    /// `processRawFrame`: raw frame header accepted, payload not decoded
    RawFrameStub,
}

impl Diagnostic {
    /// Returns true for lines reporting a rejected command
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Diagnostic::InitFailed
                | Diagnostic::UnknownCommand { .. }
                | Diagnostic::ParamExceedsLength { .. }
                | Diagnostic::PixelEqualsLength { .. }
                | Diagnostic::LatchTooSoon
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InitOk { pixels } => write!(f, "Init {:X}", pixels),
            Diagnostic::InitFailed => f.write_str("Init failed"),
            Diagnostic::Version(build) => {
                write!(f, "{}: {} {}", build.program, build.date, build.version)
            }
            Diagnostic::InitDone { pixels } => write!(f, "Init done {:X}", pixels),
            Diagnostic::UnknownCommand { command } => write!(f, "euc:{:X}", command),
            Diagnostic::ParamExceedsLength { param, command } => {
                write!(f, "enp:{:X},c:{:X}", param, command)
            }
            Diagnostic::PixelEqualsLength { param } => write!(f, "enp=:{}", param),
            Diagnostic::LatchTooSoon => f.write_str("elt"),
            Diagnostic::RawFrameStub => f.write_str("processRawFrame"),
        }
    }
}
