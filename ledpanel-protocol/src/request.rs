//! Host-side request encoding
//!
//! Builds the byte sequences the controller decodes. Parameters are always
//! written at full width with upper-case digits.

use heapless::Vec;

use crate::command::Command;
use crate::hex::{encode_color, encode_u16};

/// Longest encoded request (command + 4 param digits + 6 color digits)
pub const MAX_REQUEST_LEN: usize = 11;

/// Errors that can occur while encoding a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Buffer too small for the encoded request
    BufferTooSmall,
}

/// A command as sent by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Configure the strip length
    Init { pixels: u16 },
    /// Ask for the build line
    Version,
    /// Transmit the buffered frame
    Latch,
    /// Fill pixels `0..count` and latch
    Shade { count: u16, color: u32 },
    /// Set one pixel without latching
    Pixel { index: u16, color: u32 },
    /// Raw frame header; the controller answers with a stub marker
    RawFrameHeader { length: u16 },
}

impl Request {
    /// Command byte that starts this request
    pub fn command(&self) -> Command {
        match self {
            Request::Init { .. } => Command::Init,
            Request::Version => Command::Version,
            Request::Latch => Command::LatchFrame,
            Request::Shade { .. } => Command::Shade,
            Request::Pixel { .. } => Command::Pixel,
            Request::RawFrameHeader { .. } => Command::RawFrame,
        }
    }

    /// Number of bytes `encode` writes
    pub fn encoded_len(&self) -> usize {
        match self {
            Request::Version | Request::Latch => 1,
            Request::Init { .. } | Request::RawFrameHeader { .. } => 5,
            Request::Shade { .. } | Request::Pixel { .. } => MAX_REQUEST_LEN,
        }
    }

    /// Encode this request into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(EncodeError::BufferTooSmall);
        }

        buffer[0] = self.command().to_byte();
        match *self {
            Request::Version | Request::Latch => {}
            Request::Init { pixels: param } | Request::RawFrameHeader { length: param } => {
                buffer[1..5].copy_from_slice(&encode_u16(param));
            }
            Request::Shade {
                count: param,
                color,
            }
            | Request::Pixel {
                index: param,
                color,
            } => {
                buffer[1..5].copy_from_slice(&encode_u16(param));
                buffer[5..11].copy_from_slice(&encode_color(color));
            }
        }

        Ok(len)
    }

    /// Encode this request into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_REQUEST_LEN>, EncodeError> {
        let mut buffer = [0u8; MAX_REQUEST_LEN];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| EncodeError::BufferTooSmall)?;
        Ok(vec)
    }
}
