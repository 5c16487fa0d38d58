//! WS2801 strip driver
//!
//! The WS2801 is a clocked shift register: each pixel takes 3 bytes
//! (R, G, B) on the data line, and the chips latch once the clock line
//! stays low for 500 µs. Any SPI master in mode 0 can drive it.
//!
//! Transmits must be at least 500 µs apart; the parser's latch timeout
//! already guarantees that.

use embedded_hal::spi::SpiBus;

use ledpanel_core::traits::{PixelStrip, StripError};

/// Pixels encoded per SPI write
const CHUNK_PIXELS: usize = 16;

/// WS2801 strip with room for up to `N` pixels
pub struct Ws2801Strip<B, const N: usize> {
    bus: B,
    pixels: [u32; N],
    length: u16,
    /// Configured upper bound, may be lower than `N`
    limit: u16,
    bus_errors: u16,
}

impl<B: SpiBus<u8>, const N: usize> Ws2801Strip<B, N> {
    /// Create a driver using the full buffer
    pub fn new(bus: B) -> Self {
        Self::with_limit(bus, u16::MAX)
    }

    /// Create a driver that refuses lengths above `limit`
    pub fn with_limit(bus: B, limit: u16) -> Self {
        Self {
            bus,
            pixels: [0; N],
            length: 0,
            limit,
            bus_errors: 0,
        }
    }

    /// Largest length `set_length` accepts
    pub fn capacity(&self) -> u16 {
        let buffer = u16::try_from(N).unwrap_or(u16::MAX);
        buffer.min(self.limit)
    }

    /// Resize the strip, clearing all pixels
    ///
    /// On error the strip is left with 0 pixels.
    pub fn try_set_length(&mut self, length: u16) -> Result<(), StripError> {
        self.pixels.fill(0);
        if length > self.capacity() {
            self.length = 0;
            return Err(StripError::CapacityExceeded);
        }
        self.length = length;
        Ok(())
    }

    /// Transmit the active pixels
    pub fn try_show(&mut self) -> Result<(), StripError> {
        let mut buf = [0u8; CHUNK_PIXELS * 3];

        for chunk in self.pixels[..self.length as usize].chunks(CHUNK_PIXELS) {
            for (bytes, &color) in buf.chunks_exact_mut(3).zip(chunk) {
                bytes[0] = (color >> 16) as u8;
                bytes[1] = (color >> 8) as u8;
                bytes[2] = color as u8;
            }
            self.bus
                .write(&buf[..chunk.len() * 3])
                .map_err(|_| StripError::Bus)?;
        }

        self.bus.flush().map_err(|_| StripError::Bus)
    }

    /// Active pixel buffer
    pub fn pixels(&self) -> &[u32] {
        &self.pixels[..self.length as usize]
    }

    /// Number of transmits that failed on the bus
    pub fn bus_errors(&self) -> u16 {
        self.bus_errors
    }

    /// Release the SPI bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: SpiBus<u8>, const N: usize> PixelStrip for Ws2801Strip<B, N> {
    fn set_length(&mut self, length: u16) {
        // Failure leaves 0 pixels, which the parser reports as "Init failed"
        let _ = self.try_set_length(length);
    }

    fn pixel_count(&self) -> u16 {
        self.length
    }

    fn set_pixel(&mut self, index: u16, color: u32) {
        if index < self.length {
            self.pixels[index as usize] = color;
        }
    }

    fn show(&mut self) {
        if self.try_show().is_err() {
            self.bus_errors = self.bus_errors.saturating_add(1);
        }
    }
}
