//! Addressable pixel strip trait

/// Errors reported by strip drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripError {
    /// Requested length exceeds the driver's pixel buffer
    CapacityExceeded,
    /// Transfer to the strip failed
    Bus,
}

/// Trait for addressable LED strips
///
/// Implementations own a pixel buffer that is only pushed to the LEDs on
/// [`show`](PixelStrip::show). Colors are packed as `0x00RRGGBB`.
///
/// The operations are infallible. A strip that cannot take the requested
/// length reports a pixel count of 0; transfer failures are tracked by the
/// driver.
pub trait PixelStrip {
    /// Resize the strip
    ///
    /// Pixels are cleared. On failure the strip ends up with 0 pixels.
    fn set_length(&mut self, length: u16);

    /// Number of pixels currently addressable
    fn pixel_count(&self) -> u16;

    /// Set one pixel in the buffer
    ///
    /// Indices at or beyond [`pixel_count`](PixelStrip::pixel_count) are ignored.
    fn set_pixel(&mut self, index: u16, color: u32);

    /// Transmit the buffer to the LEDs
    fn show(&mut self);
}
