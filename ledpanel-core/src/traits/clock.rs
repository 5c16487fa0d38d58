//! Millisecond time source

/// Monotonic millisecond clock
///
/// The counter is allowed to wrap; consumers compare timestamps with
/// wrapping subtraction.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_millis(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}
