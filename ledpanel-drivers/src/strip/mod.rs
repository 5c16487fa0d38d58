//! Pixel strip drivers

pub mod ws2801;

pub use ws2801::Ws2801Strip;
