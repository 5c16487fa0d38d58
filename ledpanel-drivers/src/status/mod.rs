//! Status channel writers

pub mod uart;

pub use uart::{render_line, StatusError, UartStatus, MAX_LINE_LEN};
