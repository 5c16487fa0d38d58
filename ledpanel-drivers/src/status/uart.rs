//! Diagnostic lines over a serial link
//!
//! Each diagnostic is written as one `\n`-terminated line and the link is
//! flushed, so the host sees the reply before the next command is parsed.

use core::fmt::Write as _;

use embedded_io_async::Write;
use heapless::String;

use ledpanel_protocol::Diagnostic;

/// Longest line the writer renders, newline included
pub const MAX_LINE_LEN: usize = 96;

/// Errors that can occur while reporting a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError<E> {
    /// Rendered line does not fit `MAX_LINE_LEN`
    LineTooLong,
    /// Serial write or flush failed
    Io(E),
}

/// Render a diagnostic as a newline-terminated line
pub fn render_line(diag: &Diagnostic) -> Result<String<MAX_LINE_LEN>, core::fmt::Error> {
    let mut line = String::new();
    write!(line, "{}", diag)?;
    line.push('\n').map_err(|_| core::fmt::Error)?;
    Ok(line)
}

/// Status channel writer over an async serial transmitter
pub struct UartStatus<W> {
    tx: W,
    lines_sent: u32,
}

impl<W: Write> UartStatus<W> {
    /// Create a new writer
    pub fn new(tx: W) -> Self {
        Self { tx, lines_sent: 0 }
    }

    /// Write one diagnostic line and flush
    pub async fn report(&mut self, diag: &Diagnostic) -> Result<(), StatusError<W::Error>> {
        let line = render_line(diag).map_err(|_| StatusError::LineTooLong)?;

        self.tx
            .write_all(line.as_bytes())
            .await
            .map_err(StatusError::Io)?;
        self.tx.flush().await.map_err(StatusError::Io)?;

        self.lines_sent = self.lines_sent.wrapping_add(1);
        Ok(())
    }

    /// Number of lines written so far
    pub fn lines_sent(&self) -> u32 {
        self.lines_sent
    }

    /// Release the transmitter
    pub fn release(self) -> W {
        self.tx
    }
}
