//! Host serial task
//!
//! Receives command bytes from the host, feeds them to the parser and
//! answers with diagnostic lines.

use defmt::*;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::Read;

use ledpanel_core::traits::PixelStrip;
use ledpanel_core::CommandParser;
use ledpanel_drivers::status::UartStatus;
use ledpanel_drivers::strip::Ws2801Strip;

use crate::clock::EmbassyClock;
use crate::MAX_PIXELS;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// WS2801 strip on SPI0
pub type Strip = Ws2801Strip<Spi<'static, SPI0, Blocking>, MAX_PIXELS>;

/// Parser bound to the firmware strip and clock
pub type Parser = CommandParser<Strip, EmbassyClock>;

/// Serial task - decodes host commands byte by byte
#[embassy_executor::task]
pub async fn serial_task(mut rx: BufferedUartRx, tx: BufferedUartTx, mut parser: Parser) {
    info!("Serial task started");

    let mut status = UartStatus::new(tx);
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    let was_initialized = parser.is_initialized();

                    if let Some(diag) = parser.feed(byte) {
                        if diag.is_error() {
                            debug!("Rejected: {:?}", diag);
                        }
                        if let Err(e) = status.report(&diag).await {
                            warn!("Failed to send status line: {:?}", e);
                        }
                    }

                    if !was_initialized && parser.is_initialized() {
                        info!("Strip initialized: {} pixels", parser.strip().pixel_count());
                    }
                }

                let bus_errors = parser.strip().bus_errors();
                if bus_errors > 0 {
                    trace!("SPI bus errors so far: {}", bus_errors);
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
