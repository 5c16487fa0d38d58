//! Ledpanel - Serial LED Strip Controller Firmware
//!
//! Main firmware binary for RP2040 boards driving a WS2801 strip.
//! A host streams single-letter commands over UART; the board keeps a
//! frame buffer and latches it to the strip on request.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ledpanel_core::config::{parse_config, PanelConfig};
use ledpanel_core::CommandParser;
use ledpanel_drivers::strip::Ws2801Strip;
use ledpanel_protocol::BuildInfo;

use crate::clock::EmbassyClock;

mod clock;
mod tasks;

/// Frame buffer size in pixels (upper bound for `strip.max_pixels`)
pub const MAX_PIXELS: usize = 512;

/// Embedded configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

/// Identity reported by the VERSION command
const BUILD: BuildInfo = BuildInfo::new(
    env!("CARGO_PKG_NAME"),
    env!("LEDPANEL_BUILD_DATE"),
    env!("CARGO_PKG_VERSION"),
);

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ledpanel firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Host link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.serial.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.serial.baudrate);

    // WS2801 clock and data (SCK=GPIO18, MOSI=GPIO19)
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = config.strip.spi_frequency_hz;

    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let strip = Ws2801Strip::<_, MAX_PIXELS>::with_limit(spi, config.strip.max_pixels);

    info!(
        "Strip driver ready: {} pixels max, {} Hz",
        strip.capacity(),
        config.strip.spi_frequency_hz
    );

    let parser = CommandParser::new(strip, EmbassyClock, &config);

    spawner.spawn(tasks::serial_task(rx, tx, parser)).unwrap();

    info!("All tasks spawned, waiting for INIT");
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> PanelConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Loaded config: latch timeout {} ms",
                config.latch.timeout_ms
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using default configuration");
            PanelConfig::new()
        }
    };

    config.with_build(BUILD)
}
