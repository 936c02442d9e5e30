//! UART transports.
//!
//! # Hardware Setup
//!
//! ```text
//! host (PC)     ◀──────▶ UART0  frames, telemetry, commands
//! peer device   ◀──────▶ UART1  relayed command lines
//! log monitor   ◀─────── UART2  TX only, log drain
//! ```

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::gpio::{self, AnyIOPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, Uart, UartDriver, UartTxDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use crate::transport::{Transport, TransportError};

/// Host link baud rate.
pub const HOST_BAUD: u32 = 500_000;

/// Peer device baud rate.
pub const PEER_BAUD: u32 = 9_600;

/// Log output baud rate.
pub const LOG_BAUD: u32 = 115_200;

/// Open a full-duplex UART without flow control.
pub fn open_uart<'d, U: Uart>(
    uart: impl Peripheral<P = U> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    rx_pin: impl Peripheral<P = impl gpio::InputPin> + 'd,
    baud_rate: u32,
) -> Result<UartTransport<'d>, EspError> {
    let config = uart::config::Config::default().baudrate(Hertz(baud_rate));
    let driver = UartDriver::new(
        uart,
        tx_pin,
        rx_pin,
        Option::<AnyIOPin>::None, // CTS
        Option::<AnyIOPin>::None, // RTS
        &config,
    )?;
    Ok(UartTransport { driver })
}

/// Open a TX-only UART for log output.
pub fn open_log_uart<'d, U: Uart>(
    uart: impl Peripheral<P = U> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
) -> Result<LogUart<'d>, EspError> {
    let config = uart::config::Config::default().baudrate(Hertz(LOG_BAUD));
    let driver = UartTxDriver::new(
        uart,
        tx_pin,
        Option::<AnyIOPin>::None, // CTS
        Option::<AnyIOPin>::None, // RTS
        &config,
    )?;
    Ok(LogUart { driver })
}

/// Non-blocking transport over a UART driver.
pub struct UartTransport<'d> {
    driver: UartDriver<'d>,
}

impl Transport for UartTransport<'_> {
    fn available(&mut self) -> usize {
        self.driver.remaining_read().unwrap_or(0)
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.driver.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        write_all(bytes, |chunk| self.driver.write(chunk))
    }
}

/// TX-only log channel.
pub struct LogUart<'d> {
    driver: UartTxDriver<'d>,
}

impl Transport for LogUart<'_> {
    fn available(&mut self) -> usize {
        0
    }

    fn read_byte(&mut self) -> Option<u8> {
        None
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        write_all(bytes, |chunk| self.driver.write(chunk))
    }
}

/// Hand every byte to the driver's TX queue.
fn write_all(
    mut bytes: &[u8],
    mut write: impl FnMut(&[u8]) -> Result<usize, EspError>,
) -> Result<(), TransportError> {
    while !bytes.is_empty() {
        match write(bytes) {
            Ok(0) | Err(_) => return Err(TransportError::Write),
            Ok(n) => bytes = &bytes[n..],
        }
    }
    Ok(())
}
