//! Framing of command and data streams over I2C.

use crate::error::Error;

use embedded_hal::blocking::i2c::Write;

/// Default 7-bit address of the SSD1306 (SA0 low).
pub const DEFAULT_ADDRESS: u8 = 0x3C;
/// Alternate 7-bit address of the SSD1306 (SA0 high).
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// Control byte announcing that the rest of the transaction is commands.
pub const CONTROL_COMMAND: u8 = 0x00;
/// Control byte announcing that the rest of the transaction is GDDRAM data.
pub const CONTROL_DATA: u8 = 0x40;

/// Longest command sequence sent as one transaction (the horizontal scroll setup).
pub const MAX_COMMAND_LEN: usize = 8;
/// Data bytes sent per transaction. One full page row of a 128 column display.
pub const DATA_CHUNK: usize = 128;

/// I2C interface to the controller.
///
/// Every transaction starts with one control byte; the I2C peripheral frames the
/// start condition, address and stop condition around it.
pub struct I2cInterface<I2C> {
    pub(crate) i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> I2cInterface<I2C>
where
    I2C: Write<Error = E>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        I2cInterface { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Send `bytes` as a single command stream.
    pub fn send_command(&mut self, bytes: &[u8]) -> Result<(), Error<E>> {
        debug_assert!(bytes.len() <= MAX_COMMAND_LEN);
        let len = bytes.len().min(MAX_COMMAND_LEN);

        let mut frame = [0u8; MAX_COMMAND_LEN + 1];
        frame[0] = CONTROL_COMMAND;
        frame[1..=len].copy_from_slice(&bytes[..len]);

        log::trace!("cmd {:02x?}", &frame[1..=len]);
        self.i2c
            .write(self.address, &frame[..=len])
            .map_err(Error::Transport)
    }

    /// Send `data` to GDDRAM, in order, in chunks of at most [`DATA_CHUNK`] bytes.
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), Error<E>> {
        let mut frame = [0u8; DATA_CHUNK + 1];
        frame[0] = CONTROL_DATA;

        for chunk in data.chunks(DATA_CHUNK) {
            frame[1..=chunk.len()].copy_from_slice(chunk);
            log::trace!("data {} bytes", chunk.len());
            self.i2c
                .write(self.address, &frame[..=chunk.len()])
                .map_err(Error::Transport)?;
        }
        Ok(())
    }
}
