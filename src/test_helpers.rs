//! Recording I2C bus for tests.

use embedded_hal::blocking::i2c::Write;
use std::vec::Vec;

use crate::interface::{CONTROL_COMMAND, CONTROL_DATA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpyError {
    Nack,
}

/// Records every I2C write as `(address, bytes)`.
#[derive(Debug, Default)]
pub struct I2cSpy {
    pub writes: Vec<(u8, Vec<u8>)>,
    fail_after: Option<usize>,
}

impl I2cSpy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `n` transactions, then NACK everything after.
    pub fn failing_after(n: usize) -> Self {
        I2cSpy {
            writes: Vec::new(),
            fail_after: Some(n),
        }
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Command transactions with the control byte stripped.
    pub fn commands(&self) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(_, frame)| frame.first() == Some(&CONTROL_COMMAND))
            .map(|(_, frame)| frame[1..].to_vec())
            .collect()
    }

    /// Data transactions with the control byte stripped.
    pub fn data_frames(&self) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(_, frame)| frame.first() == Some(&CONTROL_DATA))
            .map(|(_, frame)| frame[1..].to_vec())
            .collect()
    }

    /// All data bytes, concatenated in transmission order.
    pub fn data_bytes(&self) -> Vec<u8> {
        self.data_frames().concat()
    }
}

impl Write for I2cSpy {
    type Error = SpyError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if let Some(n) = self.fail_after {
            if self.writes.len() >= n {
                return Err(SpyError::Nack);
            }
        }
        self.writes.push((address, bytes.to_vec()));
        Ok(())
    }
}
