//! Power-on register values applied by `initialize()`.

use crate::interface::DEFAULT_ADDRESS;

/// VCOMH deselect level. Discriminants are the register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcomhLevel {
    /// 0.65 x Vcc
    V065 = 0x00,
    /// 0.77 x Vcc, the reset value
    V077 = 0x20,
    /// 0.83 x Vcc
    V083 = 0x30,
}

/// Driver configuration.
///
/// ```
/// use ssd1306_i2c::{Config, VcomhLevel};
///
/// let config = Config::default()
///     .with_address(0x3D)
///     .with_contrast(0x8F)
///     .with_vcomh(VcomhLevel::V083);
/// assert_eq!(config.address, 0x3D);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 7-bit I2C address
    pub address: u8,
    /// Display clock divide ratio, 4 bits
    pub clock_divide: u8,
    /// Oscillator frequency, 4 bits
    pub oscillator_frequency: u8,
    /// Pre-charge phase 1 and phase 2, in DCLKs, 4 bits each
    pub precharge: (u8, u8),
    pub display_offset: u8,
    pub start_line: u8,
    pub charge_pump: bool,
    pub segment_remap: bool,
    pub com_scan_reversed: bool,
    /// Alternative (interleaved) COM pin layout
    pub com_alternative: bool,
    pub com_lr_remap: bool,
    pub contrast: u8,
    pub vcomh: VcomhLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: DEFAULT_ADDRESS,
            clock_divide: 0,
            oscillator_frequency: 8,
            precharge: (0xF, 0x1),
            display_offset: 0,
            start_line: 0,
            charge_pump: true,
            segment_remap: true,
            com_scan_reversed: true,
            com_alternative: true,
            com_lr_remap: false,
            contrast: 0xFF,
            vcomh: VcomhLevel::V077,
        }
    }
}

impl Config {
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_clock(mut self, divide: u8, frequency: u8) -> Self {
        self.clock_divide = divide;
        self.oscillator_frequency = frequency;
        self
    }

    pub fn with_precharge(mut self, phase1: u8, phase2: u8) -> Self {
        self.precharge = (phase1, phase2);
        self
    }

    pub fn with_display_offset(mut self, offset: u8) -> Self {
        self.display_offset = offset;
        self
    }

    pub fn with_start_line(mut self, line: u8) -> Self {
        self.start_line = line;
        self
    }

    /// Disable when the panel is driven from an external VCC supply.
    pub fn with_charge_pump(mut self, enable: bool) -> Self {
        self.charge_pump = enable;
        self
    }

    /// Flip the logical-to-physical mapping: `segment_remap` mirrors horizontally,
    /// `com_scan_reversed` mirrors vertically.
    pub fn with_orientation(mut self, segment_remap: bool, com_scan_reversed: bool) -> Self {
        self.segment_remap = segment_remap;
        self.com_scan_reversed = com_scan_reversed;
        self
    }

    /// 128x32 modules usually need the sequential layout (`alternative = false`).
    pub fn with_com_pins(mut self, alternative: bool, lr_remap: bool) -> Self {
        self.com_alternative = alternative;
        self.com_lr_remap = lr_remap;
        self
    }

    pub fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }

    pub fn with_vcomh(mut self, level: VcomhLevel) -> Self {
        self.vcomh = level;
        self
    }
}
