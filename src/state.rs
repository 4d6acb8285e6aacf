//! Register state mirrored from the controller.

use crate::scroll::{DiagonalDirection, HorizontalDirection};

use num_derive::{FromPrimitive, ToPrimitive};

/// Display power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    Off,
    On,
}

/// Memory addressing mode. Discriminants are the register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum AddressingMode {
    /// Column advances, then wraps to the window start and advances the page.
    Horizontal = 0b00,
    /// Page advances, then wraps to the window start and advances the column.
    Vertical = 0b01,
    /// Column advances and wraps within the current page only.
    Page = 0b10,
}

/// Active continuous scroll configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    None,
    Horizontal {
        direction: HorizontalDirection,
        start: u8,
        end: u8,
        interval_code: u8,
    },
    Diagonal {
        direction: DiagonalDirection,
        start: u8,
        end: u8,
        interval_code: u8,
        vertical_offset: u8,
    },
}

/// What the driver believes the controller registers hold.
///
/// Updated only after the command carrying the change was written successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    pub power: Power,
    pub sleeping: bool,
    pub inverted: bool,
    pub contrast: u8,
    /// `None` until `initialize()` or `set_memory_addressing_mode()` has run.
    pub addressing_mode: Option<AddressingMode>,
    pub column_range: (u8, u8),
    pub page_range: (u8, u8),
    pub segment_remap: bool,
    pub com_scan_reversed: bool,
    pub scroll: Scroll,
}

impl Default for ControllerState {
    /// Controller reset values.
    fn default() -> Self {
        ControllerState {
            power: Power::Off,
            sleeping: false,
            inverted: false,
            contrast: 0x7F,
            addressing_mode: None,
            column_range: (0, 127),
            page_range: (0, 7),
            segment_remap: false,
            com_scan_reversed: false,
            scroll: Scroll::None,
        }
    }
}
