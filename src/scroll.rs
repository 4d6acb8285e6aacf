//! Continuous scroll parameters.

use crate::instruction::Instruction;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Direction of a horizontal scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Right,
    Left,
}

impl HorizontalDirection {
    pub(crate) fn instruction(self) -> Instruction {
        match self {
            HorizontalDirection::Right => Instruction::RIGHTSCROLL,
            HorizontalDirection::Left => Instruction::LEFTSCROLL,
        }
    }
}

/// Horizontal direction of a combined vertical and horizontal scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagonalDirection {
    VerticalRight,
    VerticalLeft,
}

impl DiagonalDirection {
    pub(crate) fn instruction(self) -> Instruction {
        match self {
            DiagonalDirection::VerticalRight => Instruction::VERTRIGHTSCROLL,
            DiagonalDirection::VerticalLeft => Instruction::VERTLEFTSCROLL,
        }
    }
}

/// Time between scroll steps, in frames. Discriminants are the frame counts.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ScrollInterval {
    Frames2 = 2,
    Frames3 = 3,
    Frames4 = 4,
    Frames5 = 5,
    Frames25 = 25,
    Frames64 = 64,
    Frames128 = 128,
    Frames256 = 256,
}

impl ScrollInterval {
    /// Look up a frame count. Counts the controller does not support fall back to 2 frames.
    pub fn from_frames(frames: u16) -> Self {
        ScrollInterval::from_u16(frames).unwrap_or(ScrollInterval::Frames2)
    }

    /// The 3-bit register code.
    pub fn code(self) -> u8 {
        match self {
            ScrollInterval::Frames2 => 0b111,
            ScrollInterval::Frames3 => 0b100,
            ScrollInterval::Frames4 => 0b101,
            ScrollInterval::Frames5 => 0b000,
            ScrollInterval::Frames25 => 0b110,
            ScrollInterval::Frames64 => 0b001,
            ScrollInterval::Frames128 => 0b010,
            ScrollInterval::Frames256 => 0b011,
        }
    }
}
