//! SSD1306 opcodes and the bit-packing helpers used to build their parameters.

/// SSD1306 instructions.
///
/// Opcodes marked "OR" carry their parameter in the low bits of the opcode byte itself.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Set lower column start address for page addressing mode (OR low nibble)
    SETLOWCOLUMN = 0x00,
    /// Set higher column start address for page addressing mode (OR high nibble)
    SETHIGHCOLUMN = 0x10,
    /// Set memory addressing mode
    MEMORYMODE = 0x20,
    /// Column start and end address, horizontal/vertical modes only
    COLUMNADDR = 0x21,
    /// Page start and end address, horizontal/vertical modes only
    PAGEADDR = 0x22,
    /// Continuous right horizontal scroll setup
    RIGHTSCROLL = 0x26,
    /// Continuous left horizontal scroll setup
    LEFTSCROLL = 0x27,
    /// Continuous vertical and right horizontal scroll setup
    VERTRIGHTSCROLL = 0x29,
    /// Continuous vertical and left horizontal scroll setup
    VERTLEFTSCROLL = 0x2A,
    /// Deactivate scroll. Clears all scroll configuration on the controller.
    DEACTIVATESCROLL = 0x2E,
    /// Activate scroll
    ACTIVATESCROLL = 0x2F,
    /// Set display start line (OR 6-bit line)
    SETSTARTLINE = 0x40,
    /// Contrast control
    SETCONTRAST = 0x81,
    /// Charge pump setting
    CHARGEPUMP = 0x8D,
    /// Segment remap off, column 0 drives SEG0
    SEGREMAPOFF = 0xA0,
    /// Segment remap on, column 127 drives SEG0
    SEGREMAPON = 0xA1,
    /// Vertical scroll area
    SETVERTSCROLLAREA = 0xA3,
    /// Output follows RAM content
    DISPLAYALLONRESUME = 0xA4,
    /// Entire display on, ignoring RAM
    DISPLAYALLON = 0xA5,
    /// Normal display
    NORMALDISPLAY = 0xA6,
    /// Inverse display
    INVERTDISPLAY = 0xA7,
    /// Multiplex ratio
    SETMULTIPLEX = 0xA8,
    /// Display off (sleep)
    DISPLAYOFF = 0xAE,
    /// Display on
    DISPLAYON = 0xAF,
    /// Page start address for page addressing mode (OR 3-bit page)
    SETPAGESTART = 0xB0,
    /// COM output scan from COM0 to COM[N-1]
    COMSCANINC = 0xC0,
    /// COM output scan from COM[N-1] to COM0
    COMSCANDEC = 0xC8,
    /// Display offset
    SETDISPLAYOFFSET = 0xD3,
    /// Display clock divide ratio and oscillator frequency
    SETDISPLAYCLOCKDIV = 0xD5,
    /// Pre-charge period
    SETPRECHARGE = 0xD9,
    /// COM pins hardware configuration
    SETCOMPINS = 0xDA,
    /// VCOMH deselect level
    SETVCOMDETECT = 0xDB,
    /// No operation
    NOP = 0xE3,
}

/// Keep the low `bits` bits of `value`.
pub const fn mask(value: u8, bits: u32) -> u8 {
    if bits >= 8 {
        value
    } else {
        value & ((1u8 << bits) - 1)
    }
}

/// Pack two 4-bit fields into one byte, `low` in bits 3:0 and `high` in bits 7:4.
pub const fn pack_nibbles(low: u8, high: u8) -> u8 {
    mask(low, 4) | (mask(high, 4) << 4)
}

/// Mask a start/end register pair to `bits` bits each.
pub const fn range_pair(start: u8, end: u8, bits: u32) -> [u8; 2] {
    [mask(start, bits), mask(end, bits)]
}

/// Split a column address into the page-mode low and high column commands.
pub const fn column_nibbles(column: u8) -> [u8; 2] {
    let column = mask(column, 7);
    [
        Instruction::SETLOWCOLUMN as u8 | mask(column, 4),
        Instruction::SETHIGHCOLUMN as u8 | (column >> 4),
    ]
}
