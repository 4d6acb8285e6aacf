#![cfg_attr(not(test), no_std)]

//! This crate provides an SSD1306 driver for monochrome OLED displays connected over I2C.
//!
//! Pixel edits go to a local framebuffer and only reach the display on [`Ssd1306::flush`],
//! which sends just the columns changed since the previous flush, one page at a time.
//!
//! ```
//! # use embedded_hal::blocking::i2c::Write;
//! # struct Bus;
//! # impl Write for Bus {
//! #     type Error = ();
//! #     fn write(&mut self, _: u8, _: &[u8]) -> Result<(), ()> { Ok(()) }
//! # }
//! # let i2c = Bus;
//! use ssd1306_i2c::Ssd1306_128x64;
//!
//! let mut display = Ssd1306_128x64::new(i2c);
//! display.initialize()?;
//! display.set_pixel(0, 0)?;
//! display.set_pixel(127, 63)?;
//! display.flush()?;
//! # Ok::<(), ssd1306_i2c::Error<()>>(())
//! ```

pub mod config;
pub mod error;
pub mod framebuffer;
pub mod instruction;
pub mod interface;
pub mod scroll;
pub mod state;

#[cfg(test)]
mod test_helpers;

pub use crate::config::{Config, VcomhLevel};
pub use crate::error::Error;
pub use crate::framebuffer::{DirtyRange, Framebuffer};
pub use crate::scroll::{DiagonalDirection, HorizontalDirection, ScrollInterval};
pub use crate::state::{AddressingMode, ControllerState, Power, Scroll};

use crate::instruction::{column_nibbles, mask, pack_nibbles, range_pair, Instruction};
use crate::interface::{I2cInterface, MAX_COMMAND_LEN};

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::Write;

/// SSD1306 driver for a display `WIDTH` columns wide and `PAGES` pages (of 8 rows) tall.
pub struct Ssd1306<I2C, const WIDTH: usize = 128, const PAGES: usize = 8> {
    interface: I2cInterface<I2C>,
    config: Config,
    state: ControllerState,
    framebuffer: Framebuffer<WIDTH, PAGES>,
}

/// 128x64 module.
#[allow(non_camel_case_types)]
pub type Ssd1306_128x64<I2C> = Ssd1306<I2C, 128, 8>;

/// 128x32 module.
#[allow(non_camel_case_types)]
pub type Ssd1306_128x32<I2C> = Ssd1306<I2C, 128, 4>;

impl<I2C, const WIDTH: usize, const PAGES: usize> Ssd1306<I2C, WIDTH, PAGES> {
    // GDDRAM is 128 columns by 8 pages.
    const GEOMETRY: () = assert!(
        WIDTH > 0 && WIDTH <= 128 && PAGES > 0 && PAGES <= 8,
        "SSD1306 supports at most 128 columns and 8 pages"
    );

    pub const HEIGHT: usize = PAGES * 8;

    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u16, u16) {
        (WIDTH as u16, Self::HEIGHT as u16)
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer<WIDTH, PAGES> {
        &self.framebuffer
    }

    pub fn get_pixel(&self, x: u16, y: u16) -> Option<bool> {
        self.framebuffer.get(x, y)
    }

    /// Blank the local buffer and mark every page fully dirty.
    pub fn clear(&mut self) {
        self.framebuffer.fill(false);
    }

    /// Light or blank the local buffer and mark every page fully dirty.
    pub fn fill(&mut self, on: bool) {
        self.framebuffer.fill(on);
    }

    /// Force the next flush to resend the whole buffer, e.g. after a transport error.
    pub fn mark_all_dirty(&mut self) {
        self.framebuffer.mark_all_dirty();
    }

    /// Give back the I2C bus.
    pub fn release(self) -> I2C {
        self.interface.release()
    }
}

impl<I2C, E, const WIDTH: usize, const PAGES: usize> Ssd1306<I2C, WIDTH, PAGES>
where
    I2C: Write<Error = E>,
{
    /// Creates a new driver with the default configuration at address `0x3C`.
    pub fn new(i2c: I2C) -> Self {
        Self::with_config(i2c, Config::default())
    }

    pub fn with_config(i2c: I2C, config: Config) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::GEOMETRY;

        Ssd1306 {
            interface: I2cInterface::new(i2c, config.address),
            config,
            state: ControllerState::default(),
            framebuffer: Framebuffer::new(),
        }
    }

    /// Runs commands to initialize the display.
    ///
    /// The resulting state depends only on the configuration, never on what ran before.
    pub fn initialize(&mut self) -> Result<(), Error<E>> {
        log::debug!(
            "initializing {}x{} display at {:#04x}",
            WIDTH,
            Self::HEIGHT,
            self.interface.address()
        );
        let config = self.config;
        self.state = ControllerState::default();

        // Off first so nothing flickers while the panel is reconfigured
        self.off()?;
        self.stop_scroll()?;

        self.set_display_clock(config.clock_divide, config.oscillator_frequency)?;
        self.set_multiplex_ratio((Self::HEIGHT - 1) as u8)?;
        self.set_precharge_period(config.precharge.0, config.precharge.1)?;
        self.set_display_offset(config.display_offset)?;
        self.set_display_start_line(config.start_line)?;

        // The pump has to be running before the panel is switched on
        self.set_charge_pump(config.charge_pump)?;
        self.set_memory_addressing_mode(AddressingMode::Horizontal)?;

        // Logical to physical mapping, before anything is drawn
        self.set_segment_remap(config.segment_remap)?;
        self.set_com_output_scan_direction(config.com_scan_reversed)?;
        self.set_com_pins_hardware_configuration(config.com_alternative, config.com_lr_remap)?;

        self.set_contrast(config.contrast)?;
        self.set_vcomh_deselect_level(config.vcomh)?;

        self.wake()?;
        self.set_inverse(false)?;

        self.set_window(0, (WIDTH - 1) as u8, 0, (PAGES - 1) as u8)?;
        self.reset_cursor()
    }

    fn write_command(&mut self, instruction: Instruction, params: &[u8]) -> Result<(), Error<E>> {
        let mut bytes = [0u8; MAX_COMMAND_LEN];
        let len = (params.len() + 1).min(MAX_COMMAND_LEN);
        bytes[0] = instruction as u8;
        bytes[1..len].copy_from_slice(&params[..len - 1]);
        self.interface.send_command(&bytes[..len])
    }

    /// Turn the display off.
    pub fn off(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::DISPLAYOFF, &[])?;
        self.state.power = Power::Off;
        Ok(())
    }

    /// Turn the display on.
    pub fn on(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::DISPLAYON, &[])?;
        self.state.power = Power::On;
        self.state.sleeping = false;
        Ok(())
    }

    /// Put the panel to sleep. GDDRAM content is kept.
    pub fn sleep(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::DISPLAYOFF, &[])?;
        self.state.sleeping = true;
        Ok(())
    }

    /// Wake the panel after [`sleep`](Self::sleep). Also used to power on during init.
    pub fn wake(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::DISPLAYON, &[])?;
        self.state.power = Power::On;
        self.state.sleeping = false;
        Ok(())
    }

    pub fn set_inverse(&mut self, inverted: bool) -> Result<(), Error<E>> {
        if inverted {
            self.write_command(Instruction::INVERTDISPLAY, &[])?;
        } else {
            self.write_command(Instruction::NORMALDISPLAY, &[])?;
        }
        self.state.inverted = inverted;
        Ok(())
    }

    /// Light every pixel regardless of GDDRAM (`true`), or show GDDRAM again (`false`).
    pub fn set_entire_display_on(&mut self, on: bool) -> Result<(), Error<E>> {
        if on {
            self.write_command(Instruction::DISPLAYALLON, &[])
        } else {
            self.write_command(Instruction::DISPLAYALLONRESUME, &[])
        }
    }

    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<E>> {
        self.write_command(Instruction::SETCONTRAST, &[contrast])?;
        self.state.contrast = contrast;
        Ok(())
    }

    /// RAM row shown on the first display line, 0-63.
    pub fn set_display_start_line(&mut self, line: u8) -> Result<(), Error<E>> {
        self.interface.send_command(&[Instruction::SETSTARTLINE as u8 | mask(line, 6)])
    }

    /// Vertical shift by COM, 0-63.
    pub fn set_display_offset(&mut self, offset: u8) -> Result<(), Error<E>> {
        self.write_command(Instruction::SETDISPLAYOFFSET, &[mask(offset, 6)])
    }

    /// MUX ratio minus one, 15-63.
    pub fn set_multiplex_ratio(&mut self, ratio: u8) -> Result<(), Error<E>> {
        self.write_command(Instruction::SETMULTIPLEX, &[mask(ratio, 6)])
    }

    /// `true` maps column 127 to SEG0. Does not touch data already in GDDRAM.
    pub fn set_segment_remap(&mut self, remap: bool) -> Result<(), Error<E>> {
        if remap {
            self.write_command(Instruction::SEGREMAPON, &[])?;
        } else {
            self.write_command(Instruction::SEGREMAPOFF, &[])?;
        }
        self.state.segment_remap = remap;
        Ok(())
    }

    /// `true` scans from COM[N-1] to COM0, flipping the image vertically at once.
    pub fn set_com_output_scan_direction(&mut self, reversed: bool) -> Result<(), Error<E>> {
        if reversed {
            self.write_command(Instruction::COMSCANDEC, &[])?;
        } else {
            self.write_command(Instruction::COMSCANINC, &[])?;
        }
        self.state.com_scan_reversed = reversed;
        Ok(())
    }

    pub fn set_com_pins_hardware_configuration(
        &mut self,
        alternative: bool,
        lr_remap: bool,
    ) -> Result<(), Error<E>> {
        let value = 0x02 | (u8::from(alternative) << 4) | (u8::from(lr_remap) << 5);
        self.write_command(Instruction::SETCOMPINS, &[value])
    }

    /// Clock divide ratio and oscillator frequency, 4 bits each.
    pub fn set_display_clock(&mut self, divide: u8, frequency: u8) -> Result<(), Error<E>> {
        self.write_command(Instruction::SETDISPLAYCLOCKDIV, &[pack_nibbles(divide, frequency)])
    }

    /// Pre-charge phase lengths in DCLKs, 4 bits each.
    pub fn set_precharge_period(&mut self, phase1: u8, phase2: u8) -> Result<(), Error<E>> {
        self.write_command(Instruction::SETPRECHARGE, &[pack_nibbles(phase1, phase2)])
    }

    pub fn set_vcomh_deselect_level(&mut self, level: VcomhLevel) -> Result<(), Error<E>> {
        self.write_command(Instruction::SETVCOMDETECT, &[level as u8])
    }

    pub fn set_charge_pump(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.write_command(Instruction::CHARGEPUMP, &[if enable { 0x14 } else { 0x10 }])
    }

    pub fn nop(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::NOP, &[])
    }

    pub fn set_memory_addressing_mode(&mut self, mode: AddressingMode) -> Result<(), Error<E>> {
        self.write_command(Instruction::MEMORYMODE, &[mode as u8])?;
        log::debug!("addressing mode {:?}", mode);
        self.state.addressing_mode = Some(mode);
        Ok(())
    }

    /// Restrict horizontal/vertical mode writes to a window. Columns are masked to 0-127,
    /// pages to 0-7.
    pub fn set_window(
        &mut self,
        col_start: u8,
        col_end: u8,
        page_start: u8,
        page_end: u8,
    ) -> Result<(), Error<E>> {
        match self.state.addressing_mode {
            Some(AddressingMode::Horizontal) | Some(AddressingMode::Vertical) => {}
            _ => return Err(Error::InvalidMode),
        }

        let columns = range_pair(col_start, col_end, 7);
        self.write_command(Instruction::COLUMNADDR, &columns)?;
        self.state.column_range = (columns[0], columns[1]);

        let pages = range_pair(page_start, page_end, 3);
        self.write_command(Instruction::PAGEADDR, &pages)?;
        self.state.page_range = (pages[0], pages[1]);
        Ok(())
    }

    /// Position the page mode cursor at `page` and `column`.
    pub fn set_page_cursor(&mut self, page: u8, column: u8) -> Result<(), Error<E>> {
        if self.state.addressing_mode != Some(AddressingMode::Page) {
            return Err(Error::InvalidMode);
        }
        let [low, high] = column_nibbles(column);
        self.interface.send_command(&[Instruction::SETPAGESTART as u8 | mask(page, 3), low, high])
    }

    // Page mode cursor to the origin, whatever the active mode.
    fn reset_cursor(&mut self) -> Result<(), Error<E>> {
        let [low, high] = column_nibbles(0);
        self.interface.send_command(&[Instruction::SETPAGESTART as u8, low, high])
    }

    /// Set up and start a continuous horizontal scroll over pages `start..=end`.
    ///
    /// Unsupported `interval_frames` fall back to 2 frames.
    pub fn configure_horizontal_scroll(
        &mut self,
        direction: HorizontalDirection,
        start: u8,
        end: u8,
        interval_frames: u16,
    ) -> Result<(), Error<E>> {
        let [start, end] = range_pair(start, end, 3);
        let interval_code = ScrollInterval::from_frames(interval_frames).code();

        self.write_command(
            direction.instruction(),
            &[0x00, start, interval_code, end, 0x00, 0xFF],
        )?;
        self.write_command(Instruction::ACTIVATESCROLL, &[])?;

        log::debug!("horizontal scroll {:?} pages {}..={}", direction, start, end);
        self.state.scroll = Scroll::Horizontal {
            direction,
            start,
            end,
            interval_code,
        };
        Ok(())
    }

    /// Set up and start a continuous vertical and horizontal scroll. `vertical_offset` is
    /// the rows moved per step, 1-63.
    pub fn configure_diagonal_scroll(
        &mut self,
        direction: DiagonalDirection,
        start: u8,
        end: u8,
        interval_frames: u16,
        vertical_offset: u8,
    ) -> Result<(), Error<E>> {
        let [start, end] = range_pair(start, end, 3);
        let interval_code = ScrollInterval::from_frames(interval_frames).code();
        let vertical_offset = mask(vertical_offset, 6);

        self.write_command(
            direction.instruction(),
            &[0x00, start, interval_code, end, vertical_offset],
        )?;
        self.write_command(Instruction::ACTIVATESCROLL, &[])?;

        log::debug!("diagonal scroll {:?} pages {}..={}", direction, start, end);
        self.state.scroll = Scroll::Diagonal {
            direction,
            start,
            end,
            interval_code,
            vertical_offset,
        };
        Ok(())
    }

    /// Rows `0..fixed_rows` stay put; the next `scroll_rows` rows take part in the
    /// vertical part of a diagonal scroll.
    pub fn set_vertical_scroll_area(
        &mut self,
        fixed_rows: u8,
        scroll_rows: u8,
    ) -> Result<(), Error<E>> {
        self.write_command(
            Instruction::SETVERTSCROLLAREA,
            &[mask(fixed_rows, 6), mask(scroll_rows, 7)],
        )
    }

    /// Stop scrolling. The controller forgets its scroll setup, and so does the driver.
    pub fn stop_scroll(&mut self) -> Result<(), Error<E>> {
        self.write_command(Instruction::DEACTIVATESCROLL, &[])?;
        self.state.scroll = Scroll::None;
        Ok(())
    }

    /// Sets a pixel in the local buffer. Visible after the next [`flush`](Self::flush).
    pub fn set_pixel(&mut self, x: u16, y: u16) -> Result<(), Error<E>> {
        if self.framebuffer.set(x, y, true) {
            Ok(())
        } else {
            Err(Error::OutOfRange { x, y })
        }
    }

    /// Clears a pixel in the local buffer. Visible after the next [`flush`](Self::flush).
    pub fn clear_pixel(&mut self, x: u16, y: u16) -> Result<(), Error<E>> {
        if self.framebuffer.set(x, y, false) {
            Ok(())
        } else {
            Err(Error::OutOfRange { x, y })
        }
    }

    /// Send every dirty page range to GDDRAM.
    ///
    /// A page stays dirty if its transfer fails, so calling `flush` again retries it.
    pub fn flush(&mut self) -> Result<(), Error<E>> {
        if self.framebuffer.is_clean() {
            return Ok(());
        }
        let mode = self.state.addressing_mode.ok_or(Error::InvalidMode)?;

        for page in 0..PAGES {
            let range = match self.framebuffer.dirty(page) {
                Some(range) => range,
                None => continue,
            };

            match mode {
                AddressingMode::Page => self.set_page_cursor(page as u8, range.start)?,
                AddressingMode::Horizontal | AddressingMode::Vertical => {
                    self.set_window(range.start, range.end, page as u8, page as u8)?
                }
            }
            self.interface.send_data(self.framebuffer.bytes(page, range))?;
            self.framebuffer.mark_clean(page);

            log::trace!("flushed page {} columns {}..={}", page, range.start, range.end);
        }
        Ok(())
    }

    /// Light the whole panel for `ms` milliseconds, then show GDDRAM again.
    pub fn flash_all_pixels<DELAY>(&mut self, delay: &mut DELAY, ms: u16) -> Result<(), Error<E>>
    where
        DELAY: DelayMs<u16>,
    {
        self.set_entire_display_on(true)?;
        delay.delay_ms(ms);
        self.set_entire_display_on(false)
    }
}

#[cfg(feature = "graphics")]
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

#[cfg(feature = "graphics")]
impl<I2C, const WIDTH: usize, const PAGES: usize> DrawTarget for Ssd1306<I2C, WIDTH, PAGES> {
    type Error = core::convert::Infallible;
    type Color = BinaryColor;

    /// Draws into the framebuffer only; call `flush` to update the display.
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels.into_iter() {
            // Only draw pixels that would be on screen
            if let (Ok(x), Ok(y)) = (u16::try_from(coord.x), u16::try_from(coord.y)) {
                self.framebuffer.set(x, y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.fill(color.is_on());
        Ok(())
    }
}

#[cfg(feature = "graphics")]
impl<I2C, const WIDTH: usize, const PAGES: usize> OriginDimensions for Ssd1306<I2C, WIDTH, PAGES> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, Self::HEIGHT as u32)
    }
}
