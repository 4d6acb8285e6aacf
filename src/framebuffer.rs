//! Local 1 bit per pixel copy of GDDRAM with per-page dirty column ranges.

/// Inclusive range of columns changed since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRange {
    pub start: u8,
    pub end: u8,
}

impl DirtyRange {
    fn widen(range: Option<DirtyRange>, column: u8) -> DirtyRange {
        match range {
            None => DirtyRange {
                start: column,
                end: column,
            },
            Some(r) => DirtyRange {
                start: r.start.min(column),
                end: r.end.max(column),
            },
        }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

/// `WIDTH` columns by `PAGES` pages of 8 rows. Pixel `(x, y)` is bit `y % 8` of
/// byte `x` in page `y / 8`, matching the controller's GDDRAM layout.
pub struct Framebuffer<const WIDTH: usize, const PAGES: usize> {
    pages: [[u8; WIDTH]; PAGES],
    dirty: [Option<DirtyRange>; PAGES],
}

impl<const WIDTH: usize, const PAGES: usize> Framebuffer<WIDTH, PAGES> {
    pub const HEIGHT: usize = PAGES * 8;

    /// A blank buffer. Nothing is dirty: the device content is unknown, not blank.
    pub const fn new() -> Self {
        Framebuffer {
            pages: [[0; WIDTH]; PAGES],
            dirty: [None; PAGES],
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        (x as usize) < WIDTH && (y as usize) < Self::HEIGHT
    }

    /// Set or clear one pixel. Returns `false`, leaving the buffer untouched, when
    /// the coordinate is outside the buffer.
    pub fn set(&mut self, x: u16, y: u16, on: bool) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let page = y as usize / 8;
        let bit = 1u8 << (y % 8);
        let byte = &mut self.pages[page][x as usize];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
        self.dirty[page] = Some(DirtyRange::widen(self.dirty[page], x as u8));
        true
    }

    pub fn get(&self, x: u16, y: u16) -> Option<bool> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.pages[y as usize / 8][x as usize] & (1 << (y % 8)) != 0)
    }

    /// Set every pixel to `on` and mark everything dirty.
    pub fn fill(&mut self, on: bool) {
        let value = if on { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(value);
        }
        self.mark_all_dirty();
    }

    pub fn mark_all_dirty(&mut self) {
        if WIDTH == 0 {
            return;
        }
        let full = DirtyRange {
            start: 0,
            end: (WIDTH - 1) as u8,
        };
        self.dirty = [Some(full); PAGES];
    }

    pub fn dirty(&self, page: usize) -> Option<DirtyRange> {
        self.dirty.get(page).copied().flatten()
    }

    pub fn is_clean(&self) -> bool {
        self.dirty.iter().all(Option::is_none)
    }

    pub(crate) fn mark_clean(&mut self, page: usize) {
        if let Some(d) = self.dirty.get_mut(page) {
            *d = None;
        }
    }

    /// Bytes of `page` covered by `range`, in column order.
    pub fn bytes(&self, page: usize, range: DirtyRange) -> &[u8] {
        &self.pages[page][range.start as usize..=range.end as usize]
    }

    /// The whole buffer, page by page.
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }
}

impl<const WIDTH: usize, const PAGES: usize> Default for Framebuffer<WIDTH, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_maps_to_page_and_bit() {
        let mut fb = Framebuffer::<128, 8>::new();
        assert!(fb.set(5, 13, true));
        assert_eq!(fb.pages()[1][5], 1 << 5);
        assert_eq!(fb.get(5, 13), Some(true));
        assert_eq!(fb.get(5, 12), Some(false));
    }

    #[test]
    fn dirty_range_widens_per_page() {
        let mut fb = Framebuffer::<128, 8>::new();
        assert!(fb.is_clean());

        fb.set(40, 0, true);
        fb.set(10, 7, true);
        fb.set(90, 3, false);
        fb.set(64, 8, true);

        assert_eq!(fb.dirty(0), Some(DirtyRange { start: 10, end: 90 }));
        assert_eq!(fb.dirty(1), Some(DirtyRange { start: 64, end: 64 }));
        assert_eq!(fb.dirty(2), None);
        assert_eq!(fb.dirty(0).map(|r| r.len()), Some(81));
    }

    #[test]
    fn out_of_range_leaves_buffer_untouched() {
        let mut fb = Framebuffer::<128, 4>::new();
        assert!(!fb.set(128, 0, true));
        assert!(!fb.set(0, 32, true));
        assert!(fb.set(127, 31, true));
        assert_eq!(fb.get(0, 32), None);
        assert_eq!(fb.dirty(0), None);
        assert_eq!(fb.dirty(3), Some(DirtyRange { start: 127, end: 127 }));
    }

    #[test]
    fn set_then_clear_restores_byte() {
        let mut fb = Framebuffer::<16, 1>::new();
        fb.set(3, 2, true);
        fb.set(3, 4, true);
        fb.set(3, 2, false);
        assert_eq!(fb.pages()[0][3], 1 << 4);
    }

    #[test]
    fn fill_marks_everything_dirty() {
        let mut fb = Framebuffer::<32, 2>::new();
        fb.fill(true);
        for page in 0..2 {
            assert_eq!(fb.dirty(page), Some(DirtyRange { start: 0, end: 31 }));
            let bytes = fb.bytes(page, DirtyRange { start: 0, end: 31 });
            assert!(bytes.iter().all(|b| *b == 0xFF));
        }
        fb.mark_clean(0);
        fb.mark_clean(1);
        assert!(fb.is_clean());
    }
}
