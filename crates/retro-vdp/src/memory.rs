//! Paged index memory.
//!
//! Bulk game data (sprite sheets, tile sheets, back buffers) lives in `ram`,
//! sliced into fixed-size pages of `width * height` bytes. A dedicated
//! screen buffer (`vram`) of the same size sits alongside. Exactly one of
//! the two is bound as the current screen target; the binding is resolved on
//! every access rather than copied, so draws into a bound page persist in
//! that page.

use crate::error::VdpError;

/// Page number that binds the dedicated screen buffer.
pub(crate) const VRAM_PAGE: i32 = -1;

enum ScreenTarget {
    Vram,
    Page(usize),
}

pub(crate) struct PagedMemory {
    page_size: usize,
    pages: usize,
    /// All pages, contiguous: page p occupies `p*page_size..(p+1)*page_size`.
    ram: Vec<u8>,
    /// Dedicated screen buffer.
    vram: Vec<u8>,
    target: ScreenTarget,
}

impl PagedMemory {
    pub(crate) fn new(page_size: usize, pages: usize) -> Self {
        Self {
            page_size,
            pages,
            ram: vec![0; page_size * pages],
            vram: vec![0; page_size],
            target: ScreenTarget::Vram,
        }
    }

    pub(crate) fn pages(&self) -> usize {
        self.pages
    }

    /// Bind the screen target: -1 for vram, 0..pages for a ram page.
    pub(crate) fn bind(&mut self, page: i32) -> Result<(), VdpError> {
        if page == VRAM_PAGE {
            self.target = ScreenTarget::Vram;
            return Ok(());
        }
        if page >= 0 && (page as usize) < self.pages {
            self.target = ScreenTarget::Page(page as usize);
            Ok(())
        } else {
            Err(VdpError::OutOfRange {
                index: i64::from(page),
                limit: self.pages,
            })
        }
    }

    /// Currently bound page, or -1 for the dedicated screen buffer.
    pub(crate) fn screen_page(&self) -> i32 {
        match self.target {
            ScreenTarget::Vram => VRAM_PAGE,
            ScreenTarget::Page(p) => p as i32,
        }
    }

    pub(crate) fn screen(&self) -> &[u8] {
        match self.target {
            ScreenTarget::Vram => &self.vram,
            ScreenTarget::Page(p) => &self.ram[p * self.page_size..(p + 1) * self.page_size],
        }
    }

    pub(crate) fn screen_mut(&mut self) -> &mut [u8] {
        match self.target {
            ScreenTarget::Vram => &mut self.vram,
            ScreenTarget::Page(p) => &mut self.ram[p * self.page_size..(p + 1) * self.page_size],
        }
    }

    pub(crate) fn page(&self, page: usize) -> Option<&[u8]> {
        if page >= self.pages {
            return None;
        }
        Some(&self.ram[page * self.page_size..(page + 1) * self.page_size])
    }

    pub(crate) fn page_mut(&mut self, page: usize) -> Option<&mut [u8]> {
        if page >= self.pages {
            return None;
        }
        Some(&mut self.ram[page * self.page_size..(page + 1) * self.page_size])
    }

    /// Byte at `offset` within `page`. Caller guarantees both are in range.
    pub(crate) fn page_byte(&self, page: usize, offset: usize) -> u8 {
        self.ram[page * self.page_size + offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vram_is_bound_by_default() {
        let mem = PagedMemory::new(16, 2);
        assert_eq!(mem.screen_page(), VRAM_PAGE);
        assert_eq!(mem.screen().len(), 16);
    }

    #[test]
    fn binding_a_page_aliases_it() {
        let mut mem = PagedMemory::new(16, 2);
        mem.bind(1).unwrap();
        mem.screen_mut()[3] = 7;
        // Write went into page 1 itself, not a copy.
        assert_eq!(mem.page(1).unwrap()[3], 7);
        assert_eq!(mem.page(0).unwrap()[3], 0);

        mem.bind(VRAM_PAGE).unwrap();
        assert_eq!(mem.screen()[3], 0);
        // Rebinding the page sees the earlier write.
        mem.bind(1).unwrap();
        assert_eq!(mem.screen()[3], 7);
    }

    #[test]
    fn bind_rejects_out_of_range_pages() {
        let mut mem = PagedMemory::new(16, 2);
        assert_eq!(
            mem.bind(2),
            Err(VdpError::OutOfRange { index: 2, limit: 2 })
        );
        assert_eq!(
            mem.bind(-2),
            Err(VdpError::OutOfRange {
                index: -2,
                limit: 2
            })
        );
        // A failed bind leaves the previous target in place.
        assert_eq!(mem.screen_page(), VRAM_PAGE);
    }

    #[test]
    fn pages_are_disjoint() {
        let mut mem = PagedMemory::new(4, 3);
        mem.page_mut(0).unwrap().fill(1);
        mem.page_mut(2).unwrap().fill(3);
        assert_eq!(mem.page(0).unwrap(), &[1, 1, 1, 1]);
        assert_eq!(mem.page(1).unwrap(), &[0, 0, 0, 0]);
        assert_eq!(mem.page(2).unwrap(), &[3, 3, 3, 3]);
        assert_eq!(mem.page_byte(2, 1), 3);
    }
}
