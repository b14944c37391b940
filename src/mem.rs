//! Shared memory window between the host core and the ULP coprocessor.
//!
//! [`AddressWindow`] is the pure address logic (normalization and bounds);
//! [`SharedMem`] performs the actual volatile word accesses, confining all
//! `unsafe` pointer arithmetic to this one type.
//!
//! The window is plain unsynchronized memory: word-sized transfers are atomic
//! at the bus level, but any ordering protocol with the running coprocessor
//! program (e.g. a flag word) is up to the caller.

/// Shared memory access error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// Address falls outside the reserved shared-memory window.
    OutOfWindow { addr: usize },
}

/// The contiguous byte range `[base, base + size)` shared with the coprocessor.
///
/// Callers may address the window either absolutely or relative to zero:
/// [`normalize`](Self::normalize) maps anything below `base` to `base + addr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressWindow {
    base: usize,
    size: usize,
}

impl AddressWindow {
    /// Create a new window.
    ///
    /// # Safety contract
    ///
    /// Accesses through [`SharedMem`] require `base..base + size` to be a
    /// valid, writable memory range (the RTC slow memory reservation on
    /// hardware, or a host buffer in tests).
    #[inline]
    pub const fn new(base: usize, size: usize) -> Self {
        Self { base, size }
    }

    /// Base address.
    #[inline]
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Window size in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Map a window-relative offset to an absolute address.
    ///
    /// Addresses below `base` are treated as offsets into the window;
    /// anything else passes through unchanged.
    #[inline]
    pub const fn normalize(&self, addr: usize) -> usize {
        if addr < self.base {
            addr + self.base
        } else {
            addr
        }
    }

    /// Whether a (normalized) address lies within the window.
    ///
    /// The upper bound is inclusive, matching the original reservation check.
    #[inline]
    pub const fn contains(&self, addr: usize) -> bool {
        self.base <= addr && addr <= self.base + self.size
    }
}

/// Bounds-checked word accessor over an [`AddressWindow`].
#[derive(Debug, Clone, Copy)]
pub struct SharedMem {
    window: AddressWindow,
}

impl SharedMem {
    /// Wrap a window.
    #[inline]
    pub const fn new(window: AddressWindow) -> Self {
        Self { window }
    }

    /// The underlying window.
    #[inline]
    pub const fn window(&self) -> AddressWindow {
        self.window
    }

    fn checked(&self, addr: usize) -> Result<usize, Error> {
        let addr = self.window.normalize(addr);
        if !self.window.contains(addr) {
            return Err(Error::OutOfWindow { addr });
        }
        debug_assert!(
            addr % core::mem::align_of::<u32>() == 0,
            "SharedMem: unaligned word access at {:#x}",
            addr,
        );
        Ok(addr)
    }

    /// Read the 4-byte word at `addr` (absolute or window-relative).
    #[inline]
    pub fn read(&self, addr: usize) -> Result<u32, Error> {
        let addr = self.checked(addr)?;
        Ok(unsafe { core::ptr::read_volatile(addr as *const u32) })
    }

    /// Store a 4-byte word at `addr` (absolute or window-relative).
    #[inline]
    pub fn write(&self, addr: usize, value: u32) -> Result<(), Error> {
        let addr = self.checked(addr)?;
        unsafe {
            core::ptr::write_volatile(addr as *mut u32, value);
        }
        Ok(())
    }

    /// Copy a byte slice into the window at the given byte offset.
    ///
    /// Bounds must have been validated by the caller.
    #[inline]
    pub(crate) fn copy_at(&self, offset: usize, data: &[u8]) {
        debug_assert!(
            offset + data.len() <= self.window.size,
            "SharedMem copy_at overflow: offset {} + {} bytes > size {}",
            offset,
            data.len(),
            self.window.size,
        );
        unsafe {
            core::ptr::copy_nonoverlapping(
                data.as_ptr(),
                (self.window.base + offset) as *mut u8,
                data.len(),
            );
        }
    }

    /// Zero `len` bytes of the window starting at the given byte offset.
    ///
    /// Bounds must have been validated by the caller.
    #[inline]
    pub(crate) fn zero(&self, offset: usize, len: usize) {
        debug_assert!(
            offset + len <= self.window.size,
            "SharedMem zero overflow: offset {} + {} bytes > size {}",
            offset,
            len,
            self.window.size,
        );
        unsafe {
            core::ptr::write_bytes((self.window.base + offset) as *mut u8, 0, len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_passes_absolute_addresses_through() {
        let window = AddressWindow::new(0x1000, 0x200);
        assert_eq!(window.normalize(0x1000), 0x1000);
        assert_eq!(window.normalize(0x1050), 0x1050);
        assert_eq!(window.normalize(0x5000), 0x5000);
    }

    #[test]
    fn normalize_rebases_relative_addresses() {
        let window = AddressWindow::new(0x1000, 0x200);
        assert_eq!(window.normalize(0), 0x1000);
        assert_eq!(window.normalize(0x50), 0x1050);
        assert_eq!(window.normalize(0xFFF), 0x1FFF);
    }

    #[test]
    fn contains_has_inclusive_upper_bound() {
        let window = AddressWindow::new(0x1000, 0x200);
        assert!(window.contains(0x1000));
        assert!(window.contains(0x11FF));
        assert!(window.contains(0x1200));
        assert!(!window.contains(0x1201));
        assert!(!window.contains(0x1300));
        assert!(!window.contains(0xFFF));
    }

    fn heap_window(words: usize) -> (Box<[u32]>, SharedMem) {
        let backing = vec![0u32; words].into_boxed_slice();
        let window = AddressWindow::new(backing.as_ptr() as usize, words * 4);
        (backing, SharedMem::new(window))
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_backing, mem) = heap_window(64);
        let base = mem.window().base();

        mem.write(base + 0x10, 0xDEAD_BEEF).unwrap();
        assert_eq!(mem.read(base + 0x10).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn relative_write_is_visible_at_absolute_alias() {
        let (_backing, mem) = heap_window(64);
        let base = mem.window().base();

        mem.write(0x50, 7).unwrap();
        assert_eq!(mem.read(base + 0x50).unwrap(), 7);
        assert_eq!(mem.read(0x50).unwrap(), 7);
    }

    #[test]
    fn out_of_window_access_fails() {
        let (_backing, mem) = heap_window(64);
        let base = mem.window().base();
        let past_end = base + 64 * 4 + 4;

        assert_eq!(
            mem.read(past_end),
            Err(Error::OutOfWindow { addr: past_end })
        );
        assert_eq!(
            mem.write(past_end, 1),
            Err(Error::OutOfWindow { addr: past_end })
        );
    }

    #[test]
    fn copy_at_and_zero_touch_the_backing_buffer() {
        let (backing, mem) = heap_window(4);

        mem.copy_at(0, &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
        mem.zero(4, 4);

        assert_eq!(backing[0], u32::from_le_bytes([0x11, 0x22, 0x33, 0x44]));
        assert_eq!(backing[1], 0);
    }
}
