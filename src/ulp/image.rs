//! ULP program image validation and installation.
//!
//! Images use the ULP FSM binary layout: a 12-byte little-endian header
//! (magic, text offset, text/data/bss sizes) followed by the text and data
//! segments. Installation copies text + data into the shared window and
//! zeroes the bss region behind them.

use crate::mem::SharedMem;

/// Header magic, `"ulp\0"`.
pub const BINARY_MAGIC: u32 = 0x0070_6c75;

/// Size of the binary header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Program image rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// Image shorter than the fixed binary header.
    TooShort { len: usize },

    /// Header magic does not match [`BINARY_MAGIC`].
    BadMagic { found: u32 },

    /// Image body shorter than the sizes declared in its header.
    Truncated { expected: usize, len: usize },

    /// Program (including bss) exceeds the reserved memory window.
    TooLarge { size_bytes: usize, max_bytes: usize },
}

/// Parsed ULP binary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BinaryHeader {
    pub text_offset: u16,
    pub text_size: u16,
    pub data_size: u16,
    pub bss_size: u16,
}

impl BinaryHeader {
    /// Parse and validate the header at the front of `image`.
    pub fn parse(image: &[u8]) -> Result<Self, Error> {
        if image.len() < HEADER_SIZE {
            return Err(Error::TooShort { len: image.len() });
        }

        let magic = u32::from_le_bytes([image[0], image[1], image[2], image[3]]);
        if magic != BINARY_MAGIC {
            return Err(Error::BadMagic { found: magic });
        }

        Ok(Self {
            text_offset: u16::from_le_bytes([image[4], image[5]]),
            text_size: u16::from_le_bytes([image[6], image[7]]),
            data_size: u16::from_le_bytes([image[8], image[9]]),
            bss_size: u16::from_le_bytes([image[10], image[11]]),
        })
    }

    /// Bytes occupied by header + text + data (what gets copied).
    #[inline]
    pub const fn program_size(&self) -> usize {
        self.text_offset as usize + self.text_size as usize + self.data_size as usize
    }

    /// Total footprint in the window, including bss.
    #[inline]
    pub const fn total_size(&self) -> usize {
        self.program_size() + self.bss_size as usize
    }

    /// Entry point as a word index into the window (start of text).
    #[inline]
    pub const fn entry_word(&self) -> u32 {
        (self.text_offset as u32) / 4
    }
}

/// Validate `image` and install it at the start of the shared window.
///
/// Returns the entry point word index for the start call.
pub fn install(shared: &SharedMem, image: &[u8]) -> Result<u32, Error> {
    let header = BinaryHeader::parse(image)?;

    let program_size = header.program_size();
    if image.len() < program_size {
        return Err(Error::Truncated {
            expected: program_size,
            len: image.len(),
        });
    }

    let total_size = header.total_size();
    let max_bytes = shared.window().size();
    if total_size > max_bytes {
        error!(
            "ULP image too large: {} bytes including bss (max {} bytes)",
            total_size, max_bytes
        );
        return Err(Error::TooLarge {
            size_bytes: total_size,
            max_bytes,
        });
    }

    debug!(
        "Installing ULP image: {} bytes program, {} bytes bss",
        program_size, header.bss_size
    );

    shared.copy_at(0, &image[..program_size]);
    shared.zero(program_size, header.bss_size as usize);

    Ok(header.entry_word())
}
