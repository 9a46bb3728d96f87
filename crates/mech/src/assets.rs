//! Asset directory for the external flash banks
//!
//! The packer lays every bitmap and data record out in one of two banks and
//! emits a table of [`AssetRef`]s (see [`crate::fxdata`]). The directory is
//! read-only at runtime: it is validated once before the first frame and
//! then only looked up.
//!
//! # Example
//!
//! ```
//! use mech::fxdata;
//!
//! let dir = fxdata::directory();
//! dir.validate().unwrap();
//!
//! let menu = dir.lookup("main_menu_128x64").unwrap();
//! assert_eq!((menu.width, menu.height), (128, 64));
//! ```

use core::fmt;

/// Size of the bitmap header (width and height as big-endian u16)
pub const BITMAP_HEADER_LEN: u32 = 4;

/// Highest address a 24-bit flash offset can hold
pub const MAX_OFFSET: u32 = 0x00FF_FFFF;

/// Flash page size in bytes
pub const PAGE_SIZE: u32 = 256;

/// Independently addressed region of external flash
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Bank {
    /// Read-only asset data
    Data = 0,
    /// Read/write persisted game state
    Save = 1,
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bank::Data => write!(f, "data"),
            Bank::Save => write!(f, "save"),
        }
    }
}

/// Where a bank lives on the chip and how big it is
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BankLayout {
    /// First 256-byte flash page of the bank
    pub page: u16,
    /// Total bank size in bytes
    pub size: u32,
}

impl BankLayout {
    pub const fn new(page: u16, size: u32) -> Self {
        Self { page, size }
    }

    /// Absolute chip address of a bank-relative offset
    #[inline]
    pub const fn address(&self, offset: u32) -> u32 {
        (self.page as u32) * PAGE_SIZE + offset
    }
}

/// Pixel storage of a bitmap
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum BitmapFormat {
    /// One image byte per column per page
    Plain,
    /// Image byte followed by mask byte per column per page
    Masked,
}

impl BitmapFormat {
    /// Bytes stored per column of one 8-pixel page
    #[inline]
    pub const fn bytes_per_column(self) -> u32 {
        match self {
            BitmapFormat::Plain => 1,
            BitmapFormat::Masked => 2,
        }
    }
}

/// Directory entry identifying one bitmap
///
/// Offsets are bank-relative and point at the 4-byte header. Frames are
/// stored back to back after the header.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct AssetRef {
    pub bank: Bank,
    pub offset: u32,
    pub width: u16,
    pub height: u16,
    pub frames: u8,
    pub format: BitmapFormat,
}

impl AssetRef {
    /// Single-frame bitmap in the data bank
    pub const fn bitmap(offset: u32, width: u16, height: u16, format: BitmapFormat) -> Self {
        Self {
            bank: Bank::Data,
            offset,
            width,
            height,
            frames: 1,
            format,
        }
    }

    /// Multi-frame sprite sheet in the data bank
    pub const fn sheet(offset: u32, width: u16, height: u16, frames: u8, format: BitmapFormat) -> Self {
        Self {
            bank: Bank::Data,
            offset,
            width,
            height,
            frames,
            format,
        }
    }

    /// Number of 8-pixel pages (rows of bytes) in one frame
    #[inline]
    pub const fn pages(&self) -> u32 {
        (self.height as u32).div_ceil(8)
    }

    /// Bytes in one row of pages
    #[inline]
    pub const fn row_len(&self) -> u32 {
        self.width as u32 * self.format.bytes_per_column()
    }

    /// Bytes in one frame, without header
    #[inline]
    pub const fn frame_len(&self) -> u32 {
        self.row_len() * self.pages()
    }

    /// Bytes of pixel data for all frames, without header
    #[inline]
    pub const fn payload_len(&self) -> u32 {
        self.frame_len() * self.frames as u32
    }

    /// Total bytes occupied in the bank, header included
    #[inline]
    pub const fn byte_size(&self) -> u32 {
        BITMAP_HEADER_LEN + self.payload_len()
    }

    /// Bank offset of the first pixel byte of `frame`
    #[inline]
    pub const fn frame_offset(&self, frame: u8) -> u32 {
        self.offset + BITMAP_HEADER_LEN + self.frame_len() * frame as u32
    }

    /// One past the last byte of this asset
    #[inline]
    pub const fn end(&self) -> u32 {
        self.offset + self.byte_size()
    }

    /// Like [`payload_len`](Self::payload_len), `None` on overflow
    pub fn checked_payload_len(&self) -> Option<u32> {
        self.row_len()
            .checked_mul(self.pages())?
            .checked_mul(u32::from(self.frames))
    }

    /// Like [`end`](Self::end), `None` on overflow
    pub fn checked_end(&self) -> Option<u32> {
        self.checked_payload_len()?
            .checked_add(BITMAP_HEADER_LEN)?
            .checked_add(self.offset)
    }
}

/// Non-bitmap byte record (stat blocks, menu item lists)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct RecordRef {
    pub bank: Bank,
    pub offset: u32,
    pub len: u32,
}

impl RecordRef {
    pub const fn data(offset: u32, len: u32) -> Self {
        Self {
            bank: Bank::Data,
            offset,
            len,
        }
    }
}

/// Asset table errors
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AssetError {
    /// An entry's byte range does not fit in its bank
    OutOfBank {
        name: &'static str,
        bank: Bank,
        end: u32,
        bank_size: u32,
    },
    /// An entry's offset does not fit in 24 bits
    OffsetTooLarge { name: &'static str, offset: u32 },
    /// A bitmap with zero width, height or frames
    Empty { name: &'static str },
    /// A bitmap whose size does not fit in 32 bits
    TooLarge { name: &'static str },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::OutOfBank { name, bank, end, bank_size } => write!(
                f,
                "asset '{}' ends at {:#08x}, past the {} bank size {:#08x}",
                name, end, bank, bank_size
            ),
            AssetError::OffsetTooLarge { name, offset } => {
                write!(f, "asset '{}' offset {:#x} does not fit in 24 bits", name, offset)
            }
            AssetError::Empty { name } => write!(f, "asset '{}' has no pixels", name),
            AssetError::TooLarge { name } => write!(f, "asset '{}' is too large to address", name),
        }
    }
}

/// Read-only mapping from asset name to [`AssetRef`]
#[derive(Clone, Copy, Debug)]
pub struct AssetDirectory {
    data: BankLayout,
    save: BankLayout,
    entries: &'static [(&'static str, AssetRef)],
}

impl AssetDirectory {
    pub const fn new(
        data: BankLayout,
        save: BankLayout,
        entries: &'static [(&'static str, AssetRef)],
    ) -> Self {
        Self { data, save, entries }
    }

    /// Layout of the given bank
    #[inline]
    pub const fn bank(&self, bank: Bank) -> BankLayout {
        match bank {
            Bank::Data => self.data,
            Bank::Save => self.save,
        }
    }

    /// Find an asset by name
    pub fn lookup(&self, name: &str) -> Option<AssetRef> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, asset)| *asset)
    }

    /// Iterate over all entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, AssetRef)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Range-check one asset against its bank
    pub fn check(&self, name: &'static str, asset: &AssetRef) -> Result<(), AssetError> {
        if asset.width == 0 || asset.height == 0 || asset.frames == 0 {
            return Err(AssetError::Empty { name });
        }
        if asset.offset > MAX_OFFSET {
            return Err(AssetError::OffsetTooLarge {
                name,
                offset: asset.offset,
            });
        }
        let bank_size = self.bank(asset.bank).size;
        let end = asset.checked_end().ok_or(AssetError::TooLarge { name })?;
        if end > bank_size {
            return Err(AssetError::OutOfBank {
                name,
                bank: asset.bank,
                end,
                bank_size,
            });
        }
        Ok(())
    }

    /// Check every entry; the first failure is returned
    pub fn validate(&self) -> Result<(), AssetError> {
        for (name, asset) in self.entries {
            self.check(*name, asset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SMALL: &[(&str, AssetRef)] = &[
        ("arrow", AssetRef::bitmap(0, 7, 13, BitmapFormat::Masked)),
        ("label", AssetRef::bitmap(32, 20, 6, BitmapFormat::Plain)),
    ];

    fn small_dir(size: u32) -> AssetDirectory {
        AssetDirectory::new(BankLayout::new(0xff00, size), BankLayout::new(0xfff0, 4096), SMALL)
    }

    #[test]
    fn test_byte_size_masked() {
        let arrow = AssetRef::bitmap(0, 7, 13, BitmapFormat::Masked);
        // 2 pages * 7 columns * 2 bytes + header
        assert_eq!(arrow.byte_size(), 32);
        assert_eq!(arrow.row_len(), 14);
    }

    #[test]
    fn test_byte_size_sheet() {
        let boom = AssetRef::sheet(0, 23, 23, 7, BitmapFormat::Masked);
        assert_eq!(boom.byte_size(), 970);
        assert_eq!(boom.frame_offset(1), 4 + 138);
    }

    #[test]
    fn test_lookup_is_stable() {
        let dir = small_dir(56);
        let first = dir.lookup("label");
        let second = dir.lookup("label");
        assert_eq!(first, second);
        assert_eq!(first.unwrap().offset, 32);
        assert!(dir.lookup("missing").is_none());
    }

    #[test]
    fn test_validate_exact_fit() {
        // label ends at 32 + 4 + 20
        assert_eq!(small_dir(56).validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_overflow() {
        let err = small_dir(55).validate().unwrap_err();
        assert_eq!(
            err,
            AssetError::OutOfBank {
                name: "label",
                bank: Bank::Data,
                end: 56,
                bank_size: 55,
            }
        );
    }

    #[test]
    fn test_validate_rejects_wrapping_size() {
        // 32768 * 2 * 8192 * 8 is exactly 2^32
        const HUGE: &[(&str, AssetRef)] = &[("huge", AssetRef::sheet(0, 32768, 65535, 8, BitmapFormat::Masked))];
        let dir = AssetDirectory::new(BankLayout::new(0xfdb1, 147134), BankLayout::new(0xfff0, 4096), HUGE);
        assert_eq!(dir.validate(), Err(AssetError::TooLarge { name: "huge" }));
        assert_eq!(HUGE[0].1.checked_payload_len(), None);
        assert_eq!(HUGE[0].1.checked_end(), None);
    }

    #[test]
    fn test_checked_end_matches_end() {
        let boom = AssetRef::sheet(0x100, 23, 23, 7, BitmapFormat::Masked);
        assert_eq!(boom.checked_end(), Some(boom.end()));
        assert_eq!(boom.checked_payload_len(), Some(boom.payload_len()));
    }

    #[test]
    fn test_shipped_table_fits() {
        let dir = crate::fxdata::directory();
        assert_eq!(dir.validate(), Ok(()));
        let (_, last) = crate::fxdata::ASSETS.last().copied().unwrap();
        assert_eq!(last.end(), crate::fxdata::DATA_BANK.size);

        // entries are packed back to back
        let mut ends = dir.iter().map(|(_, a)| (a.offset, a.end()));
        let (_, mut prev_end) = ends.next().unwrap();
        for (offset, end) in ends {
            assert_eq!(offset, prev_end);
            prev_end = end;
        }
    }

    #[test]
    fn test_bank_address() {
        let layout = BankLayout::new(0xfdb1, 147134);
        assert_eq!(layout.address(0x10), 0xfdb1 * 256 + 0x10);
    }
}
