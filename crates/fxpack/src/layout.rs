//! Bank layout
//!
//! Entries are placed back to back in the data bank in manifest order.
//! Bitmaps get their 4-byte width/height header written in front of the
//! payload; records are copied as they are. The save bank follows at a
//! 4 KiB boundary, erased to `0xFF` apart from a blank save record at its
//! start.

use crate::common::{PackError, PackResult, Span};
use crate::manifest::{Item, ItemKind, Manifest};
use mech::assets::{AssetRef, BankLayout, MAX_OFFSET, PAGE_SIZE, RecordRef};
use mech::save::{SAVE_RECORD_LEN, SaveRecord};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Flash pages addressable with a 16-bit page number
pub const FLASH_PAGES: u32 = 0x1_0000;

/// Save bank alignment (one erase block)
pub const SAVE_ALIGN: u32 = 4096;

/// Value of erased flash
pub const ERASED: u8 = 0xFF;

/// Where the banks go; `None` places them at the top of the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankSettings {
    pub data_page: Option<u16>,
    pub save_page: Option<u16>,
    pub save_size: u32,
}

impl Default for BankSettings {
    fn default() -> Self {
        Self {
            data_page: None,
            save_page: None,
            save_size: SAVE_ALIGN,
        }
    }
}

/// What an entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Bitmap(AssetRef),
    Record(RecordRef),
}

/// One placed manifest item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub name: DefaultSymbol,
    pub kind: EntryKind,
    /// Name in the manifest
    pub span: Span,
}

impl Entry {
    pub fn offset(&self) -> u32 {
        match self.kind {
            EntryKind::Bitmap(asset) => asset.offset,
            EntryKind::Record(record) => record.offset,
        }
    }

    /// One past the last byte
    pub fn end(&self) -> u32 {
        match self.kind {
            EntryKind::Bitmap(asset) => asset.end(),
            EntryKind::Record(record) => record.offset + record.len,
        }
    }
}

/// Laid-out data and save banks
#[derive(Debug)]
pub struct Layout {
    names: DefaultStringInterner,
    entries: Vec<Entry>,
    data: Vec<u8>,
    save: Vec<u8>,
    data_bank: BankLayout,
    save_bank: BankLayout,
}

impl Layout {
    /// Place every manifest item, reading payloads through `load`
    pub fn build<L>(manifest: &Manifest, settings: &BankSettings, mut load: L) -> PackResult<Self>
    where
        L: FnMut(&Item) -> PackResult<Vec<u8>>,
    {
        let mut names = DefaultStringInterner::default();
        let mut entries: Vec<Entry> = Vec::with_capacity(manifest.items.len());
        let mut data = Vec::new();

        for item in &manifest.items {
            if let Some(symbol) = names.get(&item.name) {
                let first = entries
                    .iter()
                    .find(|e| e.name == symbol)
                    .map_or(item.name_span, |e| e.span);
                return Err(PackError::duplicate(&item.name, item.name_span, first));
            }
            let name = names.get_or_intern(&item.name);

            let offset = data.len() as u32;
            if offset > MAX_OFFSET {
                return Err(PackError::asset(
                    format!("offset {:#x} does not fit in 24 bits", offset),
                    item.name_span,
                ));
            }
            let payload = load(item)?;

            let kind = match item.kind {
                ItemKind::Bitmap {
                    width,
                    height,
                    frames,
                    format,
                } => {
                    let asset = AssetRef::sheet(offset, width, height, frames, format);
                    let Some(expected) = asset.checked_payload_len() else {
                        return Err(PackError::asset(
                            format!("bitmap is too large: {}x{} with {} frame(s)", width, height, frames),
                            item.name_span,
                        ));
                    };
                    let expected = expected as usize;
                    if payload.len() != expected {
                        return Err(PackError::asset(
                            format!(
                                "payload is {} bytes, a {}x{} {:?} bitmap with {} frame(s) needs {}",
                                payload.len(),
                                width,
                                height,
                                format,
                                frames,
                                expected
                            ),
                            item.file_span,
                        ));
                    }
                    data.extend_from_slice(&width.to_be_bytes());
                    data.extend_from_slice(&height.to_be_bytes());
                    EntryKind::Bitmap(asset)
                }
                ItemKind::Record => {
                    if payload.is_empty() {
                        return Err(PackError::asset("record payload is empty", item.file_span));
                    }
                    EntryKind::Record(RecordRef::data(offset, payload.len() as u32))
                }
            };
            data.extend_from_slice(&payload);

            log::debug!("{:#08x} {} ({} bytes)", offset, item.name, data.len() as u32 - offset);
            entries.push(Entry {
                name,
                kind,
                span: item.name_span,
            });
        }

        let (data_bank, save_bank) = place_banks(data.len() as u32, settings)?;

        let mut save = vec![ERASED; settings.save_size as usize];
        save[..SAVE_RECORD_LEN].copy_from_slice(&SaveRecord::blank().encode());

        let layout = Self {
            names,
            entries,
            data,
            save,
            data_bank,
            save_bank,
        };
        layout.verify()?;

        log::info!(
            "{} entries, data bank {} bytes at page {:#06x}, save bank {} bytes at page {:#06x}",
            layout.entries.len(),
            data_bank.size,
            data_bank.page,
            save_bank.size,
            save_bank.page
        );
        Ok(layout)
    }

    /// Check that entries are disjoint, inside the data bank and 24-bit
    pub fn verify(&self) -> PackResult<()> {
        let mut placed: Vec<&Entry> = self.entries.iter().collect();
        placed.sort_by_key(|e| e.offset());

        for pair in placed.windows(2) {
            if pair[1].offset() < pair[0].end() {
                return Err(PackError::layout(format!(
                    "'{}' at {:#08x} overlaps '{}' ending at {:#08x}",
                    self.name(pair[1]),
                    pair[1].offset(),
                    self.name(pair[0]),
                    pair[0].end()
                )));
            }
        }
        for entry in &placed {
            if entry.offset() > MAX_OFFSET {
                return Err(PackError::layout(format!(
                    "'{}' offset {:#x} does not fit in 24 bits",
                    self.name(entry),
                    entry.offset()
                )));
            }
            if entry.end() > self.data_bank.size {
                return Err(PackError::layout(format!(
                    "'{}' ends at {:#08x}, past the data bank size {:#08x}",
                    self.name(entry),
                    entry.end(),
                    self.data_bank.size
                )));
            }
        }
        Ok(())
    }

    pub fn name(&self, entry: &Entry) -> &str {
        self.names.resolve(entry.name).unwrap_or("?")
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry by manifest name
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        let symbol = self.names.get(name)?;
        self.entries.iter().find(|e| e.name == symbol)
    }

    /// Bitmaps in bank order
    pub fn bitmaps(&self) -> impl Iterator<Item = (&str, AssetRef)> + '_ {
        self.entries.iter().filter_map(|e| match e.kind {
            EntryKind::Bitmap(asset) => Some((self.name(e), asset)),
            EntryKind::Record(_) => None,
        })
    }

    /// Records in bank order
    pub fn records(&self) -> impl Iterator<Item = (&str, RecordRef)> + '_ {
        self.entries.iter().filter_map(|e| match e.kind {
            EntryKind::Record(record) => Some((self.name(e), record)),
            EntryKind::Bitmap(_) => None,
        })
    }

    /// Data bank contents, unpadded
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn save(&self) -> &[u8] {
        &self.save
    }

    pub fn data_bank(&self) -> BankLayout {
        self.data_bank
    }

    pub fn save_bank(&self) -> BankLayout {
        self.save_bank
    }
}

/// Choose bank pages: save bank at the top of the chip, data right below it
fn place_banks(data_size: u32, settings: &BankSettings) -> PackResult<(BankLayout, BankLayout)> {
    let save_size = settings.save_size;
    if save_size == 0 || save_size % SAVE_ALIGN != 0 {
        return Err(PackError::layout(format!(
            "save size {} is not a multiple of {}",
            save_size, SAVE_ALIGN
        )));
    }
    let save_pages = save_size / PAGE_SIZE;
    let data_pages = data_size.div_ceil(PAGE_SIZE);

    let save_page = match settings.save_page {
        Some(page) => u32::from(page),
        None => FLASH_PAGES.saturating_sub(save_pages),
    };
    if save_page * PAGE_SIZE % SAVE_ALIGN != 0 {
        return Err(PackError::layout(format!(
            "save page {:#06x} is not on a {} byte boundary",
            save_page, SAVE_ALIGN
        )));
    }
    if save_page + save_pages > FLASH_PAGES {
        return Err(PackError::layout(format!(
            "save bank at page {:#06x} runs past the end of flash",
            save_page
        )));
    }

    let data_page = match settings.data_page {
        Some(page) => u32::from(page),
        None => save_page.checked_sub(data_pages).ok_or_else(|| {
            PackError::layout(format!("{} data pages do not fit below the save bank", data_pages))
        })?,
    };
    if data_page + data_pages > save_page {
        return Err(PackError::layout(format!(
            "data bank pages {:#06x}..{:#06x} overlap the save bank at {:#06x}",
            data_page,
            data_page + data_pages,
            save_page
        )));
    }

    Ok((
        BankLayout::new(data_page as u16, data_size),
        BankLayout::new(save_page as u16, save_size),
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::manifest::parse;
    use mech::assets::BitmapFormat;
    use pretty_assertions::assert_eq;

    /// Payload of the right size for bitmaps, `len` bytes for records
    pub fn sized_payload(item: &Item, record_len: usize) -> PackResult<Vec<u8>> {
        Ok(match item.kind {
            ItemKind::Bitmap {
                width,
                height,
                frames,
                format,
            } => vec![0xA5; AssetRef::sheet(0, width, height, frames, format).payload_len() as usize],
            ItemKind::Record => vec![0x11; record_len],
        })
    }

    fn build(source: &str) -> PackResult<Layout> {
        let manifest = parse(source)?;
        Layout::build(&manifest, &BankSettings::default(), |item| sized_payload(item, 6))
    }

    #[test]
    fn test_sequential_offsets() {
        let layout = build(
            "record stats \"s.bin\"\nbitmap arrow 7 13 masked \"a.bin\"\nbitmap label 20 6 \"l.bin\"\n",
        )
        .unwrap();
        let offsets: Vec<_> = layout.entries().iter().map(|e| (e.offset(), e.end())).collect();
        assert_eq!(offsets, [(0, 6), (6, 38), (38, 62)]);
        assert_eq!(layout.data_bank().size, 62);
        assert_eq!(&layout.data()[6..10], &[0, 7, 0, 13]);
        assert_eq!(layout.entry("label").map(Entry::offset), Some(38));
        assert!(layout.entry("missing").is_none());

        let (name, arrow) = layout.bitmaps().next().unwrap();
        assert_eq!(name, "arrow");
        assert_eq!(arrow, AssetRef::bitmap(6, 7, 13, BitmapFormat::Masked));
    }

    #[test]
    fn test_default_pages() {
        let layout = build("bitmap screen 128 64 masked \"s.bin\"\n").unwrap();
        // 4 + 2048 bytes is 9 pages, directly under the save bank
        assert_eq!(layout.save_bank(), BankLayout::new(0xfff0, 4096));
        assert_eq!(layout.data_bank().page, 0xfff0 - 9);
    }

    #[test]
    fn test_shipped_pages() {
        // data bank the size of the shipped one lands on the shipped pages
        let (data, save) = place_banks(147134, &BankSettings::default()).unwrap();
        assert_eq!(data, mech::fxdata::DATA_BANK);
        assert_eq!(save, mech::fxdata::SAVE_BANK);
    }

    #[test]
    fn test_save_bank_seeded() {
        let layout = build("record stats \"s.bin\"\n").unwrap();
        let mut head = [0u8; SAVE_RECORD_LEN];
        head.copy_from_slice(&layout.save()[..SAVE_RECORD_LEN]);
        assert_eq!(SaveRecord::decode(&head), Ok(SaveRecord::blank()));
        assert!(layout.save()[SAVE_RECORD_LEN..].iter().all(|&b| b == ERASED));
    }

    #[test]
    fn test_duplicate_name() {
        let err = build("record a \"a.bin\"\nrecord a \"b.bin\"\n").unwrap_err();
        match err {
            PackError::Duplicate { name, span, first } => {
                assert_eq!(name, "a");
                assert_eq!(first, Span::new(7, 8));
                assert_eq!(span, Span::new(24, 25));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_payload_size_mismatch() {
        let manifest = parse("bitmap arrow 7 13 masked \"a.bin\"\n").unwrap();
        let err = Layout::build(&manifest, &BankSettings::default(), |_| Ok(vec![0; 27])).unwrap_err();
        match err {
            PackError::Asset { message, span } => {
                assert_eq!(span, manifest.items[0].file_span);
                assert!(message.contains("needs 28"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bitmap_size_overflow() {
        let manifest = parse("bitmap huge 32768 65535 frames 8 masked \"h.bin\"\n").unwrap();
        let err = Layout::build(&manifest, &BankSettings::default(), |_| Ok(Vec::new())).unwrap_err();
        match err {
            PackError::Asset { message, span } => {
                assert_eq!(span, Span::new(7, 11));
                assert!(message.starts_with("bitmap is too large"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_overlap_rejected() {
        let mut names = DefaultStringInterner::default();
        let a = names.get_or_intern("a");
        let b = names.get_or_intern("b");
        let layout = Layout {
            names,
            entries: vec![
                Entry {
                    name: a,
                    kind: EntryKind::Record(RecordRef::data(0, 10)),
                    span: Span::default(),
                },
                Entry {
                    name: b,
                    kind: EntryKind::Record(RecordRef::data(8, 4)),
                    span: Span::default(),
                },
            ],
            data: vec![0; 12],
            save: Vec::new(),
            data_bank: BankLayout::new(0xfff0 - 1, 12),
            save_bank: BankLayout::new(0xfff0, 4096),
        };
        let err = layout.verify().unwrap_err();
        assert!(err.to_string().contains("'b' at 0x000008 overlaps 'a'"), "{err}");
    }

    #[test]
    fn test_oversize_rejected() {
        // more data than fits under a save bank placed low on the chip
        let settings = BankSettings {
            save_page: Some(0x0010),
            ..BankSettings::default()
        };
        assert!(place_banks(0x2000, &settings).is_err());
        assert!(place_banks(0x1000, &settings).is_ok());

        let settings = BankSettings {
            data_page: Some(0xffe0),
            ..BankSettings::default()
        };
        let err = place_banks(0x1100, &settings).unwrap_err();
        assert!(err.to_string().contains("overlap the save bank"), "{err}");
    }

    #[test]
    fn test_save_size_alignment() {
        let settings = BankSettings {
            save_size: 1000,
            ..BankSettings::default()
        };
        assert!(place_banks(0, &settings).is_err());
    }
}
