//! 1-bit frame buffer and streamed bitmap drawing
//!
//! The screen is 128×64 monochrome. The buffer is page-major like the
//! display controller's RAM: byte `page * WIDTH + x` holds the 8 vertical
//! pixels `page * 8 ..= page * 8 + 7` of column `x`, least significant bit
//! on top. Bitmaps in flash use the same vertical byte order, so drawing is
//! a matter of streaming one page row at a time through a staging buffer
//! and shifting it into place.

use crate::assets::{AssetRef, BitmapFormat};
use crate::stream::{AssetStream, FlashDevice, StreamError};

/// Screen width in pixels
pub const WIDTH: usize = 128;
/// Screen height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;
/// Staging buffer size, one display row of bytes
pub const STAGING_LEN: usize = WIDTH;

/// Physical display
pub trait Display {
    /// Push a finished frame to the panel
    fn commit(&mut self, frame: &FrameBuffer);
}

/// How bitmap pixels combine with the buffer
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DrawMode {
    /// Bitmap rows replace the buffer, black and white alike
    #[default]
    Overwrite,
    /// Only white pixels are drawn
    Or,
    /// The stored mask selects which pixels are drawn
    ///
    /// Plain bitmaps have no mask and draw as [`DrawMode::Overwrite`].
    Masked,
}

/// The RAM copy of the screen
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameBuffer {
    bytes: [u8; WIDTH * PAGES],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; WIDTH * PAGES],
        }
    }

    /// Set every pixel to black
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read one pixel; out-of-range reads are black
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if !(0..WIDTH as i32).contains(&x) || !(0..HEIGHT as i32).contains(&y) {
            return false;
        }
        let byte = self.bytes[(y as usize / 8) * WIDTH + x as usize];
        byte & (1 << (y % 8)) != 0
    }

    /// Write one pixel; out-of-range writes are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if !(0..WIDTH as i32).contains(&x) || !(0..HEIGHT as i32).contains(&y) {
            return;
        }
        let byte = &mut self.bytes[(y as usize / 8) * WIDTH + x as usize];
        if on {
            *byte |= 1 << (y % 8);
        } else {
            *byte &= !(1 << (y % 8));
        }
    }

    /// Whether any pixel is lit
    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Blend one vertical byte whose top pixel lands on row `top`
    ///
    /// Bits set in `cover` are cleared first, then `image` is ORed in.
    fn blend_column(&mut self, x: usize, top: i32, image: u8, cover: u8) {
        let page = top.div_euclid(8);
        let shift = top.rem_euclid(8) as u32;
        let image = u16::from(image) << shift;
        let cover = u16::from(cover) << shift;

        let halves = [
            (page, image as u8, cover as u8),
            (page + 1, (image >> 8) as u8, (cover >> 8) as u8),
        ];
        for (page, image, cover) in halves {
            if (0..PAGES as i32).contains(&page) {
                let byte = &mut self.bytes[page as usize * WIDTH + x];
                *byte = (*byte & !cover) | image;
            }
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Bits of `page` that belong to a bitmap `height` pixels tall
#[inline]
fn page_rows(height: u16, page: u32) -> u8 {
    let rows = u32::from(height).saturating_sub(page * 8);
    if rows >= 8 { 0xFF } else { (1u8 << rows) - 1 }
}

/// Streams bitmaps from flash into a [`FrameBuffer`]
pub struct Blitter {
    staging: [u8; STAGING_LEN],
}

impl Blitter {
    pub const fn new() -> Self {
        Self {
            staging: [0; STAGING_LEN],
        }
    }

    /// Zero the staging buffer
    pub fn clear(&mut self) {
        self.staging.fill(0);
    }

    /// Draw `frame` of `asset` with its top-left corner at `(x, y)`
    ///
    /// Pixels outside the screen are clipped. On error the bitmap may be
    /// partly drawn, but nothing outside its own rectangle is touched.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bitmap<F: FlashDevice>(
        &mut self,
        target: &mut FrameBuffer,
        stream: &mut AssetStream<F>,
        x: i16,
        y: i16,
        asset: &AssetRef,
        frame: u8,
        mode: DrawMode,
    ) -> Result<(), StreamError> {
        if frame >= asset.frames {
            return Err(StreamError::AssetNotFound {
                bank: asset.bank,
                offset: asset.frame_offset(frame),
                len: asset.frame_len(),
            });
        }

        let mut handle = stream.open_read(asset.bank, asset.frame_offset(frame), asset.frame_len())?;

        let per_column = asset.format.bytes_per_column() as usize;
        let columns_per_chunk = STAGING_LEN / per_column;
        let width = usize::from(asset.width);
        let (x, y) = (i32::from(x), i32::from(y));

        for page in 0..asset.pages() {
            let top = y + page as i32 * 8;
            if top >= HEIGHT as i32 || top + 8 <= 0 {
                handle.skip(asset.row_len())?;
                continue;
            }
            let rows = page_rows(asset.height, page);

            let mut column = 0;
            while column < width {
                let count = columns_per_chunk.min(width - column);
                let chunk = &mut self.staging[..count * per_column];
                handle.read(chunk)?;

                for i in 0..count {
                    let sx = x + (column + i) as i32;
                    if !(0..WIDTH as i32).contains(&sx) {
                        continue;
                    }
                    let (image, cover) = match (asset.format, mode) {
                        (_, DrawMode::Or) => (chunk[i * per_column] & rows, 0),
                        (BitmapFormat::Masked, DrawMode::Masked) => {
                            let mask = chunk[i * 2 + 1] & rows;
                            (chunk[i * 2] & mask, mask)
                        }
                        _ => (chunk[i * per_column] & rows, rows),
                    };
                    target.blend_column(sx as usize, top, image, cover);
                }
                column += count;
            }
        }

        handle.close();
        Ok(())
    }
}

impl Default for Blitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::assets::Bank;
    use crate::stream::tests::MemFlash;
    use pretty_assertions::assert_eq;

    /// Bank bytes for one bitmap at offset 0
    pub fn bitmap_bank(width: u16, height: u16, payload: &[u8]) -> Vec<u8> {
        let mut bank = Vec::new();
        bank.extend_from_slice(&width.to_be_bytes());
        bank.extend_from_slice(&height.to_be_bytes());
        bank.extend_from_slice(payload);
        bank
    }

    fn draw(flash: MemFlash, x: i16, y: i16, asset: &AssetRef, mode: DrawMode) -> (FrameBuffer, Result<(), StreamError>) {
        let mut fb = FrameBuffer::new();
        let mut stream = AssetStream::new(flash);
        let result = Blitter::new().draw_bitmap(&mut fb, &mut stream, x, y, asset, 0, mode);
        (fb, result)
    }

    #[test]
    fn test_plain_aligned() {
        let asset = AssetRef::bitmap(0, 2, 8, BitmapFormat::Plain);
        let flash = MemFlash::new(bitmap_bank(2, 8, &[0b0000_0001, 0b1000_0000]), 0);
        let (fb, result) = draw(flash, 3, 8, &asset, DrawMode::Overwrite);
        result.unwrap();
        assert!(fb.pixel(3, 8));
        assert!(fb.pixel(4, 15));
        assert!(!fb.pixel(3, 9));
        assert_eq!(fb.as_bytes().iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn test_unaligned_spans_two_pages() {
        let asset = AssetRef::bitmap(0, 1, 8, BitmapFormat::Plain);
        let flash = MemFlash::new(bitmap_bank(1, 8, &[0xFF]), 0);
        let (fb, result) = draw(flash, 0, 5, &asset, DrawMode::Or);
        result.unwrap();
        for y in 0..16 {
            assert_eq!(fb.pixel(0, y), (5..13).contains(&y), "row {y}");
        }
    }

    #[test]
    fn test_masked_keeps_background() {
        // one column: image top pixel, mask top two pixels
        let asset = AssetRef::bitmap(0, 1, 8, BitmapFormat::Masked);
        let flash = MemFlash::new(bitmap_bank(1, 8, &[0b01, 0b11]), 0);
        let mut fb = FrameBuffer::new();
        for y in 0..8 {
            fb.set_pixel(0, y, true);
        }
        let mut stream = AssetStream::new(flash);
        Blitter::new()
            .draw_bitmap(&mut fb, &mut stream, 0, 0, &asset, 0, DrawMode::Masked)
            .unwrap();
        assert!(fb.pixel(0, 0));
        assert!(!fb.pixel(0, 1));
        assert!((2..8).all(|y| fb.pixel(0, y)));
    }

    #[test]
    fn test_short_bitmap_leaves_rows_below() {
        let asset = AssetRef::bitmap(0, 1, 3, BitmapFormat::Plain);
        let flash = MemFlash::new(bitmap_bank(1, 3, &[0x00]), 0);
        let mut fb = FrameBuffer::new();
        fb.set_pixel(0, 5, true);
        let mut stream = AssetStream::new(flash);
        Blitter::new()
            .draw_bitmap(&mut fb, &mut stream, 0, 0, &asset, 0, DrawMode::Overwrite)
            .unwrap();
        assert!(fb.pixel(0, 5));
    }

    #[test]
    fn test_clipping() {
        let asset = AssetRef::bitmap(0, 4, 16, BitmapFormat::Plain);
        let flash = MemFlash::new(bitmap_bank(4, 16, &[0xFF; 8]), 0);
        let (fb, result) = draw(flash, 126, -8, &asset, DrawMode::Or);
        result.unwrap();
        assert!(fb.pixel(126, 0));
        assert!(fb.pixel(127, 7));
        assert!(!fb.pixel(127, 8));
        assert!(!fb.pixel(0, 0));
    }

    #[test]
    fn test_truncated_draw_stays_in_rect() {
        // payload is one byte short of the declared 2x16 bitmap
        let asset = AssetRef::bitmap(0, 2, 16, BitmapFormat::Plain);
        let mut flash = MemFlash::new(bitmap_bank(2, 16, &[0xFF; 4]), 0);
        flash.short_after = Some(7);
        let (fb, result) = draw(flash, 10, 0, &asset, DrawMode::Or);
        assert!(matches!(result, Err(StreamError::Truncated { .. })));
        // first page row made it, nothing outside columns 10..12
        assert!(fb.pixel(10, 0));
        for x in (0..WIDTH as i32).filter(|x| !(10..12).contains(x)) {
            assert!((0..HEIGHT as i32).all(|y| !fb.pixel(x, y)));
        }
    }

    #[test]
    fn test_sheet_frame_selection() {
        let asset = AssetRef::sheet(0, 1, 8, 2, BitmapFormat::Plain);
        let flash = MemFlash::new(bitmap_bank(1, 8, &[0x01, 0x80]), 0);
        let mut fb = FrameBuffer::new();
        let mut stream = AssetStream::new(flash);
        let mut blitter = Blitter::new();
        blitter
            .draw_bitmap(&mut fb, &mut stream, 0, 0, &asset, 1, DrawMode::Or)
            .unwrap();
        assert!(fb.pixel(0, 7));
        assert!(!fb.pixel(0, 0));
        assert!(matches!(
            blitter.draw_bitmap(&mut fb, &mut stream, 0, 0, &asset, 2, DrawMode::Or),
            Err(StreamError::AssetNotFound { bank: Bank::Data, .. })
        ));
    }
}
