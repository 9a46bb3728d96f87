//! Flash image writer
//!
//! The image starts at the first data bank page and runs to the end of the
//! save bank. The data bank is padded with erased bytes up to the save
//! bank's page, so the file can be written to the chip at
//! `data_page * 256` in one go.

use crate::layout::{ERASED, Layout};

/// Data bank, padding, then save bank
pub fn flash_image(layout: &Layout) -> Vec<u8> {
    let data_start = layout.data_bank().address(0) as usize;
    let save_start = layout.save_bank().address(0) as usize;
    let gap_end = save_start - data_start;

    let mut image = Vec::with_capacity(gap_end + layout.save().len());
    image.extend_from_slice(layout.data());
    image.resize(gap_end, ERASED);
    image.extend_from_slice(layout.save());
    image
}
