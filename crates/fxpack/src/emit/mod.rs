//! Output writers
//!
//! - [`image`]: the flash image (`fxdata.bin`)
//! - [`table`]: the Rust asset table (`fxdata.rs`)

pub mod image;
pub mod table;

pub use image::flash_image;
pub use table::{TableConfig, render_table};
