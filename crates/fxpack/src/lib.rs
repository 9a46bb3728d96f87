//! FX Packer - asset packer for the mech-fx flash banks
//!
//! Turns a manifest of bitmaps and data records into the two artefacts the
//! game needs: a flash image (`fxdata.bin`) holding the read-only data bank
//! followed by the save bank, and a Rust asset table (`fxdata.rs`) naming
//! every entry's offset in that image.
//!
//! ## Architecture
//!
//! - **Manifest** (`manifest/`): lexer, parser and syntax tree for `.fxm` files
//! - **Layout** (`layout`): payload checks, bank placement and verification
//! - **Emit** (`emit/`): flash image and table writers
//! - **Common** (`common/`): errors, spans and diagnostics
//! - **Pack** (`pack`): manifest to output pipeline used by the CLI

pub mod common;
pub mod emit;
pub mod layout;
pub mod manifest;
pub mod pack;

// Re-exports for convenience
pub use common::{DiagnosticReporter, PackError, PackResult, Span};
pub use layout::{BankSettings, Layout};
pub use pack::{PackConfig, PackOutput, pack, pack_file};
