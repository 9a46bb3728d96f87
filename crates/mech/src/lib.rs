//! # Mech - frame-driven mech combat core
//!
//! The device side of a first-person mech game for a 128×64 monochrome
//! handheld with an external flash chip. Every bitmap lives in flash and is
//! streamed into the frame buffer on demand; only the asset table is kept
//! in program memory.
//!
//! ## Features
//!
//! - **Assets**: bank layouts, bitmap directory and the generated table
//! - **Stream**: forward-only flash reads, one at a time
//! - **Display**: page-major 1-bit frame buffer with masked bitmap blits
//! - **State**: menu, mech setup, gameplay and game over
//! - **Driver**: fixed 30 fps loop with bounded retries on a busy chip
//! - **Save**: checksummed, versioned record in the save bank
//!
//! ## Quick Start
//!
//! The board code supplies a clock, the buttons, the panel and the flash
//! chip; the driver does the rest.
//!
//! ```no_run
//! use mech::prelude::*;
//!
//! struct Board;
//!
//! impl Clock for Board {
//!     fn now_ms(&self) -> u32 { 0 }
//!     fn idle(&mut self) {}
//! }
//!
//! impl ButtonSource for Board {
//!     fn poll(&mut self) -> Buttons { Buttons::NONE }
//! }
//!
//! impl Display for Board {
//!     fn commit(&mut self, _frame: &FrameBuffer) {}
//! }
//!
//! # struct Chip;
//! # impl FlashDevice for Chip {
//! #     fn bank_size(&self, _bank: Bank) -> u32 { 0 }
//! #     fn is_busy(&self) -> bool { false }
//! #     fn read(&mut self, _bank: Bank, _addr: u32, _buf: &mut [u8]) -> usize { 0 }
//! #     fn write(&mut self, _bank: Bank, _addr: u32, _data: &[u8]) -> Result<(), StreamError> { Ok(()) }
//! # }
//! let mut driver = FrameDriver::new(
//!     DriverConfig::default(),
//!     mech::fxdata::directory(),
//!     Board,
//!     Board,
//!     Board,
//!     Chip,
//!     MechTable::STOCK,
//! )
//! .unwrap();
//! driver.run();
//! ```
//!
//! ## Modules
//!
//! - [`assets`] - Bank layout and asset directory
//! - [`fxdata`] - Generated table for the shipped data bank
//! - [`stream`] - Flash reads
//! - [`display`] - Frame buffer and bitmap drawing
//! - [`entity`] - Player, enemies and mech stats
//! - [`input`] - Button edges
//! - [`state`] - Game states
//! - [`driver`] - Frame loop
//! - [`save`] - Persisted progress
//! - [`types`] - Fixed-point and angle types

#![cfg_attr(not(test), no_std)]

pub mod assets;
pub mod display;
pub mod driver;
pub mod entity;
pub mod fxdata;
pub mod input;
pub mod save;
pub mod state;
pub mod stream;
pub mod types;

/// Convenient re-exports for common usage
///
/// ```
/// use mech::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assets::{AssetDirectory, AssetRef, Bank, BitmapFormat};
    pub use crate::display::{Display, DrawMode, FrameBuffer};
    pub use crate::driver::{Clock, DriverConfig, FrameDriver, FrameReport};
    pub use crate::entity::{MechClass, MechTable, Player};
    pub use crate::input::{Button, ButtonSource, Buttons, InputState};
    pub use crate::state::{DrawRequest, GameState};
    pub use crate::stream::{AssetStream, FlashDevice, StreamError};
    pub use crate::types::*;
}

/// Crate version information
pub mod version {
    /// Major version number
    pub const MAJOR: u8 = 0;
    /// Minor version number
    pub const MINOR: u8 = 1;
    /// Patch version number
    pub const PATCH: u8 = 0;
    /// Version as string
    pub const STRING: &str = "0.1.0";
}
