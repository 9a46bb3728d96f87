//! Asset manifest front end
//!
//! A manifest lists what goes into the flash banks, one statement per line:
//!
//! ```text
//! # banks
//! save 4096
//! data_page 0xfdb1
//!
//! record main_menu_items "records/main_menu_items.bin"
//! bitmap mech_6x8 6 8 masked "bitmaps/mech_6x8.bin"
//! bitmap explosion_23x23 23 23 frames 7 masked "bitmaps/explosion_23x23.bin"
//! ```
//!
//! Statements are placed in the data bank in the order they are written.

mod ast;
mod parser;
mod scanner;
mod token;

pub use ast::{Item, ItemKind, Manifest, Setting, Settings};
pub use parser::Parser;
pub use scanner::Lexer;
pub use token::{Token, TokenKind};

use crate::common::PackResult;

/// Parse manifest source text
pub fn parse(source: &str) -> PackResult<Manifest> {
    Parser::new(source)?.parse()
}
