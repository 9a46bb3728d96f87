//! Manifest syntax tree

use crate::common::Span;
use mech::assets::BitmapFormat;

/// Parsed manifest
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    /// Assets in declaration order
    pub items: Vec<Item>,
    pub settings: Settings,
}

/// One asset statement
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub name_span: Span,
    pub kind: ItemKind,
    /// Payload path, relative to the manifest
    pub file: String,
    pub file_span: Span,
    /// Whole statement
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Bitmap {
        width: u16,
        height: u16,
        frames: u8,
        format: BitmapFormat,
    },
    Record,
}

impl Item {
    pub fn is_bitmap(&self) -> bool {
        matches!(self.kind, ItemKind::Bitmap { .. })
    }
}

/// A bank setting and where it was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting<T> {
    pub value: T,
    pub span: Span,
}

/// Bank settings; unset ones fall back to the packer config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub data_page: Option<Setting<u16>>,
    pub save_page: Option<Setting<u16>>,
    pub save_size: Option<Setting<u32>>,
}
