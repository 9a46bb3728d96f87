//! Rust asset table writer
//!
//! Emits one constant per entry, named after the manifest entry in upper
//! case, plus the bank layouts, the by-name `ASSETS` slice and a
//! `directory()` constructor for `mech::assets::AssetDirectory`.

use crate::layout::Layout;
use mech::assets::{AssetRef, BitmapFormat, RecordRef};
use std::fmt;

/// How the table refers to its surroundings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Manifest file name, quoted in the header
    pub source_name: String,
    /// Path of the crate that defines `assets` (`crate` inside `mech`)
    pub crate_path: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            source_name: "mech.fxm".to_string(),
            crate_path: "mech".to_string(),
        }
    }
}

fn format_name(format: BitmapFormat) -> &'static str {
    match format {
        BitmapFormat::Plain => "BitmapFormat::Plain",
        BitmapFormat::Masked => "BitmapFormat::Masked",
    }
}

fn bitmap_expr(asset: &AssetRef) -> String {
    if asset.frames == 1 {
        format!(
            "AssetRef::bitmap(0x{:06X}, {}, {}, {})",
            asset.offset,
            asset.width,
            asset.height,
            format_name(asset.format)
        )
    } else {
        format!(
            "AssetRef::sheet(0x{:06X}, {}, {}, {}, {})",
            asset.offset,
            asset.width,
            asset.height,
            asset.frames,
            format_name(asset.format)
        )
    }
}

fn record_expr(record: &RecordRef) -> String {
    format!("RecordRef::data(0x{:06X}, {})", record.offset, record.len)
}

/// Display adapter that writes the table source
pub struct Table<'a> {
    layout: &'a Layout,
    config: &'a TableConfig,
}

impl<'a> Table<'a> {
    pub fn new(layout: &'a Layout, config: &'a TableConfig) -> Self {
        Self { layout, config }
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let records: Vec<_> = self.layout.records().collect();
        let bitmaps: Vec<_> = self.layout.bitmaps().collect();

        let mut imports = vec!["AssetDirectory", "AssetRef", "BankLayout"];
        if !bitmaps.is_empty() {
            imports.push("BitmapFormat");
        }
        if !records.is_empty() {
            imports.push("RecordRef");
        }

        writeln!(f, "//! Asset table for the shipped data bank")?;
        writeln!(f, "//!")?;
        writeln!(
            f,
            "//! Generated by `fxpack` from `{}`. Do not edit by hand;",
            self.config.source_name
        )?;
        writeln!(f, "//! re-run the packer instead.")?;
        writeln!(f)?;
        writeln!(f, "use {}::assets::{{{}}};", self.config.crate_path, imports.join(", "))?;
        writeln!(f)?;

        let data = self.layout.data_bank();
        let save = self.layout.save_bank();
        writeln!(f, "/// Read-only asset bank")?;
        writeln!(
            f,
            "pub const DATA_BANK: BankLayout = BankLayout::new({:#06x}, {});",
            data.page, data.size
        )?;
        writeln!(f)?;
        writeln!(f, "/// Read/write save bank")?;
        writeln!(
            f,
            "pub const SAVE_BANK: BankLayout = BankLayout::new({:#06x}, {});",
            save.page, save.size
        )?;
        writeln!(f)?;

        if !records.is_empty() {
            for (name, record) in &records {
                writeln!(f, "pub const {}: RecordRef = {};", name.to_uppercase(), record_expr(record))?;
            }
            writeln!(f)?;
        }

        if !bitmaps.is_empty() {
            for (name, asset) in &bitmaps {
                writeln!(f, "pub const {}: AssetRef = {};", name.to_uppercase(), bitmap_expr(asset))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "/// Every bitmap by name, in bank order")?;
        writeln!(f, "pub const ASSETS: &[(&str, AssetRef)] = &[")?;
        for (name, _) in &bitmaps {
            writeln!(f, "    (\"{}\", {}),", name, name.to_uppercase())?;
        }
        writeln!(f, "];")?;
        writeln!(f)?;
        writeln!(f, "/// Directory over the shipped banks")?;
        writeln!(f, "pub const fn directory() -> AssetDirectory {{")?;
        writeln!(f, "    AssetDirectory::new(DATA_BANK, SAVE_BANK, ASSETS)")?;
        writeln!(f, "}}")
    }
}

/// Render the table source
pub fn render_table(layout: &Layout, config: &TableConfig) -> String {
    Table::new(layout, config).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BankSettings;
    use crate::layout::tests::sized_payload;
    use crate::manifest::{ItemKind, parse};
    use mech::fxdata;
    use pretty_assertions::assert_eq;

    const SHIPPED_MANIFEST: &str = include_str!("../../../../assets/mech.fxm");
    const SHIPPED_TABLE: &str = include_str!("../../../mech/src/fxdata.rs");

    #[test]
    fn test_regenerates_shipped_table() {
        let records = [
            ("player_mothra_stats", fxdata::PLAYER_MOTHRA_STATS),
            ("player_battle_cat_stats", fxdata::PLAYER_BATTLE_CAT_STATS),
            ("player_thor_hammer_stats", fxdata::PLAYER_THOR_HAMMER_STATS),
            ("available_weapons", fxdata::AVAILABLE_WEAPONS),
            ("main_menu_items", fxdata::MAIN_MENU_ITEMS),
            ("save_load_menu_items", fxdata::SAVE_LOAD_MENU_ITEMS),
            ("mission_menu_items", fxdata::MISSION_MENU_ITEMS),
            ("hanger_menu_items", fxdata::HANGER_MENU_ITEMS),
            ("customization_menu_items", fxdata::CUSTOMIZATION_MENU_ITEMS),
        ];
        let manifest = parse(SHIPPED_MANIFEST).unwrap();
        let settings = BankSettings {
            data_page: manifest.settings.data_page.map(|s| s.value),
            save_page: manifest.settings.save_page.map(|s| s.value),
            save_size: manifest.settings.save_size.map_or(4096, |s| s.value),
        };
        let layout = Layout::build(&manifest, &settings, |item| {
            let len = match item.kind {
                ItemKind::Record => records
                    .iter()
                    .find(|(name, _)| *name == item.name)
                    .map_or(0, |(_, r)| r.len as usize),
                ItemKind::Bitmap { .. } => 0,
            };
            sized_payload(item, len)
        })
        .unwrap();

        let config = TableConfig {
            source_name: "mech.fxm".to_string(),
            crate_path: "crate".to_string(),
        };
        assert_eq!(render_table(&layout, &config), SHIPPED_TABLE);
    }

    #[test]
    fn test_small_table() {
        let manifest = parse("bitmap boom 23 23 frames 7 masked \"b.bin\"\n").unwrap();
        let layout = Layout::build(&manifest, &BankSettings::default(), |item| sized_payload(item, 0)).unwrap();
        let table = render_table(&layout, &TableConfig::default());

        assert!(table.contains("use mech::assets::{AssetDirectory, AssetRef, BankLayout, BitmapFormat};"));
        assert!(table.contains("pub const BOOM: AssetRef = AssetRef::sheet(0x000000, 23, 23, 7, BitmapFormat::Masked);"));
        assert!(table.contains("    (\"boom\", BOOM),"));
        assert!(!table.contains("RecordRef"));
    }
}
