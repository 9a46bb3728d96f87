//! Manifest to output pipeline

use crate::common::{PackError, PackResult};
use crate::emit::{TableConfig, flash_image, render_table};
use crate::layout::{BankSettings, Layout, SAVE_ALIGN};
use crate::manifest::{self, Manifest};
use std::fs;
use std::path::Path;

/// Packer options; bank settings given here win over the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    pub data_page: Option<u16>,
    pub save_page: Option<u16>,
    pub save_size: Option<u32>,
    /// Crate path used in the generated table's `use` line
    pub crate_path: String,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            data_page: None,
            save_page: None,
            save_size: None,
            crate_path: "mech".to_string(),
        }
    }
}

impl PackConfig {
    /// Merge with the manifest's own settings
    pub fn bank_settings(&self, manifest: &Manifest) -> BankSettings {
        let settings = &manifest.settings;
        BankSettings {
            data_page: self.data_page.or(settings.data_page.map(|s| s.value)),
            save_page: self.save_page.or(settings.save_page.map(|s| s.value)),
            save_size: self
                .save_size
                .or(settings.save_size.map(|s| s.value))
                .unwrap_or(SAVE_ALIGN),
        }
    }
}

/// Everything the packer produces
#[derive(Debug)]
pub struct PackOutput {
    pub layout: Layout,
    /// Contents of `fxdata.bin`
    pub image: Vec<u8>,
    /// Contents of `fxdata.rs`
    pub table: String,
}

impl PackOutput {
    /// Write the image and the table
    pub fn write(&self, image_path: &Path, table_path: &Path) -> PackResult<()> {
        for path in [image_path, table_path] {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(image_path, &self.image)?;
        fs::write(table_path, &self.table)?;
        log::info!(
            "wrote {} ({} bytes) and {}",
            image_path.display(),
            self.image.len(),
            table_path.display()
        );
        Ok(())
    }
}

/// Pack a manifest; payload paths are relative to `base_dir`
pub fn pack(source: &str, source_name: &str, base_dir: &Path, config: &PackConfig) -> PackResult<PackOutput> {
    let manifest = manifest::parse(source)?;
    log::debug!("{}: {} items", source_name, manifest.items.len());

    let settings = config.bank_settings(&manifest);
    let layout = Layout::build(&manifest, &settings, |item| {
        let path = base_dir.join(&item.file);
        fs::read(&path).map_err(|e| PackError::asset(format!("cannot read '{}': {}", path.display(), e), item.file_span))
    })?;

    let table_config = TableConfig {
        source_name: source_name.to_string(),
        crate_path: config.crate_path.clone(),
    };
    let image = flash_image(&layout);
    let table = render_table(&layout, &table_config);
    Ok(PackOutput { layout, image, table })
}

/// Read a manifest file and pack it
pub fn pack_file(path: &Path, config: &PackConfig) -> PackResult<PackOutput> {
    let source = fs::read_to_string(path)?;
    let name = path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    pack(&source, &name, base_dir, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Span;
    use mech::assets::{AssetRef, BitmapFormat};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const MANIFEST: &str = "\
# test banks
save 8192
record stats \"stats.bin\"
bitmap dot 2 8 masked \"art/dot.bin\"
";

    fn project() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("game.fxm"), MANIFEST).unwrap();
        fs::write(dir.path().join("stats.bin"), [1, 2, 3, 4, 5, 6]).unwrap();
        fs::create_dir(dir.path().join("art")).unwrap();
        fs::write(dir.path().join("art/dot.bin"), [0xFF, 0xFF, 0x01, 0x03]).unwrap();
        dir
    }

    #[test]
    fn test_pack_file() {
        let dir = project();
        let output = pack_file(&dir.path().join("game.fxm"), &PackConfig::default()).unwrap();

        let dot = output.layout.bitmaps().next().unwrap().1;
        assert_eq!(dot, AssetRef::bitmap(6, 2, 8, BitmapFormat::Masked));
        assert_eq!(output.layout.save_bank().size, 8192);
        assert_eq!(output.layout.save_bank().page, 0xffe0);
        assert_eq!(output.image.len(), 256 + 8192);
        assert_eq!(&output.image[..14], &[1, 2, 3, 4, 5, 6, 0, 2, 0, 8, 0xFF, 0xFF, 0x01, 0x03]);
        assert!(output.table.contains("Generated by `fxpack` from `game.fxm`"));
        assert!(output.table.contains("pub const DOT: AssetRef = AssetRef::bitmap(0x000006, 2, 8, BitmapFormat::Masked);"));
    }

    #[test]
    fn test_config_overrides_manifest() {
        let dir = project();
        let config = PackConfig {
            save_size: Some(4096),
            data_page: Some(0xff00),
            ..PackConfig::default()
        };
        let output = pack_file(&dir.path().join("game.fxm"), &config).unwrap();
        assert_eq!(output.layout.save_bank().size, 4096);
        assert_eq!(output.layout.data_bank().page, 0xff00);
        // image spans from the data bank to the end of the save bank
        assert_eq!(output.image.len(), (0xfff0 - 0xff00) * 256 + 4096);
    }

    #[test]
    fn test_missing_payload_points_at_path() {
        let dir = project();
        fs::remove_file(dir.path().join("art/dot.bin")).unwrap();
        let err = pack_file(&dir.path().join("game.fxm"), &PackConfig::default()).unwrap_err();
        let start = MANIFEST.find("\"art/dot.bin\"").unwrap();
        assert_eq!(err.span(), Some(Span::new(start, start + 13)));
    }

    #[test]
    fn test_write_outputs() {
        let dir = project();
        let output = pack_file(&dir.path().join("game.fxm"), &PackConfig::default()).unwrap();
        let image_path = dir.path().join("out/fxdata.bin");
        let table_path = dir.path().join("out/src/fxdata.rs");
        output.write(&image_path, &table_path).unwrap();

        assert_eq!(fs::read(&image_path).unwrap(), output.image);
        assert_eq!(fs::read_to_string(&table_path).unwrap(), output.table);
    }
}
