//! FX Packer - asset packer for the mech-fx flash banks
//!
//! Usage: fxpack [OPTIONS] <manifest>

use anyhow::Context;
use clap::Parser as ClapParser;
use env_logger::Env;
use fx_packer::{DiagnosticReporter, PackConfig, pack};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "fxpack")]
#[command(version)]
#[command(about = "Pack bitmaps and records into a mech-fx flash image", long_about = None)]
struct Args {
    /// Asset manifest (.fxm)
    #[arg(required = true)]
    manifest: PathBuf,

    /// Directory for fxdata.bin (defaults to the manifest's directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Where to write the Rust asset table (defaults to <out-dir>/fxdata.rs)
    #[arg(long)]
    rust_table: Option<PathBuf>,

    /// Flash page of the data bank (decimal or 0x hex)
    #[arg(long, value_parser = parse_page)]
    data_page: Option<u16>,

    /// Flash page of the save bank (decimal or 0x hex)
    #[arg(long, value_parser = parse_page)]
    save_page: Option<u16>,

    /// Save bank size in bytes, a multiple of 4096
    #[arg(long)]
    save_size: Option<u32>,

    /// Crate path used by the generated table
    #[arg(long, default_value = "mech")]
    crate_path: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_page(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid page '{}': {}", s, e))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }))
        .init();

    let source = fs::read_to_string(&args.manifest)
        .with_context(|| format!("cannot read manifest {}", args.manifest.display()))?;
    let filename = args.manifest.display().to_string();

    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    let manifest_dir = args.manifest.parent().unwrap_or_else(|| Path::new("."));
    let out_dir = args.out_dir.clone().unwrap_or_else(|| manifest_dir.to_path_buf());
    let image_path = out_dir.join("fxdata.bin");
    let table_path = args.rust_table.clone().unwrap_or_else(|| out_dir.join("fxdata.rs"));

    let config = PackConfig {
        data_page: args.data_page,
        save_page: args.save_page,
        save_size: args.save_size,
        crate_path: args.crate_path.clone(),
    };
    let source_name = args
        .manifest
        .file_name()
        .map_or_else(|| filename.clone(), |n| n.to_string_lossy().into_owned());

    log::debug!("packing {} -> {}", args.manifest.display(), image_path.display());
    let output = match pack(&source, &source_name, manifest_dir, &config) {
        Ok(output) => output,
        Err(e) => {
            reporter.report_error(file_id, &e);
            process::exit(1);
        }
    };

    output
        .write(&image_path, &table_path)
        .with_context(|| format!("cannot write outputs to {}", out_dir.display()))?;
    Ok(())
}
