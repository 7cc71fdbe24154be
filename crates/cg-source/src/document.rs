use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use cg_core::{RomVariant, ToolConfig};
use rayon::prelude::*;

use crate::bitmap::{BitmapReport, read_bitmaps};
use crate::table::{TableSet, assemble_tables};

/// Read and assemble the ROM tables of a source file.
///
/// # Errors
/// Returns an error if the file cannot be read or a table row is malformed.
///
/// # Example
/// ```no_run
/// use cg_source::document::load_tables;
/// use std::path::Path;
/// let set = load_tables(Path::new("data/CGRomCharacters.cs")).unwrap();
/// ```
pub fn load_tables(path: &Path) -> Result<TableSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    assemble_tables(&text).with_context(|| format!("Table invalide dans {}", path.display()))
}

/// Read one raster document. A missing file is not an error: it yields
/// `None` and a warning.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_bitmaps(path: &Path) -> Result<Option<BitmapReport>> {
    if !path.exists() {
        log::warn!("Bitmaps introuvables : {}", path.display());
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let report = read_bitmaps(&text);
    log::info!(
        "Parsed {} bitmap entries from {}",
        report.rasters.len(),
        path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned()
        )
    );
    Ok(Some(report))
}

/// Raster documents of the given variants, located through the configuration.
///
/// Les documents sont indépendants : lecture en parallèle.
///
/// # Errors
/// Returns an error if an existing raster file cannot be read.
pub fn load_all_bitmaps(
    config: &ToolConfig,
    variants: &[RomVariant],
) -> Result<BTreeMap<RomVariant, BitmapReport>> {
    let loaded: Vec<(RomVariant, Option<BitmapReport>)> = variants
        .par_iter()
        .map(|&variant| load_bitmaps(&config.bitmap_path(variant)).map(|r| (variant, r)))
        .collect::<Result<_>>()?;
    Ok(loaded
        .into_iter()
        .filter_map(|(variant, report)| report.map(|r| (variant, r)))
        .collect())
}
