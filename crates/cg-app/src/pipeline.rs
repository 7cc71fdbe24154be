use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cg_core::naming::unicode_name;
use cg_core::{BitmapMap, CharIndex, RomMap, RomVariant, ToolConfig};
use cg_export::{CharMapDocument, export_roms, write_char_map_csv, write_char_map_json};
use cg_fallback::{CharMap, Encoding, TextEncoder, UnmappedPolicy, build_char_map};
use cg_match::preview::render_raster;
use cg_match::{apply_overrides, cross_reference};
use cg_source::document::{load_all_bitmaps, load_tables};

/// Cartes finales de chaque variante présente, avec leurs rasters.
#[derive(Debug)]
pub struct Extraction {
    pub maps: BTreeMap<RomVariant, RomMap>,
    pub rasters: BTreeMap<RomVariant, BitmapMap>,
    /// Variants without a table section in the source.
    pub missing: Vec<RomVariant>,
}

impl Extraction {
    /// Reverse lookups of every present variant.
    #[must_use]
    pub fn char_indexes(&self) -> BTreeMap<RomVariant, CharIndex> {
        self.maps
            .iter()
            .map(|(&variant, map)| (variant, map.char_index()))
            .collect()
    }
}

/// Tables → rasters → cross-reference → manual overrides.
///
/// # Errors
/// Returns an error if the table source is unreadable or malformed, or if
/// an existing raster document cannot be read.
pub fn extract(config: &ToolConfig) -> Result<Extraction> {
    let tables = load_tables(&config.table_source)?;

    let variants: Vec<RomVariant> = tables.maps.keys().copied().collect();
    let rasters: BTreeMap<RomVariant, BitmapMap> = load_all_bitmaps(config, &variants)?
        .into_iter()
        .map(|(variant, report)| (variant, report.rasters))
        .collect();

    let crossed = cross_reference(&tables.maps, &rasters);
    let mut maps = crossed.maps;

    for (variant, table) in &config.overrides {
        if let Some(map) = maps.get_mut(variant) {
            let (merged, count) = apply_overrides(map, table);
            log::info!("ROM {variant}: applied {count} manual bitmap-identified mappings");
            *map = merged;
        }
    }

    Ok(Extraction {
        maps,
        rasters,
        missing: tables.missing,
    })
}

/// Texte de vérification : chaque correspondance manuelle et son raster.
#[must_use]
pub fn override_report(config: &ToolConfig, extraction: &Extraction) -> String {
    let mut out = String::new();
    for (variant, table) in &config.overrides {
        if !extraction.maps.contains_key(variant) {
            continue;
        }
        let _ = writeln!(out, "--- ROM {variant} Manual Mapping Verification ---");
        let rasters = extraction.rasters.get(variant);
        for (code, c) in table.iter() {
            let _ = writeln!(out, "\n0x{code:02X} -> '{c}' {}", unicode_name(c));
            match rasters.and_then(|r| r.get(&code)) {
                Some(raster) => {
                    let _ = writeln!(out, "{}", render_raster(raster));
                }
                None => out.push_str("  (no bitmap data)\n"),
            }
        }
        let _ = writeln!(out, "\n--- End Verification ---");
    }
    out
}

/// `extract`: write the record, CSV and grid files of every present variant.
///
/// # Errors
/// Returns an error if extraction or a write fails.
pub fn run_extract(config: &ToolConfig, verify_bitmaps: bool) -> Result<Vec<PathBuf>> {
    let extraction = extract(config)?;
    if verify_bitmaps {
        print!("{}", override_report(config, &extraction));
    }

    let written = export_roms(&config.output_dir, &extraction.maps)?;
    for (variant, map) in &extraction.maps {
        log::info!(
            "ROM {variant}: {} entries, UNMAPPED remaining: {}",
            map.iter().count(),
            map.unmapped_count()
        );
    }
    Ok(written)
}

/// `charmap`: coverage of the target alphabet, written as JSON and CSV.
///
/// # Errors
/// Returns an error if extraction or a write fails.
pub fn run_charmap(config: &ToolConfig) -> Result<CharMap> {
    let extraction = extract(config)?;
    let map = build_char_map(&config.alphabet, &extraction.char_indexes());

    let doc = CharMapDocument::new(&map, &config.report_description, chrono::Utc::now());
    let stem = &config.report_stem;
    write_char_map_json(&config.output_dir.join(format!("{stem}.json")), &doc)?;
    write_char_map_csv(&config.output_dir.join(format!("{stem}.csv")), &map)?;

    Ok(map)
}

/// Résumé lisible de la couverture.
#[must_use]
pub fn coverage_summary(map: &CharMap) -> String {
    let mut out = String::from("--- Summary ---\n");
    let _ = writeln!(out, "Total special characters: {}", map.total());
    for (variant, cov) in &map.coverage {
        let _ = writeln!(
            out,
            "  ROM {variant}: {} available, {} missing",
            cov.available, cov.missing
        );
    }
    match map.best_rom {
        Some(variant) => {
            let _ = writeln!(out, "  Best ROM: {}", variant.key());
        }
        None => out.push_str("  Best ROM: none\n"),
    }
    out
}

/// `encode`: text → byte codes of one variant.
///
/// # Errors
/// Returns an error if extraction fails or the variant is absent from the
/// source.
pub fn run_encode(
    config: &ToolConfig,
    variant: RomVariant,
    policy: UnmappedPolicy,
    custom: BTreeMap<char, char>,
    text: &str,
) -> Result<Encoding> {
    let extraction = extract(config)?;
    let index = extraction
        .maps
        .get(&variant)
        .map(RomMap::char_index)
        .with_context(|| format!("ROM {variant} absente de {}", config.table_source.display()))?;

    let encoding = TextEncoder::new(&index, policy)
        .with_custom(custom)
        .encode(text);
    for (status, count) in encoding.counts() {
        log::info!("{status:?}: {count}");
    }
    Ok(encoding)
}

/// Octets en hexadécimal séparés par des espaces.
#[must_use]
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_core::Glyph;
    use std::path::Path;

    fn row(cells: &[&str]) -> String {
        format!("{{ {} }}", cells.join(", "))
    }

    /// Tables A et B minimales ; C absente.
    fn write_fixture(dir: &Path) -> ToolConfig {
        let mut a_row0 = vec!["c_undef"; 16];
        a_row0[1] = "'\\u25C7'";
        a_row0[4] = "'@'";
        let mut a_row1 = vec!["c_undef"; 16];
        a_row1[1] = "c_unmap";
        a_row1[4] = "'A'";
        a_row1[6] = "'a'";
        a_row1[0xC] = "'Ä'";
        let mut b_row1 = vec!["c_undef"; 16];
        b_row1[1] = "c_unmap";
        b_row1[4] = "'A'";
        b_row1[0xA] = "c_unmap";
        let mut b_row3 = vec!["c_undef"; 16];
        b_row3[3] = "'?'";

        let source = format!(
            "class CGRom {{\n\
             CharacterMapRomA = new(\n\
             /* 0x_0 */ {},\n\
             /* 0x_1 */ {},\n\
             );\n\
             CharacterMapRomB = new(\n\
             /* 0x_1 */ {},\n\
             /* 0x_F */ {},\n\
             );\n}}\n",
            row(&a_row0),
            row(&a_row1),
            row(&b_row1),
            row(&b_row3),
        );
        std::fs::write(dir.join("CGRomCharacters.cs"), source).unwrap();

        // 0x10 (◇) de A et 0x11 de A et B partagent le même losange
        let diamond = "0b_00010,0b_00100,0b_01010,0b_10001,0b_10001,0b_11111,0b_10001,0b_10001";
        let bitmaps = format!(
            "// 0x10\nnew byte[8] {{\n{diamond}\n}},\n// 0x11\nnew byte[8] {{\n{diamond}\n}},\n"
        );
        std::fs::write(dir.join("CGRomBitmap.A.cs"), &bitmaps).unwrap();
        let bitmaps_b = format!("// 0x11\nnew byte[8] {{\n{diamond}\n}},\n");
        std::fs::write(dir.join("CGRomBitmap.B.cs"), bitmaps_b).unwrap();

        let mut overrides = BTreeMap::new();
        overrides.insert(RomVariant::B, [(0xA1, 'Ą'), (0x11, 'x')].into_iter().collect());
        ToolConfig {
            table_source: dir.join("CGRomCharacters.cs"),
            bitmap_dir: dir.to_path_buf(),
            output_dir: dir.join("out"),
            overrides,
            ..ToolConfig::default()
        }
    }

    #[test]
    fn extraction_resolves_and_merges() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path());
        let extraction = extract(&config).unwrap();

        assert_eq!(extraction.missing, vec![RomVariant::C]);
        let a = &extraction.maps[&RomVariant::A];
        let b = &extraction.maps[&RomVariant::B];
        assert_eq!(a.get(0x41), Glyph::Char('A'));
        assert_eq!(a.get(0x10), Glyph::Char('◇'));
        // recoupement avant la table manuelle
        assert_eq!(a.get(0x11), Glyph::Char('◇'));
        assert_eq!(b.get(0x11), Glyph::Char('◇'));
        assert_eq!(b.get(0xA1), Glyph::Char('Ą'));
        assert_eq!(b.unmapped_count(), 0);
    }

    #[test]
    fn extract_writes_present_variants() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path());
        let written = run_extract(&config, false).unwrap();
        assert_eq!(written.len(), 6);
        assert!(config.output_dir.join("rom_B_grid.csv").exists());
        assert!(!config.output_dir.join("rom_C_characters.json").exists());
    }

    #[test]
    fn charmap_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path());
        let map = run_charmap(&config).unwrap();
        assert_eq!(map.best_rom, Some(RomVariant::A));
        assert!(map.coverage.contains_key(&RomVariant::B));
        assert!(!map.coverage.contains_key(&RomVariant::C));
        assert!(config.output_dir.join("baltic_char_map.json").exists());
        assert!(config.output_dir.join("baltic_char_map.csv").exists());
        assert!(coverage_summary(&map).contains("Best ROM: rom_a"));
    }

    #[test]
    fn verification_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path());
        let extraction = extract(&config).unwrap();
        let text = override_report(&config, &extraction);
        assert!(text.contains("0xA1 -> 'Ą' LATIN CAPITAL LETTER A WITH OGONEK\n  (no bitmap data)"));
        assert!(text.contains("0x11 -> 'x' LATIN SMALL LETTER X\n...#.\n..#..\n.#.#."));
    }

    #[test]
    fn encode_with_fallback_and_replace() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path());
        let auto = run_encode(&config, RomVariant::A, UnmappedPolicy::Auto, BTreeMap::new(), "Āa").unwrap();
        assert_eq!(auto.bytes, vec![0x41, 0x61]);

        let replaced = run_encode(&config, RomVariant::B, UnmappedPolicy::Replace, BTreeMap::new(), "ŽA").unwrap();
        assert_eq!(replaced.bytes, vec![0x3F, 0x41]);

        assert!(run_encode(&config, RomVariant::C, UnmappedPolicy::Auto, BTreeMap::new(), "A").is_err());
    }

    #[test]
    fn hex_output() {
        assert_eq!(hex_bytes(&[0x41, 0x0A, 0xFF]), "41 0A FF");
        assert_eq!(hex_bytes(&[]), "");
    }
}
