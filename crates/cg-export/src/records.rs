use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cg_core::glyph::{binary_label, hex_label};
use cg_core::naming::{code_point_label, control_name, unicode_name};
use cg_core::{ByteCode, Glyph, RomMap, RomVariant};
use rayon::prelude::*;
use serde::Serialize;

use crate::csv::{format_csv, write_output};
use crate::grid::write_grid_csv;

/// Colonnes du CSV par ROM, dans l'ordre des champs de [`RomRecord`].
pub const RECORD_FIELDS: [&str; 7] = [
    "hex",
    "binary",
    "decimal",
    "rom_value",
    "ascii_value",
    "rom_unicode_name",
    "ascii_unicode_name",
];

/// One byte code of a ROM, beside the Latin-1 character of the same byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RomRecord {
    pub hex: String,
    pub binary: String,
    pub decimal: ByteCode,
    pub rom_value: String,
    pub ascii_value: String,
    pub rom_unicode_name: String,
    pub ascii_unicode_name: String,
}

impl RomRecord {
    fn fields(&self) -> Vec<String> {
        vec![
            self.hex.clone(),
            self.binary.clone(),
            self.decimal.to_string(),
            self.rom_value.clone(),
            self.ascii_value.clone(),
            self.rom_unicode_name.clone(),
            self.ascii_unicode_name.clone(),
        ]
    }
}

/// C0 et C1 : pas de glyphe Latin-1 imprimable.
fn is_latin1_control(code: ByteCode) -> bool {
    code < 0x20 || (0x7F..=0x9F).contains(&code)
}

/// Latin-1 value and name of a byte.
///
/// # Example
/// ```
/// use cg_export::records::latin1_value;
/// assert_eq!(latin1_value(0x41).0, "A");
/// assert_eq!(latin1_value(0x85).0, "CONTROL (U+0085)");
/// ```
#[must_use]
pub fn latin1_value(code: ByteCode) -> (String, String) {
    let c = char::from(code);
    if is_latin1_control(code) {
        (
            format!("CONTROL ({})", code_point_label(c)),
            control_name(u32::from(code)),
        )
    } else {
        (c.to_string(), unicode_name(c))
    }
}

#[must_use]
pub fn build_record(code: ByteCode, glyph: Glyph) -> RomRecord {
    let rom_unicode_name = match glyph {
        Glyph::Char(c) => unicode_name(c),
        sentinel => sentinel.marker(),
    };
    let (ascii_value, ascii_unicode_name) = latin1_value(code);
    RomRecord {
        hex: hex_label(code),
        binary: binary_label(code),
        decimal: code,
        rom_value: glyph.marker(),
        ascii_value,
        rom_unicode_name,
        ascii_unicode_name,
    }
}

/// The 256 records of a ROM, keyed by binary label (byte code order).
///
/// # Example
/// ```
/// use cg_core::{Glyph, RomMap};
/// use cg_export::build_records;
/// let mut map = RomMap::new();
/// map.set(0x41, Glyph::Char('A'));
/// let records = build_records(&map);
/// assert_eq!(records.len(), 256);
/// assert_eq!(records["0100_0001"].rom_value, "A");
/// assert_eq!(records["0100_0010"].rom_value, "UNDEFINED");
/// ```
#[must_use]
pub fn build_records(map: &RomMap) -> BTreeMap<String, RomRecord> {
    map.iter()
        .map(|(code, glyph)| (binary_label(code), build_record(code, glyph)))
        .collect()
}

/// Pretty JSON object of the records, non-ASCII characters verbatim.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn records_json(records: &BTreeMap<String, RomRecord>) -> Result<String> {
    serde_json::to_string_pretty(records).context("Sérialisation JSON des enregistrements")
}

#[must_use]
pub fn records_csv(records: &BTreeMap<String, RomRecord>) -> String {
    let rows: Vec<Vec<String>> = records.values().map(RomRecord::fields).collect();
    format_csv(&RECORD_FIELDS, &rows)
}

/// `rom_<X>_characters.json`, `rom_<X>_characters.csv` and `rom_<X>_grid.csv`.
#[must_use]
pub fn rom_file_paths(out_dir: &Path, variant: RomVariant) -> [PathBuf; 3] {
    let letter = variant.letter();
    [
        out_dir.join(format!("rom_{letter}_characters.json")),
        out_dir.join(format!("rom_{letter}_characters.csv")),
        out_dir.join(format!("rom_{letter}_grid.csv")),
    ]
}

/// Write the three files of one ROM. Returns the written paths.
///
/// # Errors
/// Returns an error if a file cannot be written.
pub fn write_rom_files(out_dir: &Path, variant: RomVariant, map: &RomMap) -> Result<Vec<PathBuf>> {
    log::info!("Processing ROM {variant}...");
    let [json_path, csv_path, grid_path] = rom_file_paths(out_dir, variant);
    let records = build_records(map);

    write_output(&json_path, &records_json(&records)?)?;
    write_output(&csv_path, &records_csv(&records))?;
    write_grid_csv(&grid_path, map)?;

    Ok(vec![json_path, csv_path, grid_path])
}

/// Write the files of every ROM; variants are independent and written in
/// parallel.
///
/// # Errors
/// Returns the first write error encountered.
pub fn export_roms(out_dir: &Path, maps: &BTreeMap<RomVariant, RomMap>) -> Result<Vec<PathBuf>> {
    let written: Vec<Vec<PathBuf>> = maps
        .par_iter()
        .map(|(&variant, map)| write_rom_files(out_dir, variant, map))
        .collect::<Result<_>>()?;
    Ok(written.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_ranges() {
        let nul = build_record(0x00, Glyph::Undefined);
        assert_eq!(nul.ascii_value, "CONTROL (U+0000)");
        assert_eq!(nul.ascii_unicode_name, "CONTROL CHARACTER (U+0000)");
        let del = build_record(0x7F, Glyph::Undefined);
        assert_eq!(del.ascii_value, "CONTROL (U+007F)");
        assert_eq!(del.ascii_unicode_name, "CONTROL CHARACTER (U+007F)");
        let nbsp = build_record(0xA0, Glyph::Undefined);
        assert_eq!(nbsp.ascii_value, "\u{A0}");
        assert_eq!(nbsp.ascii_unicode_name, "NO-BREAK SPACE");
    }

    #[test]
    fn sentinel_names() {
        let r = build_record(0x18, Glyph::Unmapped);
        assert_eq!(r.rom_value, "UNMAPPED");
        assert_eq!(r.rom_unicode_name, "UNMAPPED");
        let r = build_record(0x18, Glyph::Char('◇'));
        assert_eq!(r.rom_unicode_name, "WHITE DIAMOND");
    }

    #[test]
    fn record_labels() {
        let r = build_record(0x41, Glyph::Char('A'));
        assert_eq!(r.hex, "0x41");
        assert_eq!(r.binary, "0100_0001");
        assert_eq!(r.decimal, 65);
        assert_eq!(r.ascii_unicode_name, "LATIN CAPITAL LETTER A");
    }

    #[test]
    fn json_keys_in_code_order() {
        let records = build_records(&RomMap::new());
        let json = records_json(&records).unwrap();
        let first = json.find("\"0000_0000\"").unwrap();
        let last = json.find("\"1111_1111\"").unwrap();
        assert!(first < last);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 256);
        assert_eq!(value["0000_0001"]["decimal"], 1);
    }

    #[test]
    fn json_keeps_non_ascii() {
        let mut map = RomMap::new();
        map.set(0xC4, Glyph::Char('Ä'));
        let json = records_json(&build_records(&map)).unwrap();
        assert!(json.contains("\"rom_value\": \"Ä\""));
    }

    #[test]
    fn csv_has_header_and_256_rows() {
        let csv = records_csv(&build_records(&RomMap::new()));
        let lines: Vec<&str> = csv.trim_end().split("\r\n").collect();
        assert_eq!(lines.len(), 257);
        assert!(lines[0].ends_with("hex,binary,decimal,rom_value,ascii_value,rom_unicode_name,ascii_unicode_name"));
        // 0x2C est la virgule : champ entre guillemets
        assert!(lines[1 + 0x2C].contains("\",\""));
    }

    #[test]
    fn export_writes_every_variant() {
        let dir = tempfile::tempdir().unwrap();
        let maps = BTreeMap::from([(RomVariant::A, RomMap::new()), (RomVariant::C, RomMap::new())]);
        let written = export_roms(dir.path(), &maps).unwrap();
        assert_eq!(written.len(), 6);
        assert!(dir.path().join("rom_A_characters.json").exists());
        assert!(dir.path().join("rom_C_grid.csv").exists());
        assert!(!dir.path().join("rom_B_characters.csv").exists());
    }
}
