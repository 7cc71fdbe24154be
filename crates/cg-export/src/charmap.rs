use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use cg_core::glyph::hex_label;
use cg_core::RomVariant;
use cg_fallback::{CharMap, FallbackEntry};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::csv::{format_csv, write_output};

/// Colonnes du CSV de couverture.
pub const CHAR_MAP_FIELDS: [&str; 8] = [
    "character",
    "unicode",
    "name",
    "languages",
    "rom_a_byte",
    "rom_b_byte",
    "rom_c_byte",
    "fallback",
];

#[derive(Clone, Debug, Serialize)]
pub struct Metadata {
    pub generated: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RomAvailability {
    pub available: bool,
    pub byte_code: Option<String>,
    pub fallbacks: Vec<char>,
}

impl From<&FallbackEntry> for RomAvailability {
    fn from(entry: &FallbackEntry) -> Self {
        Self {
            available: entry.available,
            byte_code: entry.code.map(hex_label),
            fallbacks: entry.fallbacks.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CharacterRecord {
    pub unicode: String,
    pub name: String,
    pub languages: Vec<String>,
    /// `rom_a`, `rom_b`, `rom_c` for the variants present.
    #[serde(flatten)]
    pub roms: BTreeMap<String, RomAvailability>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct CoverageRecord {
    pub available: usize,
    pub missing: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub total_special_chars: usize,
    /// `rom_<x>_coverage` for the variants present.
    #[serde(flatten)]
    pub coverage: BTreeMap<String, CoverageRecord>,
    pub best_rom: Option<String>,
}

/// JSON document of the character-map report.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
/// use cg_core::TargetAlphabet;
/// use cg_export::CharMapDocument;
/// use cg_fallback::build_char_map;
///
/// let map = build_char_map(&TargetAlphabet::baltic(), &BTreeMap::new());
/// let doc = CharMapDocument::new(&map, "Baltic", chrono::Utc::now());
/// assert_eq!(doc.summary.total_special_chars, map.total());
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct CharMapDocument {
    pub metadata: Metadata,
    /// Keyed by the character itself, in code point order.
    pub characters: BTreeMap<String, CharacterRecord>,
    pub summary: Summary,
}

impl CharMapDocument {
    #[must_use]
    pub fn new(map: &CharMap, description: &str, generated: DateTime<Utc>) -> Self {
        let characters = map
            .entries
            .iter()
            .map(|entry| {
                let roms = entry
                    .roms
                    .iter()
                    .map(|(variant, fb)| (variant.key(), RomAvailability::from(fb)))
                    .collect();
                (
                    entry.character.to_string(),
                    CharacterRecord {
                        unicode: entry.unicode.clone(),
                        name: entry.name.clone(),
                        languages: entry.languages.clone(),
                        roms,
                    },
                )
            })
            .collect();

        let coverage = map
            .coverage
            .iter()
            .map(|(variant, cov)| {
                (
                    format!("{}_coverage", variant.key()),
                    CoverageRecord {
                        available: cov.available,
                        missing: cov.missing,
                    },
                )
            })
            .collect();

        Self {
            metadata: Metadata {
                generated: generated.to_rfc3339_opts(SecondsFormat::Micros, false),
                description: description.to_string(),
            },
            characters,
            summary: Summary {
                total_special_chars: map.total(),
                coverage,
                best_rom: map.best_rom.map(RomVariant::key),
            },
        }
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Sérialisation JSON du rapport")
    }
}

/// Rows of the coverage CSV, one per character in code point order.
///
/// Byte columns stay empty for absent characters and absent variants.
#[must_use]
pub fn char_map_rows(map: &CharMap) -> Vec<Vec<String>> {
    map.entries
        .iter()
        .map(|entry| {
            let byte = |variant| {
                entry
                    .roms
                    .get(&variant)
                    .and_then(|fb| fb.code)
                    .map(hex_label)
                    .unwrap_or_default()
            };
            let fallback: Vec<String> = entry
                .merged_fallbacks()
                .into_iter()
                .map(String::from)
                .collect();
            vec![
                entry.character.to_string(),
                entry.unicode.clone(),
                entry.name.clone(),
                entry.languages.join("; "),
                byte(RomVariant::A),
                byte(RomVariant::B),
                byte(RomVariant::C),
                fallback.join(", "),
            ]
        })
        .collect()
}

/// Write `<stem>.json`.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_char_map_json(path: &Path, doc: &CharMapDocument) -> Result<()> {
    write_output(path, &doc.to_json_pretty()?)
}

/// Write `<stem>.csv`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_char_map_csv(path: &Path, map: &CharMap) -> Result<()> {
    write_output(path, &format_csv(&CHAR_MAP_FIELDS, &char_map_rows(map)))
}
