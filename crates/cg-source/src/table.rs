use std::collections::BTreeMap;
use std::sync::OnceLock;

use cg_core::glyph::code_at;
use cg_core::{RomMap, RomVariant};
use regex::Regex;

use crate::error::ExtractError;
use crate::tokenizer::tokenize_row;

/// Début de section : `CharacterMapRomA =` etc.
const SECTION_PATTERN: &str = r"CharacterMapRom([ABC])\s*=";

/// Rangée de données : `new[] /* 0x_4 */ { ... }`.
const ROW_PATTERN: &str = r"^.*?/\*\s*0x_([0-9A-Fa-f])\s*\*/\s*\{(.*)\}";

static SECTION_REGEX: OnceLock<Regex> = OnceLock::new();
static ROW_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn section_regex() -> &'static Regex {
    SECTION_REGEX.get_or_init(|| Regex::new(SECTION_PATTERN).expect("invalid regex pattern"))
}

#[allow(clippy::expect_used)]
fn row_regex() -> &'static Regex {
    ROW_REGEX.get_or_init(|| Regex::new(ROW_PATTERN).expect("invalid regex pattern"))
}

/// Maps assembled from one table document.
///
/// A variant whose section is absent has no map and is listed in `missing`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableSet {
    pub maps: BTreeMap<RomVariant, RomMap>,
    pub missing: Vec<RomVariant>,
}

/// Locate the `CharacterMapRom<X>` sections of a document.
///
/// A section runs from its declaration line up to and including the first
/// line starting with `);`. A repeated declaration replaces the earlier one.
#[must_use]
pub fn find_sections(document: &str) -> BTreeMap<RomVariant, Vec<&str>> {
    let section_re = section_regex();
    let lines: Vec<&str> = document.lines().collect();
    let mut sections = BTreeMap::new();

    let mut i = 0;
    while i < lines.len() {
        if let Some(caps) = section_re.captures(lines[i]) {
            let variant = match &caps[1] {
                "A" => RomVariant::A,
                "B" => RomVariant::B,
                _ => RomVariant::C,
            };
            let mut section = Vec::new();
            while i < lines.len() {
                section.push(lines[i]);
                if lines[i].trim_start().starts_with(");") {
                    break;
                }
                i += 1;
            }
            sections.insert(variant, section);
        }
        i += 1;
    }

    sections
}

/// Assemble the 256-entry map of one section.
///
/// Token `i` of the row tagged `0x_r` lands at byte code `(i << 4) | r`.
/// Lines that are not data rows are ignored; a repeated row index overwrites
/// the earlier row.
///
/// # Errors
/// Propagates the first tokenizer error.
///
/// # Example
/// ```
/// use cg_core::Glyph;
/// use cg_source::table::assemble_rom_map;
/// let line = r"new[] /* 0x_1 */ { c_undef, c_undef, c_undef, '1', 'A', 'Q', 'a', 'q', c_undef, c_undef, c_undef, c_undef, c_undef, c_undef, c_undef, c_undef },";
/// let map = assemble_rom_map([line]).unwrap();
/// assert_eq!(map.get(0x41), Glyph::Char('A'));
/// assert_eq!(map.get(0x42), Glyph::Undefined);
/// ```
pub fn assemble_rom_map<'a, I>(lines: I) -> Result<RomMap, ExtractError>
where
    I: IntoIterator<Item = &'a str>,
{
    let row_re = row_regex();
    let mut map = RomMap::new();

    for line in lines {
        let Some(caps) = row_re.captures(line) else {
            continue;
        };
        let Some(row) = caps[1].chars().next().and_then(|c| c.to_digit(16)) else {
            continue;
        };
        let row = row as u8;
        let glyphs = tokenize_row(&caps[2], row)?;
        for (column, glyph) in (0u8..).zip(glyphs) {
            map.set(code_at(column, row), glyph);
        }
    }

    Ok(map)
}

/// Extract every ROM table of a document.
///
/// # Errors
/// Any tokenizer error aborts the whole document; the error names the ROM
/// section and the row.
pub fn assemble_tables(document: &str) -> Result<TableSet, ExtractError> {
    let mut sections = find_sections(document);
    let mut set = TableSet::default();

    for variant in RomVariant::ALL {
        let Some(lines) = sections.remove(&variant) else {
            log::warn!("ROM {variant} introuvable dans la source");
            set.missing.push(variant);
            continue;
        };
        let map = assemble_rom_map(lines).map_err(|e| e.in_section(variant))?;
        log::debug!(
            "ROM {variant} : {} entrées UNMAPPED après extraction",
            map.unmapped_count()
        );
        set.maps.insert(variant, map);
    }

    Ok(set)
}
