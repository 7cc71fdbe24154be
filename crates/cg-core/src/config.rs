use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::charset::TargetAlphabet;
use crate::error::CoreError;
use crate::glyph::{ByteCode, RomVariant};
use crate::overrides::OverrideTable;

/// Motif par défaut des fichiers de bitmaps ; `{rom}` reçoit la lettre.
pub const DEFAULT_BITMAP_PATTERN: &str = "CGRomBitmap.{rom}.cs";

/// Configuration complète de l'outil.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use cg_core::config::ToolConfig;
/// use cg_core::RomVariant;
/// let config = ToolConfig::default();
/// assert_eq!(config.report_stem, "baltic_char_map");
/// assert!(config.overrides.contains_key(&RomVariant::B));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolConfig {
    // === Entrées ===
    /// C# source holding the `CharacterMapRomA/B/C` tables.
    pub table_source: PathBuf,
    /// Directory holding the per-variant raster documents.
    pub bitmap_dir: PathBuf,
    /// File name pattern of a raster document; `{rom}` is the variant letter.
    pub bitmap_pattern: String,

    // === Sorties ===
    /// Directory receiving every generated file.
    pub output_dir: PathBuf,
    /// File stem of the character-map report (`<stem>.json`, `<stem>.csv`).
    pub report_stem: String,
    /// Free-text description stored in the report metadata.
    pub report_description: String,

    // === Données ===
    /// Characters the report checks for.
    pub alphabet: TargetAlphabet,
    /// Manual overrides, per variant.
    pub overrides: BTreeMap<RomVariant, OverrideTable>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        let mut overrides = BTreeMap::new();
        overrides.insert(RomVariant::B, OverrideTable::rom_b());
        Self {
            table_source: PathBuf::from("data/CGRomCharacters.cs"),
            bitmap_dir: PathBuf::from("data/cgrom-bitmap"),
            bitmap_pattern: DEFAULT_BITMAP_PATTERN.to_string(),
            output_dir: PathBuf::from("out"),
            report_stem: "baltic_char_map".to_string(),
            report_description: "Baltic language character availability in US2066 ROMs"
                .to_string(),
            alphabet: TargetAlphabet::baltic(),
            overrides,
        }
    }
}

impl ToolConfig {
    /// Path of the raster document for `variant`.
    ///
    /// # Example
    /// ```
    /// use cg_core::config::ToolConfig;
    /// use cg_core::RomVariant;
    /// let config = ToolConfig::default();
    /// let path = config.bitmap_path(RomVariant::C);
    /// assert!(path.ends_with("CGRomBitmap.C.cs"));
    /// ```
    #[must_use]
    pub fn bitmap_path(&self, variant: RomVariant) -> PathBuf {
        let name = self
            .bitmap_pattern
            .replace("{rom}", &variant.letter().to_string());
        self.bitmap_dir.join(name)
    }

    /// Override table for `variant`, empty when none is configured.
    #[must_use]
    pub fn overrides_for(&self, variant: RomVariant) -> OverrideTable {
        self.overrides.get(&variant).cloned().unwrap_or_default()
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    paths: Option<PathsSection>,
    report: Option<ReportSection>,
    alphabets: Option<BTreeMap<String, String>>,
    overrides: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

/// Paths section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct PathsSection {
    table_source: Option<PathBuf>,
    bitmap_dir: Option<PathBuf>,
    bitmap_pattern: Option<String>,
    output_dir: Option<PathBuf>,
}

/// Report section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct ReportSection {
    stem: Option<String>,
    description: Option<String>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if an override
/// entry is not a byte code mapped to a single character.
///
/// # Example
/// ```no_run
/// use cg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ToolConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it over [`ToolConfig::default`].
///
/// # Errors
/// Returns an error on invalid TOML or invalid override entries.
pub fn parse_config(content: &str) -> Result<ToolConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = ToolConfig::default();

    if let Some(p) = file.paths {
        if let Some(v) = p.table_source {
            config.table_source = v;
        }
        if let Some(v) = p.bitmap_dir {
            config.bitmap_dir = v;
        }
        if let Some(v) = p.bitmap_pattern {
            config.bitmap_pattern = v;
        }
        if let Some(v) = p.output_dir {
            config.output_dir = v;
        }
    }

    if let Some(r) = file.report {
        if let Some(v) = r.stem {
            config.report_stem = v;
        }
        if let Some(v) = r.description {
            config.report_description = v;
        }
    }

    if let Some(a) = file.alphabets {
        config.alphabet = TargetAlphabet::new(a.into_iter().collect());
    }

    if let Some(o) = file.overrides {
        for (label, entries) in o {
            let variant: RomVariant = label.parse()?;
            let table = parse_override_table(&entries)?;
            log::debug!("Overrides ROM {variant} : {} entrées", table.len());
            config.overrides.insert(variant, table);
        }
    }

    Ok(config)
}

fn parse_override_table(entries: &BTreeMap<String, String>) -> Result<OverrideTable, CoreError> {
    entries
        .iter()
        .map(|(key, value)| Ok((parse_byte_code(key)?, parse_single_char(value)?)))
        .collect()
}

/// Accepts `0x18`, `0X18` or decimal `24`.
fn parse_byte_code(key: &str) -> Result<ByteCode, CoreError> {
    let key = key.trim();
    let parsed = match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => ByteCode::from_str_radix(hex, 16),
        None => key.parse::<ByteCode>(),
    };
    parsed.map_err(|_| CoreError::Config(format!("code d'octet invalide : {key:?}")))
}

fn parse_single_char(value: &str) -> Result<char, CoreError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CoreError::Config(format!(
            "un seul caractère attendu, trouvé {value:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn partial_paths_override() {
        let config = parse_config(
            r#"
            [paths]
            output_dir = "build/rom"
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("build/rom"));
        assert_eq!(config.table_source, ToolConfig::default().table_source);
    }

    #[test]
    fn overrides_replace_variant_table() {
        let config = parse_config(
            r#"
            [overrides.C]
            "0x18" = "◇"
            "25" = "‖"
            "#,
        )
        .unwrap();
        let c = config.overrides_for(RomVariant::C);
        assert_eq!(c.get(0x18), Some('◇'));
        assert_eq!(c.get(0x19), Some('‖'));
        assert_eq!(config.overrides_for(RomVariant::B), OverrideTable::rom_b());
        assert!(config.overrides_for(RomVariant::A).is_empty());
    }

    #[test]
    fn bad_override_entries_are_rejected() {
        assert!(parse_config("[overrides.B]\n\"0x1FF\" = \"x\"\n").is_err());
        assert!(parse_config("[overrides.B]\n\"0x10\" = \"xy\"\n").is_err());
        assert!(parse_config("[overrides.Z]\n\"0x10\" = \"x\"\n").is_err());
    }

    #[test]
    fn alphabets_section_replaces_default() {
        let config = parse_config("[alphabets]\nPolish = \"ĄąĆć\"\n").unwrap();
        assert_eq!(
            config.alphabet,
            TargetAlphabet::new(vec![("Polish".into(), "ĄąĆć".into())])
        );
    }

    #[test]
    fn shipped_default_matches_builtin() {
        let config = parse_config(include_str!("../../../config/default.toml")).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cgrom.toml");
        std::fs::write(&path, "[report]\nstem = \"polish_char_map\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.report_stem, "polish_char_map");
    }
}
