use std::collections::BTreeMap;

use cg_core::naming::{code_point_label, unicode_name};
use cg_core::{CharIndex, RomVariant, TargetAlphabet};

use crate::resolver::{FallbackEntry, resolve};

/// One target character and its availability in every present variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharEntry {
    pub character: char,
    /// `U+XXXX`.
    pub unicode: String,
    pub name: String,
    /// Alphabets the character belongs to.
    pub languages: Vec<String>,
    pub roms: BTreeMap<RomVariant, FallbackEntry>,
}

impl CharEntry {
    /// Fallbacks of every variant, without duplicates, in variant order.
    #[must_use]
    pub fn merged_fallbacks(&self) -> Vec<char> {
        let mut all = Vec::new();
        for entry in self.roms.values() {
            for &c in &entry.fallbacks {
                if !all.contains(&c) {
                    all.push(c);
                }
            }
        }
        all
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    pub available: usize,
    pub missing: usize,
}

/// Coverage of a target alphabet by each ROM variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharMap {
    /// Ordered by code point.
    pub entries: Vec<CharEntry>,
    pub coverage: BTreeMap<RomVariant, Coverage>,
    /// Variant with the most available characters; earliest on ties.
    pub best_rom: Option<RomVariant>,
}

impl CharMap {
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

/// Resolve every character of the alphabet against every present variant.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
/// use cg_core::{CharIndex, RomVariant, TargetAlphabet};
/// use cg_fallback::build_char_map;
///
/// let alphabet = TargetAlphabet::new(vec![("Estonian".into(), "Õõ".into())]);
/// let a: CharIndex = [('Õ', 0xD5)].into_iter().collect();
/// let map = build_char_map(&alphabet, &BTreeMap::from([(RomVariant::A, a)]));
/// assert_eq!(map.total(), 2);
/// assert_eq!(map.coverage[&RomVariant::A].available, 1);
/// assert_eq!(map.best_rom, Some(RomVariant::A));
/// ```
#[must_use]
pub fn build_char_map(
    alphabet: &TargetAlphabet,
    indexes: &BTreeMap<RomVariant, CharIndex>,
) -> CharMap {
    let entries: Vec<CharEntry> = alphabet
        .unique_chars()
        .into_iter()
        .map(|(character, languages)| CharEntry {
            character,
            unicode: code_point_label(character),
            name: unicode_name(character),
            languages,
            roms: indexes
                .iter()
                .map(|(&variant, index)| (variant, resolve(character, index)))
                .collect(),
        })
        .collect();

    let total = entries.len();
    log::debug!("{total} target characters against {} ROM variants", indexes.len());
    let coverage: BTreeMap<RomVariant, Coverage> = indexes
        .keys()
        .map(|&variant| {
            let available = entries
                .iter()
                .filter(|e| e.roms.get(&variant).is_some_and(|r| r.available))
                .count();
            (
                variant,
                Coverage {
                    available,
                    missing: total - available,
                },
            )
        })
        .collect();

    // Parcours A, B, C : seul un compte strictement supérieur remplace
    let mut best_rom: Option<(RomVariant, usize)> = None;
    for (&variant, cov) in &coverage {
        if best_rom.is_none_or(|(_, n)| cov.available > n) {
            best_rom = Some((variant, cov.available));
        }
    }

    CharMap {
        entries,
        coverage,
        best_rom: best_rom.map(|(variant, _)| variant),
    }
}
