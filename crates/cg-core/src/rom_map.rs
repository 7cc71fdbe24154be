use std::collections::BTreeMap;

use crate::glyph::{ByteCode, Glyph, ROM_SIZE, code_at};

/// Table complète byte code → glyph d'une variante de ROM.
///
/// Fonction totale sur les 256 codes : un code jamais couvert vaut
/// [`Glyph::Undefined`], jamais « absent ».
///
/// # Example
/// ```
/// use cg_core::{Glyph, RomMap};
/// let mut map = RomMap::new();
/// map.set(0x41, Glyph::Char('A'));
/// assert_eq!(map.get(0x41), Glyph::Char('A'));
/// assert_eq!(map.get(0x42), Glyph::Undefined);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RomMap {
    glyphs: [Glyph; ROM_SIZE],
}

impl RomMap {
    /// A map with every byte code `Undefined`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            glyphs: [Glyph::Undefined; ROM_SIZE],
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, code: ByteCode) -> Glyph {
        self.glyphs[usize::from(code)]
    }

    #[inline]
    pub fn set(&mut self, code: ByteCode, glyph: Glyph) {
        self.glyphs[usize::from(code)] = glyph;
    }

    /// All 256 entries, byte code ascending.
    pub fn iter(&self) -> impl Iterator<Item = (ByteCode, Glyph)> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .map(|(i, &g)| (i as ByteCode, g))
    }

    /// Number of entries still holding the `Unmapped` placeholder.
    #[must_use]
    pub fn unmapped_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.is_unmapped()).count()
    }

    /// Reverse lookup char → lowest byte code holding it.
    #[must_use]
    pub fn char_index(&self) -> CharIndex {
        CharIndex::from_map(self)
    }
}

impl Default for RomMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte codes in the order the source table declares them: row (low
/// nibble) outer, column (high nibble) inner.
///
/// # Example
/// ```
/// use cg_core::rom_map::table_order;
/// let order: Vec<u8> = table_order().take(3).collect();
/// assert_eq!(order, vec![0x00, 0x10, 0x20]);
/// ```
pub fn table_order() -> impl Iterator<Item = ByteCode> {
    (0..16u8).flat_map(|row| (0..16u8).map(move |column| code_at(column, row)))
}

/// Index inverse char → byte code d'une ROM finalisée.
///
/// En cas de doublon, la première occurrence (code le plus bas) gagne.
/// Les sentinelles sont exclues.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharIndex {
    by_char: BTreeMap<char, ByteCode>,
}

impl CharIndex {
    /// Build the index by scanning byte codes 0..=255 ascending.
    #[must_use]
    pub fn from_map(map: &RomMap) -> Self {
        let mut by_char = BTreeMap::new();
        for (code, glyph) in map.iter() {
            if let Some(c) = glyph.as_char() {
                by_char.entry(c).or_insert(code);
            }
        }
        Self { by_char }
    }

    #[must_use]
    pub fn get(&self, c: char) -> Option<ByteCode> {
        self.by_char.get(&c).copied()
    }

    /// Every indexed character with its byte code, code point ascending.
    pub fn iter(&self) -> impl Iterator<Item = (char, ByteCode)> + '_ {
        self.by_char.iter().map(|(&c, &code)| (c, code))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_char.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_char.is_empty()
    }
}

impl FromIterator<(char, ByteCode)> for CharIndex {
    /// Collect pairs, keeping the first code seen for each character.
    fn from_iter<I: IntoIterator<Item = (char, ByteCode)>>(iter: I) -> Self {
        let mut by_char = BTreeMap::new();
        for (c, code) in iter {
            by_char.entry(c).or_insert(code);
        }
        Self { by_char }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_total_and_undefined() {
        let map = RomMap::new();
        assert_eq!(map.iter().count(), 256);
        assert!(map.iter().all(|(_, g)| g == Glyph::Undefined));
    }

    #[test]
    fn table_order_covers_every_code_once() {
        let mut seen: Vec<u8> = table_order().collect();
        assert_eq!(seen.len(), 256);
        assert_eq!(seen[16], 0x01);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 256);
    }

    #[test]
    fn char_index_keeps_lowest_code_and_skips_sentinels() {
        let mut map = RomMap::new();
        map.set(0xC4, Glyph::Char('Ä'));
        map.set(0xA0, Glyph::Char('Ä'));
        map.set(0x18, Glyph::Unmapped);
        let index = map.char_index();
        assert_eq!(index.get('Ä'), Some(0xA0));
        assert_eq!(index.len(), 1);
    }
}
