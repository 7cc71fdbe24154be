use std::collections::BTreeMap;

use crate::glyph::ByteCode;

/// Table immuable byte code → caractère, appliquée aux entrées `Unmapped`.
///
/// Sert aux glyphes propres à une seule variante, que le recoupement de
/// bitmaps ne peut pas identifier.
///
/// # Example
/// ```
/// use cg_core::overrides::OverrideTable;
/// let table = OverrideTable::rom_b();
/// assert_eq!(table.get(0x18), Some('◇'));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<ByteCode, char>,
}

impl OverrideTable {
    #[must_use]
    pub fn new(entries: BTreeMap<ByteCode, char>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, code: ByteCode) -> Option<char> {
        self.entries.get(&code).copied()
    }

    /// Entries by ascending byte code.
    pub fn iter(&self) -> impl Iterator<Item = (ByteCode, char)> + '_ {
        self.entries.iter().map(|(&code, &c)| (code, c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Glyphes de la ROM B identifiés à la main d'après leurs bitmaps.
    #[must_use]
    pub fn rom_b() -> Self {
        ROM_B_MANUAL.iter().copied().collect()
    }
}

impl FromIterator<(ByteCode, char)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = (ByteCode, char)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

const ROM_B_MANUAL: &[(ByteCode, char)] = &[
    // Symboles graphiques
    (0x18, '\u{25C7}'), // WHITE DIAMOND
    (0x19, '\u{2016}'), // DOUBLE VERTICAL LINE (approximatif)
    // Europe centrale (0xA0-0xAF)
    (0xA0, '\u{00C4}'), // doublon de 0xC4
    (0xA1, '\u{0104}'),
    (0xA2, '\u{0106}'),
    (0xA4, '\u{010E}'),
    (0xA5, '\u{011A}'),
    (0xA6, '\u{0119}'),
    (0xA7, '\u{011E}'),
    (0xA9, '\u{0131}'),
    (0xAB, '\u{013E}'),
    (0xAC, '\u{0143}'),
    (0xAD, '\u{0147}'),
    (0xAE, '\u{0150}'),
    (0xAF, '\u{0158}'),
    // Europe centrale, suite (0xB0-0xB9)
    (0xB0, '\u{015A}'),
    (0xB1, '\u{015E}'),
    (0xB2, '\u{015F}'),
    (0xB4, '\u{0162}'),
    (0xB5, '\u{0164}'),
    (0xB7, '\u{0170}'),
    (0xB8, '\u{0179}'),
    (0xB9, '\u{017B}'),
    // Latin-1, majuscules (0xC0-0xDE)
    (0xC0, '\u{00C0}'),
    (0xC2, '\u{00C2}'),
    (0xC3, '\u{00C3}'),
    (0xC6, '\u{00C6}'),
    (0xC7, '\u{00C7}'),
    (0xCB, '\u{00CB}'),
    (0xCC, '\u{00CC}'),
    (0xCE, '\u{00CE}'),
    (0xCF, '\u{00CF}'),
    (0xD0, '\u{00D0}'),
    (0xD1, '\u{00D1}'),
    (0xD5, '\u{00D5}'),
    (0xD9, '\u{00D9}'),
    (0xDB, '\u{00DB}'),
    (0xDE, '\u{00DE}'),
    // Latin-1, minuscules (0xE3-0xFE)
    (0xE3, '\u{00E3}'),
    (0xE6, '\u{00E6}'),
    (0xE7, '\u{00E7}'),
    (0xF0, '\u{00F0}'),
    (0xF1, '\u{00F1}'),
    (0xF5, '\u{00F5}'),
    (0xFE, '\u{00FE}'),
];
