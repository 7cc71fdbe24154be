use cg_core::{Glyph, OverrideTable, RomMap};

/// Replace `Unmapped` entries by their manual identification.
///
/// Only `Unmapped` entries are touched: an override never clobbers a glyph
/// already resolved by the table or by bitmap cross-referencing, and never
/// turns an `Undefined` slot into a character.
///
/// Returns the merged map and the number of entries it filled.
///
/// # Example
/// ```
/// use cg_core::{Glyph, OverrideTable, RomMap};
/// use cg_match::apply_overrides;
///
/// let mut map = RomMap::new();
/// map.set(0x18, Glyph::Unmapped);
/// let (merged, count) = apply_overrides(&map, &OverrideTable::rom_b());
/// assert_eq!(merged.get(0x18), Glyph::Char('◇'));
/// assert_eq!(count, 1);
/// ```
#[must_use]
pub fn apply_overrides(map: &RomMap, table: &OverrideTable) -> (RomMap, usize) {
    let mut merged = map.clone();
    let mut applied = 0;

    for (code, c) in table.iter() {
        if merged.get(code).is_unmapped() {
            merged.set(code, Glyph::Char(c));
            applied += 1;
        }
    }

    (merged, applied)
}
