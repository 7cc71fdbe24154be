// Cross-referencing of glyph rasters between ROM variants.

use std::collections::{BTreeMap, HashMap};

use cg_core::rom_map::table_order;
use cg_core::{BitmapMap, Glyph, Raster, RomMap, RomVariant};

/// Raster pattern → character, learnt from every variant's resolved glyphs.
///
/// The first glyph seen for a pattern wins; later duplicates are ignored.
/// Variants are visited A, B, C and byte codes in table order.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
/// use cg_core::{BitmapMap, Glyph, Raster, RomMap, RomVariant};
/// use cg_match::crossref::PatternLookup;
///
/// let diamond = Raster::new([2, 4, 10, 17, 17, 31, 17, 17]).unwrap();
/// let mut map = RomMap::new();
/// map.set(0x20, Glyph::Char('◇'));
/// let bitmaps: BitmapMap = [(0x20, diamond)].into_iter().collect();
///
/// let lookup = PatternLookup::build(
///     &BTreeMap::from([(RomVariant::A, map)]),
///     &BTreeMap::from([(RomVariant::A, bitmaps)]),
/// );
/// assert_eq!(lookup.get(&diamond), Some('◇'));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PatternLookup {
    patterns: HashMap<Raster, char>,
}

impl PatternLookup {
    /// Build the lookup from all variants holding both a map and rasters.
    #[must_use]
    pub fn build(
        maps: &BTreeMap<RomVariant, RomMap>,
        bitmaps: &BTreeMap<RomVariant, BitmapMap>,
    ) -> Self {
        let mut patterns = HashMap::new();

        for variant in RomVariant::ALL {
            let (Some(map), Some(rasters)) = (maps.get(&variant), bitmaps.get(&variant)) else {
                continue;
            };
            for code in table_order() {
                let Some(c) = map.get(code).as_char() else {
                    continue;
                };
                // Un raster vide ne porte aucune forme
                if let Some(raster) = rasters.get(&code).filter(|r| !r.is_empty()) {
                    patterns.entry(*raster).or_insert(c);
                }
            }
        }

        Self { patterns }
    }

    #[must_use]
    pub fn get(&self, raster: &Raster) -> Option<char> {
        self.patterns.get(raster).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Resolve the `Unmapped` entries of one map whose raster is a known pattern.
///
/// `Undefined` entries and already resolved entries are never touched.
/// Returns the new map and the number of entries resolved.
#[must_use]
pub fn resolve_unmapped(
    map: &RomMap,
    rasters: &BitmapMap,
    lookup: &PatternLookup,
) -> (RomMap, usize) {
    let mut updated = map.clone();
    let mut resolved = 0;

    for (code, glyph) in map.iter() {
        if !glyph.is_unmapped() {
            continue;
        }
        let found = rasters
            .get(&code)
            .filter(|r| !r.is_empty())
            .and_then(|r| lookup.get(r));
        if let Some(c) = found {
            updated.set(code, Glyph::Char(c));
            resolved += 1;
        }
    }

    (updated, resolved)
}

/// Outcome of a cross-referencing pass over every variant.
#[derive(Clone, Debug)]
pub struct CrossReference {
    pub maps: BTreeMap<RomVariant, RomMap>,
    /// Entries resolved, per variant that had rasters.
    pub resolved: BTreeMap<RomVariant, usize>,
    /// Distinct patterns in the lookup.
    pub patterns: usize,
}

/// Build the pattern lookup from all variants, then resolve each variant
/// that has rasters. Variants without rasters are passed through unchanged.
#[must_use]
pub fn cross_reference(
    maps: &BTreeMap<RomVariant, RomMap>,
    bitmaps: &BTreeMap<RomVariant, BitmapMap>,
) -> CrossReference {
    let lookup = PatternLookup::build(maps, bitmaps);
    log::info!("Built bitmap lookup with {} unique patterns", lookup.len());

    let mut out = BTreeMap::new();
    let mut resolved = BTreeMap::new();
    for (&variant, map) in maps {
        match bitmaps.get(&variant) {
            Some(rasters) => {
                let (updated, count) = resolve_unmapped(map, rasters, &lookup);
                if count > 0 {
                    log::info!(
                        "ROM {variant}: resolved {count} UNMAPPED entries via bitmap cross-reference"
                    );
                }
                resolved.insert(variant, count);
                out.insert(variant, updated);
            }
            None => {
                out.insert(variant, map.clone());
            }
        }
    }

    CrossReference {
        maps: out,
        resolved,
        patterns: lookup.len(),
    }
}
