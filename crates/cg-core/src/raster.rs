use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::glyph::ByteCode;

/// Rangées d'un glyphe.
pub const RASTER_ROWS: usize = 8;

/// Colonnes d'un glyphe (bits significatifs par rangée).
pub const RASTER_COLUMNS: u32 = 5;

const ROW_MASK: u8 = (1 << RASTER_COLUMNS) - 1;

/// 8×5 glyph bitmap, one `u8` per row, most significant of the 5 bits on the
/// left. Equality is structural.
///
/// # Example
/// ```
/// use cg_core::Raster;
/// let r = Raster::new([2, 4, 10, 17, 17, 31, 17, 17]).unwrap();
/// assert!(!r.is_empty());
/// assert!(Raster::new([32, 0, 0, 0, 0, 0, 0, 0]).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Raster([u8; RASTER_ROWS]);

impl Raster {
    /// Build a raster, rejecting rows wider than 5 bits.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRaster`] if any row exceeds 31.
    pub fn new(rows: [u8; RASTER_ROWS]) -> Result<Self, CoreError> {
        if let Some((i, row)) = rows.iter().enumerate().find(|&(_, &r)| r > ROW_MASK) {
            return Err(CoreError::InvalidRaster(format!(
                "rangée {i} = {row} dépasse 5 bits"
            )));
        }
        Ok(Self(rows))
    }

    /// Build a raster from a slice that must hold exactly 8 rows.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRaster`] on a wrong row count or width.
    pub fn from_slice(rows: &[u8]) -> Result<Self, CoreError> {
        let rows: [u8; RASTER_ROWS] = rows.try_into().map_err(|_| {
            CoreError::InvalidRaster(format!("{} rangées au lieu de {RASTER_ROWS}", rows.len()))
        })?;
        Self::new(rows)
    }

    #[must_use]
    pub fn rows(&self) -> &[u8; RASTER_ROWS] {
        &self.0
    }

    /// An all-zero raster carries no shape information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&r| r == 0)
    }

    /// Pixel at `row`, `column` (column 0 is the leftmost).
    ///
    /// # Panics
    /// Panics if `row >= 8` or `column >= 5`.
    #[must_use]
    pub fn pixel(&self, row: usize, column: u32) -> bool {
        assert!(
            column < RASTER_COLUMNS,
            "colonne {column} hors du glyphe ({RASTER_COLUMNS} colonnes)"
        );
        let shift = RASTER_COLUMNS - 1 - column;
        (self.0[row] >> shift) & 1 == 1
    }
}

/// Sparse byte code → raster map of one ROM variant.
pub type BitmapMap = BTreeMap<ByteCode, Raster>;
