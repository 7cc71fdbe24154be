use std::path::Path;

use anyhow::Result;
use cg_core::glyph::code_at;
use cg_core::RomMap;

use crate::csv::{format_csv, write_output};

/// Coin supérieur gauche de la grille : rangées b3-b0, colonnes b7-b4.
pub const GRID_CORNER: &str = "b3-b0 \\ b7-b4";

/// 16×16 grid laid out as the datasheet table: one line per low nibble,
/// one column per high nibble. Sentinels are empty cells.
///
/// # Example
/// ```
/// use cg_core::{Glyph, RomMap};
/// use cg_export::grid::format_grid;
/// let mut map = RomMap::new();
/// map.set(0x41, Glyph::Char('A'));
/// let grid = format_grid(&map);
/// assert!(grid.contains("0001,,,,,A,"));
/// ```
#[must_use]
pub fn format_grid(map: &RomMap) -> String {
    let header: Vec<String> = std::iter::once(GRID_CORNER.to_string())
        .chain((0..16u8).map(|column| format!("{column:04b}")))
        .collect();
    let header: Vec<&str> = header.iter().map(String::as_str).collect();

    let rows: Vec<Vec<String>> = (0..16u8)
        .map(|row| {
            std::iter::once(format!("{row:04b}"))
                .chain((0..16u8).map(|column| {
                    map.get(code_at(column, row))
                        .as_char()
                        .map(String::from)
                        .unwrap_or_default()
                }))
                .collect()
        })
        .collect();

    format_csv(&header, &rows)
}

/// Write `rom_<X>_grid.csv`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_grid_csv(path: &Path, map: &RomMap) -> Result<()> {
    write_output(path, &format_grid(map))
}
