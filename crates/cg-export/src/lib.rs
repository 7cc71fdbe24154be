//! Writers for the cgrom output files: per-ROM records (JSON + CSV), the
//! 16×16 grid and the character-map report.

pub mod charmap;
pub mod csv;
pub mod grid;
pub mod records;

pub use charmap::{CharMapDocument, write_char_map_csv, write_char_map_json};
pub use grid::write_grid_csv;
pub use records::{RomRecord, build_records, export_roms};
