//! Source document readers for cgrom: ROM table extraction and raster parsing.

pub mod bitmap;
pub mod document;
pub mod error;
pub mod table;
pub mod tokenizer;

pub use bitmap::{BitmapReport, read_bitmaps};
pub use error::ExtractError;
pub use table::{TableSet, assemble_tables};
pub use tokenizer::tokenize_row;
