//! Configuration, types, and shared structures for cgrom.
//!
//! This crate contains all shared types, the error taxonomy, and the
//! configuration logic used across the cgrom workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod glyph;
pub mod naming;
pub mod overrides;
pub mod raster;
pub mod rom_map;

pub use charset::TargetAlphabet;
pub use config::ToolConfig;
pub use error::CoreError;
pub use glyph::{ByteCode, Glyph, RomVariant};
pub use overrides::OverrideTable;
pub use raster::{BitmapMap, Raster};
pub use rom_map::{CharIndex, RomMap};
