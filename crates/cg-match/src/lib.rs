//! Glyph identification for cgrom.
//!
//! Resolves `Unmapped` ROM entries from raster shapes shared across variants
//! and from curated override tables.

pub mod crossref;
pub mod merge;
pub mod preview;

pub use crossref::{CrossReference, PatternLookup, cross_reference, resolve_unmapped};
pub use merge::apply_overrides;
