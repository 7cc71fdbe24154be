//! Fallback chains, coverage report and text encoding for cgrom.

pub mod encode;
pub mod report;
pub mod resolver;

pub use encode::{EncodeStatus, EncodedChar, Encoding, TextEncoder, UnmappedPolicy};
pub use report::{CharEntry, CharMap, Coverage, build_char_map};
pub use resolver::{FallbackEntry, base_letter, compute_fallbacks, resolve};
