use cg_core::RomVariant;
use thiserror::Error;

/// Errors raised while extracting a ROM table from its source document.
///
/// Every variant is fatal to the document being read: a single bad row makes
/// the whole table suspect.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// An element of a row is neither a reserved identifier nor a character
    /// literal.
    #[error("Élément mal formé, rangée 0x_{row:X}, position {position} : {detail}")]
    MalformedToken {
        /// Row index (low nibble) of the faulty row.
        row: u8,
        /// Character offset inside the row fragment.
        position: usize,
        /// What was found.
        detail: String,
    },

    /// A row does not hold exactly 16 elements.
    #[error("Rangée 0x_{row:X} : {count} éléments au lieu de 16")]
    RowLength {
        /// Row index (low nibble).
        row: u8,
        /// Number of tokens found.
        count: usize,
    },

    /// A row error, located in its ROM section.
    #[error("ROM {variant} : {source}")]
    Section {
        /// Section the row belongs to.
        variant: RomVariant,
        /// Underlying row error.
        source: Box<ExtractError>,
    },
}

impl ExtractError {
    /// Attach the ROM section to a row error.
    #[must_use]
    pub fn in_section(self, variant: RomVariant) -> Self {
        match self {
            Self::Section { .. } => self,
            other => Self::Section {
                variant,
                source: Box::new(other),
            },
        }
    }
}
