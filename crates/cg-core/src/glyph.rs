use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Adresse 8 bits d'un emplacement dans la table du générateur de caractères.
pub type ByteCode = u8;

/// Nombre d'emplacements d'une ROM (table 16×16).
pub const ROM_SIZE: usize = 256;

/// Byte code placed at `column` (high nibble) and `row` (low nibble).
///
/// # Example
/// ```
/// use cg_core::glyph::code_at;
/// assert_eq!(code_at(0x4, 0x1), 0x41);
/// ```
#[must_use]
pub fn code_at(column: u8, row: u8) -> ByteCode {
    ((column & 0x0F) << 4) | (row & 0x0F)
}

/// `0x41` style label.
#[must_use]
pub fn hex_label(code: ByteCode) -> String {
    format!("0x{code:02X}")
}

/// Binary label with grouped nibbles, e.g. `0100_0001`.
///
/// # Example
/// ```
/// use cg_core::glyph::binary_label;
/// assert_eq!(binary_label(0x41), "0100_0001");
/// ```
#[must_use]
pub fn binary_label(code: ByteCode) -> String {
    format!("{:04b}_{:04b}", code >> 4, code & 0x0F)
}

/// Contenu d'un emplacement de ROM.
///
/// `Undefined` : aucune entrée n'a jamais été spécifiée.
/// `Unmapped` : entrée présente, caractère pas encore identifié.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Concrete Unicode scalar.
    Char(char),
    /// Never specified.
    #[default]
    Undefined,
    /// Placeholder pending resolution.
    Unmapped,
}

impl Glyph {
    /// The concrete character, if any.
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            Self::Undefined | Self::Unmapped => None,
        }
    }

    #[must_use]
    pub fn is_unmapped(self) -> bool {
        matches!(self, Self::Unmapped)
    }

    /// Marker used in exported records: the character itself, `UNDEFINED`
    /// or `UNMAPPED`.
    #[must_use]
    pub fn marker(self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Undefined => "UNDEFINED".to_string(),
            Self::Unmapped => "UNMAPPED".to_string(),
        }
    }
}

impl From<char> for Glyph {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// One of the three character-generator ROM variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RomVariant {
    A,
    B,
    C,
}

impl RomVariant {
    /// All variants, in processing order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Single-letter label (`A`, `B`, `C`).
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }

    /// Key used in report records (`rom_a`, `rom_b`, `rom_c`).
    ///
    /// # Example
    /// ```
    /// use cg_core::RomVariant;
    /// assert_eq!(RomVariant::B.key(), "rom_b");
    /// ```
    #[must_use]
    pub fn key(self) -> String {
        format!("rom_{}", self.letter().to_ascii_lowercase())
    }
}

impl fmt::Display for RomVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for RomVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            other => Err(CoreError::UnknownVariant {
                label: other.to_string(),
            }),
        }
    }
}
