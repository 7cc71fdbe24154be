use std::collections::BTreeMap;
use std::str::FromStr;

use cg_core::{ByteCode, CharIndex, CoreError};

use crate::resolver::compute_fallbacks;

/// Traitement d'un caractère absent de la ROM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmappedPolicy {
    /// Premier substitut présent dans la ROM.
    #[default]
    Auto,
    /// Le `?` de la ROM.
    Replace,
    /// Aucun octet émis.
    Keep,
}

impl FromStr for UnmappedPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "replace" => Ok(Self::Replace),
            "keep" => Ok(Self::Keep),
            other => Err(CoreError::Config(format!(
                "politique inconnue « {other} » (auto, replace, keep)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EncodeStatus {
    /// Control character copied as its own byte.
    Passthrough,
    Mapped,
    /// Substituted through the caller's table.
    Custom,
    /// First fallback present in the ROM.
    Fallback,
    /// Replaced by the ROM's `?`.
    Replaced,
    /// Nothing emitted.
    Unmapped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedChar {
    pub input: char,
    pub code: Option<ByteCode>,
    pub status: EncodeStatus,
    /// Substitutes present in the ROM, in fallback order.
    pub alternatives: Vec<(char, ByteCode)>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Encoding {
    pub chars: Vec<EncodedChar>,
    pub bytes: Vec<u8>,
}

impl Encoding {
    #[must_use]
    pub fn count(&self, status: EncodeStatus) -> usize {
        self.chars.iter().filter(|c| c.status == status).count()
    }

    /// Counts of every status that occurred.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<EncodeStatus, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.chars {
            *counts.entry(c.status).or_insert(0) += 1;
        }
        counts
    }
}

/// Converts text into the byte codes of one ROM variant.
///
/// # Example
/// ```
/// use cg_core::CharIndex;
/// use cg_fallback::{TextEncoder, UnmappedPolicy};
///
/// let index: CharIndex = [('R', 0x52), ('i', 0x69), ('g', 0x67), ('a', 0x61)]
///     .into_iter()
///     .collect();
/// let out = TextEncoder::new(&index, UnmappedPolicy::Auto).encode("Rīga");
/// assert_eq!(out.bytes, vec![0x52, 0x69, 0x67, 0x61]);
/// ```
#[derive(Clone, Debug)]
pub struct TextEncoder<'a> {
    index: &'a CharIndex,
    custom: BTreeMap<char, char>,
    policy: UnmappedPolicy,
}

impl<'a> TextEncoder<'a> {
    #[must_use]
    pub fn new(index: &'a CharIndex, policy: UnmappedPolicy) -> Self {
        Self {
            index,
            custom: BTreeMap::new(),
            policy,
        }
    }

    /// Substitutions tried before the fallback chain.
    #[must_use]
    pub fn with_custom(mut self, custom: BTreeMap<char, char>) -> Self {
        self.custom = custom;
        self
    }

    #[must_use]
    pub fn encode(&self, text: &str) -> Encoding {
        let mut encoding = Encoding::default();
        for input in text.chars() {
            let encoded = self.encode_char(input);
            if let Some(code) = encoded.code {
                encoding.bytes.push(code);
            }
            encoding.chars.push(encoded);
        }
        encoding
    }

    fn encode_char(&self, input: char) -> EncodedChar {
        let done = |code, status| EncodedChar {
            input,
            code: Some(code),
            status,
            alternatives: Vec::new(),
        };

        if matches!(input, '\n' | '\r' | '\t') {
            return done(input as u8, EncodeStatus::Passthrough);
        }
        if let Some(code) = self.index.get(input) {
            return done(code, EncodeStatus::Mapped);
        }
        if let Some(code) = self.custom.get(&input).and_then(|&c| self.index.get(c)) {
            return done(code, EncodeStatus::Custom);
        }

        let alternatives: Vec<(char, ByteCode)> = compute_fallbacks(input, self.index)
            .into_iter()
            .filter_map(|c| self.index.get(c).map(|code| (c, code)))
            .collect();

        let (code, status) = match self.policy {
            UnmappedPolicy::Auto => match alternatives.first() {
                Some(&(_, code)) => (Some(code), EncodeStatus::Fallback),
                None => (None, EncodeStatus::Unmapped),
            },
            UnmappedPolicy::Replace => (
                Some(self.index.get('?').unwrap_or(b'?')),
                EncodeStatus::Replaced,
            ),
            UnmappedPolicy::Keep => (None, EncodeStatus::Unmapped),
        };

        EncodedChar {
            input,
            code,
            status,
            alternatives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> CharIndex {
        [
            ('?', 0x3F),
            ('A', 0x41),
            ('S', 0x53),
            ('a', 0x61),
            ('s', 0x73),
            ('Ä', 0xC4),
            ('ş', 0xB2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn auto_picks_first_present_fallback() {
        let index = index();
        let out = TextEncoder::new(&index, UnmappedPolicy::Auto).encode("š");
        assert_eq!(out.chars[0].status, EncodeStatus::Fallback);
        // 's' avant 'ş' (même casse, ordre des points de code)
        assert_eq!(out.bytes, vec![0x73]);
        assert_eq!(
            out.chars[0].alternatives,
            vec![('s', 0x73), ('ş', 0xB2), ('S', 0x53)]
        );
    }

    #[test]
    fn replace_uses_rom_question_mark() {
        let index = index();
        let out = TextEncoder::new(&index, UnmappedPolicy::Replace).encode("Ā");
        assert_eq!(out.bytes, vec![0x3F]);
        assert_eq!(out.count(EncodeStatus::Replaced), 1);
    }

    #[test]
    fn keep_emits_nothing() {
        let index = index();
        let out = TextEncoder::new(&index, UnmappedPolicy::Keep).encode("AĀa");
        assert_eq!(out.bytes, vec![0x41, 0x61]);
        assert_eq!(out.count(EncodeStatus::Unmapped), 1);
        assert_eq!(out.chars[1].code, None);
    }

    #[test]
    fn auto_without_alternative_is_unmapped() {
        let index = index();
        let out = TextEncoder::new(&index, UnmappedPolicy::Auto).encode("€");
        assert!(out.bytes.is_empty());
        assert_eq!(out.chars[0].status, EncodeStatus::Unmapped);
    }

    #[test]
    fn control_characters_pass_through() {
        let index = index();
        let out = TextEncoder::new(&index, UnmappedPolicy::Keep).encode("A\nA\t");
        assert_eq!(out.bytes, vec![0x41, 0x0A, 0x41, 0x09]);
        assert_eq!(out.count(EncodeStatus::Passthrough), 2);
    }

    #[test]
    fn custom_before_fallback() {
        let index = index();
        let out = TextEncoder::new(&index, UnmappedPolicy::Auto)
            .with_custom(BTreeMap::from([('ā', 'Ä'), ('€', 'Z')]))
            .encode("ā€");
        assert_eq!(out.chars[0].status, EncodeStatus::Custom);
        assert_eq!(out.chars[0].code, Some(0xC4));
        // cible absente de la ROM : la substitution est ignorée
        assert_eq!(out.chars[1].status, EncodeStatus::Unmapped);
    }

    #[test]
    fn counts_per_status() {
        let index = index();
        let out = TextEncoder::new(&index, UnmappedPolicy::Auto).encode("Aš\n");
        let counts = out.counts();
        assert_eq!(counts[&EncodeStatus::Mapped], 1);
        assert_eq!(counts[&EncodeStatus::Fallback], 1);
        assert_eq!(counts[&EncodeStatus::Passthrough], 1);
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("AUTO".parse::<UnmappedPolicy>().unwrap(), UnmappedPolicy::Auto);
        assert_eq!("keep".parse::<UnmappedPolicy>().unwrap(), UnmappedPolicy::Keep);
        assert!("skip".parse::<UnmappedPolicy>().is_err());
    }
}
