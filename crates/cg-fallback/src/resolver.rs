use cg_core::{ByteCode, CharIndex};
use unicode_normalization::UnicodeNormalization;

/// Disponibilité d'un caractère cible dans une ROM.
///
/// `fallbacks` est vide quand `available` est vrai.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FallbackEntry {
    pub available: bool,
    pub code: Option<ByteCode>,
    pub fallbacks: Vec<char>,
}

/// ASCII base letter of a character: the first NFD component, if it is an
/// ASCII letter.
///
/// # Example
/// ```
/// use cg_fallback::base_letter;
/// assert_eq!(base_letter('Ā'), Some('A'));
/// assert_eq!(base_letter('ķ'), Some('k'));
/// assert_eq!(base_letter('Æ'), None);
/// ```
#[must_use]
pub fn base_letter(c: char) -> Option<char> {
    std::iter::once(c)
        .nfd()
        .next()
        .filter(char::is_ascii_alphabetic)
}

/// Ordered substitutes for `target` among the characters of a ROM.
///
/// Candidates share the target's base letter (case-insensitively). Those
/// with the target's case come first, then the others, each group by
/// ascending code point. The bare ASCII base letter closes the list unless
/// a candidate already is that letter. No base letter, no fallback.
///
/// # Example
/// ```
/// use cg_core::CharIndex;
/// use cg_fallback::compute_fallbacks;
/// let index: CharIndex = [('A', 0x41), ('a', 0x61), ('Ä', 0x8E)].into_iter().collect();
/// assert_eq!(compute_fallbacks('ā', &index), vec!['a', 'A', 'Ä']);
/// ```
#[must_use]
pub fn compute_fallbacks(target: char, index: &CharIndex) -> Vec<char> {
    let Some(base) = base_letter(target) else {
        return Vec::new();
    };

    let mut fallbacks: Vec<char> = index
        .iter()
        .map(|(c, _)| c)
        .filter(|&c| c != target)
        .filter(|&c| base_letter(c).is_some_and(|b| b.eq_ignore_ascii_case(&base)))
        .collect();

    let upper = target.is_uppercase();
    fallbacks.sort_by_key(|&c| (c.is_uppercase() != upper, c));

    if !fallbacks.contains(&base) {
        fallbacks.push(base);
    }
    fallbacks
}

/// Availability of `target` in a ROM, with its fallbacks when absent.
#[must_use]
pub fn resolve(target: char, index: &CharIndex) -> FallbackEntry {
    match index.get(target) {
        Some(code) => FallbackEntry {
            available: true,
            code: Some(code),
            fallbacks: Vec::new(),
        },
        None => FallbackEntry {
            available: false,
            code: None,
            fallbacks: compute_fallbacks(target, index),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(chars: &[(char, u8)]) -> CharIndex {
        chars.iter().copied().collect()
    }

    #[test]
    fn present_target_has_no_fallbacks() {
        let entry = resolve('Ä', &index(&[('Ä', 0x8E)]));
        assert!(entry.available);
        assert_eq!(entry.code, Some(0x8E));
        assert!(entry.fallbacks.is_empty());
    }

    #[test]
    fn only_ascii_base_present() {
        let entry = resolve('Ā', &index(&[('A', 0x41), ('B', 0x42)]));
        assert!(!entry.available);
        assert_eq!(entry.code, None);
        assert_eq!(entry.fallbacks, vec!['A']);
    }

    #[test]
    fn base_already_candidate_is_not_repeated() {
        let fb = compute_fallbacks('Ā', &index(&[('A', 0x41), ('Ä', 0x8E), ('Å', 0x8F)]));
        assert_eq!(fb, vec!['A', 'Ä', 'Å']);
    }

    #[test]
    fn same_case_group_first() {
        let fb = compute_fallbacks(
            'š',
            &index(&[('S', 0x53), ('s', 0x73), ('Ś', 0xB0), ('ş', 0xB2)]),
        );
        assert_eq!(fb, vec!['s', 'ş', 'S', 'Ś']);
    }

    #[test]
    fn base_appended_when_absent_from_rom() {
        // ni 'z' ni 'Z' dans la ROM
        let fb = compute_fallbacks('ž', &index(&[('Ź', 0xB8), ('Ż', 0xB9)]));
        assert_eq!(fb, vec!['Ź', 'Ż', 'z']);
    }

    #[test]
    fn ligature_has_no_fallback() {
        assert!(compute_fallbacks('Æ', &index(&[('A', 0x41), ('E', 0x45)])).is_empty());
        assert!(compute_fallbacks('ß', &index(&[('s', 0x73)])).is_empty());
    }

    #[test]
    fn non_letter_has_no_fallback() {
        assert!(compute_fallbacks('€', &index(&[('E', 0x45)])).is_empty());
    }

    #[test]
    fn empty_rom_still_gets_base() {
        assert_eq!(compute_fallbacks('ų', &CharIndex::default()), vec!['u']);
    }
}
