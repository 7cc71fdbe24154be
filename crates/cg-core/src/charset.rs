/// Estonien : voyelles accentuées et caron.
pub const ALPHABET_ESTONIAN: &str = "ÄäÖöÜüÕõŠšŽž";

/// Letton : macrons, cédilles et caron.
pub const ALPHABET_LATVIAN: &str = "ĀāČčĒēĢģĪīĶķĻļŅņŠšŪūŽž";

/// Lituanien : ogoneks, point suscrit et caron.
pub const ALPHABET_LITHUANIAN: &str = "ĄąČčĘęĖėĮįŠšŲųŪūŽž";

/// Ordered set of labelled alphabets whose characters the ROMs should render.
///
/// # Example
/// ```
/// use cg_core::charset::TargetAlphabet;
/// let baltic = TargetAlphabet::baltic();
/// assert!(baltic.unique_chars().iter().any(|(c, _)| *c == 'Ā'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetAlphabet {
    sets: Vec<(String, String)>,
}

impl TargetAlphabet {
    /// Build from `(label, characters)` pairs, keeping their order.
    #[must_use]
    pub fn new(sets: Vec<(String, String)>) -> Self {
        Self { sets }
    }

    /// Estonian, Latvian and Lithuanian special letters.
    #[must_use]
    pub fn baltic() -> Self {
        Self::new(vec![
            ("Estonian".into(), ALPHABET_ESTONIAN.into()),
            ("Latvian".into(), ALPHABET_LATVIAN.into()),
            ("Lithuanian".into(), ALPHABET_LITHUANIAN.into()),
        ])
    }

    /// Every distinct character with the labels it appears under, ordered by
    /// code point. Labels keep alphabet order and are not repeated.
    #[must_use]
    pub fn unique_chars(&self) -> Vec<(char, Vec<String>)> {
        let mut out: std::collections::BTreeMap<char, Vec<String>> =
            std::collections::BTreeMap::new();
        for (label, chars) in &self.sets {
            for c in chars.chars() {
                let labels = out.entry(c).or_default();
                if !labels.iter().any(|l| l == label) {
                    labels.push(label.clone());
                }
            }
        }
        out.into_iter().collect()
    }
}

impl Default for TargetAlphabet {
    fn default() -> Self {
        Self::baltic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_letters_collect_every_label() {
        let chars = TargetAlphabet::baltic().unique_chars();
        let (_, labels) = chars.iter().find(|(c, _)| *c == 'Š').unwrap();
        assert_eq!(labels, &["Estonian", "Latvian", "Lithuanian"]);
    }

    #[test]
    fn unique_chars_sorted_by_code_point() {
        let chars = TargetAlphabet::baltic().unique_chars();
        let points: Vec<u32> = chars.iter().map(|(c, _)| u32::from(*c)).collect();
        let mut sorted = points.clone();
        sorted.sort_unstable();
        assert_eq!(points, sorted);
        assert_eq!(chars.first().map(|(c, _)| *c), Some('Ä'));
    }

    #[test]
    fn repeated_char_within_one_label_is_listed_once() {
        let alphabet = TargetAlphabet::new(vec![("X".into(), "ĀĀ".into())]);
        let chars = alphabet.unique_chars();
        assert_eq!(chars, vec![('Ā', vec!["X".to_string()])]);
    }
}
