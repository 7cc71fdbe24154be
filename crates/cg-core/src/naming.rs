/// Unicode character name, with a synthesized label when none exists.
///
/// Never fails: code points below U+0020 become `CONTROL CHARACTER (U+XXXX)`,
/// any other unnamed code point `UNNAMED (U+XXXX)`.
///
/// # Example
/// ```
/// use cg_core::naming::unicode_name;
/// assert_eq!(unicode_name('Ä'), "LATIN CAPITAL LETTER A WITH DIAERESIS");
/// assert_eq!(unicode_name('\u{1}'), "CONTROL CHARACTER (U+0001)");
/// ```
#[must_use]
pub fn unicode_name(c: char) -> String {
    if u32::from(c) < 0x20 {
        return control_name(u32::from(c));
    }
    match unicode_names2::name(c) {
        Some(name) => name.to_string(),
        None => unnamed(c),
    }
}

/// `CONTROL CHARACTER (U+XXXX)`.
#[must_use]
pub fn control_name(code_point: u32) -> String {
    format!("CONTROL CHARACTER ({})", code_point_label_u32(code_point))
}

/// `UNNAMED (U+XXXX)`.
#[must_use]
pub fn unnamed(c: char) -> String {
    format!("UNNAMED ({})", code_point_label(c))
}

/// `U+XXXX`, at least four hex digits.
///
/// # Example
/// ```
/// use cg_core::naming::code_point_label;
/// assert_eq!(code_point_label('Ā'), "U+0100");
/// ```
#[must_use]
pub fn code_point_label(c: char) -> String {
    code_point_label_u32(u32::from(c))
}

fn code_point_label_u32(code_point: u32) -> String {
    format!("U+{code_point:04X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_use_is_unnamed() {
        assert_eq!(unicode_name('\u{E200}'), "UNNAMED (U+E200)");
    }

    #[test]
    fn named_symbols() {
        assert_eq!(unicode_name('◇'), "WHITE DIAMOND");
        assert_eq!(unicode_name('A'), "LATIN CAPITAL LETTER A");
    }

    #[test]
    fn control_range() {
        assert_eq!(unicode_name('\u{1F}'), "CONTROL CHARACTER (U+001F)");
    }
}
