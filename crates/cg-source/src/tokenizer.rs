use cg_core::Glyph;

use crate::error::ExtractError;

/// Identifiant réservé : emplacement jamais spécifié.
pub const IDENT_UNDEFINED: &str = "c_undef";

/// Identifiant réservé : emplacement présent, caractère à identifier.
pub const IDENT_UNMAPPED: &str = "c_unmap";

/// Éléments par rangée d'une table 16×16.
pub const ROW_WIDTH: usize = 16;

/// Tokenize one table row into exactly 16 glyphs.
///
/// The fragment may keep its surrounding braces. `row` is the row index used
/// in error reports.
///
/// # Errors
/// [`ExtractError::MalformedToken`] on an unknown identifier, a broken
/// literal or a stray character; [`ExtractError::RowLength`] when the row
/// does not hold 16 elements.
///
/// # Example
/// ```
/// use cg_core::Glyph;
/// use cg_source::tokenizer::tokenize_row;
/// let row = tokenize_row(
///     r"{ c_undef, 'A', 'Ä', c_unmap, 'a','b','c','d','e','f','g','h','i','j','k','l' }",
///     0x1,
/// ).unwrap();
/// assert_eq!(row[0], Glyph::Undefined);
/// assert_eq!(row[2], Glyph::Char('Ä'));
/// assert_eq!(row[3], Glyph::Unmapped);
/// ```
pub fn tokenize_row(fragment: &str, row: u8) -> Result<[Glyph; ROW_WIDTH], ExtractError> {
    let tokens = scan_tokens(fragment, row)?;
    let count = tokens.len();
    tokens
        .try_into()
        .map_err(|_| ExtractError::RowLength { row, count })
}

/// Scan every element of a row fragment, whatever their number.
///
/// # Errors
/// [`ExtractError::MalformedToken`] on the first element that cannot be
/// classified.
pub fn scan_tokens(fragment: &str, row: u8) -> Result<Vec<Glyph>, ExtractError> {
    let s = fragment.trim();
    let s = s.strip_prefix('{').unwrap_or(s);
    let s = s.strip_suffix('}').unwrap_or(s);
    let chars: Vec<char> = s.trim().chars().collect();

    let mut tokens = Vec::with_capacity(ROW_WIDTH);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() || c == ',' {
            i += 1;
            continue;
        }

        // Commentaires /* ... */, sans imbrication
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            i = comment_end(&chars, i + 2)
                .ok_or_else(|| malformed(row, i, "commentaire non terminé".into()))?;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();
            let glyph = match ident.as_str() {
                IDENT_UNDEFINED => Glyph::Undefined,
                IDENT_UNMAPPED => Glyph::Unmapped,
                _ => {
                    return Err(malformed(
                        row,
                        start,
                        format!("identifiant inconnu {ident:?}"),
                    ));
                }
            };
            tokens.push(glyph);
            continue;
        }

        if c == '\'' {
            let (value, next) = char_literal(&chars, i, row)?;
            tokens.push(Glyph::Char(value));
            i = next;
            continue;
        }

        return Err(malformed(row, i, format!("caractère inattendu {c:?}")));
    }

    Ok(tokens)
}

/// Index just past the `*/` closing a comment whose body starts at `from`.
fn comment_end(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1))
        .find(|&j| chars[j] == '*' && chars[j + 1] == '/')
        .map(|j| j + 2)
}

/// Decode the literal opening at `open`; returns the character and the index
/// past the closing quote.
fn char_literal(chars: &[char], open: usize, row: u8) -> Result<(char, usize), ExtractError> {
    let mut i = open + 1;
    let first = *chars
        .get(i)
        .ok_or_else(|| malformed(row, open, "littéral vide".into()))?;

    let value = if first == '\\' {
        let escaped = *chars
            .get(i + 1)
            .ok_or_else(|| malformed(row, open, "échappement tronqué".into()))?;
        if escaped == 'u' {
            let hex: String = chars
                .get(i + 2..i + 6)
                .ok_or_else(|| malformed(row, open, "\\u tronqué".into()))?
                .iter()
                .collect();
            let decoded = if hex.chars().all(|h| h.is_ascii_hexdigit()) {
                u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
            } else {
                None
            };
            i += 6;
            decoded.ok_or_else(|| malformed(row, open, format!("\\u{hex} invalide")))?
        } else {
            // \' et \\ donnent le caractère échappé, comme tout échappement inconnu
            i += 2;
            escaped
        }
    } else {
        i += 1;
        first
    };

    if chars.get(i) != Some(&'\'') {
        return Err(malformed(row, open, "guillemet fermant manquant".into()));
    }
    Ok((value, i + 1))
}

fn malformed(row: u8, position: usize, detail: String) -> ExtractError {
    ExtractError::MalformedToken {
        row,
        position,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(head: &str, n: usize) -> String {
        let tail = vec!["'x'"; ROW_WIDTH - n].join(", ");
        format!("{{ {head}, {tail} }}")
    }

    #[test]
    fn sentinels_and_unicode_escapes() {
        let row = tokenize_row(&padded(r"c_undef, 'A', 'Ä', c_unmap", 4), 0).unwrap();
        assert_eq!(
            &row[..4],
            &[
                Glyph::Undefined,
                Glyph::Char('A'),
                Glyph::Char('Ä'),
                Glyph::Unmapped
            ]
        );
        assert_eq!(row[15], Glyph::Char('x'));
    }

    #[test]
    fn escaped_quote_backslash_and_comma() {
        let row = tokenize_row(&padded(r"'\'', '\\', ',', '\t'", 4), 0).unwrap();
        assert_eq!(row[0], Glyph::Char('\''));
        assert_eq!(row[1], Glyph::Char('\\'));
        assert_eq!(row[2], Glyph::Char(','));
        // Échappement inconnu : la barre oblique est ignorée
        assert_eq!(row[3], Glyph::Char('t'));
    }

    #[test]
    fn block_comments_are_skipped() {
        let row = tokenize_row(&padded("/*!*/ 'A' /* note, 'Z' */", 1), 0).unwrap();
        assert_eq!(row[0], Glyph::Char('A'));
    }

    #[test]
    fn non_ascii_plain_literal() {
        let row = tokenize_row(&padded("'◇'", 1), 0).unwrap();
        assert_eq!(row[0], Glyph::Char('◇'));
    }

    #[test]
    fn braces_are_optional() {
        let with = padded("'A'", 1);
        let without = with.trim_start_matches('{').trim_end_matches('}').to_string();
        assert_eq!(tokenize_row(&with, 0), tokenize_row(&without, 0));
    }

    #[test]
    fn unknown_identifier_is_malformed() {
        let err = tokenize_row(&padded("c_other", 1), 0x3).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedToken { row: 3, .. }));
    }

    #[test]
    fn stray_character_is_malformed() {
        let err = scan_tokens("'A', 42", 0).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedToken { position: 5, .. }));
    }

    #[test]
    fn broken_literals_are_malformed() {
        assert!(scan_tokens("'AB'", 0).is_err());
        assert!(scan_tokens(r"'\u12'", 0).is_err());
        assert!(scan_tokens(r"'\uD800'", 0).is_err());
        assert!(scan_tokens("'A", 0).is_err());
        assert!(scan_tokens("/* open", 0).is_err());
    }

    #[test]
    fn wrong_count_reports_row_and_count() {
        let err = tokenize_row("{ 'A', 'B' }", 0xE).unwrap_err();
        assert_eq!(err, ExtractError::RowLength { row: 0xE, count: 2 });
    }

    #[test]
    fn tokenizing_is_pure() {
        let text = padded(r"c_unmap, '◇'", 2);
        assert_eq!(tokenize_row(&text, 5), tokenize_row(&text, 5));
    }
}
