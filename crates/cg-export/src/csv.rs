use std::path::Path;

use anyhow::{Context, Result};

/// Marque d'ordre des octets UTF-8, pour les tableurs.
pub const UTF8_BOM: &str = "\u{FEFF}";

const LINE_END: &str = "\r\n";

/// Escape a string for CSV (quote if contains comma, quote, or newline).
///
/// # Example
/// ```
/// use cg_export::csv::csv_escape;
/// assert_eq!(csv_escape("plain"), "plain");
/// assert_eq!(csv_escape("a, b"), "\"a, b\"");
/// assert_eq!(csv_escape("\""), "\"\"\"\"");
/// ```
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Format a CSV document: BOM, header, then rows. Fields are escaped.
#[must_use]
pub fn format_csv<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> String {
    let mut out = String::from(UTF8_BOM);
    push_line(&mut out, header.iter().copied());
    for row in rows {
        push_line(&mut out, row.iter().map(AsRef::as_ref));
    }
    out
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&csv_escape(field));
    }
    out.push_str(LINE_END);
}

/// Write a generated file, creating its directory if needed.
///
/// # Errors
/// Returns an error if the directory or the file cannot be written.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Written: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_escape_newline() {
        assert_eq!(csv_escape("a\nb"), "\"a\nb\"");
        assert_eq!(csv_escape("a\rb"), "\"a\rb\"");
    }

    #[test]
    fn format_starts_with_bom() {
        let text = format_csv(&["x", "y"], &[vec!["1", "a,b"]]);
        assert!(text.starts_with(UTF8_BOM));
        let body = &text[UTF8_BOM.len()..];
        assert_eq!(body, "x,y\r\n1,\"a,b\"\r\n");
    }

    #[test]
    fn write_output_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        write_output(&path, "ok").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "ok");
    }
}
