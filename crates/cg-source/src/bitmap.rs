use std::sync::OnceLock;

use cg_core::raster::RASTER_ROWS;
use cg_core::{BitmapMap, ByteCode, Raster};
use regex::Regex;

/// En-tête d'entrée : `// 0x41 (0b_0100_0001)`, annotation binaire facultative.
/// Rien d'autre sur la ligne : une bannière `// 0x00-0x0F ...` n'ouvre pas d'entrée.
const HEADER_PATTERN: &str = r"^\s*//\s*0x([0-9A-Fa-f]{2})(?:\s*\(0b_[01]{4}_[01]{4}\))?\s*$";

/// Ouverture du bloc : `new byte[8] {`.
const OPEN_PATTERN: &str = r"new\s+byte\s*\[\s*8\s*\]\s*\{";

/// Littéral binaire d'une rangée : `0b_01110`.
const ROW_VALUE_PATTERN: &str = r"\b0b_([01]+)\b";

static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
static OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
static ROW_VALUE_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid regex pattern"))
}

/// Rasters read from one bitmap document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitmapReport {
    pub rasters: BitmapMap,
    /// Byte codes whose entry was malformed, in document order.
    pub skipped: Vec<ByteCode>,
}

/// Entrée en cours de lecture.
struct Pending {
    code: ByteCode,
    opened: bool,
    rows: Vec<u8>,
    well_formed: bool,
}

impl Pending {
    fn new(code: ByteCode) -> Self {
        Self {
            code,
            opened: false,
            rows: Vec::with_capacity(RASTER_ROWS),
            well_formed: true,
        }
    }
}

/// Parse a raster document into a sparse byte code → raster map.
///
/// Each entry is a `// 0xNN` comment line followed by a `new byte[8] { … }`
/// block of 5-bit binary literals. An entry that does not yield exactly 8
/// five-bit rows is skipped and reported, never fatal. A later entry for the
/// same byte code replaces the earlier one, malformed or not.
///
/// # Example
/// ```
/// use cg_source::bitmap::read_bitmaps;
/// let doc = "// 0x41 (0b_0100_0001)\nnew byte[8] {\n0b_01110,\n0b_10001,\n0b_10001,\n0b_10001,\n0b_11111,\n0b_10001,\n0b_10001,\n0b_00000,\n},\n";
/// let report = read_bitmaps(doc);
/// assert_eq!(report.rasters[&0x41].rows()[0], 0b01110);
/// ```
#[must_use]
pub fn read_bitmaps(document: &str) -> BitmapReport {
    let header_re = compiled(&HEADER_REGEX, HEADER_PATTERN);
    let open_re = compiled(&OPEN_REGEX, OPEN_PATTERN);
    let value_re = compiled(&ROW_VALUE_REGEX, ROW_VALUE_PATTERN);

    let mut report = BitmapReport::default();
    let mut pending: Option<Pending> = None;

    for line in document.lines() {
        if let Some(caps) = header_re.captures(line) {
            if let Some(interrupted) = pending.take() {
                finish(interrupted, false, &mut report);
            }
            if let Ok(code) = ByteCode::from_str_radix(&caps[1], 16) {
                pending = Some(Pending::new(code));
            }
            continue;
        }

        let Some(entry) = pending.as_mut() else {
            continue;
        };
        // Les commentaires de fin de ligne (rendu ASCII) ne comptent pas
        let mut code_part = line.split("//").next().unwrap_or_default();

        if !entry.opened {
            let Some(open) = open_re.find(code_part) else {
                continue;
            };
            entry.opened = true;
            code_part = &code_part[open.end()..];
        }

        let (values, closed) = match code_part.find('}') {
            Some(end) => (&code_part[..end], true),
            None => (code_part, false),
        };
        for caps in value_re.captures_iter(values) {
            let bits = &caps[1];
            match u8::from_str_radix(bits, 2) {
                Ok(v) if bits.len() == 5 => entry.rows.push(v),
                _ => entry.well_formed = false,
            }
        }

        if closed && let Some(done) = pending.take() {
            finish(done, true, &mut report);
        }
    }

    if let Some(unterminated) = pending.take() {
        finish(unterminated, false, &mut report);
    }

    report
}

fn finish(entry: Pending, closed: bool, report: &mut BitmapReport) {
    let raster = if closed && entry.well_formed {
        Raster::from_slice(&entry.rows).ok()
    } else {
        None
    };
    match raster {
        Some(r) => {
            report.rasters.insert(entry.code, r);
        }
        None => {
            // Un doublon mal formé annule aussi le raster précédent
            report.rasters.remove(&entry.code);
            log::warn!(
                "Bitmap 0x{:02X} ignoré : {} rangées lisibles",
                entry.code,
                entry.rows.len()
            );
            report.skipped.push(entry.code);
        }
    }
}
