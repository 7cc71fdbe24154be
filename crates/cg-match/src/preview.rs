use cg_core::Raster;
use cg_core::raster::{RASTER_COLUMNS, RASTER_ROWS};

/// Pixel allumé.
pub const PIXEL_ON: char = '#';
/// Pixel éteint.
pub const PIXEL_OFF: char = '.';

/// Text rendering of a raster: one line per row, `#` for a lit pixel and
/// `.` otherwise, leftmost column first. Lines are joined by `\n` without a
/// trailing newline.
///
/// # Example
/// ```
/// use cg_core::Raster;
/// use cg_match::preview::render_raster;
/// let r = Raster::new([4, 10, 17, 17, 31, 17, 17, 0]).unwrap();
/// let text = render_raster(&r);
/// assert_eq!(text.lines().next(), Some("..#.."));
/// assert_eq!(text.lines().nth(4), Some("#####"));
/// ```
#[must_use]
pub fn render_raster(raster: &Raster) -> String {
    render_raster_with(raster, PIXEL_ON, PIXEL_OFF)
}

/// Same as [`render_raster`] with custom cell characters.
#[must_use]
pub fn render_raster_with(raster: &Raster, on: char, off: char) -> String {
    let mut out = String::with_capacity(RASTER_ROWS * (RASTER_COLUMNS as usize + 1));
    for row in 0..RASTER_ROWS {
        if row > 0 {
            out.push('\n');
        }
        for column in 0..RASTER_COLUMNS {
            out.push(if raster.pixel(row, column) { on } else { off });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_raster_is_all_off() {
        let text = render_raster(&Raster::default());
        assert_eq!(text.lines().count(), RASTER_ROWS);
        assert!(text.lines().all(|l| l == "....."));
    }

    #[test]
    fn msb_is_leftmost() {
        let r = Raster::new([0b1_0000, 0b0_0001, 0, 0, 0, 0, 0, 0]).unwrap();
        let text = render_raster(&r);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#....");
        assert_eq!(lines[1], "....#");
    }

    #[test]
    fn custom_cells() {
        let r = Raster::new([31, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        let text = render_raster_with(&r, '█', ' ');
        assert_eq!(text.lines().next(), Some("█████"));
        assert!(!text.ends_with('\n'));
    }
}
