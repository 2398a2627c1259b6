//! Text measurement and word wrapping for PDF layout

/// Millimetres per PostScript point
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Measures rendered text width
pub trait TextMeasure {
    /// Width in millimetres of `text` set at `font_size` points
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Advance widths of the built-in Helvetica font
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width used for characters outside the table
const DEFAULT_WIDTH: u16 = 556;

impl HelveticaMetrics {
    fn char_width(c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            HELVETICA_WIDTHS[(code - 32) as usize]
        } else {
            DEFAULT_WIDTH
        }
    }
}

impl TextMeasure for HelveticaMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| Self::char_width(c) as u32).sum();
        units as f32 / 1000.0 * font_size * MM_PER_PT
    }
}

/// Greedy word wrap of `text` to `max_width` millimetres.
///
/// Embedded newlines start a new line; a word wider than `max_width` is
/// broken between characters. Always returns at least one line.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    font_size: f32,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let fits = |s: &str| measure.text_width(s, font_size) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
                continue;
            }

            // Hard-break an over-long word
            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is 1mm wide regardless of size
    struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn text_width(&self, text: &str, _font_size: f32) -> f32 {
            text.chars().count() as f32
        }
    }

    #[test]
    fn test_helvetica_widths() {
        let m = HelveticaMetrics;
        // 'i' is the narrowest lowercase letter, 'W' among the widest
        assert!(m.text_width("i", 10.0) < m.text_width("W", 10.0));
        // 1000 units at 72pt is exactly one inch
        let width = m.text_width("@", 72.0);
        assert!((width - 1.015 * 25.4).abs() < 0.01);
        assert_eq!(m.text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_width_scales_with_font_size() {
        let m = HelveticaMetrics;
        let small = m.text_width("Address", 10.0);
        let large = m.text_width("Address", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap_text("12 Main St", 20.0, 10.0, &FixedWidth), vec!["12 Main St"]);
    }

    #[test]
    fn test_wraps_on_word_boundary() {
        assert_eq!(
            wrap_text("aaa bbb ccc", 7.0, 10.0, &FixedWidth),
            vec!["aaa bbb", "ccc"]
        );
    }

    #[test]
    fn test_newlines_are_kept() {
        assert_eq!(
            wrap_text("line one\n\nline two", 20.0, 10.0, &FixedWidth),
            vec!["line one", "", "line two"]
        );
    }

    #[test]
    fn test_long_word_is_broken() {
        assert_eq!(
            wrap_text("abcdefghij", 4.0, 10.0, &FixedWidth),
            vec!["abcd", "efgh", "ij"]
        );
    }

    #[test]
    fn test_long_word_after_short_word() {
        assert_eq!(
            wrap_text("ab cdefgh", 4.0, 10.0, &FixedWidth),
            vec!["ab", "cdef", "gh"]
        );
    }

    #[test]
    fn test_empty_text_yields_one_line() {
        assert_eq!(wrap_text("", 10.0, 10.0, &FixedWidth), vec![""]);
    }
}
