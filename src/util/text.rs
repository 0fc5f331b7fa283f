use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending
/// `…` if truncated. Grapheme-aware, so combining sequences never split.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Pad a string with spaces to exactly `cells` terminal cells, truncating
/// if it is too long.
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let truncated = truncate_to_width(s, cells);
    let width = display_width(&truncated);
    let mut out = truncated;
    out.extend(std::iter::repeat_n(' ', cells.saturating_sub(width)));
    out
}
