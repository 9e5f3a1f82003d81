//! View rendering for the listbox.

use super::style::ELLIPSIS;
use super::{Entry, Listbox};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cuts `text` to at most `width` display columns, marking the cut with an
/// ellipsis, and pads it with spaces to exactly `width` columns.
pub(crate) fn fit_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let full = UnicodeWidthStr::width(text);
    if full <= width {
        return format!("{text}{}", " ".repeat(width - full));
    }
    let budget = width - UnicodeWidthStr::width(ELLIPSIS);
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(ELLIPSIS);
    used += UnicodeWidthStr::width(ELLIPSIS);
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

impl Listbox {
    fn render_row(&self, row: usize, entry: &Entry) -> String {
        let cols = usize::from(self.rect.cols);
        let text = fit_width(entry.text(), cols);
        if entry.is_placeholder() {
            return self.styles.placeholder.render(&text);
        }
        if row == self.selected {
            let style = if self.focus {
                &self.styles.selected
            } else {
                &self.styles.selected_blurred
            };
            return style.render(&text);
        }
        match entry.hotkey().and_then(|h| text.find(h).map(|at| (h, at))) {
            Some((h, at)) => {
                let after = at + h.len_utf8();
                format!(
                    "{}{}{}",
                    self.styles.normal.render(&text[..at]),
                    self.styles.hotkey.render(&text[at..after]),
                    self.styles.normal.render(&text[after..])
                )
            }
            None => self.styles.normal.render(&text),
        }
    }

    /// Renders the rows in the viewport, one line per row, padded to the
    /// list's height.
    pub fn view(&self) -> String {
        let lines = usize::from(self.rect.lines);
        let blank = " ".repeat(usize::from(self.rect.cols));
        (self.top..self.top + lines)
            .map(|row| match self.get(row) {
                Some(entry) => self.render_row(row, entry),
                None => blank.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
