//! Styling for listbox rows.
//!
//! ```rust
//! use multisearch_widgets::listbox::ListboxStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = ListboxStyles::default();
//! styles.selected = Style::new().foreground(Color::from("#FFFFFF")).bold(true);
//! ```

use lipgloss_extras::prelude::*;

/// Marker appended to rows cut at the list's right edge.
pub const ELLIPSIS: &str = "…";

/// Styles applied when rendering a listbox.
#[derive(Debug, Clone)]
pub struct ListboxStyles {
    /// Unselected rows.
    pub normal: Style,
    /// The selected row while the list has focus.
    pub selected: Style,
    /// The selected row while another widget has focus.
    pub selected_blurred: Style,
    /// The hotkey character of a row.
    pub hotkey: Style,
    /// The "no search results" row.
    pub placeholder: Style,
}

impl Default for ListboxStyles {
    fn default() -> Self {
        Self {
            normal: Style::new().foreground(Color::from("252")),
            selected: Style::new()
                .foreground(Color::from("#EE6FF8"))
                .background(Color::from("#2A2A3A"))
                .bold(true),
            selected_blurred: Style::new().foreground(Color::from("#AD58B4")),
            hotkey: Style::new().foreground(Color::from("#ECFD65")).underline(true),
            placeholder: Style::new().foreground(Color::from("240")).italic(true),
        }
    }
}
