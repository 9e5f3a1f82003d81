//! Error types.

use thiserror::Error;

/// Errors reported by widget state transitions.
///
/// None of these are fatal: the widget's state is left untouched when one is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// Filtering was requested while the list is already filtered.
    #[error("listbox is already in filter state")]
    AlreadyFiltered,
    /// Leaving the filter state was requested while the list is not filtered.
    #[error("listbox is not in filter state")]
    NotFiltered,
}

/// Result alias for widget operations.
pub type Result<T> = std::result::Result<T, WidgetError>;
