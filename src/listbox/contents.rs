//! The two data models of a list: flat, or filtered over a shadow copy.

use super::entry::Entry;
use crate::filtering::Query;

/// Entries of a list.
///
/// While filtered, `shadow` owns every entry and the visible rows are
/// `matches`, indices into `shadow` in shadow order. An empty match set shows
/// the single `placeholder` row instead.
#[derive(Debug)]
pub enum ListContents {
    /// Every entry is visible and owned by the list.
    Flat(Vec<Entry>),
    /// Only entries matching `query` are visible.
    Filtered {
        /// All entries, in their unfiltered order.
        shadow: Vec<Entry>,
        /// Visible rows, as indices into `shadow`.
        matches: Vec<usize>,
        /// The query the matches were computed with.
        query: Query,
        /// Row shown when nothing matches.
        placeholder: Entry,
    },
}

impl Default for ListContents {
    fn default() -> Self {
        ListContents::Flat(Vec::new())
    }
}

impl ListContents {
    /// Whether the filtered model is active.
    pub fn is_filtered(&self) -> bool {
        matches!(self, ListContents::Filtered { .. })
    }

    /// Number of visible rows, counting the placeholder.
    pub fn len(&self) -> usize {
        match self {
            ListContents::Flat(v) => v.len(),
            ListContents::Filtered { matches, .. } => matches.len().max(1),
        }
    }

    /// Whether no row is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The visible row at `row`.
    pub fn row(&self, row: usize) -> Option<&Entry> {
        match self {
            ListContents::Flat(v) => v.get(row),
            ListContents::Filtered {
                shadow,
                matches,
                placeholder,
                ..
            } => {
                if matches.is_empty() {
                    (row == 0).then_some(placeholder)
                } else {
                    matches.get(row).and_then(|&i| shadow.get(i))
                }
            }
        }
    }

    /// Visible rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = &Entry> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Position of a visible row in the owning vector; `None` for the
    /// placeholder and out-of-range rows.
    pub fn backing_index(&self, row: usize) -> Option<usize> {
        match self {
            ListContents::Flat(v) => (row < v.len()).then_some(row),
            ListContents::Filtered { matches, .. } => matches.get(row).copied(),
        }
    }

    /// Every entry the list owns, in unfiltered order.
    pub fn owned(&self) -> &[Entry] {
        match self {
            ListContents::Flat(v) => v,
            ListContents::Filtered { shadow, .. } => shadow,
        }
    }

    pub(crate) fn owned_mut(&mut self) -> &mut Vec<Entry> {
        match self {
            ListContents::Flat(v) => v,
            ListContents::Filtered { shadow, .. } => shadow,
        }
    }

    /// Recomputes the visible rows after the owning vector changed.
    pub(crate) fn refresh(&mut self) {
        if let ListContents::Filtered {
            shadow,
            matches,
            query,
            ..
        } = self
        {
            *matches = query.evaluate(shadow);
        }
    }

    /// Moves every entry into a shadow list; all of them stay visible.
    pub(crate) fn into_filtered(self, query: Query, placeholder: Entry) -> Self {
        match self {
            ListContents::Flat(shadow) => {
                let matches = query.evaluate(&shadow);
                ListContents::Filtered {
                    shadow,
                    matches,
                    query,
                    placeholder,
                }
            }
            filtered => filtered,
        }
    }

    /// Reinstates the shadow list as the flat list, discarding the views.
    pub(crate) fn into_flat(self) -> Self {
        match self {
            ListContents::Filtered { shadow, .. } => ListContents::Flat(shadow),
            flat => flat,
        }
    }

    /// Replaces the query of a filtered list and recomputes its rows.
    pub(crate) fn set_query(&mut self, new_query: Query) -> bool {
        match self {
            ListContents::Filtered {
                shadow,
                matches,
                query,
                ..
            } => {
                *matches = new_query.evaluate(shadow);
                *query = new_query;
                true
            }
            ListContents::Flat(_) => false,
        }
    }

    /// The active query, if filtered.
    pub fn query(&self) -> Option<&Query> {
        match self {
            ListContents::Filtered { query, .. } => Some(query),
            ListContents::Flat(_) => None,
        }
    }
}
