//! Multi-term query evaluation.
//!
//! A query is split on whitespace into at most `max_terms` terms; the rest
//! of the text stays in the last term. An entry matches when every term
//! matches it:
//!
//! - an empty term (from repeated spaces) matches everything;
//! - `c` and `h` are shorthands for "C/C++ source" and "header" when the list
//!   holds files of either kind, tested as a suffix of the entry text;
//! - any other term matches as a case-insensitive substring.
//!
//! ```rust
//! use multisearch_widgets::filtering::Query;
//! use multisearch_widgets::listbox::Entry;
//!
//! let entries = vec![
//!     Entry::new("foo.c", None, None),
//!     Entry::new("foo.h", None, None),
//!     Entry::new("bar.c", None, None),
//! ];
//! assert_eq!(Query::parse("foo c", 10).evaluate(&entries), vec![0]);
//! assert_eq!(Query::parse("FOO", 10).evaluate(&entries), vec![0, 1]);
//! ```

use crate::listbox::Entry;

/// Default number of terms a query is split into.
pub const DEFAULT_MAX_TERMS: usize = 10;

const C_SUFFIXES: [&str; 4] = [".c", ".c~", ".cpp", ".cpp~"];
const HEADER_SUFFIXES: [&str; 2] = [".h", ".h~"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    raw: String,
    folded: String,
}

/// A parsed filter query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    text: String,
    terms: Vec<Term>,
}

/// File kinds present among the entries being filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceKinds {
    /// Some entry looks like a C or C++ source file.
    pub c_files: bool,
    /// Some entry looks like a header file.
    pub header_files: bool,
}

impl SourceKinds {
    /// Scans `entries`, stopping once both kinds were seen.
    pub fn detect(entries: &[Entry]) -> Self {
        let mut kinds = SourceKinds::default();
        for e in entries {
            kinds.c_files |= is_c_source(e.text());
            kinds.header_files |= is_header(e.text());
            if kinds.c_files && kinds.header_files {
                break;
            }
        }
        kinds
    }

    fn any(self) -> bool {
        self.c_files || self.header_files
    }
}

fn is_c_source(text: &str) -> bool {
    C_SUFFIXES.iter().any(|s| text.ends_with(s))
}

fn is_header(text: &str) -> bool {
    HEADER_SUFFIXES.iter().any(|s| text.ends_with(s))
}

impl Query {
    /// Splits `text` into at most `max_terms` terms.
    pub fn parse(text: &str, max_terms: usize) -> Self {
        let terms = if text.is_empty() {
            Vec::new()
        } else {
            text.splitn(max_terms.max(1), char::is_whitespace)
                .map(|t| Term {
                    raw: t.to_string(),
                    folded: t.to_lowercase(),
                })
                .collect()
        };
        Self {
            text: text.to_string(),
            terms,
        }
    }

    /// The query text as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The terms, in query order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.raw.as_str())
    }

    /// Whether `text` satisfies every term.
    pub fn matches(&self, text: &str, kinds: SourceKinds) -> bool {
        let folded = text.to_lowercase();
        self.terms.iter().all(|term| {
            let special = term.raw == "c" || term.raw == "h";
            if special && kinds.any() {
                (kinds.header_files && term.raw == "h" && is_header(text))
                    || (kinds.c_files && term.raw == "c" && is_c_source(text))
            } else {
                term.raw.is_empty() || folded.contains(&term.folded)
            }
        })
    }

    /// Indices of the matching entries, in entry order.
    pub fn evaluate(&self, entries: &[Entry]) -> Vec<usize> {
        let kinds = if self.terms.is_empty() {
            SourceKinds::default()
        } else {
            SourceKinds::detect(entries)
        };
        entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.matches(e.text(), kinds))
            .map(|(i, _)| i)
            .collect()
    }
}
