//! List records and their client payloads.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Index of an entry whose position has not been stamped yet.
pub const UNINDEXED: isize = -1;

/// Index reserved for the synthetic "no search results" row.
pub const NO_RESULTS_INDEX: isize = -2;

/// Client data attached to an entry.
pub enum Payload {
    /// Data owned by the entry and dropped with it.
    Owned(Box<dyn Any + Send>),
    /// Data managed by the client; the entry only holds a reference.
    Shared(Arc<dyn Any + Send + Sync>),
}

impl Payload {
    /// Wraps a value the entry will own.
    pub fn owned<T: Any + Send>(value: T) -> Self {
        Payload::Owned(Box::new(value))
    }

    /// Wraps a value the client keeps managing.
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Payload::Shared(value)
    }

    /// Whether the payload is released together with its entry.
    pub fn is_owned(&self) -> bool {
        matches!(self, Payload::Owned(_))
    }

    /// Borrows the payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Payload::Owned(b) => b.downcast_ref::<T>(),
            Payload::Shared(a) => a.downcast_ref::<T>(),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Owned(_) => f.write_str("Payload::Owned(..)"),
            Payload::Shared(_) => f.write_str("Payload::Shared(..)"),
        }
    }
}

/// One list record.
#[derive(Debug)]
pub struct Entry {
    pub(crate) index: isize,
    text: Cow<'static, str>,
    hotkey: Option<char>,
    payload: Option<Payload>,
}

impl Entry {
    /// Creates an unindexed entry.
    pub fn new(
        text: impl Into<Cow<'static, str>>,
        hotkey: Option<char>,
        payload: Option<Payload>,
    ) -> Self {
        Self {
            index: UNINDEXED,
            text: text.into(),
            hotkey,
            payload,
        }
    }

    pub(crate) fn placeholder(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            index: NO_RESULTS_INDEX,
            ..Self::new(text, None, None)
        }
    }

    /// Position marker: the entry's position in the unfiltered list once
    /// indices are initialised, [`UNINDEXED`] before that.
    pub fn index(&self) -> isize {
        self.index
    }

    /// Display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Hotkey selecting this entry.
    pub fn hotkey(&self) -> Option<char> {
        self.hotkey
    }

    /// Client payload.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Whether the entry owns its text.
    pub fn owns_text(&self) -> bool {
        matches!(self.text, Cow::Owned(_))
    }

    /// Whether the entry releases its payload when dropped.
    pub fn owns_payload(&self) -> bool {
        self.payload.as_ref().is_some_and(Payload::is_owned)
    }

    /// Whether this is the synthetic "no search results" row.
    pub fn is_placeholder(&self) -> bool {
        self.index == NO_RESULTS_INDEX
    }

    /// Whether the payload is a `T` equal to `data`.
    pub fn payload_eq<T: Any + PartialEq>(&self, data: &T) -> bool {
        self.payload
            .as_ref()
            .and_then(Payload::downcast_ref::<T>)
            .is_some_and(|p| p == data)
    }
}
