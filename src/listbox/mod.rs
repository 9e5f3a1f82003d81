//! A selection list widget.
//!
//! [`Listbox`] keeps an ordered list of [`Entry`] records, a selection
//! cursor and a viewport. It handles navigation keys, hotkeys and deletion
//! itself and reports the accepted entry through a selection callback.
//!
//! The list has two data models, see [`ListContents`]: flat, and filtered
//! over a shadow copy. The filtered model is driven by
//! [`FilteringListbox`](crate::filtering::FilteringListbox); every operation
//! here works on the visible rows in either model.
//!
//! # Example
//!
//! ```rust
//! use multisearch_widgets::listbox::{InsertMode, Listbox, Payload};
//! use multisearch_widgets::widget::Rect;
//!
//! let mut list = Listbox::new(Rect::new(0, 0, 5, 30), true, None);
//! list.insert("beta", None, None, InsertMode::AppendEnd);
//! list.insert("alpha", Some('a'), Some(Payload::owned(7u32)), InsertMode::Sorted);
//! assert_eq!(list.search_text("alpha"), Some(0));
//!
//! list.select(0);
//! let (text, payload) = list.current().unwrap();
//! assert_eq!(text, "alpha");
//! assert_eq!(payload.and_then(|p| p.downcast_ref::<u32>()), Some(&7));
//! ```

mod contents;
mod dispatch;
mod entry;
mod rendering;
pub mod style;


pub use contents::ListContents;
pub use entry::{Entry, Payload, NO_RESULTS_INDEX, UNINDEXED};
pub use style::ListboxStyles;

use crate::filtering::Query;
use crate::keymap::{listbox_keymap, Keymap};
use crate::widget::Rect;
use std::any::Any;
use std::borrow::Cow;

/// Where [`Listbox::insert`] places a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// After the last entry.
    #[default]
    AppendEnd,
    /// Before the selected entry.
    BeforeCurrent,
    /// After the selected entry.
    AfterCurrent,
    /// Before the first entry whose text sorts after it (case-sensitive).
    Sorted,
}

/// What the dialog does after the selection callback ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// Keep the dialog open.
    Continue,
    /// Close the dialog, accepting the selection.
    Done,
}

/// Called when an entry is accepted with Enter or its hotkey.
pub type SelectCallback = Box<dyn FnMut(&mut Listbox) -> ListAction + Send>;

/// A list of entries with a selection cursor.
pub struct Listbox {
    pub(crate) contents: ListContents,
    pub(crate) selected: usize,
    pub(crate) top: usize,
    pub(crate) rect: Rect,
    deletable: bool,
    allow_duplicates: bool,
    pub(crate) keymap: Keymap,
    callback: Option<SelectCallback>,
    /// Row styles.
    pub styles: ListboxStyles,
    pub(crate) focus: bool,
}

impl std::fmt::Debug for Listbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listbox")
            .field("contents", &self.contents)
            .field("selected", &self.selected)
            .field("top", &self.top)
            .field("rect", &self.rect)
            .field("deletable", &self.deletable)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl Listbox {
    /// Creates an empty list occupying `rect`.
    pub fn new(rect: Rect, deletable: bool, callback: Option<SelectCallback>) -> Self {
        Self {
            contents: ListContents::default(),
            selected: 0,
            top: 0,
            rect,
            deletable,
            allow_duplicates: true,
            keymap: listbox_keymap(),
            callback,
            styles: ListboxStyles::default(),
            focus: false,
        }
    }

    /// Sets whether entries with an already present text are accepted.
    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Replaces the key map.
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the row styles.
    pub fn with_styles(mut self, styles: ListboxStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the selection callback.
    pub fn set_callback(&mut self, callback: Option<SelectCallback>) {
        self.callback = callback;
    }

    /// Whether entries can be removed with the delete keys.
    pub fn deletable(&self) -> bool {
        self.deletable
    }

    /// The list's data model.
    pub fn contents(&self) -> &ListContents {
        &self.contents
    }

    /// Whether the filtered model is active.
    pub fn is_filtered(&self) -> bool {
        self.contents.is_filtered()
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether no row is visible.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// The visible row at `row`.
    pub fn get(&self, row: usize) -> Option<&Entry> {
        self.contents.row(row)
    }

    /// Visible rows in display order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.contents.rows()
    }

    /// Index of the selected row.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// First row shown in the viewport.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Current rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Number of rows the viewport shows.
    pub fn page_size(&self) -> usize {
        usize::from(self.rect.lines).max(1)
    }

    /// Appends an entry with no hotkey or payload.
    pub fn append(&mut self, text: impl Into<Cow<'static, str>>) -> Option<&str> {
        self.insert(text, None, None, InsertMode::AppendEnd)
    }

    /// Inserts an entry and returns its text.
    ///
    /// Returns `None`, dropping the arguments, when duplicates are not
    /// allowed and an entry with the same text exists. While filtered the
    /// entry goes to the shadow list and the visible rows are recomputed.
    pub fn insert(
        &mut self,
        text: impl Into<Cow<'static, str>>,
        hotkey: Option<char>,
        payload: Option<Payload>,
        mode: InsertMode,
    ) -> Option<&str> {
        let text = text.into();
        if !self.allow_duplicates && self.contents.owned().iter().any(|e| e.text() == &*text) {
            return None;
        }
        let current = self.contents.backing_index(self.selected);
        let owned = self.contents.owned_mut();
        let at = match mode {
            InsertMode::AppendEnd => owned.len(),
            InsertMode::BeforeCurrent => current.unwrap_or(owned.len()),
            InsertMode::AfterCurrent => current.map_or(owned.len(), |i| i + 1),
            InsertMode::Sorted => owned.partition_point(|e| e.text() <= &*text),
        };
        owned.insert(at, Entry::new(text, hotkey, payload));
        self.contents.refresh();
        self.clamp_selection();
        self.contents.owned().get(at).map(Entry::text)
    }

    /// Removes the selected entry and returns it.
    ///
    /// No-op on an empty list and on the "no search results" row.
    pub fn remove_current(&mut self) -> Option<Entry> {
        let at = self.contents.backing_index(self.selected)?;
        let removed = self.contents.owned_mut().remove(at);
        self.contents.refresh();
        self.clamp_selection();
        Some(removed)
    }

    /// Removes every entry.
    pub fn remove_all(&mut self) {
        self.contents.owned_mut().clear();
        self.contents.refresh();
        self.selected = 0;
        self.top = 0;
    }

    /// Replaces the entries. While filtered the new entries become the
    /// shadow list and the visible rows are recomputed.
    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        *self.contents.owned_mut() = entries;
        self.contents.refresh();
        self.selected = 0;
        self.top = 0;
    }

    /// Selects `row`, clamped into the visible rows. Returns `false` on an
    /// empty list.
    pub fn select(&mut self, row: usize) -> bool {
        let len = self.len();
        if len == 0 {
            return false;
        }
        self.selected = row.min(len - 1);
        self.keep_selection_visible();
        true
    }

    /// Selects the first row.
    pub fn select_first(&mut self) -> bool {
        self.select(0)
    }

    /// Selects the last row.
    pub fn select_last(&mut self) -> bool {
        self.select(usize::MAX)
    }

    /// The selected entry's text and payload. `None` on an empty list and on
    /// the "no search results" row.
    pub fn current(&self) -> Option<(&str, Option<&Payload>)> {
        let e = self.get(self.selected).filter(|e| !e.is_placeholder())?;
        Some((e.text(), e.payload()))
    }

    /// Position of the selected entry in the unfiltered order.
    pub fn virtual_pos(&self) -> Option<usize> {
        self.contents.backing_index(self.selected)
    }

    /// First visible row whose text equals `text`.
    pub fn search_text(&self, text: &str) -> Option<usize> {
        self.entries()
            .position(|e| !e.is_placeholder() && e.text() == text)
    }

    /// First visible row whose payload is a `T` equal to `data`.
    pub fn search_data<T: Any + PartialEq>(&self, data: &T) -> Option<usize> {
        self.entries().position(|e| e.payload_eq(data))
    }

    /// Stamps every owned entry with its position in the unfiltered order.
    pub fn init_indices(&mut self) {
        for (i, e) in self.contents.owned_mut().iter_mut().enumerate() {
            e.index = isize::try_from(i).unwrap_or(isize::MAX);
        }
    }

    /// Switches to the filtered model over a shadow of every entry.
    pub(crate) fn enter_filter(&mut self, query: Query, placeholder: Entry) {
        self.init_indices();
        let contents = std::mem::take(&mut self.contents);
        self.contents = contents.into_filtered(query, placeholder);
        self.clamp_selection();
    }

    /// Reinstates the shadow as the flat list, keeping the selected entry
    /// selected.
    pub(crate) fn leave_filter(&mut self) {
        let keep = self.virtual_pos();
        let contents = std::mem::take(&mut self.contents);
        self.contents = contents.into_flat();
        match keep {
            Some(i) => {
                self.select(i);
            }
            None => self.clamp_selection(),
        }
    }

    /// Re-evaluates the filtered rows against `query`. The selection keeps
    /// its row, or moves to the last row when out of range.
    pub(crate) fn apply_query(&mut self, query: Query) -> bool {
        let applied = self.contents.set_query(query);
        if applied {
            self.clamp_selection();
        }
        applied
    }

    /// Scrolls so the selection is roughly centred if it is out of view.
    pub(crate) fn center_selection_if_hidden(&mut self) {
        let h = self.page_size();
        if self.selected < self.top || self.selected >= self.top + h {
            self.top = (self.selected + 1).saturating_sub(h / 2);
        }
    }

    pub(crate) fn clamp_selection(&mut self) {
        let len = self.len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
        self.keep_selection_visible();
    }

    pub(crate) fn keep_selection_visible(&mut self) {
        let h = self.page_size();
        if self.selected < self.top {
            self.top = self.selected;
        } else if self.selected >= self.top + h {
            self.top = self.selected + 1 - h;
        }
        let max_top = self.len().saturating_sub(h);
        self.top = self.top.min(max_top);
    }

    pub(crate) fn run_callback(&mut self) -> ListAction {
        let Some(mut callback) = self.callback.take() else {
            return ListAction::Done;
        };
        let action = callback(self);
        if self.callback.is_none() {
            self.callback = Some(callback);
        }
        action
    }
}

impl crate::Component for Listbox {
    fn focus(&mut self) -> Option<bubbletea_rs::Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
