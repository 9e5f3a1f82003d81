//! Key-map lookup: translating key presses into semantic commands.
//!
//! Every widget owns a [`Keymap`]. The container answers "does widget X
//! recognise key K?" by calling [`Keymap::lookup`], which yields
//! [`Command::Ignore`] for unknown keys. The forwarding input relies on this
//! to decide whether a key it does not handle itself should be offered to
//! its paired list.

use crate::key::{new_binding, with_help, with_keys_str, Binding, KeyPress};
use once_cell::sync::Lazy;

/// Semantic command ids produced by key-map lookups and carried by
/// `Message::Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// The key is not bound.
    Ignore,
    /// Trigger completion. Inputs never treat this as a local command.
    Complete,
    /// Move the selection up one row.
    Up,
    /// Move the selection down one row.
    Down,
    /// Move the selection up one page.
    PageUp,
    /// Move the selection down one page.
    PageDown,
    /// Select the first row.
    Top,
    /// Select the last row.
    Bottom,
    /// Remove the current entry.
    Delete,
    /// Remove every entry.
    Clear,
    /// Accept the current entry.
    Enter,
    /// Close the dialog without a selection.
    Cancel,
    /// Move focus to the next widget.
    NextWidget,
    /// Toggle live multi-term filtering of a list.
    MultiSearch,
    /// Move the input cursor one character left.
    Left,
    /// Move the input cursor one character right.
    Right,
    /// Move the input cursor one word left.
    WordLeft,
    /// Move the input cursor one word right.
    WordRight,
    /// Move the input cursor to the start of the line.
    Home,
    /// Move the input cursor to the end of the line.
    End,
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character under the cursor.
    DeleteChar,
    /// Delete the word before the cursor.
    DeleteWordBackward,
    /// Delete the word after the cursor.
    DeleteWordForward,
    /// Delete from the cursor to the end of the line.
    DeleteToEnd,
    /// Delete from the start of the line to the cursor.
    DeleteToStart,
    /// Recall the previous history item.
    HistoryPrev,
    /// Recall the next history item.
    HistoryNext,
}

impl Command {
    /// True for commands that an input widget applies to its own buffer.
    pub fn is_local_input_command(self) -> bool {
        !matches!(self, Command::Ignore | Command::Complete)
    }
}

/// An ordered table of bindings to commands. The first matching binding wins.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<(Binding, Command)>,
}

impl Keymap {
    /// Creates an empty key map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding, returning the map for chaining.
    pub fn bind(mut self, binding: Binding, command: Command) -> Self {
        self.bindings.push((binding, command));
        self
    }

    /// Adds a binding in place.
    pub fn insert(&mut self, binding: Binding, command: Command) {
        self.bindings.push((binding, command));
    }

    /// Removes every binding that produces `command`.
    pub fn unbind(&mut self, command: Command) {
        self.bindings.retain(|(_, c)| *c != command);
    }

    /// Looks a key up, returning [`Command::Ignore`] when nothing matches.
    pub fn lookup(&self, key: &KeyPress) -> Command {
        self.bindings
            .iter()
            .find(|(b, _)| b.matches(key))
            .map(|(_, c)| *c)
            .unwrap_or(Command::Ignore)
    }

    /// The bindings of this map, in lookup order.
    pub fn bindings(&self) -> impl Iterator<Item = (&Binding, Command)> {
        self.bindings.iter().map(|(b, c)| (b, *c))
    }
}

fn binding(keys: &[&str], help: &str, desc: &str) -> Binding {
    new_binding(vec![with_keys_str(keys), with_help(help, desc)])
}

static LISTBOX_KEYMAP: Lazy<Keymap> = Lazy::new(|| {
    Keymap::new()
        .bind(binding(&["up", "ctrl+p"], "↑", "up"), Command::Up)
        .bind(binding(&["down", "ctrl+n"], "↓", "down"), Command::Down)
        .bind(binding(&["home", "alt+<"], "home", "first"), Command::Top)
        .bind(binding(&["end", "alt+>"], "end", "last"), Command::Bottom)
        .bind(binding(&["pgup", "alt+v"], "pgup", "page up"), Command::PageUp)
        .bind(binding(&["pgdown", "ctrl+v"], "pgdn", "page down"), Command::PageDown)
        .bind(binding(&["delete"], "del", "delete"), Command::Delete)
        .bind(binding(&["shift+delete"], "shift+del", "clear"), Command::Clear)
        .bind(binding(&["enter"], "enter", "select"), Command::Enter)
        .bind(binding(&["ctrl+space", "alt+/"], "ctrl+space", "filter"), Command::MultiSearch)
});

static INPUT_KEYMAP: Lazy<Keymap> = Lazy::new(|| {
    Keymap::new()
        .bind(binding(&["left", "ctrl+b"], "←", "left"), Command::Left)
        .bind(binding(&["right", "ctrl+f"], "→", "right"), Command::Right)
        .bind(binding(&["alt+left", "ctrl+left", "alt+b"], "alt+←", "word left"), Command::WordLeft)
        .bind(binding(&["alt+right", "ctrl+right", "alt+f"], "alt+→", "word right"), Command::WordRight)
        .bind(binding(&["home", "ctrl+a"], "home", "line start"), Command::Home)
        .bind(binding(&["end", "ctrl+e"], "end", "line end"), Command::End)
        .bind(binding(&["backspace", "ctrl+h"], "bksp", "delete back"), Command::Backspace)
        .bind(binding(&["delete", "ctrl+d"], "del", "delete"), Command::DeleteChar)
        .bind(binding(&["alt+backspace", "ctrl+w"], "ctrl+w", "delete word"), Command::DeleteWordBackward)
        .bind(binding(&["alt+delete", "alt+d"], "alt+d", "delete next word"), Command::DeleteWordForward)
        .bind(binding(&["ctrl+k"], "ctrl+k", "delete to end"), Command::DeleteToEnd)
        .bind(binding(&["ctrl+u"], "ctrl+u", "delete to start"), Command::DeleteToStart)
        .bind(binding(&["alt+p"], "alt+p", "history prev"), Command::HistoryPrev)
        .bind(binding(&["alt+n"], "alt+n", "history next"), Command::HistoryNext)
        .bind(binding(&["tab"], "tab", "complete"), Command::Complete)
});

static DIALOG_KEYMAP: Lazy<Keymap> = Lazy::new(|| {
    Keymap::new()
        .bind(binding(&["esc", "ctrl+c"], "esc", "cancel"), Command::Cancel)
        .bind(binding(&["tab"], "tab", "next"), Command::NextWidget)
});

/// Default key map of the listbox.
pub fn listbox_keymap() -> Keymap {
    LISTBOX_KEYMAP.clone()
}

/// Default key map of text inputs.
pub fn input_keymap() -> Keymap {
    INPUT_KEYMAP.clone()
}

/// Default key map of dialogs, consulted for keys no widget handled.
pub fn dialog_keymap() -> Keymap {
    DIALOG_KEYMAP.clone()
}
