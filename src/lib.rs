//! # multisearch-widgets
//!
//! A listbox with live multi-term filtering and a key-forwarding text input,
//! composed in a small dialog container for
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs) applications.
//!
//! ## Components
//!
//! - **[`Listbox`]** - ordered entries with a selection cursor, hotkeys,
//!   deletion and a selection callback.
//! - **[`FilteringListbox`]** - a listbox extended at runtime with a filter
//!   state: a query input appears below the list and every keystroke
//!   narrows the visible rows to the entries matching all query terms.
//! - **[`ForwardingInput`]** - a text input that hands keys it does not use
//!   (arrows, page keys, Enter) to a paired widget and notifies it whenever
//!   its text changes.
//! - **[`Dialog`]** - the container: owns the widgets, routes keys to the
//!   focused one, manages geometry, focus, history and notices, and runs as
//!   a bubbletea `Model`.
//!
//! ## Message dispatch
//!
//! Widgets talk through one entry point, [`Widget::dispatch`], which takes a
//! [`Message`] and answers [`MsgStatus::Handled`] or
//! [`MsgStatus::NotHandled`]. A widget that extends another embeds it and
//! passes on whatever it does not resolve itself.
//!
//! ## Quick start
//!
//! ```rust
//! use multisearch_widgets::prelude::*;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut dialog = Dialog::new(Rect::new(4, 10, 12, 60)).with_screen_size(40, 120);
//! let mut files = FilteringListbox::new(Rect::new(1, 2, 9, 56), false, None, ResizePolicy::ExtendContainer);
//! for name in ["main.c", "main.h", "util.c", "README"] {
//!     files.list_mut().append(name);
//! }
//! let list = dialog.add(files);
//! dialog.run_init();
//!
//! // ctrl+space toggles filtering; typed keys go to the query input.
//! dialog.handle_key(KeyPress::new(KeyCode::Char(' '), KeyModifiers::CONTROL));
//! for c in "main h".chars() {
//!     dialog.handle_key(KeyCode::Char(c).into());
//! }
//!
//! let files = dialog.widget::<FilteringListbox>(list).unwrap();
//! assert_eq!(files.list().current().map(|(text, _)| text), Some("main.h"));
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing` with the targets
//! `multisearch_widgets::dialog`, `multisearch_widgets::filter` and
//! `multisearch_widgets::forward`. No subscriber is installed.

pub mod dialog;
pub mod error;
pub mod filtering;
pub mod forwarding;
pub mod input;
pub mod key;
pub mod keymap;
pub mod listbox;
pub mod widget;

use bubbletea_rs::Cmd;

/// Focus management shared by every widget.
///
/// The dialog drives it through `Focus` and `Blur` messages; it is public so
/// widgets can also be used on their own.
///
/// ```rust
/// use multisearch_widgets::prelude::*;
///
/// let mut input = TextInput::new(Rect::new(0, 0, 1, 20), "", None);
/// assert!(!input.focused());
/// input.focus();
/// assert!(input.focused());
/// input.blur();
/// assert!(!input.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state. May return a command for the
    /// bubbletea runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Returns the current focus state.
    fn focused(&self) -> bool;
}

pub use dialog::{Context, Dialog, DialogOutcome, History, Notice};
pub use error::WidgetError;
pub use filtering::{FilterConfig, FilteringListbox, Query, ResizePolicy, ResizeThresholds};
pub use forwarding::ForwardingInput;
pub use input::{InputStyles, TextInput};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, with_keys_str,
    Binding, KeyPress,
};
pub use keymap::{Command, Keymap};
pub use listbox::{Entry, InsertMode, ListAction, Listbox, ListboxStyles, Payload};
pub use widget::{Message, MsgStatus, Placement, Rect, Widget, WidgetId};

/// Commonly used types.
///
/// ```rust
/// use multisearch_widgets::prelude::*;
///
/// let dialog = Dialog::new(Rect::new(0, 0, 10, 40));
/// assert!(dialog.children().is_empty());
/// ```
pub mod prelude {
    pub use crate::dialog::{Context, Dialog, DialogOutcome};
    pub use crate::filtering::{FilterConfig, FilteringListbox, ResizePolicy};
    pub use crate::forwarding::ForwardingInput;
    pub use crate::input::TextInput;
    pub use crate::key::{new_binding, with_help, with_keys_str, Binding, KeyPress};
    pub use crate::keymap::{Command, Keymap};
    pub use crate::listbox::{Entry, InsertMode, ListAction, Listbox, Payload};
    pub use crate::widget::{Message, MsgStatus, Placement, Rect, Widget, WidgetId};
    pub use crate::Component;
}
