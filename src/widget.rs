//! The message dispatch protocol shared by every widget.
//!
//! A widget exposes a single entry point, [`Widget::dispatch`], which receives a
//! typed [`Message`] and answers [`MsgStatus::Handled`] or
//! [`MsgStatus::NotHandled`]. Widgets that extend another widget embed it by
//! value and call its dispatch for every message they do not resolve
//! themselves, returning its status. The result is an explicit override chain:
//!
//! ```text
//! FilteringListbox::dispatch ──not handled──▶ Listbox::dispatch
//! ForwardingInput::dispatch  ──not handled──▶ TextInput::dispatch
//! ```
//!
//! State changes happen before falling through, so the base always sees the
//! post-mutation state.

use crate::dialog::Context;
use crate::key::KeyPress;
use crate::keymap::{Command, Keymap};
use std::any::Any;

slotmap::new_key_type! {
    /// Handle of a widget owned by a [`Dialog`](crate::dialog::Dialog).
    ///
    /// Handles are non-owning: a widget may be removed while others still hold
    /// its id, and every send through the container checks that it is live.
    pub struct WidgetId;
}

/// Screen rectangle in absolute terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top row.
    pub y: u16,
    /// Left column.
    pub x: u16,
    /// Height in rows.
    pub lines: u16,
    /// Width in columns.
    pub cols: u16,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(y: u16, x: u16, lines: u16, cols: u16) -> Self {
        Self { y, x, lines, cols }
    }

    /// First row below the rectangle.
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.lines)
    }

    /// The same rectangle moved by a signed offset.
    pub fn shifted(&self, dy: i32, dx: i32) -> Self {
        let clamp = |v: u16, d: i32| (i32::from(v) + d).clamp(0, i32::from(u16::MAX)) as u16;
        Self {
            y: clamp(self.y, dy),
            x: clamp(self.x, dx),
            ..*self
        }
    }
}

/// Where a child widget's rectangle is placed when added to a dialog.
///
/// The child's own rectangle is interpreted relative to the dialog origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Keep the relative position as given.
    #[default]
    Relative,
    /// Keep the relative row and centre the widget horizontally.
    CenterHorizontal,
}

/// A message delivered to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// One-time setup after the widget was placed in a dialog.
    Init,
    /// A single keystroke.
    Key(KeyPress),
    /// A semantic command, e.g. [`Command::MultiSearch`] to toggle filtering.
    Action(Command),
    /// A sibling signals that its content changed; carries the new content.
    Notify(String),
    /// The widget's new bounding rectangle.
    Resize(Rect),
    /// The widget received keyboard focus.
    Focus,
    /// The widget lost keyboard focus.
    Blur,
    /// Teardown; cleanup runs before the widget is dropped.
    Destroy,
}

/// Result of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgStatus {
    /// The widget resolved the message.
    Handled,
    /// The widget did not resolve the message.
    NotHandled,
}

impl MsgStatus {
    /// True for [`MsgStatus::Handled`].
    pub fn is_handled(self) -> bool {
        self == MsgStatus::Handled
    }

    /// Combines `Handled` conditions.
    pub fn from_bool(handled: bool) -> Self {
        if handled {
            MsgStatus::Handled
        } else {
            MsgStatus::NotHandled
        }
    }
}

/// A component that can live in a dialog and react to messages.
pub trait Widget: Any + Send {
    /// Handles one message.
    ///
    /// `ctx` exposes the owning dialog's services; `sender` is the widget
    /// that originated the message, if any.
    fn dispatch(
        &mut self,
        ctx: &mut Context<'_>,
        sender: Option<WidgetId>,
        msg: &Message,
    ) -> MsgStatus;

    /// The key map used to answer key lookups for this widget.
    fn keymap(&self) -> &Keymap;

    /// Current bounding rectangle.
    fn rect(&self) -> Rect;

    /// Renders the widget, one string line per row.
    fn view(&self) -> String;

    /// Whether the widget can take keyboard focus.
    fn focusable(&self) -> bool {
        true
    }

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
