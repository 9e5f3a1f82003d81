//! A minimal dialog container.
//!
//! [`Dialog`] owns its widgets in a `slotmap` arena and hands each widget a
//! [`Context`] while it dispatches a message. The context is the widget's only
//! way to reach the outside world: sending messages to siblings, looking up
//! their key maps, adding and removing children, resizing the dialog, moving
//! focus, requesting redraws, and reading or writing input history.
//!
//! A widget is taken out of its slot for the duration of its own dispatch, so
//! it can freely mutate itself while the dialog mutates everything else.
//! Consequences:
//!
//! - a send addressed to a widget that is currently dispatching is refused
//!   and reported as [`MsgStatus::NotHandled`];
//! - a widget removed while it is dispatching is destroyed as soon as its
//!   dispatch returns;
//! - geometry and focus changes addressed to a dispatching widget are
//!   delivered as `Resize`, `Focus` or `Blur` messages when it returns.
//!
//! # Example
//!
//! ```rust
//! use multisearch_widgets::dialog::Dialog;
//! use multisearch_widgets::filtering::{FilteringListbox, ResizePolicy};
//! use multisearch_widgets::keymap::Command;
//! use multisearch_widgets::widget::{Message, Rect};
//!
//! let mut dialog = Dialog::new(Rect::new(4, 10, 12, 60)).with_screen_size(40, 120);
//! let mut list = FilteringListbox::new(Rect::new(1, 2, 8, 56), false, None, ResizePolicy::ExtendContainer);
//! list.list_mut().append("main.c");
//! list.list_mut().append("main.h");
//! let id = dialog.add(list);
//! dialog.run_init();
//!
//! dialog.send(id, None, Message::Action(Command::MultiSearch));
//! assert_eq!(dialog.children().len(), 2);
//! assert_eq!(dialog.rect().lines, 13);
//! ```

mod history;


pub use history::{History, DEFAULT_HISTORY_LIMIT};

use crate::key::KeyPress;
use crate::keymap::{dialog_keymap, Command, Keymap};
use crate::widget::{Message, MsgStatus, Placement, Rect, Widget, WidgetId};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use slotmap::SlotMap;
use unicode_width::UnicodeWidthStr;

const TARGET: &str = "multisearch_widgets::dialog";

/// How a dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// A list entry was accepted.
    Accepted,
    /// The user cancelled.
    Cancelled,
}

/// A modal message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Title of the message box.
    pub title: String,
    /// Body text.
    pub text: String,
}

struct Slot {
    widget: Option<Box<dyn Widget>>,
    pending_shift: (i32, i32),
    pending_focus: Option<bool>,
    removed: bool,
}

/// A container of widgets with geometry, focus and per-dialog services.
pub struct Dialog {
    widgets: SlotMap<WidgetId, Slot>,
    order: Vec<WidgetId>,
    focused: Option<WidgetId>,
    rect: Rect,
    screen_lines: u16,
    screen_cols: u16,
    keymap: Keymap,
    history: History,
    notices: Vec<Notice>,
    redraws: Vec<WidgetId>,
    full_redraws: usize,
    outcome: Option<DialogOutcome>,
}

impl Dialog {
    /// Creates an empty dialog occupying `rect` on a 24x80 screen.
    pub fn new(rect: Rect) -> Self {
        Self {
            widgets: SlotMap::with_key(),
            order: Vec::new(),
            focused: None,
            rect,
            screen_lines: 24,
            screen_cols: 80,
            keymap: dialog_keymap(),
            history: History::new(),
            notices: Vec::new(),
            redraws: Vec::new(),
            full_redraws: 0,
            outcome: None,
        }
    }

    /// Sets the terminal size the dialog lives on.
    pub fn with_screen_size(mut self, lines: u16, cols: u16) -> Self {
        self.screen_lines = lines;
        self.screen_cols = cols;
        self
    }

    /// Replaces the history store, e.g. with one loaded by the application.
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    /// Updates the terminal size.
    pub fn set_screen_size(&mut self, lines: u16, cols: u16) {
        self.screen_lines = lines;
        self.screen_cols = cols;
    }

    /// Terminal size as `(lines, cols)`.
    pub fn screen_size(&self) -> (u16, u16) {
        (self.screen_lines, self.screen_cols)
    }

    /// Current dialog rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Child widgets in insertion order.
    pub fn children(&self) -> &[WidgetId] {
        &self.order
    }

    /// The widget holding keyboard focus.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Notices raised by widgets, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Input history of this dialog.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable input history of this dialog.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// How the dialog was closed, if it was.
    pub fn outcome(&self) -> Option<DialogOutcome> {
        self.outcome
    }

    /// Number of full-screen repaints requested so far.
    pub fn full_redraw_count(&self) -> usize {
        self.full_redraws
    }

    /// Drains the widgets that requested a redraw, in request order.
    pub fn take_redraws(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.redraws)
    }

    /// Adds a widget whose rectangle is relative to the dialog origin.
    pub fn add<W: Widget>(&mut self, widget: W) -> WidgetId {
        self.insert_widget(Box::new(widget), Placement::Relative)
    }

    /// Adds a widget with an explicit placement.
    pub fn add_placed<W: Widget>(&mut self, widget: W, placement: Placement) -> WidgetId {
        self.insert_widget(Box::new(widget), placement)
    }

    /// Borrows a child as its concrete type.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.widgets
            .get(id)?
            .widget
            .as_ref()?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutably borrows a child as its concrete type.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.widgets
            .get_mut(id)?
            .widget
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Whether `id` refers to a live child.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.get(id).is_some_and(|s| !s.removed)
    }

    /// Sends `Init` to every child and focuses the first focusable one.
    pub fn run_init(&mut self) {
        for id in self.order.clone() {
            self.send(id, None, Message::Init);
        }
        if self.focused.is_none() {
            self.select_next_focus();
        }
    }

    /// Delivers a message to a child and returns its status.
    pub fn send(&mut self, target: WidgetId, sender: Option<WidgetId>, msg: Message) -> MsgStatus {
        let Some(slot) = self.widgets.get_mut(target) else {
            tracing::trace!(target: TARGET, widget = ?target, "send to a stale widget id");
            return MsgStatus::NotHandled;
        };
        if slot.removed {
            return MsgStatus::NotHandled;
        }
        let Some(mut widget) = slot.widget.take() else {
            tracing::warn!(target: TARGET, widget = ?target, ?msg, "refusing re-entrant send to a dispatching widget");
            return MsgStatus::NotHandled;
        };
        let status = widget.dispatch(&mut Context { dialog: self, id: target }, sender, &msg);
        self.restore(target, widget);
        status
    }

    fn restore(&mut self, id: WidgetId, mut widget: Box<dyn Widget>) {
        loop {
            let Some(slot) = self.widgets.get_mut(id).filter(|s| !s.removed) else {
                self.widgets.remove(id);
                tracing::debug!(target: TARGET, ?id, "destroying widget removed during its own dispatch");
                widget.dispatch(&mut Context { dialog: self, id }, None, &Message::Destroy);
                return;
            };
            let shift = std::mem::take(&mut slot.pending_shift);
            let focus = slot.pending_focus.take();
            if shift == (0, 0) && focus.is_none() {
                slot.widget = Some(widget);
                return;
            }
            if shift != (0, 0) {
                let rect = widget.rect().shifted(shift.0, shift.1);
                widget.dispatch(&mut Context { dialog: self, id }, None, &Message::Resize(rect));
            }
            if let Some(focused) = focus {
                let msg = if focused { Message::Focus } else { Message::Blur };
                widget.dispatch(&mut Context { dialog: self, id }, None, &msg);
            }
        }
    }

    fn notify_focus(&mut self, id: WidgetId, focused: bool) {
        let Some(slot) = self.widgets.get_mut(id) else {
            return;
        };
        if slot.widget.is_some() {
            let msg = if focused { Message::Focus } else { Message::Blur };
            self.send(id, None, msg);
        } else if !slot.removed {
            slot.pending_focus = Some(focused);
        }
    }

    /// Routes a key to the focused widget, then to the dialog's own key map.
    pub fn handle_key(&mut self, key: KeyPress) -> MsgStatus {
        if let Some(id) = self.focused {
            if self.send(id, None, Message::Key(key)).is_handled() {
                return MsgStatus::Handled;
            }
        }
        match self.keymap.lookup(&key) {
            Command::Cancel => {
                self.close(DialogOutcome::Cancelled);
                MsgStatus::Handled
            }
            Command::NextWidget => {
                self.select_next_focus();
                MsgStatus::Handled
            }
            _ => MsgStatus::NotHandled,
        }
    }

    /// Moves and resizes the dialog; children move with its origin.
    pub fn resize(&mut self, rect: Rect) {
        let dy = i32::from(rect.y) - i32::from(self.rect.y);
        let dx = i32::from(rect.x) - i32::from(self.rect.x);
        tracing::trace!(target: TARGET, from = ?self.rect, to = ?rect, "resizing dialog");
        self.rect = rect;
        if (dy, dx) == (0, 0) {
            return;
        }
        for id in self.order.clone() {
            let Some(slot) = self.widgets.get_mut(id).filter(|s| !s.removed) else {
                continue;
            };
            match slot.widget.as_ref() {
                Some(w) => {
                    let moved = w.rect().shifted(dy, dx);
                    self.send(id, None, Message::Resize(moved));
                }
                None => {
                    slot.pending_shift.0 += dy;
                    slot.pending_shift.1 += dx;
                }
            }
        }
    }

    /// Closes the dialog.
    pub fn close(&mut self, outcome: DialogOutcome) {
        tracing::debug!(target: TARGET, ?outcome, "dialog closed");
        self.outcome = Some(outcome);
    }

    /// Sends `Destroy` to every child and drops them.
    pub fn destroy(&mut self) {
        for id in std::mem::take(&mut self.order) {
            self.send(id, None, Message::Destroy);
            self.widgets.remove(id);
        }
        self.focused = None;
    }

    fn insert_widget(&mut self, mut widget: Box<dyn Widget>, placement: Placement) -> WidgetId {
        let rel = widget.rect();
        let x = match placement {
            Placement::Relative => self.rect.x.saturating_add(rel.x),
            Placement::CenterHorizontal => self
                .rect
                .x
                .saturating_add(self.rect.cols.saturating_sub(rel.cols) / 2),
        };
        let abs = Rect::new(self.rect.y.saturating_add(rel.y), x, rel.lines, rel.cols);
        let id = self.widgets.insert(Slot {
            widget: None,
            pending_shift: (0, 0),
            pending_focus: None,
            removed: false,
        });
        widget.dispatch(&mut Context { dialog: self, id }, None, &Message::Resize(abs));
        if let Some(slot) = self.widgets.get_mut(id) {
            slot.widget = Some(widget);
        }
        self.order.push(id);
        tracing::trace!(target: TARGET, ?id, rect = ?abs, "added widget");
        id
    }

    fn remove_widget(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.order.retain(|&c| c != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        let slot = self.widgets.get_mut(id)?;
        if slot.widget.is_none() {
            slot.removed = true;
            return None;
        }
        self.widgets.remove(id).and_then(|s| s.widget)
    }

    /// Gives focus to `id`, sending `Blur`/`Focus` as needed.
    pub fn set_focus(&mut self, id: WidgetId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.focused == Some(id) {
            return true;
        }
        if let Some(old) = self.focused.take() {
            self.notify_focus(old, false);
        }
        self.focused = Some(id);
        self.notify_focus(id, true);
        true
    }

    /// Moves focus to the next focusable child after the focused one.
    pub fn select_next_focus(&mut self) {
        if self.order.is_empty() {
            self.focused = None;
            return;
        }
        let start = self
            .focused
            .and_then(|f| self.order.iter().position(|&c| c == f))
            .map_or(0, |p| p + 1);
        let n = self.order.len();
        let next = (0..n).map(|i| self.order[(start + i) % n]).find(|&id| {
            self.widgets
                .get(id)
                .and_then(|s| s.widget.as_ref())
                .is_some_and(|w| w.focusable())
        });
        if let Some(id) = next {
            self.set_focus(id);
        }
    }

    fn request_draw(&mut self, id: WidgetId) {
        tracing::trace!(target: TARGET, ?id, "redraw requested");
        self.redraws.push(id);
    }

    /// Renders the dialog: children placed by their rectangles.
    pub fn view(&self) -> String {
        let mut rows: Vec<Vec<(u16, String)>> = vec![Vec::new(); usize::from(self.rect.lines)];
        for &id in &self.order {
            let Some(w) = self.widgets.get(id).and_then(|s| s.widget.as_ref()) else {
                continue;
            };
            let r = w.rect();
            let rel_x = r.x.saturating_sub(self.rect.x);
            for (i, line) in w.view().lines().enumerate() {
                let Some(row) = (i32::from(r.y) - i32::from(self.rect.y))
                    .checked_add(i as i32)
                    .and_then(|y| usize::try_from(y).ok())
                else {
                    continue;
                };
                if let Some(cells) = rows.get_mut(row) {
                    cells.push((rel_x, line.to_string()));
                }
            }
        }

        let mut out = Vec::with_capacity(rows.len());
        for mut cells in rows {
            cells.sort_by_key(|(x, _)| *x);
            let mut line = String::new();
            let mut col = 0usize;
            for (x, text) in cells {
                let x = usize::from(x);
                if x < col {
                    continue;
                }
                line.push_str(&" ".repeat(x - col));
                col = x + strip_ansi_escapes::strip_str(&text).width();
                line.push_str(&text);
            }
            out.push(line);
        }
        out.join("\n")
    }
}

impl BubbleTeaModel for Dialog {
    fn init() -> (Self, Option<Cmd>) {
        (Dialog::new(Rect::new(0, 0, 24, 80)), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(KeyPress::from(key_msg));
        } else if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            let lines = u16::try_from(size.height).unwrap_or(u16::MAX);
            let cols = u16::try_from(size.width).unwrap_or(u16::MAX);
            self.set_screen_size(lines, cols);
        }
        self.outcome.map(|_| bubbletea_rs::quit())
    }

    fn view(&self) -> String {
        Dialog::view(self)
    }
}

/// The services a dialog offers to the widget currently dispatching.
pub struct Context<'a> {
    dialog: &'a mut Dialog,
    id: WidgetId,
}

impl Context<'_> {
    /// Id of the dispatching widget.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Sends a message with the dispatching widget as sender.
    pub fn send(&mut self, target: WidgetId, msg: Message) -> MsgStatus {
        let sender = Some(self.id);
        self.dialog.send(target, sender, msg)
    }

    /// Sends a message with an explicit sender.
    pub fn send_as(&mut self, target: WidgetId, sender: Option<WidgetId>, msg: Message) -> MsgStatus {
        self.dialog.send(target, sender, msg)
    }

    /// Looks `key` up in another widget's key map.
    ///
    /// Stale handles and widgets that are currently dispatching yield
    /// [`Command::Ignore`].
    pub fn lookup_key(&self, target: WidgetId, key: &KeyPress) -> Command {
        self.dialog
            .widgets
            .get(target)
            .filter(|s| !s.removed)
            .and_then(|s| s.widget.as_ref())
            .map_or(Command::Ignore, |w| w.keymap().lookup(key))
    }

    /// Whether `id` refers to a live child of the dialog.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.dialog.contains(id)
    }

    /// The owning dialog's rectangle.
    pub fn owner_rect(&self) -> Rect {
        self.dialog.rect
    }

    /// Terminal size as `(lines, cols)`.
    pub fn screen_size(&self) -> (u16, u16) {
        self.dialog.screen_size()
    }

    /// Resizes the owning dialog. Children, including the dispatching
    /// widget, follow its origin.
    pub fn resize_owner(&mut self, rect: Rect) {
        self.dialog.resize(rect);
    }

    /// Adds a child; its rectangle is relative to the dialog origin.
    ///
    /// The new child takes focus when it is focusable.
    pub fn add_child(&mut self, widget: Box<dyn Widget>, placement: Placement) -> WidgetId {
        let focusable = widget.focusable();
        let id = self.dialog.insert_widget(widget, placement);
        if focusable {
            self.dialog.set_focus(id);
        }
        id
    }

    /// Removes a child without destroying it.
    ///
    /// Returns `None` for stale ids and for a widget that is currently
    /// dispatching; the latter is destroyed once its dispatch returns.
    pub fn remove_child(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.dialog.remove_widget(id)
    }

    /// Removes a child and runs its `Destroy` handler.
    pub fn destroy_child(&mut self, id: WidgetId) {
        if let Some(mut widget) = self.dialog.remove_widget(id) {
            widget.dispatch(&mut Context { dialog: &mut *self.dialog, id }, None, &Message::Destroy);
        }
    }

    /// Moves focus to the next focusable child.
    pub fn select_next_focus(&mut self) {
        self.dialog.select_next_focus();
    }

    /// Gives focus to `id`. A dispatching widget, including the caller,
    /// receives its `Focus` or `Blur` message once its dispatch returns.
    pub fn set_focus(&mut self, id: WidgetId) -> bool {
        self.dialog.set_focus(id)
    }

    /// Whether `id` holds keyboard focus.
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.dialog.focused == Some(id)
    }

    /// Requests a redraw of one widget.
    pub fn draw(&mut self, id: WidgetId) {
        self.dialog.request_draw(id);
    }

    /// Requests a repaint of the whole screen.
    pub fn request_full_redraw(&mut self) {
        self.dialog.full_redraws += 1;
    }

    /// Items recorded under a history name.
    pub fn read_history(&self, name: &str) -> Vec<String> {
        self.dialog.history.load(name)
    }

    /// Records a history item.
    pub fn save_history(&mut self, name: &str, value: &str) {
        self.dialog.history.push(name, value);
    }

    /// Shows a modal error notice.
    pub fn notify_user(&mut self, text: &str) {
        tracing::error!(target: TARGET, text, "notice");
        self.dialog.notices.push(Notice {
            title: "Error".to_string(),
            text: text.to_string(),
        });
    }

    /// Closes the owning dialog.
    pub fn close(&mut self, outcome: DialogOutcome) {
        self.dialog.close(outcome);
    }
}
