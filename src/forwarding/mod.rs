//! A text input that forwards keys it does not use to a paired widget.
//!
//! [`ForwardingInput`] embeds a [`TextInput`] and holds a non-owning handle
//! of a paired widget, typically a list. For each key it:
//!
//! 1. remembers the buffer;
//! 2. applies the key itself if its own key map binds it to an editing
//!    command;
//! 3. otherwise, if the paired widget's key map recognises the key, forwards
//!    the key to it and takes its answer;
//! 4. otherwise lets the embedded input treat the key, which inserts
//!    printable characters;
//! 5. sends one `Notify` carrying the new buffer to the paired widget if the
//!    buffer changed.
//!
//! So arrows, page keys and Enter drive the list while the user types the
//! query, and every keystroke that edits the query re-filters the list.
//! Every other message goes to the embedded input.

#[cfg(test)]
mod tests;

use crate::dialog::Context;
use crate::input::TextInput;
use crate::key::KeyPress;
use crate::keymap::{Command, Keymap};
use crate::widget::{Message, MsgStatus, Rect, Widget, WidgetId};
use crate::Component;
use std::any::Any;

const TARGET: &str = "multisearch_widgets::forward";

/// A [`TextInput`] paired with another widget.
#[derive(Debug, Clone)]
pub struct ForwardingInput {
    input: TextInput,
    forward_to: Option<WidgetId>,
}

impl ForwardingInput {
    /// Creates an input paired with `forward_to`.
    pub fn new(
        rect: Rect,
        text: &str,
        history_name: Option<&str>,
        forward_to: Option<WidgetId>,
    ) -> Self {
        Self {
            input: TextInput::new(rect, text, history_name),
            forward_to,
        }
    }

    /// The embedded input.
    pub fn input(&self) -> &TextInput {
        &self.input
    }

    /// The embedded input, mutably.
    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    /// The paired widget.
    pub fn forward_to(&self) -> Option<WidgetId> {
        self.forward_to
    }

    /// The buffer contents.
    pub fn value(&self) -> String {
        self.input.value()
    }

    fn handle_key(&mut self, ctx: &mut Context<'_>, key: KeyPress) -> MsgStatus {
        let me = Some(ctx.id());
        let before = self.input.value();
        let mut status = MsgStatus::NotHandled;
        let mut offered_locally = false;

        if self.input.keymap().lookup(&key).is_local_input_command() {
            status = self.input.dispatch(ctx, me, &Message::Key(key));
            offered_locally = true;
        }

        if let (Some(target), false) = (self.forward_to, status.is_handled()) {
            if ctx.lookup_key(target, &key) != Command::Ignore {
                tracing::trace!(target: TARGET, widget = ?target, ?key, "forwarding key");
                status = ctx.send(target, Message::Key(key));
            }
        }

        if !offered_locally && !status.is_handled() {
            status = self.input.dispatch(ctx, me, &Message::Key(key));
        }

        if let Some(target) = self.forward_to {
            let after = self.input.value();
            if after != before {
                ctx.send(target, Message::Notify(after));
            }
        }
        status
    }
}

impl Widget for ForwardingInput {
    fn dispatch(
        &mut self,
        ctx: &mut Context<'_>,
        sender: Option<WidgetId>,
        msg: &Message,
    ) -> MsgStatus {
        match msg {
            Message::Key(key) => self.handle_key(ctx, *key),
            _ => self.input.dispatch(ctx, sender, msg),
        }
    }

    fn keymap(&self) -> &Keymap {
        self.input.keymap()
    }

    fn rect(&self) -> Rect {
        self.input.rect()
    }

    fn view(&self) -> String {
        self.input.view()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Component for ForwardingInput {
    fn focus(&mut self) -> Option<bubbletea_rs::Cmd> {
        self.input.focus()
    }

    fn blur(&mut self) {
        self.input.blur();
    }

    fn focused(&self) -> bool {
        self.input.focused()
    }
}
