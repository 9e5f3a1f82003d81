//! Message handling of the base listbox.

use super::{ListAction, Listbox};
use crate::dialog::{Context, DialogOutcome};
use crate::key::KeyPress;
use crate::keymap::{Command, Keymap};
use crate::widget::{Message, MsgStatus, Rect, Widget, WidgetId};
use crate::Component;
use std::any::Any;

impl Listbox {
    /// Applies a navigation or editing command. Returns whether the command
    /// belongs to the list.
    pub fn execute(&mut self, ctx: &mut Context<'_>, command: Command) -> MsgStatus {
        let len = self.len();
        let page = self.page_size().saturating_sub(1).max(1);
        match command {
            Command::Up => {
                if len > 0 {
                    self.select(if self.selected == 0 { len - 1 } else { self.selected - 1 });
                }
            }
            Command::Down => {
                if len > 0 {
                    self.select(if self.selected + 1 >= len { 0 } else { self.selected + 1 });
                }
            }
            Command::Top => {
                self.select_first();
            }
            Command::Bottom => {
                self.select_last();
            }
            Command::PageUp => {
                self.select(self.selected.saturating_sub(page));
            }
            Command::PageDown => {
                self.select(self.selected.saturating_add(page));
            }
            Command::Delete if self.deletable() => {
                self.remove_current();
            }
            Command::Clear if self.deletable() => {
                self.remove_all();
            }
            Command::Enter => {
                if self.current().is_none() {
                    return MsgStatus::NotHandled;
                }
                self.accept(ctx);
                return MsgStatus::Handled;
            }
            _ => return MsgStatus::NotHandled,
        }
        ctx.draw(ctx.id());
        MsgStatus::Handled
    }

    fn accept(&mut self, ctx: &mut Context<'_>) {
        if self.run_callback() == ListAction::Done {
            ctx.close(DialogOutcome::Accepted);
        }
        ctx.draw(ctx.id());
    }

    fn handle_key(&mut self, ctx: &mut Context<'_>, key: &KeyPress) -> MsgStatus {
        let command = self.keymap.lookup(key);
        if command != Command::Ignore {
            return self.execute(ctx, command);
        }
        let Some(c) = key.printable() else {
            return MsgStatus::NotHandled;
        };
        let Some(row) = self.entries().position(|e| e.hotkey() == Some(c)) else {
            return MsgStatus::NotHandled;
        };
        self.select(row);
        self.accept(ctx);
        MsgStatus::Handled
    }
}

impl Widget for Listbox {
    fn dispatch(
        &mut self,
        ctx: &mut Context<'_>,
        _sender: Option<WidgetId>,
        msg: &Message,
    ) -> MsgStatus {
        match msg {
            Message::Key(key) => self.handle_key(ctx, key),
            Message::Action(command) => self.execute(ctx, *command),
            Message::Resize(rect) => {
                self.rect = *rect;
                self.keep_selection_visible();
                MsgStatus::Handled
            }
            Message::Focus => {
                self.focus();
                ctx.draw(ctx.id());
                MsgStatus::Handled
            }
            Message::Blur => {
                self.blur();
                ctx.draw(ctx.id());
                MsgStatus::Handled
            }
            Message::Destroy => {
                self.set_entries(Vec::new());
                MsgStatus::Handled
            }
            Message::Init | Message::Notify(_) => MsgStatus::NotHandled,
        }
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn view(&self) -> String {
        Listbox::view(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
