//! Single-line text input widget.
//!
//! [`TextInput`] edits a one-line buffer with cursor motion, word-wise
//! deletion, kill-to-end/start, horizontal scrolling and history recall.
//! Keys are translated through the input key map
//! ([`input_keymap`](crate::keymap::input_keymap)); printable characters
//! that no binding claims are inserted at the cursor.
//!
//! With a history name, the input loads its recall list from the dialog on
//! `Init` and saves its final text on `Destroy`.
//!
//! ```rust
//! use multisearch_widgets::input::TextInput;
//! use multisearch_widgets::keymap::Command;
//! use multisearch_widgets::widget::Rect;
//!
//! let mut input = TextInput::new(Rect::new(0, 0, 1, 20), "hello world", None);
//! input.apply(Command::DeleteWordBackward);
//! assert_eq!(input.value(), "hello ");
//! ```

mod editing;
mod view;


use crate::dialog::Context;
use crate::keymap::{input_keymap, Keymap};
use crate::widget::{Message, MsgStatus, Rect, Widget, WidgetId};
use crate::Component;
use lipgloss_extras::prelude::*;
use std::any::Any;
use unicode_width::UnicodeWidthStr;

/// Styles of a text input.
#[derive(Debug, Clone)]
pub struct InputStyles {
    /// The prompt before the text.
    pub prompt: Style,
    /// The typed text.
    pub text: Style,
    /// The placeholder shown while the buffer is empty.
    pub placeholder: Style,
    /// The character under the cursor while focused.
    pub cursor: Style,
}

impl Default for InputStyles {
    fn default() -> Self {
        Self {
            prompt: Style::new(),
            text: Style::new(),
            placeholder: Style::new().foreground(Color::from("240")),
            cursor: Style::new()
                .foreground(Color::from("0"))
                .background(Color::from("252")),
        }
    }
}

/// A single-line text input.
#[derive(Debug, Clone)]
pub struct TextInput {
    /// Text shown before the buffer.
    pub prompt: String,
    /// Text shown while the buffer is empty.
    pub placeholder: String,
    /// Styles.
    pub styles: InputStyles,
    /// Maximum number of characters accepted; 0 means no limit.
    pub char_limit: usize,
    pub(super) value: Vec<char>,
    pub(super) pos: usize,
    pub(super) offset: usize,
    pub(super) offset_right: usize,
    pub(super) focus: bool,
    pub(super) rect: Rect,
    pub(super) keymap: Keymap,
    pub(super) history_name: Option<String>,
    pub(super) history: Vec<String>,
    pub(super) history_pos: usize,
}

impl TextInput {
    /// Creates an input occupying `rect` with initial text and an optional
    /// history name.
    pub fn new(rect: Rect, text: &str, history_name: Option<&str>) -> Self {
        let mut input = Self {
            prompt: String::new(),
            placeholder: String::new(),
            styles: InputStyles::default(),
            char_limit: 0,
            value: Vec::new(),
            pos: 0,
            offset: 0,
            offset_right: 0,
            focus: false,
            rect,
            keymap: input_keymap(),
            history_name: history_name.map(str::to_string),
            history: Vec::new(),
            history_pos: 0,
        };
        input.set_value(text);
        input
    }

    /// Sets the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self.handle_overflow();
        self
    }

    /// Sets the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Replaces the key map.
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Current rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Columns available for the buffer, after the prompt.
    pub fn width(&self) -> usize {
        usize::from(self.rect.cols).saturating_sub(UnicodeWidthStr::width(self.prompt.as_str()))
    }

    /// History name, if the input keeps history.
    pub fn history_name(&self) -> Option<&str> {
        self.history_name.as_deref()
    }

    /// The recall list, oldest item first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Replaces the recall list and resets the recall position.
    pub fn set_history(&mut self, items: Vec<String>) {
        self.history_pos = items.len();
        self.history = items;
    }
}

impl Widget for TextInput {
    fn dispatch(
        &mut self,
        ctx: &mut Context<'_>,
        _sender: Option<WidgetId>,
        msg: &Message,
    ) -> MsgStatus {
        match msg {
            Message::Init => {
                if let Some(name) = &self.history_name {
                    let items = ctx.read_history(name);
                    self.set_history(items);
                }
                MsgStatus::Handled
            }
            Message::Key(key) => {
                let command = self.keymap.lookup(key);
                let handled = if command.is_local_input_command() {
                    self.apply(command)
                } else if let Some(c) = key.printable() {
                    self.insert_str(&c.to_string());
                    true
                } else {
                    false
                };
                if handled {
                    ctx.draw(ctx.id());
                }
                MsgStatus::from_bool(handled)
            }
            Message::Action(command) if command.is_local_input_command() => {
                MsgStatus::from_bool(self.apply(*command))
            }
            Message::Resize(rect) => {
                self.rect = *rect;
                self.handle_overflow();
                MsgStatus::Handled
            }
            Message::Focus => {
                self.focus();
                MsgStatus::Handled
            }
            Message::Blur => {
                self.blur();
                MsgStatus::Handled
            }
            Message::Destroy => {
                if let Some(name) = &self.history_name {
                    ctx.save_history(name, &self.value());
                }
                MsgStatus::Handled
            }
            Message::Action(_) | Message::Notify(_) => MsgStatus::NotHandled,
        }
    }

    fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn view(&self) -> String {
        TextInput::view(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Component for TextInput {
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
