//! A listbox with live multi-term filtering.
//!
//! [`FilteringListbox`] embeds a [`Listbox`] and adds a filter state. Sending
//! it `Message::Action(Command::MultiSearch)` (or pressing a key bound to
//! [`Command::MultiSearch`]) toggles the state:
//!
//! - entering: the dialog makes one line of room, a [`ForwardingInput`]
//!   paired with the list appears right below it and takes focus, and every
//!   entry moves into a shadow list;
//! - while filtered: each `Notify` from the input re-filters the visible
//!   rows with the input's text, see [`Query`];
//! - leaving: the input is destroyed, the line is given back and the shadow
//!   list becomes the list again, in its unfiltered order.
//!
//! Every other message falls through to the embedded listbox.

mod query;

#[cfg(test)]
mod tests;

pub use query::{Query, SourceKinds, DEFAULT_MAX_TERMS};

use crate::dialog::Context;
use crate::error::{Result, WidgetError};
use crate::forwarding::ForwardingInput;
use crate::keymap::{Command, Keymap};
use crate::listbox::{Entry, Listbox, SelectCallback};
use crate::widget::{Message, MsgStatus, Placement, Rect, Widget, WidgetId};
use crate::Component;
use std::any::Any;

const TARGET: &str = "multisearch_widgets::filter";

/// Text of the notice raised when a filter state change fails.
pub const INTERNAL_ERROR_NOTICE: &str = "An internal error #3 occurred (filtered listbox support).";

/// How the dialog makes room for the filter input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ResizePolicy {
    /// Grow the dialog upward by one line.
    #[default]
    ExtendContainer = 0,
    /// Shrink the list instead when the dialog is already tall.
    KeepContainerSize = 1,
    /// Shrink the list instead when the grown dialog would not fit the
    /// screen.
    AutoDecideBySpace = 2,
}

/// Size limits consulted by [`ResizePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeThresholds {
    /// With [`ResizePolicy::KeepContainerSize`], dialogs taller than this
    /// keep their size.
    pub keep_min_dialog_lines: u16,
    /// With [`ResizePolicy::AutoDecideBySpace`], the dialog keeps its size
    /// unless the screen has more than this many spare lines.
    pub auto_screen_margin: u16,
}

impl Default for ResizeThresholds {
    fn default() -> Self {
        Self {
            keep_min_dialog_lines: 7,
            auto_screen_margin: 2,
        }
    }
}

/// Filtering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Enter the filter state as soon as the list is initialised.
    pub start_with_filter: bool,
    /// Maximum number of query terms.
    pub max_terms: usize,
    /// Resize limits.
    pub thresholds: ResizeThresholds,
    /// Text of the row shown when nothing matches.
    pub placeholder: String,
    /// History name of the filter input.
    pub history_name: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            start_with_filter: false,
            max_terms: DEFAULT_MAX_TERMS,
            thresholds: ResizeThresholds::default(),
            placeholder: "<no search results>".to_string(),
            history_name: "multi_search".to_string(),
        }
    }
}

impl FilterConfig {
    /// Sets whether filtering starts active.
    pub fn with_start_with_filter(mut self, start: bool) -> Self {
        self.start_with_filter = start;
        self
    }

    /// Sets the maximum number of query terms.
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Sets the resize limits.
    pub fn with_thresholds(mut self, thresholds: ResizeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the "no search results" text.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Sets the history name of the filter input.
    pub fn with_history_name(mut self, name: impl Into<String>) -> Self {
        self.history_name = name.into();
        self
    }
}

/// A [`Listbox`] extended with a toggleable live filter.
#[derive(Debug)]
pub struct FilteringListbox {
    list: Listbox,
    initialized: bool,
    resize_policy: ResizePolicy,
    config: FilterConfig,
    input: Option<WidgetId>,
}

impl FilteringListbox {
    /// Creates an empty filtering list.
    pub fn new(
        rect: Rect,
        deletable: bool,
        callback: Option<SelectCallback>,
        resize_policy: ResizePolicy,
    ) -> Self {
        Self {
            list: Listbox::new(rect, deletable, callback),
            initialized: false,
            resize_policy,
            config: FilterConfig::default(),
            input: None,
        }
    }

    /// Replaces the filtering options.
    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    /// The embedded listbox.
    pub fn list(&self) -> &Listbox {
        &self.list
    }

    /// The embedded listbox, mutably.
    pub fn list_mut(&mut self) -> &mut Listbox {
        &mut self.list
    }

    /// Filtering options.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// How room is made for the filter input.
    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize_policy
    }

    /// Whether the filter state is active.
    pub fn is_filtered(&self) -> bool {
        self.list.is_filtered()
    }

    /// The filter input, while one is attached.
    pub fn input(&self) -> Option<WidgetId> {
        self.input
    }

    /// Moves every entry into the shadow list; all of them stay visible.
    pub fn set_filter_state(&mut self) -> Result<()> {
        if self.is_filtered() {
            return Err(WidgetError::AlreadyFiltered);
        }
        let query = Query::parse("", self.config.max_terms);
        let placeholder = Entry::placeholder(self.config.placeholder.clone());
        self.list.enter_filter(query, placeholder);
        tracing::debug!(target: TARGET, entries = self.list.contents().owned().len(), "filter state entered");
        Ok(())
    }

    /// Reinstates the shadow list as the list.
    pub fn set_normal_state(&mut self) -> Result<()> {
        if !self.is_filtered() {
            return Err(WidgetError::NotFiltered);
        }
        self.list.leave_filter();
        tracing::debug!(target: TARGET, entries = self.list.len(), "filter state left");
        Ok(())
    }

    /// Leaves the filter state if active. Returns whether a change happened.
    pub fn ensure_unfiltered(&mut self) -> bool {
        self.set_normal_state().is_ok()
    }

    /// Re-filters the visible rows with `text`. Returns `false` when the
    /// filter state is not active.
    pub fn filter(&mut self, text: &str) -> bool {
        let query = Query::parse(text, self.config.max_terms);
        let applied = self.list.apply_query(query);
        if applied {
            tracing::trace!(target: TARGET, query = text, rows = self.list.len(), "filtered");
        }
        applied
    }

    fn toggle(&mut self, ctx: &mut Context<'_>) {
        let result = if self.is_filtered() {
            self.hide_input(ctx);
            self.set_normal_state()
        } else {
            self.show_input(ctx);
            self.set_filter_state()
        };
        if let Err(err) = result {
            tracing::error!(target: TARGET, %err, "filter toggle failed");
            ctx.notify_user(INTERNAL_ERROR_NOTICE);
        }
    }

    /// Grows (or gives back) one line for the filter input. Returns the
    /// number of lines the dialog changed by.
    fn make_one_line_room(&mut self, ctx: &mut Context<'_>, grow: bool) -> u16 {
        let owner = ctx.owner_rect();
        let list = self.list.rect();
        let (screen_lines, _) = ctx.screen_size();
        let limits = self.config.thresholds;

        let keep_size = match self.resize_policy {
            ResizePolicy::AutoDecideBySpace => {
                screen_lines <= owner.lines.saturating_add(limits.auto_screen_margin)
            }
            ResizePolicy::KeepContainerSize => owner.lines > limits.keep_min_dialog_lines,
            ResizePolicy::ExtendContainer => false,
        };
        let take: u16 = if keep_size { 0 } else { 1 };

        let (dialog_rect, list_lines) = if grow {
            (
                Rect {
                    y: owner.y.saturating_sub(take),
                    lines: owner.lines + take,
                    ..owner
                },
                (list.lines + take).saturating_sub(1),
            )
        } else {
            (
                Rect {
                    y: owner.y + take,
                    lines: owner.lines.saturating_sub(take),
                    ..owner
                },
                list.lines + 1 - take,
            )
        };
        tracing::trace!(target: TARGET, grow, take, ?dialog_rect, list_lines, "making room for the filter input");

        // A plain resize message; resizing through the dialog would redraw it.
        self.list.dispatch(
            ctx,
            None,
            &Message::Resize(Rect {
                lines: list_lines,
                ..list
            }),
        );
        ctx.resize_owner(dialog_rect);
        take
    }

    fn show_input(&mut self, ctx: &mut Context<'_>) {
        let owner = ctx.owner_rect();
        let list = self.list.rect();
        let distance_y = owner.bottom().saturating_sub(list.bottom()) + 1;
        let distance_x: u16 = if list.cols > 40 { 5 } else { 1 };
        let small: u16 = if list.cols <= 15 { 1 } else { 0 };

        self.make_one_line_room(ctx, true);
        self.list.center_selection_if_hidden();

        let y = ctx.owner_rect().lines.saturating_sub(distance_y);
        let width = (list.cols + small).saturating_sub(2 + distance_x).max(1);
        let input = ForwardingInput::new(
            Rect::new(y, distance_x, 1, width),
            "",
            Some(self.config.history_name.as_str()),
            Some(ctx.id()),
        );
        let id = ctx.add_child(Box::new(input), Placement::CenterHorizontal);
        ctx.send(id, Message::Init);
        self.input = Some(id);

        ctx.draw(ctx.id());
        ctx.draw(id);
    }

    fn hide_input(&mut self, ctx: &mut Context<'_>) {
        let Some(id) = self.input.take() else {
            return;
        };
        if !ctx.contains(id) {
            tracing::debug!(target: TARGET, ?id, "filter input already gone");
            return;
        }
        ctx.destroy_child(id);
        let take = self.make_one_line_room(ctx, false);
        ctx.select_next_focus();
        ctx.set_focus(ctx.id());
        if take != 0 || self.resize_policy != ResizePolicy::KeepContainerSize {
            ctx.request_full_redraw();
        }
        ctx.draw(ctx.id());
    }

    fn handle_init(&mut self, ctx: &mut Context<'_>) {
        if self.initialized {
            return;
        }
        if self.config.start_with_filter {
            self.toggle(ctx);
        } else {
            self.list.init_indices();
        }
        self.initialized = true;
    }

    fn teardown(&mut self, ctx: &mut Context<'_>) {
        if self.is_filtered() {
            self.hide_input(ctx);
            self.ensure_unfiltered();
        }
    }
}

impl Widget for FilteringListbox {
    fn dispatch(
        &mut self,
        ctx: &mut Context<'_>,
        sender: Option<WidgetId>,
        msg: &Message,
    ) -> MsgStatus {
        let status = match msg {
            Message::Init => {
                self.handle_init(ctx);
                MsgStatus::Handled
            }
            Message::Action(Command::MultiSearch) => {
                self.toggle(ctx);
                MsgStatus::Handled
            }
            Message::Key(key) if self.list.keymap().lookup(key) == Command::MultiSearch => {
                self.dispatch(ctx, None, &Message::Action(Command::MultiSearch))
            }
            Message::Notify(text) => {
                let status = MsgStatus::from_bool(self.filter(text));
                ctx.draw(ctx.id());
                if let Some(sender) = sender {
                    ctx.draw(sender);
                }
                status
            }
            Message::Destroy => {
                self.teardown(ctx);
                MsgStatus::NotHandled
            }
            _ => MsgStatus::NotHandled,
        };
        if status.is_handled() {
            return status;
        }
        self.list.dispatch(ctx, sender, msg)
    }

    fn keymap(&self) -> &Keymap {
        self.list.keymap()
    }

    fn rect(&self) -> Rect {
        self.list.rect()
    }

    fn view(&self) -> String {
        self.list.view()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Component for FilteringListbox {
    fn focus(&mut self) -> Option<bubbletea_rs::Cmd> {
        self.list.focus()
    }

    fn blur(&mut self) {
        self.list.blur();
    }

    fn focused(&self) -> bool {
        self.list.focused()
    }
}
