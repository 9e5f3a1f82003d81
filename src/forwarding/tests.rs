//! Tests for the forwarding input.

#[cfg(test)]
mod tests {
    use crate::dialog::{Context, Dialog, DialogOutcome};
    use crate::forwarding::ForwardingInput;
    use crate::keymap::{listbox_keymap, Command, Keymap};
    use crate::listbox::Listbox;
    use crate::widget::{Message, MsgStatus, Rect, Widget, WidgetId};
    use crossterm::event::KeyCode;
    use std::any::Any;

    /// Paired widget that records keys and notifications.
    struct Recorder {
        keymap: Keymap,
        rect: Rect,
        seen: Vec<(Option<WidgetId>, Message)>,
    }

    impl Widget for Recorder {
        fn dispatch(
            &mut self,
            _ctx: &mut Context<'_>,
            sender: Option<WidgetId>,
            msg: &Message,
        ) -> MsgStatus {
            match msg {
                Message::Key(key) => {
                    self.seen.push((sender, msg.clone()));
                    MsgStatus::from_bool(self.keymap.lookup(key) != Command::Ignore)
                }
                Message::Notify(_) => {
                    self.seen.push((sender, msg.clone()));
                    MsgStatus::Handled
                }
                Message::Resize(r) => {
                    self.rect = *r;
                    MsgStatus::Handled
                }
                _ => MsgStatus::NotHandled,
            }
        }

        fn keymap(&self) -> &Keymap {
            &self.keymap
        }

        fn rect(&self) -> Rect {
            self.rect
        }

        fn view(&self) -> String {
            String::new()
        }

        fn focusable(&self) -> bool {
            false
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn setup(text: &str) -> (Dialog, WidgetId, WidgetId) {
        let mut d = Dialog::new(Rect::new(0, 0, 8, 30));
        let target = d.add(Recorder {
            keymap: listbox_keymap(),
            rect: Rect::new(0, 0, 5, 20),
            seen: Vec::new(),
        });
        let input = d.add(ForwardingInput::new(Rect::new(5, 0, 1, 20), text, None, Some(target)));
        d.run_init();
        (d, target, input)
    }

    fn seen(d: &Dialog, target: WidgetId) -> &[(Option<WidgetId>, Message)] {
        &d.widget::<Recorder>(target).unwrap().seen
    }

    fn value(d: &Dialog, input: WidgetId) -> String {
        d.widget::<ForwardingInput>(input).unwrap().value()
    }

    #[test]
    fn test_list_keys_are_forwarded_without_notify() {
        let (mut d, target, input) = setup("abc");
        assert_eq!(d.focused(), Some(input));

        assert!(d.handle_key(KeyCode::Down.into()).is_handled());
        assert_eq!(seen(&d, target), [(Some(input), Message::Key(KeyCode::Down.into()))]);
        assert_eq!(value(&d, input), "abc");
    }

    #[test]
    fn test_typed_character_sends_one_notify_from_input() {
        let (mut d, target, input) = setup("");
        assert!(d.handle_key(KeyCode::Char('a').into()).is_handled());
        assert_eq!(value(&d, input), "a");
        assert_eq!(seen(&d, target), [(Some(input), Message::Notify("a".into()))]);
    }

    #[test]
    fn test_local_commands_stay_local() {
        let (mut d, target, input) = setup("abc");

        assert!(d.handle_key(KeyCode::Home.into()).is_handled());
        assert_eq!(d.widget::<ForwardingInput>(input).unwrap().input().position(), 0);
        assert!(d.handle_key(KeyCode::Left.into()).is_handled());
        assert!(seen(&d, target).is_empty());

        d.handle_key(KeyCode::Delete.into());
        assert_eq!(value(&d, input), "bc");
        assert_eq!(seen(&d, target), [(Some(input), Message::Notify("bc".into()))]);
    }

    #[test]
    fn test_key_nobody_binds_is_not_handled() {
        let (mut d, target, input) = setup("abc");
        assert!(!d.handle_key(KeyCode::F(5).into()).is_handled());
        assert!(seen(&d, target).is_empty());
        assert_eq!(value(&d, input), "abc");
    }

    #[test]
    fn test_enter_reaches_paired_list() {
        let mut d = Dialog::new(Rect::new(0, 0, 8, 30));
        let mut list = Listbox::new(Rect::new(0, 0, 5, 20), false, None);
        list.append("only");
        let list = d.add(list);
        let input = d.add(ForwardingInput::new(Rect::new(5, 0, 1, 20), "", None, Some(list)));
        d.run_init();
        d.set_focus(input);

        d.handle_key(KeyCode::Enter.into());
        assert_eq!(d.outcome(), Some(DialogOutcome::Accepted));
    }

    #[test]
    fn test_stale_pair_is_harmless() {
        let mut d = Dialog::new(Rect::new(0, 0, 8, 30));
        let input = d.add(ForwardingInput::new(
            Rect::new(0, 0, 1, 20),
            "",
            None,
            Some(WidgetId::default()),
        ));
        d.run_init();

        assert!(d.handle_key(KeyCode::Char('q').into()).is_handled());
        assert!(!d.handle_key(KeyCode::Down.into()).is_handled());
        assert_eq!(value(&d, input), "q");
    }

    #[test]
    fn test_unpaired_input_edits_normally() {
        let mut d = Dialog::new(Rect::new(0, 0, 8, 30));
        let input = d.add(ForwardingInput::new(Rect::new(0, 0, 1, 20), "x", None, None));
        d.run_init();
        d.handle_key(KeyCode::Char('y').into());
        d.handle_key(KeyCode::Backspace.into());
        d.handle_key(KeyCode::Backspace.into());
        assert_eq!(value(&d, input), "");
    }
}
