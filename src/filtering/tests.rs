//! Tests for filtering.

#[cfg(test)]
mod tests {
    use crate::dialog::{Dialog, History};
    use crate::error::WidgetError;
    use crate::filtering::{FilterConfig, FilteringListbox, Query, ResizePolicy, SourceKinds};
    use crate::forwarding::ForwardingInput;
    use crate::key::KeyPress;
    use crate::keymap::Command;
    use crate::listbox::{Entry, InsertMode, Payload, NO_RESULTS_INDEX};
    use crate::widget::{Message, Rect, Widget, WidgetId};
    use crate::Component;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const FILES: [&str; 5] = ["main.c", "main.h", "util.c", "README", "notes.txt"];

    fn entries(texts: &[&'static str]) -> Vec<Entry> {
        texts.iter().map(|&t| Entry::new(t, None, None)).collect()
    }

    fn files(policy: ResizePolicy) -> FilteringListbox {
        let mut fl = FilteringListbox::new(Rect::new(1, 2, 9, 56), false, None, policy);
        for (i, name) in FILES.iter().enumerate() {
            let hotkey = char::from_digit(i as u32, 10);
            fl.list_mut().insert(*name, hotkey, None, InsertMode::AppendEnd);
        }
        fl
    }

    fn texts(fl: &FilteringListbox) -> Vec<&str> {
        fl.list().entries().map(|e| e.text()).collect()
    }

    fn setup(policy: ResizePolicy, screen_lines: u16) -> (Dialog, WidgetId) {
        let mut d = Dialog::new(Rect::new(4, 10, 12, 60)).with_screen_size(screen_lines, 120);
        let id = d.add(files(policy));
        d.run_init();
        (d, id)
    }

    fn fl(d: &Dialog, id: WidgetId) -> &FilteringListbox {
        d.widget::<FilteringListbox>(id).unwrap()
    }

    fn toggle(d: &mut Dialog, id: WidgetId) {
        d.send(id, None, Message::Action(Command::MultiSearch));
    }

    fn type_text(d: &mut Dialog, text: &str) {
        for c in text.chars() {
            d.handle_key(KeyCode::Char(c).into());
        }
    }

    #[test]
    fn test_special_terms_need_source_files() {
        let src = entries(&["foo.c", "foo.h", "bar.txt", "baz.cpp~"]);
        assert_eq!(Query::parse("h", 10).evaluate(&src), vec![1]);
        assert_eq!(Query::parse("c", 10).evaluate(&src), vec![0, 3]);
        assert_eq!(Query::parse("foo c", 10).evaluate(&src), vec![0]);

        let prose = entries(&["chapter", "hello", "xyz"]);
        assert_eq!(SourceKinds::detect(&prose), SourceKinds::default());
        assert_eq!(Query::parse("c", 10).evaluate(&prose), vec![0]);
        assert_eq!(Query::parse("h", 10).evaluate(&prose), vec![0, 1]);
    }

    #[test]
    fn test_only_headers_detected_makes_c_match_nothing() {
        let list = entries(&["a.h", "c-notes"]);
        let kinds = SourceKinds::detect(&list);
        assert!(kinds.header_files && !kinds.c_files);
        assert!(Query::parse("c", 10).evaluate(&list).is_empty());
    }

    #[test]
    fn test_terms_are_case_insensitive_substrings() {
        let list = entries(&["ReadMe.md", "Makefile", "readme.txt"]);
        assert_eq!(Query::parse("README", 10).evaluate(&list), vec![0, 2]);
        assert_eq!(Query::parse("read txt", 10).evaluate(&list), vec![2]);
        assert_eq!(Query::parse("", 10).evaluate(&list), vec![0, 1, 2]);
    }

    #[test]
    fn test_repeated_spaces_give_empty_terms() {
        let q = Query::parse("foo  c", 10);
        assert_eq!(q.terms().collect::<Vec<_>>(), ["foo", "", "c"]);
        let list = entries(&["foo.c", "foo.h"]);
        assert_eq!(q.evaluate(&list), vec![0]);
    }

    #[test]
    fn test_max_terms_keeps_rest_in_last_term() {
        let q = Query::parse("a b c", 2);
        assert_eq!(q.terms().collect::<Vec<_>>(), ["a", "b c"]);
        assert_eq!(q.text(), "a b c");
        let list = entries(&["a b c", "a c b"]);
        assert_eq!(q.evaluate(&list), vec![0]);
    }

    #[test]
    fn test_round_trip_restores_order_hotkeys_and_payloads() {
        let shared = Arc::new(String::from("client data"));
        let mut fl = files(ResizePolicy::ExtendContainer);
        fl.list_mut()
            .insert("lib.c", Some('l'), Some(Payload::shared(shared.clone())), InsertMode::AppendEnd);

        fl.set_filter_state().unwrap();
        assert!(fl.is_filtered());
        assert_eq!(fl.list().len(), 6);
        assert!(fl.filter("c"));
        assert_eq!(texts(&fl), ["main.c", "util.c", "lib.c"]);
        assert!(fl.filter("zzz"));
        fl.set_normal_state().unwrap();

        assert!(!fl.is_filtered());
        assert_eq!(texts(&fl), ["main.c", "main.h", "util.c", "README", "notes.txt", "lib.c"]);
        let hotkeys: Vec<Option<char>> = fl.list().entries().map(|e| e.hotkey()).collect();
        assert_eq!(hotkeys[..2], [Some('0'), Some('1')]);
        assert_eq!(hotkeys[5], Some('l'));

        let payload = fl.list().get(5).and_then(|e| e.payload()).unwrap();
        assert!(!payload.is_owned());
        assert!(std::ptr::eq(payload.downcast_ref::<String>().unwrap(), &*shared));
        assert_eq!(Arc::strong_count(&shared), 2);
    }

    #[test]
    fn test_entering_filter_stamps_indices() {
        let mut fl = files(ResizePolicy::ExtendContainer);
        fl.set_filter_state().unwrap();
        fl.filter("util");
        assert_eq!(fl.list().get(0).map(Entry::index), Some(2));
        assert_eq!(fl.list().virtual_pos(), Some(2));
    }

    #[test]
    fn test_matching_is_idempotent() {
        let mut fl = files(ResizePolicy::ExtendContainer);
        fl.set_filter_state().unwrap();
        fl.filter("main");
        let first = texts(&fl).join(",");
        fl.filter("main");
        assert_eq!(texts(&fl).join(","), first);
        assert_eq!(first, "main.c,main.h");
    }

    #[test]
    fn test_no_match_shows_single_placeholder() {
        let mut fl = files(ResizePolicy::ExtendContainer);
        fl.set_filter_state().unwrap();
        fl.filter("nothing here");

        assert_eq!(fl.list().len(), 1);
        let row = fl.list().get(0).unwrap();
        assert!(row.is_placeholder());
        assert_eq!(row.text(), "<no search results>");
        assert!(fl.list().current().is_none());
        assert!(fl.list().search_text("<no search results>").is_none());

        assert!(fl.list_mut().remove_current().is_none());
        assert_eq!(fl.list().contents().owned().len(), 5);
    }

    #[test]
    fn test_custom_placeholder_text() {
        let mut fl = files(ResizePolicy::ExtendContainer)
            .with_config(FilterConfig::default().with_placeholder("(none)"));
        fl.set_filter_state().unwrap();
        fl.filter("qqq");
        assert_eq!(fl.list().get(0).map(Entry::text), Some("(none)"));
    }

    #[test]
    fn test_insert_and_remove_while_filtered_use_shadow() {
        let mut fl = files(ResizePolicy::ExtendContainer);
        fl.set_filter_state().unwrap();
        fl.filter("main");

        fl.list_mut().append("main.rs");
        assert_eq!(texts(&fl), ["main.c", "main.h", "main.rs"]);
        fl.list_mut().append("other");
        assert_eq!(fl.list().len(), 3);

        fl.list_mut().select(1);
        let removed = fl.list_mut().remove_current().unwrap();
        assert_eq!(removed.text(), "main.h");

        fl.set_normal_state().unwrap();
        assert_eq!(texts(&fl), ["main.c", "util.c", "README", "notes.txt", "main.rs", "other"]);
    }

    #[test]
    fn test_leaving_keeps_selected_entry() {
        let mut fl = files(ResizePolicy::ExtendContainer);
        fl.set_filter_state().unwrap();
        fl.filter("t");
        assert_eq!(texts(&fl), ["util.c", "notes.txt"]);
        fl.list_mut().select(1);
        fl.set_normal_state().unwrap();
        assert_eq!(fl.list().current().map(|(t, _)| t), Some("notes.txt"));
    }

    #[test]
    fn test_state_changes_are_checked() {
        let mut fl = files(ResizePolicy::ExtendContainer);
        assert!(matches!(fl.set_normal_state(), Err(WidgetError::NotFiltered)));
        assert!(!fl.ensure_unfiltered());
        assert!(!fl.filter("main"));

        fl.set_filter_state().unwrap();
        assert!(matches!(fl.set_filter_state(), Err(WidgetError::AlreadyFiltered)));
        assert!(fl.ensure_unfiltered());
        assert!(!fl.is_filtered());
    }

    #[test]
    fn test_toggle_grows_dialog_and_adds_focused_input() {
        let (mut d, id) = setup(ResizePolicy::ExtendContainer, 40);
        assert_eq!(fl(&d, id).rect(), Rect::new(5, 12, 9, 56));

        toggle(&mut d, id);

        assert!(fl(&d, id).is_filtered());
        assert_eq!(d.children().len(), 2);
        assert_eq!(d.rect(), Rect::new(3, 10, 13, 60));
        assert_eq!(fl(&d, id).rect(), Rect::new(4, 12, 9, 56));

        let input = fl(&d, id).input().unwrap();
        let field = d.widget::<ForwardingInput>(input).unwrap();
        assert_eq!(field.input().rect(), Rect::new(13, 15, 1, 49));
        assert_eq!(field.forward_to(), Some(id));
        assert_eq!(field.input().history_name(), Some("multi_search"));
        assert!(field.focused());
        assert_eq!(d.focused(), Some(input));
        assert!(!fl(&d, id).focused());
    }

    #[test]
    fn test_typing_filters_and_toggling_back_restores_everything() {
        let (mut d, id) = setup(ResizePolicy::ExtendContainer, 40);
        toggle(&mut d, id);
        type_text(&mut d, "util");
        assert_eq!(texts(fl(&d, id)), ["util.c"]);

        d.handle_key(KeyPress::new(KeyCode::Char(' '), KeyModifiers::CONTROL));

        assert!(!fl(&d, id).is_filtered());
        assert_eq!(fl(&d, id).input(), None);
        assert_eq!(d.children(), &[id]);
        assert_eq!(d.rect(), Rect::new(4, 10, 12, 60));
        assert_eq!(fl(&d, id).rect(), Rect::new(5, 12, 9, 56));
        assert_eq!(d.focused(), Some(id));
        assert!(fl(&d, id).focused());
        assert_eq!(d.full_redraw_count(), 1);
        assert_eq!(texts(fl(&d, id)), FILES);
        assert_eq!(fl(&d, id).list().current().map(|(t, _)| t), Some("util.c"));
        assert_eq!(d.history().load("multi_search"), vec!["util"]);
    }

    #[test]
    fn test_keep_container_size_shrinks_list_instead() {
        let (mut d, id) = setup(ResizePolicy::KeepContainerSize, 40);
        toggle(&mut d, id);

        assert_eq!(d.rect(), Rect::new(4, 10, 12, 60));
        assert_eq!(fl(&d, id).rect(), Rect::new(5, 12, 8, 56));
        let input = fl(&d, id).input().unwrap();
        assert_eq!(d.widget::<ForwardingInput>(input).unwrap().input().rect().y, 13);

        toggle(&mut d, id);
        assert_eq!(fl(&d, id).rect(), Rect::new(5, 12, 9, 56));
        assert_eq!(d.full_redraw_count(), 0);
    }

    #[test]
    fn test_keep_container_size_grows_small_dialogs() {
        let mut d = Dialog::new(Rect::new(4, 10, 7, 60)).with_screen_size(40, 120);
        let id = d.add(
            FilteringListbox::new(Rect::new(1, 2, 4, 56), false, None, ResizePolicy::KeepContainerSize),
        );
        d.run_init();
        toggle(&mut d, id);
        assert_eq!(d.rect(), Rect::new(3, 10, 8, 60));
        assert_eq!(fl(&d, id).rect().lines, 4);
    }

    #[test]
    fn test_auto_decide_depends_on_screen_space() {
        let (mut d, id) = setup(ResizePolicy::AutoDecideBySpace, 14);
        toggle(&mut d, id);
        assert_eq!(d.rect().lines, 12);
        assert_eq!(fl(&d, id).rect().lines, 8);
        toggle(&mut d, id);
        assert_eq!(fl(&d, id).rect().lines, 9);
        assert_eq!(d.full_redraw_count(), 1);

        let (mut d, id) = setup(ResizePolicy::AutoDecideBySpace, 15);
        toggle(&mut d, id);
        assert_eq!(d.rect().lines, 13);
        assert_eq!(fl(&d, id).rect().lines, 9);
    }

    #[test]
    fn test_forwarded_keys_move_selection_while_filtering() {
        let (mut d, id) = setup(ResizePolicy::ExtendContainer, 40);
        toggle(&mut d, id);
        type_text(&mut d, "main");
        d.handle_key(KeyCode::Down.into());
        assert_eq!(fl(&d, id).list().current().map(|(t, _)| t), Some("main.h"));

        let input = fl(&d, id).input().unwrap();
        assert_eq!(d.widget::<ForwardingInput>(input).unwrap().value(), "main");
    }

    #[test]
    fn test_start_with_filter_and_history_recall() {
        let mut history = History::new();
        history.push("multi_search", "notes");
        let mut d = Dialog::new(Rect::new(4, 10, 12, 60))
            .with_screen_size(40, 120)
            .with_history(history);
        let id = d.add(
            files(ResizePolicy::ExtendContainer)
                .with_config(FilterConfig::default().with_start_with_filter(true)),
        );
        d.run_init();

        assert!(fl(&d, id).is_filtered());
        assert_eq!(d.children().len(), 2);
        let input = fl(&d, id).input().unwrap();
        assert_eq!(d.focused(), Some(input));

        d.handle_key(KeyPress::new(KeyCode::Char('p'), KeyModifiers::ALT));
        assert_eq!(texts(fl(&d, id)), ["notes.txt"]);
    }

    #[test]
    fn test_notify_redraws_list_and_sender() {
        let (mut d, id) = setup(ResizePolicy::ExtendContainer, 40);
        toggle(&mut d, id);
        let input = fl(&d, id).input().unwrap();
        d.take_redraws();

        d.send(id, Some(input), Message::Notify("readme".into()));
        assert_eq!(texts(fl(&d, id)), ["README"]);
        assert_eq!(d.take_redraws(), vec![id, input]);
    }

    #[test]
    fn test_destroy_after_filter_cycles_drops_each_payload_once() {
        let drops = Arc::new(AtomicUsize::new(0));

        struct Counted(Arc<AtomicUsize>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut d = Dialog::new(Rect::new(4, 10, 12, 60)).with_screen_size(40, 120);
        let mut list = FilteringListbox::new(Rect::new(1, 2, 9, 56), false, None, ResizePolicy::ExtendContainer);
        for name in ["a.c", "b.c", "c.h"] {
            list.list_mut().insert(
                name,
                None,
                Some(Payload::owned(Counted(drops.clone()))),
                InsertMode::AppendEnd,
            );
        }
        let id = d.add(list);
        d.run_init();

        for query in ["a", "zz", "c"] {
            toggle(&mut d, id);
            type_text(&mut d, query);
            toggle(&mut d, id);
            assert!(!fl(&d, id).is_filtered());
            assert_eq!(texts(fl(&d, id)), ["a.c", "b.c", "c.h"]);
        }
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        toggle(&mut d, id);
        type_text(&mut d, "h");
        assert_eq!(texts(fl(&d, id)), ["c.h"]);
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        d.destroy();
        assert_eq!(drops.load(Ordering::SeqCst), 3);
        assert!(d.children().is_empty());
        assert_eq!(d.history().load("multi_search"), vec!["a", "zz", "c", "h"]);
    }

    #[test]
    fn test_toggle_on_empty_list() {
        let mut d = Dialog::new(Rect::new(4, 10, 12, 60)).with_screen_size(40, 120);
        let id = d.add(FilteringListbox::new(
            Rect::new(1, 2, 9, 56),
            false,
            None,
            ResizePolicy::ExtendContainer,
        ));
        d.run_init();
        assert!(fl(&d, id).list().is_empty());

        toggle(&mut d, id);
        assert!(fl(&d, id).is_filtered());
        assert!(fl(&d, id).list().contents().owned().is_empty());
        assert_eq!(d.rect(), Rect::new(3, 10, 13, 60));
        assert_eq!(fl(&d, id).rect(), Rect::new(4, 12, 9, 56));

        type_text(&mut d, "x");
        assert_eq!(fl(&d, id).list().len(), 1);
        let row = fl(&d, id).list().get(0).unwrap();
        assert_eq!(row.index(), NO_RESULTS_INDEX);
        assert_eq!(row.text(), "<no search results>");

        d.handle_key(KeyCode::Up.into());
        assert_eq!(fl(&d, id).list().selected(), 0);
        assert_eq!(fl(&d, id).list().len(), 1);

        d.handle_key(KeyPress::new(KeyCode::Char(' '), KeyModifiers::CONTROL));
        assert!(!fl(&d, id).is_filtered());
        assert!(fl(&d, id).list().is_empty());
        assert_eq!(d.children(), &[id]);
        assert_eq!(d.rect(), Rect::new(4, 10, 12, 60));
        assert_eq!(fl(&d, id).rect(), Rect::new(5, 12, 9, 56));
    }

    #[test]
    fn test_set_entries_while_filtered_keeps_filter_state() {
        let (mut d, id) = setup(ResizePolicy::ExtendContainer, 40);
        toggle(&mut d, id);
        type_text(&mut d, "c");
        let input = fl(&d, id).input().unwrap();

        d.widget_mut::<FilteringListbox>(id)
            .unwrap()
            .list_mut()
            .set_entries(entries(&["lib.c", "lib.rs", "mod.h"]));
        assert!(fl(&d, id).is_filtered());
        assert_eq!(fl(&d, id).input(), Some(input));
        assert_eq!(texts(fl(&d, id)), ["lib.c"]);

        toggle(&mut d, id);
        assert!(!fl(&d, id).is_filtered());
        assert_eq!(fl(&d, id).input(), None);
        assert_eq!(d.children(), &[id]);
        assert_eq!(d.rect(), Rect::new(4, 10, 12, 60));
        assert_eq!(texts(fl(&d, id)), ["lib.c", "lib.rs", "mod.h"]);
    }
}
