use super::*;

#[test]
fn click_counts_classify_single_and_repeat() {
    assert!(ClickEvent::single().is_single());
    assert!(!ClickEvent::single().is_repeat());
    assert!(ClickEvent::double().is_repeat());
    assert!(ClickEvent::new(4).is_repeat());

    let none = ClickEvent::new(0);
    assert!(!none.is_single());
    assert!(!none.is_repeat());
}

#[test]
fn input_event_accessors_match_variant() {
    let click: InputEvent = ClickEvent::double().into();
    assert_eq!(click.as_click(), Some(&ClickEvent::new(2)));
    assert!(click.as_text_changed().is_none());

    let text = InputEvent::text("abc");
    assert_eq!(text.as_text_changed().map(|e| e.text.as_str()), Some("abc"));
    assert!(text.as_click().is_none());
}

#[test]
fn text_change_reports_unchanged_pair() {
    assert!(TextChange::new("abc", "abc").is_unchanged());
    assert!(!TextChange::new("abc", "abcd").is_unchanged());
}
