use domtree::{Document, EventKind, Rect, Viewport};

#[test]
fn test_add_and_remove_listener() {
    let mut doc = Document::new(Viewport {
        width: 1280.0,
        height: 800.0,
    });

    let scroll = doc.add_listener(EventKind::Scroll, "table-1");
    let pointer = doc.add_listener(EventKind::PointerDown, "table-1");

    assert!(doc.is_listening("table-1", EventKind::Scroll));
    assert_eq!(doc.listeners().owned_by("table-1"), 2);

    assert!(doc.remove_listener(scroll));
    assert!(!doc.remove_listener(scroll));
    assert!(!doc.is_listening("table-1", EventKind::Scroll));

    assert!(doc.remove_listener(pointer));
    assert!(doc.listeners().is_empty());
}

#[test]
fn test_capture_listeners_come_first() {
    let mut doc = Document::default();

    doc.add_listener(EventKind::Click, "table-1");
    doc.add_capture_listener(EventKind::Click, "picker-1");

    let owners: Vec<_> = doc
        .listeners()
        .for_kind(EventKind::Click)
        .into_iter()
        .map(|r| r.owner.as_str())
        .collect();

    assert_eq!(owners, vec!["picker-1", "table-1"]);
}

#[test]
fn test_registrations_are_per_owner() {
    let mut doc = Document::default();

    doc.add_listener(EventKind::PointerMove, "slider-1");
    doc.add_listener(EventKind::PointerMove, "slider-2");

    assert!(doc.is_listening("slider-1", EventKind::PointerMove));
    assert!(!doc.is_listening("slider-1", EventKind::PointerUp));
    assert_eq!(doc.listeners().for_kind(EventKind::PointerMove).len(), 2);
}

#[test]
fn test_rect_lookup() {
    let mut doc = Document::default();
    doc.layout.insert("inner", Rect::new(100.0, 20.0, 200.0, 10.0));

    let rect = doc.rect("inner").expect("measured");
    assert_eq!(rect.right(), 300.0);
    assert_eq!(rect.bottom(), 30.0);
    assert!(rect.contains(150.0, 25.0));
    assert!(!rect.contains(300.0, 25.0));
    assert!(doc.rect("missing").is_none());
}
