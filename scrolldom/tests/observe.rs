use std::time::{Duration, Instant};

use scrolldom::{
    find_element, find_element_mut, layout, ContentWatcher, Element, LayoutResult, Rect,
    ScrollAreas, ScrollOptions, Size, SizeWatcher, Style,
};

fn lay(root: &Element, width: u16, height: u16) -> LayoutResult {
    layout(root, Rect::from_size(width, height))
}

// ============================================================================
// Size watcher
// ============================================================================

#[test]
fn test_size_watcher_baseline_is_not_a_change() {
    let mut watcher = SizeWatcher::new();
    let container = Rect::new(0, 0, 30, 34);
    let viewport = Rect::new(0, 0, 29, 34);

    assert!(!watcher.check(container, viewport));
    assert!(!watcher.check(container, viewport));
}

#[test]
fn test_size_watcher_detects_resize() {
    let mut watcher = SizeWatcher::new();
    let container = Rect::new(0, 0, 30, 34);
    let viewport = Rect::new(0, 0, 29, 34);

    assert!(!watcher.check(container, viewport));
    assert!(watcher.check(Rect::new(0, 0, 30, 20), viewport));
    // Settled at the new size.
    assert!(!watcher.check(Rect::new(0, 0, 30, 20), viewport));
}

#[test]
fn test_size_watcher_detects_moves_too() {
    let mut watcher = SizeWatcher::new();
    let viewport = Rect::new(0, 0, 29, 34);

    assert!(!watcher.check(Rect::new(0, 0, 30, 34), viewport));
    // A moved container re-anchors the bar even at the same size.
    assert!(watcher.check(Rect::new(5, 0, 30, 34), viewport));
}

// ============================================================================
// Content watcher
// ============================================================================

fn content() -> Element {
    Element::col()
        .id("content")
        .children((1..=5).map(|i| Element::text(format!("line {i}")).id(format!("line-{i}"))))
}

#[test]
fn test_content_watcher_baseline_is_not_a_change() {
    let mut watcher = ContentWatcher::new();
    let tree = content();
    assert!(!watcher.check(&tree));
    assert!(!watcher.check(&tree));
}

#[test]
fn test_content_watcher_detects_text_change() {
    let mut watcher = ContentWatcher::new();
    let mut tree = content();
    assert!(!watcher.check(&tree));

    if let Some(line) = find_element_mut(&mut tree, "line-3") {
        line.content = scrolldom::element::Content::Text("edited".into());
    }
    assert!(watcher.check(&tree));
    assert!(!watcher.check(&tree));
}

#[test]
fn test_content_watcher_detects_structure_change() {
    let mut watcher = ContentWatcher::new();
    let mut tree = content();
    assert!(!watcher.check(&tree));

    tree.push_child(Element::text("appended"));
    assert!(watcher.check(&tree));
}

#[test]
fn test_content_watcher_detects_class_and_style_changes() {
    let mut watcher = ContentWatcher::new();
    let mut tree = content();
    assert!(!watcher.check(&tree));

    if let Some(line) = find_element_mut(&mut tree, "line-2") {
        line.add_class("highlight");
    }
    assert!(watcher.check(&tree));

    if let Some(line) = find_element_mut(&mut tree, "line-2") {
        line.style = Style::new().bold();
    }
    assert!(watcher.check(&tree));
}

#[test]
fn test_content_watcher_detects_visibility_toggle() {
    let mut watcher = ContentWatcher::new();
    let mut tree = content();
    assert!(!watcher.check(&tree));

    if let Some(line) = find_element_mut(&mut tree, "line-4") {
        line.hidden = true;
    }
    assert!(watcher.check(&tree));
}

#[test]
fn test_scrolling_is_not_a_mutation() {
    let mut watcher = ContentWatcher::new();
    let mut tree = content().overflow_y(scrolldom::Overflow::Auto);
    assert!(!watcher.check(&tree));

    // Scrolling must never feed back into the mutation debounce.
    tree.scroll_top = 3;
    assert!(!watcher.check(&tree));
}

// ============================================================================
// End to end: mutation -> debounced refresh
// ============================================================================

#[test]
fn test_content_growth_unhides_the_bar() {
    // Starts with content that fits: the bar is hidden, container marked
    // no-scroll.
    let mut root = Element::col()
        .id("root")
        .width(Size::Fixed(60))
        .height(Size::Fixed(40))
        .child(
            Element::col()
                .id("box")
                .width(Size::Fixed(30))
                .height(Size::Fixed(34))
                .children((1..=5).map(|i| Element::text(format!("line {i}")))),
        );
    let mut areas = ScrollAreas::new();
    let t0 = Instant::now();

    areas.attach(&mut root, "box", ScrollOptions::default());
    let l = lay(&root, 60, 40);
    areas.refresh(&mut root, &l, "box");
    let l = lay(&root, 60, 40);

    assert!(find_element(&root, "box").unwrap().has_class("no-scroll"));

    // Baseline tick, then the host grows the content out-of-band.
    areas.tick(&mut root, &l, t0);
    let content_id = areas.get("box").unwrap().parts().content.clone();
    if let Some(content) = find_element_mut(&mut root, &content_id) {
        for i in 6..=100 {
            content.push_child(Element::text(format!("line {i}")));
        }
    }
    let l = lay(&root, 60, 40);

    // The change is noticed now but the refresh is debounced.
    areas.tick(&mut root, &l, t0 + Duration::from_millis(10));
    assert!(find_element(&root, "box").unwrap().has_class("no-scroll"));

    // After the mutation debounce settles, the bar comes back.
    areas.tick(&mut root, &l, t0 + Duration::from_millis(200));
    let container = find_element(&root, "box").unwrap();
    assert!(!container.has_class("no-scroll"));
    let bar_id = areas.get("box").unwrap().parts().bar.clone();
    assert!(!find_element(&root, &bar_id).unwrap().hidden);
}

#[test]
fn test_resize_triggers_debounced_refresh() {
    let mut root = Element::col()
        .id("root")
        .width(Size::Fixed(60))
        .height(Size::Fixed(40))
        .child(
            Element::col()
                .id("box")
                .width(Size::Fixed(30))
                .height(Size::Fixed(34))
                .children((1..=100).map(|i| Element::text(format!("line {i}")))),
        );
    let mut areas = ScrollAreas::new();
    let t0 = Instant::now();

    areas.attach(&mut root, "box", ScrollOptions::default());
    let l = lay(&root, 60, 40);
    areas.refresh(&mut root, &l, "box");
    let l = lay(&root, 60, 40);
    areas.tick(&mut root, &l, t0);

    // The host shrinks the container; the next layout pass shows the new
    // rects and the size watcher arms its debounce.
    if let Some(container) = find_element_mut(&mut root, "box") {
        container.height = Size::Fixed(20);
    }
    let l = lay(&root, 60, 40);
    areas.tick(&mut root, &l, t0 + Duration::from_millis(10));

    // After the (short) size debounce the aria range reflects the new
    // viewport: max scroll is now 100 - 20 = 80.
    areas.tick(&mut root, &l, t0 + Duration::from_millis(100));
    let bar_id = areas.get("box").unwrap().parts().bar.clone();
    let bar = find_element(&root, &bar_id).unwrap();
    assert_eq!(bar.aria.map(|a| a.max), Some(80));
}
