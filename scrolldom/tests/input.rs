use std::time::{Duration, Instant};

use scrolldom::{
    find_element, hit_path, layout, Element, Event, Key, LayoutResult, Modifiers, PointerButton,
    Rect, ScrollAreas, ScrollBehavior, ScrollOptions, Size,
};

/// Same fixture as the lifecycle tests: container 30x34, 100 lines of
/// content, viewport 34, max scroll 66, track 32, thumb 20, travel 12.
fn fixture() -> Element {
    Element::col()
        .id("root")
        .width(Size::Fixed(60))
        .height(Size::Fixed(40))
        .child(
            Element::col()
                .id("box")
                .width(Size::Fixed(30))
                .height(Size::Fixed(34))
                .children((1..=100).map(|i| Element::text(format!("line {i}")))),
        )
}

fn lay(root: &Element) -> LayoutResult {
    layout(root, Rect::from_size(60, 40))
}

fn settled(root: &mut Element, areas: &mut ScrollAreas, options: ScrollOptions) -> LayoutResult {
    areas.attach(root, "box", options);
    let first = lay(root);
    areas.refresh(root, &first, "box");
    lay(root)
}

fn down(x: u16, y: u16) -> Event {
    Event::PointerDown {
        x,
        y,
        button: PointerButton::Primary,
    }
}

fn up(x: u16, y: u16) -> Event {
    Event::PointerUp {
        x,
        y,
        button: PointerButton::Primary,
    }
}

fn mv(x: u16, y: u16) -> Event {
    Event::PointerMove { x, y }
}

fn key(key: Key) -> Event {
    Event::Key {
        key,
        modifiers: Modifiers::new(),
    }
}

fn ctrl_key(code: Key) -> Event {
    Event::Key {
        key: code,
        modifiers: Modifiers::ctrl(),
    }
}

fn scroll_top(areas: &ScrollAreas, root: &Element) -> u16 {
    areas.get("box").unwrap().scroll_top(root)
}

// ============================================================================
// Hit resolution
// ============================================================================

#[test]
fn test_hit_path_reaches_bar_parts() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let parts = areas.get("box").unwrap().parts().clone();

    // Bar occupies column 29: button at the top, thumb right below it.
    let path = hit_path(&l, &root, 29, 0);
    assert!(path.contains(&parts.button_up));
    let path = hit_path(&l, &root, 29, 1);
    assert!(path.contains(&parts.thumb));
    assert!(path.contains(&"box".to_string()));
}

#[test]
fn test_hit_path_stops_at_scroll_containers() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let parts = areas.get("box").unwrap().parts().clone();

    // Inside the viewport the path ends at the content element; children
    // live in content space.
    let path = hit_path(&l, &root, 5, 5);
    assert_eq!(path.last(), Some(&parts.content));
}

// ============================================================================
// Thumb dragging
// ============================================================================

#[test]
fn test_drag_thumb_scrolls_proportionally() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());

    // Thumb starts at track top (29, 1).
    assert!(areas.handle_event(&mut root, &l, &down(29, 1), Instant::now()));
    assert!(areas.get("box").unwrap().is_dragging());

    // Half the travel (6 of 12) maps to half the range (33 of 66).
    assert!(areas.handle_event(&mut root, &l, &mv(29, 7), Instant::now()));
    assert_eq!(scroll_top(&areas, &root), 33);

    // The drag session ends with the gesture.
    assert!(areas.handle_event(&mut root, &l, &up(29, 7), Instant::now()));
    assert!(!areas.get("box").unwrap().is_dragging());
}

#[test]
fn test_drag_clamps_to_range() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());

    areas.handle_event(&mut root, &l, &down(29, 1), Instant::now());
    // Way past the end of the track.
    areas.handle_event(&mut root, &l, &mv(29, 39), Instant::now());
    assert_eq!(scroll_top(&areas, &root), 66);

    // And back above the start.
    areas.handle_event(&mut root, &l, &mv(29, 0), Instant::now());
    assert_eq!(scroll_top(&areas, &root), 0);
}

#[test]
fn test_drag_owns_pointer_outside_thumb() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());

    areas.handle_event(&mut root, &l, &down(29, 1), Instant::now());
    // Pointer wanders off the bar entirely; the drag still tracks Y.
    areas.handle_event(&mut root, &l, &mv(3, 7), Instant::now());
    assert_eq!(scroll_top(&areas, &root), 33);
}

#[test]
fn test_thumb_dragging_class() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let parts = areas.get("box").unwrap().parts().clone();

    areas.handle_event(&mut root, &l, &down(29, 1), Instant::now());
    assert!(find_element(&root, &parts.thumb).unwrap().has_class("dragging"));

    areas.handle_event(&mut root, &l, &up(29, 1), Instant::now());
    assert!(!find_element(&root, &parts.thumb).unwrap().has_class("dragging"));
}

// ============================================================================
// Track paging
// ============================================================================

#[test]
fn test_track_click_pages_down() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());

    // Thumb spans rows 1..21; clicking below its midpoint pages down by
    // round(34 * 0.9) = 31.
    areas.handle_event(&mut root, &l, &down(29, 30), Instant::now());
    assert_eq!(scroll_top(&areas, &root), 31);
}

#[test]
fn test_track_click_pages_up() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let now = Instant::now();

    let area = areas.get_mut("box").unwrap();
    area.scroll_to(&mut root, &l, 66, ScrollBehavior::Auto, now);
    let l = lay(&root);

    // Thumb now sits at the bottom; clicking near the track top pages up.
    areas.handle_event(&mut root, &l, &down(29, 2), now);
    assert_eq!(scroll_top(&areas, &root), 35);
}

// ============================================================================
// Buttons
// ============================================================================

#[test]
fn test_button_press_steps_then_repeats() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::new().scroll_step(5));
    let t0 = Instant::now();

    // Immediate step on press.
    areas.handle_event(&mut root, &l, &down(29, 33), t0);
    assert_eq!(scroll_top(&areas, &root), 5);
    assert!(areas.get("box").unwrap().is_repeating());

    // Nothing fires before the repeat delay.
    areas.tick(&mut root, &l, t0 + Duration::from_millis(399));
    assert_eq!(scroll_top(&areas, &root), 5);

    // Then one step per 50ms interval.
    areas.tick(&mut root, &l, t0 + Duration::from_millis(400));
    assert_eq!(scroll_top(&areas, &root), 10);
    areas.tick(&mut root, &l, t0 + Duration::from_millis(450));
    assert_eq!(scroll_top(&areas, &root), 15);
}

#[test]
fn test_button_release_stops_repeat() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::new().scroll_step(5));
    let t0 = Instant::now();

    areas.handle_event(&mut root, &l, &down(29, 33), t0);
    areas.handle_event(&mut root, &l, &up(29, 33), t0 + Duration::from_millis(100));
    assert!(!areas.get("box").unwrap().is_repeating());

    areas.tick(&mut root, &l, t0 + Duration::from_millis(1000));
    assert_eq!(scroll_top(&areas, &root), 5);
}

#[test]
fn test_pointer_leaving_button_stops_repeat() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::new().scroll_step(5));
    let t0 = Instant::now();

    areas.handle_event(&mut root, &l, &down(29, 33), t0);
    assert!(areas.get("box").unwrap().is_repeating());

    // Sliding off the button cancels the held repeat.
    areas.handle_event(&mut root, &l, &mv(20, 20), t0 + Duration::from_millis(100));
    assert!(!areas.get("box").unwrap().is_repeating());

    areas.tick(&mut root, &l, t0 + Duration::from_millis(1000));
    assert_eq!(scroll_top(&areas, &root), 5);
}

#[test]
fn test_up_button_scrolls_back() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::new().scroll_step(5));
    let now = Instant::now();

    let area = areas.get_mut("box").unwrap();
    area.scroll_to(&mut root, &l, 20, ScrollBehavior::Auto, now);

    areas.handle_event(&mut root, &l, &down(29, 0), now);
    assert_eq!(scroll_top(&areas, &root), 15);
    areas.handle_event(&mut root, &l, &up(29, 0), now);
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_keys_route_to_focused_area() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::new().scroll_step(5));
    let now = Instant::now();

    // No focus yet: keys fall through.
    assert!(!areas.handle_event(&mut root, &l, &key(Key::Down), now));

    // Clicking inside the container focuses its area.
    areas.handle_event(&mut root, &l, &down(5, 5), now);
    assert_eq!(areas.focused(), Some("box"));

    assert!(areas.handle_event(&mut root, &l, &key(Key::Down), now));
    assert_eq!(scroll_top(&areas, &root), 5);
    assert!(areas.handle_event(&mut root, &l, &key(Key::Up), now));
    assert_eq!(scroll_top(&areas, &root), 0);
}

#[test]
fn test_page_keys() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let now = Instant::now();

    areas.handle_event(&mut root, &l, &down(5, 5), now);

    // round(34 * 0.9) = 31 per page.
    areas.handle_event(&mut root, &l, &key(Key::PageDown), now);
    assert_eq!(scroll_top(&areas, &root), 31);
    areas.handle_event(&mut root, &l, &key(Key::PageUp), now);
    assert_eq!(scroll_top(&areas, &root), 0);
}

#[test]
fn test_ctrl_home_end_jump() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let now = Instant::now();

    areas.handle_event(&mut root, &l, &down(5, 5), now);

    assert!(areas.handle_event(&mut root, &l, &ctrl_key(Key::End), now));
    assert_eq!(scroll_top(&areas, &root), 66);

    assert!(areas.handle_event(&mut root, &l, &ctrl_key(Key::Home), now));
    assert_eq!(scroll_top(&areas, &root), 0);

    // Without ctrl, Home and End are not scroll keys.
    assert!(!areas.handle_event(&mut root, &l, &key(Key::End), now));
}

// ============================================================================
// Wheel
// ============================================================================

#[test]
fn test_wheel_falls_back_when_host_ignores_it() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let t0 = Instant::now();

    // The wheel is never applied synchronously.
    areas.handle_event(&mut root, &l, &Event::Wheel { x: 5, y: 5, delta: 3 }, t0);
    assert_eq!(scroll_top(&areas, &root), 0);

    // Next frame: the offset did not move, so the widget applies the delta.
    areas.tick(&mut root, &l, t0 + Duration::from_millis(16));
    assert_eq!(scroll_top(&areas, &root), 3);
}

#[test]
fn test_wheel_defers_to_host_scrolling() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let t0 = Instant::now();

    areas.handle_event(&mut root, &l, &Event::Wheel { x: 5, y: 5, delta: 3 }, t0);

    // The host applies its own scroll before the check fires.
    let area = areas.get_mut("box").unwrap();
    area.scroll_by(&mut root, &l, 10, ScrollBehavior::Auto, t0);

    areas.tick(&mut root, &l, t0 + Duration::from_millis(16));
    assert_eq!(scroll_top(&areas, &root), 10);
}

#[test]
fn test_wheel_deltas_coalesce() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(&mut root, &mut areas, ScrollOptions::default());
    let t0 = Instant::now();

    areas.handle_event(&mut root, &l, &Event::Wheel { x: 5, y: 5, delta: 3 }, t0);
    areas.handle_event(&mut root, &l, &Event::Wheel { x: 5, y: 5, delta: 3 }, t0);

    areas.tick(&mut root, &l, t0 + Duration::from_millis(16));
    assert_eq!(scroll_top(&areas, &root), 6);
}

#[test]
fn test_wheel_multiplier_scales_fallback() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(
        &mut root,
        &mut areas,
        ScrollOptions::new().wheel_multiplier(2.0),
    );
    let t0 = Instant::now();

    areas.handle_event(&mut root, &l, &Event::Wheel { x: 5, y: 5, delta: 3 }, t0);
    areas.tick(&mut root, &l, t0 + Duration::from_millis(16));
    assert_eq!(scroll_top(&areas, &root), 6);
}

// ============================================================================
// Auto-hide
// ============================================================================

#[test]
fn test_bar_goes_idle_and_wakes() {
    let mut root = fixture();
    let mut areas = ScrollAreas::new();
    let l = settled(
        &mut root,
        &mut areas,
        ScrollOptions::new()
            .scroll_step(5)
            .auto_hide(true)
            .hide_delay(Duration::from_millis(1000)),
    );
    let t0 = Instant::now();
    let parts = areas.get("box").unwrap().parts().clone();

    // Activity arms the hide timer.
    areas.handle_event(&mut root, &l, &down(5, 5), t0);
    areas.handle_event(&mut root, &l, &key(Key::Down), t0);
    assert!(!areas.get("box").unwrap().is_idle());

    areas.tick(&mut root, &l, t0 + Duration::from_millis(1500));
    assert!(areas.get("box").unwrap().is_idle());
    assert!(find_element(&root, &parts.bar).unwrap().has_class("scroll-idle"));

    // New activity wakes the bar and re-arms the timer.
    areas.handle_event(&mut root, &l, &key(Key::Down), t0 + Duration::from_millis(2000));
    assert!(!areas.get("box").unwrap().is_idle());
    assert!(!find_element(&root, &parts.bar).unwrap().has_class("scroll-idle"));
}
