use scrolldom::{layout, natural_height, Border, Direction, Edges, Element, Overflow, Rect, Size, Style};

fn lay(root: &Element, width: u16, height: u16) -> scrolldom::LayoutResult {
    layout(root, Rect::from_size(width, height))
}

// ============================================================================
// Flow
// ============================================================================

#[test]
fn test_column_flow_with_gap() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .gap(1)
        .child(Element::text("one").id("a"))
        .child(Element::text("two").id("b"));

    let result = lay(&root, 40, 20);
    assert_eq!(result.get("a"), Some(Rect::new(0, 0, 3, 1)));
    assert_eq!(result.get("b"), Some(Rect::new(0, 2, 3, 1)));
}

#[test]
fn test_row_fill_distribution() {
    let root = Element::row()
        .id("root")
        .width(Size::Fixed(30))
        .height(Size::Fixed(10))
        .child(Element::box_().id("fill").width(Size::Fill).height(Size::Fill))
        .child(Element::box_().id("fixed").width(Size::Fixed(1)).height(Size::Fill));

    let result = lay(&root, 30, 10);
    assert_eq!(result.get("fill"), Some(Rect::new(0, 0, 29, 10)));
    assert_eq!(result.get("fixed"), Some(Rect::new(29, 0, 1, 10)));
}

#[test]
fn test_padding_and_border_shrink_inner() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .padding(Edges::all(1))
        .style(Style::new().border(Border::Single))
        .child(Element::box_().id("inner").width(Size::Fill).height(Size::Fill));

    let result = lay(&root, 20, 10);
    // 1 border + 1 padding on each side.
    assert_eq!(result.get("inner"), Some(Rect::new(2, 2, 16, 6)));
}

#[test]
fn test_hidden_children_take_no_space() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .child(Element::text("one").id("a"))
        .child(Element::text("gone").id("b").hidden(true))
        .child(Element::text("two").id("c"));

    let result = lay(&root, 20, 10);
    assert_eq!(result.get("b"), None);
    assert_eq!(result.get("c"), Some(Rect::new(0, 1, 3, 1)));
}

#[test]
fn test_positioned_child_uses_top_offset() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(5))
        .height(Size::Fixed(20))
        .child(
            Element::box_()
                .id("thumb")
                .top(6)
                .width(Size::Fill)
                .height(Size::Fixed(4)),
        );

    let result = lay(&root, 5, 20);
    assert_eq!(result.get("thumb"), Some(Rect::new(0, 6, 5, 4)));
}

// ============================================================================
// Scroll containers
// ============================================================================

#[test]
fn test_scroll_container_records_sizes() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .overflow_y(Overflow::Auto)
        .children((0..30).map(|i| Element::text(format!("line {i}")).id(format!("line-{i}"))));

    let result = lay(&root, 20, 10);
    assert_eq!(result.viewport_size("root"), Some((20, 10)));
    assert_eq!(result.content_size("root"), Some((20, 30)));
}

#[test]
fn test_scroll_children_are_in_content_space() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .overflow_y(Overflow::Auto)
        .scroll_top(15)
        .children((0..30).map(|i| Element::text(format!("line {i}")).id(format!("line-{i}"))));

    let result = lay(&root, 20, 10);
    // Positions ignore the scroll offset; the renderer translates.
    assert_eq!(result.get("line-0").map(|r| r.y), Some(0));
    assert_eq!(result.get("line-29").map(|r| r.y), Some(29));
}

#[test]
fn test_non_scroll_containers_record_no_sizes() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .child(Element::text("hi").id("a"));

    let result = lay(&root, 20, 10);
    assert_eq!(result.viewport_size("root"), None);
    assert_eq!(result.content_size("root"), None);
}

// ============================================================================
// Natural sizing
// ============================================================================

#[test]
fn test_natural_height_counts_lines() {
    let element = Element::col()
        .children((0..12).map(|i| Element::text(format!("line {i}"))));
    assert_eq!(natural_height(&element), 12);

    let padded = Element::col()
        .padding(Edges::symmetric(2, 0))
        .children((0..12).map(|i| Element::text(format!("line {i}"))));
    assert_eq!(natural_height(&padded), 16);
}

#[test]
fn test_natural_height_multiline_text() {
    let element = Element::text("one\ntwo\nthree");
    assert_eq!(natural_height(&element), 3);
}

#[test]
fn test_direction_builder() {
    let row = Element::box_().direction(Direction::Row);
    assert_eq!(row.direction, Direction::Row);
}
