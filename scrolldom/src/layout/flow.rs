use super::{LayoutResult, Rect};
use crate::element::{Content, Element};
use crate::text::{display_width, line_count};
use crate::types::{Border, Direction, Size};

pub fn layout(root: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    if !root.hidden {
        layout_element(root, available, &mut result);
    }
    result
}

fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) {
    let width = resolve_size(element.width, available.width, element, true);
    let height = resolve_size(element.height, available.height, element, false);
    let rect = Rect::new(available.x, available.y, width, height);
    result.insert(element.id.clone(), rect);
    layout_children(element, rect, result);
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };

    let inner = inner_rect(element, rect);

    // Out-of-flow children (`top` offset) position themselves against the
    // inner rect; everyone else participates in flow.
    let flow_children: Vec<&Element> = children
        .iter()
        .filter(|c| !c.hidden && c.top.is_none())
        .collect();

    for child in children.iter().filter(|c| !c.hidden && c.top.is_some()) {
        layout_positioned(child, inner, result);
    }

    if element.overflow_y.is_scrollable() {
        result.insert_viewport_size(element.id.clone(), (inner.width, inner.height));
        let content_height = layout_scroll_content(element, &flow_children, inner, result);
        result.insert_content_size(element.id.clone(), (inner.width, content_height));
        return;
    }

    if flow_children.is_empty() {
        return;
    }

    match element.direction {
        Direction::Column => layout_flow(element, &flow_children, inner, false, result),
        Direction::Row => layout_flow(element, &flow_children, inner, true, result),
    }
}

/// Lay out a scroll container's children at their natural heights, in
/// content space. Returns the total content height.
fn layout_scroll_content(
    element: &Element,
    children: &[&Element],
    inner: Rect,
    result: &mut LayoutResult,
) -> u16 {
    let mut y = inner.y;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            y = y.saturating_add(element.gap);
        }
        let width = resolve_size(child.width, inner.width, child, true);
        let height = match child.height {
            Size::Fixed(n) => n,
            // Fill has no meaning against unbounded content height.
            Size::Fill | Size::Auto => estimate_size(child, false),
        };
        let rect = Rect::new(inner.x, y, width, height);
        result.insert(child.id.clone(), rect);
        layout_children(child, rect, result);
        y = y.saturating_add(height);
    }
    y.saturating_sub(inner.y)
}

fn layout_flow(
    element: &Element,
    children: &[&Element],
    inner: Rect,
    is_row: bool,
    result: &mut LayoutResult,
) {
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };
    let gap_total = element.gap * children.len().saturating_sub(1) as u16;

    // First pass: fixed and natural sizes, count of fill items.
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    for child in children {
        match main_axis_size(child, is_row) {
            Size::Fixed(n) => fixed_total = fixed_total.saturating_add(n),
            Size::Auto => {
                fixed_total = fixed_total.saturating_add(estimate_size(child, is_row));
            }
            Size::Fill => fill_count += 1,
        }
    }

    let remaining = main_size.saturating_sub(fixed_total.saturating_add(gap_total));
    let fill_size = if fill_count > 0 {
        remaining / fill_count
    } else {
        0
    };

    // Second pass: assign rects.
    let mut offset = 0u16;
    for child in children {
        let main = match main_axis_size(child, is_row) {
            Size::Fixed(n) => n,
            Size::Auto => estimate_size(child, is_row),
            Size::Fill => fill_size,
        };
        let main = main.min(main_size.saturating_sub(offset));

        let cross = match cross_axis_size(child, is_row) {
            Size::Fixed(n) => n.min(cross_size),
            Size::Fill => cross_size,
            Size::Auto => estimate_size(child, !is_row).min(cross_size),
        };

        let rect = if is_row {
            Rect::new(inner.x + offset, inner.y, main, cross)
        } else {
            Rect::new(inner.x, inner.y + offset, cross, main)
        };
        result.insert(child.id.clone(), rect);
        layout_children(child, rect, result);

        offset = offset.saturating_add(main).saturating_add(element.gap);
    }
}

fn layout_positioned(child: &Element, inner: Rect, result: &mut LayoutResult) {
    let top = child.top.unwrap_or(0).min(inner.height);
    let width = resolve_size(child.width, inner.width, child, true);
    let height = resolve_size(child.height, inner.height.saturating_sub(top), child, false);
    let rect = Rect::new(inner.x, inner.y.saturating_add(top), width, height);
    result.insert(child.id.clone(), rect);
    layout_children(child, rect, result);
}

fn inner_rect(element: &Element, rect: Rect) -> Rect {
    let border = if element.style.border == Border::None {
        0
    } else {
        1
    };
    rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    )
}

fn main_axis_size(child: &Element, is_row: bool) -> Size {
    if is_row {
        child.width
    } else {
        child.height
    }
}

fn cross_axis_size(child: &Element, is_row: bool) -> Size {
    if is_row {
        child.height
    } else {
        child.width
    }
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    match size {
        Size::Fixed(n) => n.min(available),
        Size::Fill => available,
        Size::Auto => estimate_size(element, is_width).min(available),
    }
}

/// Natural height of an element, from its content. Used when probing
/// whether an unwrapped container would overflow.
pub fn natural_height(element: &Element) -> u16 {
    estimate_size(element, false)
}

/// Natural size of an element along one axis, from its content.
fn estimate_size(element: &Element, is_width: bool) -> u16 {
    let border = if element.style.border == Border::None {
        0
    } else {
        2
    };
    let padding = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content = match &element.content {
        Content::Text(text) => {
            if is_width {
                text.lines()
                    .map(|line| display_width(line) as u16)
                    .max()
                    .unwrap_or(0)
            } else {
                line_count(text) as u16
            }
        }
        Content::Children(children) => {
            let flow: Vec<&Element> = children
                .iter()
                .filter(|c| !c.hidden && c.top.is_none())
                .collect();
            if flow.is_empty() {
                0
            } else if (element.direction == Direction::Row) == is_width {
                let gap_total = element.gap * flow.len().saturating_sub(1) as u16;
                flow.iter()
                    .map(|c| sized_or_estimated(c, is_width))
                    .sum::<u16>()
                    + gap_total
            } else {
                flow.iter()
                    .map(|c| sized_or_estimated(c, is_width))
                    .max()
                    .unwrap_or(0)
            }
        }
        Content::None => 0,
    };

    content + padding + border
}

fn sized_or_estimated(element: &Element, is_width: bool) -> u16 {
    let size = if is_width {
        element.width
    } else {
        element.height
    };
    match size {
        Size::Fixed(n) => n,
        Size::Auto | Size::Fill => estimate_size(element, is_width),
    }
}
