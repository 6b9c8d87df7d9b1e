use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Walk the tree from `root` to the deepest element containing the point,
/// returning the chain of ids along the way.
///
/// Descent stops at scroll containers: their children live in content space,
/// so screen coordinates stop being meaningful past that boundary. That is
/// also exactly the resolution the widget needs, the innermost scrollable
/// element at a point.
pub fn hit_path(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Vec<String> {
    let mut path = Vec::new();
    descend(layout, root, x, y, &mut path);
    path
}

fn descend(layout: &LayoutResult, element: &Element, x: u16, y: u16, path: &mut Vec<String>) {
    if element.hidden {
        return;
    }
    let Some(rect) = layout.get(&element.id) else {
        return;
    };
    if !rect.contains(x, y) {
        return;
    }

    path.push(element.id.clone());

    if element.overflow_y.is_scrollable() {
        return;
    }

    if let Content::Children(children) = &element.content {
        // Reverse order: the last rendered child is on top.
        for child in children.iter().rev() {
            let len = path.len();
            descend(layout, child, x, y, path);
            if path.len() > len {
                return;
            }
        }
    }
}

/// Deepest element at the point, if any.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_path(layout, root, x, y).pop()
}
