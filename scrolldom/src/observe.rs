//! Change detection for scroll containers. There is no observer API to hook
//! into; instead the registry compares cheap snapshots on every tick, the
//! same way animation state detects property changes frame to frame.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::element::{Content, Element};
use crate::layout::Rect;

/// Detects container or viewport size changes between ticks.
#[derive(Debug, Default)]
pub struct SizeWatcher {
    last: Option<(Rect, Rect)>,
}

impl SizeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current rects; returns true when they differ from the
    /// previous tick. The first observation is not a change.
    pub fn check(&mut self, container: Rect, viewport: Rect) -> bool {
        let current = (container, viewport);
        let changed = match self.last {
            Some(previous) => previous != current,
            None => false,
        };
        self.last = Some(current);
        changed
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Detects content mutations: subtree structure, text, and the style/class
/// attributes that affect extent. Scroll offsets are deliberately excluded,
/// otherwise scrolling would look like a mutation and refresh itself forever.
#[derive(Debug, Default)]
pub struct ContentWatcher {
    last: Option<u64>,
}

impl ContentWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, content: &Element) -> bool {
        let digest = subtree_digest(content);
        let changed = match self.last {
            Some(previous) => previous != digest,
            None => false,
        };
        self.last = Some(digest);
        changed
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

fn subtree_digest(element: &Element) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_element(element, &mut hasher);
    hasher.finish()
}

fn hash_element(element: &Element, hasher: &mut DefaultHasher) {
    element.id.hash(hasher);
    element.classes.hash(hasher);
    element.hidden.hash(hasher);
    element.disabled.hash(hasher);
    element.top.hash(hasher);

    // Sizing in the hash: a height change on a child is exactly the kind of
    // mutation the watcher exists for (an accordion section opening).
    hash_size(element, hasher);

    // Style attributes that affect what the content looks like.
    let style = &element.style;
    style.border.hash(hasher);
    style.fill.hash(hasher);
    style.text_style.hash(hasher);
    if let Some(bg) = style.background {
        let rgb = bg.to_rgb();
        (rgb.r, rgb.g, rgb.b).hash(hasher);
    }
    if let Some(fg) = style.foreground {
        let rgb = fg.to_rgb();
        (rgb.r, rgb.g, rgb.b).hash(hasher);
    }

    match &element.content {
        Content::None => 0u8.hash(hasher),
        Content::Text(text) => {
            1u8.hash(hasher);
            text.hash(hasher);
        }
        Content::Children(children) => {
            2u8.hash(hasher);
            children.len().hash(hasher);
            for child in children {
                hash_element(child, hasher);
            }
        }
    }
}

fn hash_size(element: &Element, hasher: &mut DefaultHasher) {
    use crate::types::Size;
    for size in [element.width, element.height] {
        match size {
            Size::Fixed(n) => {
                0u8.hash(hasher);
                n.hash(hasher);
            }
            Size::Fill => 1u8.hash(hasher),
            Size::Auto => 2u8.hash(hasher),
        }
    }
    element.padding.hash(hasher);
    element.gap.hash(hasher);
}
