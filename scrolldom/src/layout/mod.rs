mod flow;
mod rect;

pub use flow::{layout, natural_height};
pub use rect::Rect;

use std::collections::HashMap;

/// Computed geometry for one layout pass: a rect per element, plus the
/// viewport and natural content sizes of every scroll container.
///
/// Children of a scroll container are laid out in content space (as if the
/// container were tall enough to hold them); the renderer translates them by
/// the container's scroll offset.
#[derive(Debug, Default)]
pub struct LayoutResult {
    rects: HashMap<String, Rect>,
    viewport_sizes: HashMap<String, (u16, u16)>,
    content_sizes: HashMap<String, (u16, u16)>,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        let _ = self.rects.insert(id.into(), rect);
    }

    pub fn get(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    /// Inner (padding- and border-adjusted) size of a scroll container.
    pub fn viewport_size(&self, id: &str) -> Option<(u16, u16)> {
        self.viewport_sizes.get(id).copied()
    }

    /// Natural size of a scroll container's content.
    pub fn content_size(&self, id: &str) -> Option<(u16, u16)> {
        self.content_sizes.get(id).copied()
    }

    pub fn insert_viewport_size(&mut self, id: impl Into<String>, size: (u16, u16)) {
        let _ = self.viewport_sizes.insert(id.into(), size);
    }

    pub fn insert_content_size(&mut self, id: impl Into<String>, size: (u16, u16)) {
        let _ = self.content_sizes.insert(id.into(), size);
    }
}
