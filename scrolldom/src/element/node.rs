use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::accessibility::{AriaRange, Role};
use crate::types::{Direction, Edges, Overflow, Size, Style};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,

    // Content
    pub content: Content,

    // Layout (box model)
    pub width: Size,
    pub height: Size,
    pub padding: Edges,
    pub gap: u16,
    pub direction: Direction,

    /// Offset from the parent's inner top edge. An element with `top` set is
    /// taken out of flow and positioned directly (the scrollbar thumb).
    pub top: Option<u16>,

    // Scrolling
    pub overflow_y: Overflow,
    pub scroll_top: u16,

    // Visual
    pub style: Style,
    pub classes: Vec<String>,
    /// Excluded from layout and rendering entirely (`display: none`).
    pub hidden: bool,

    // Accessibility
    pub role: Role,
    pub aria: Option<AriaRange>,
    pub aria_label: Option<String>,

    // Interaction
    pub focusable: bool,
    pub clickable: bool,
    pub disabled: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            content: Content::None,
            width: Size::Auto,
            height: Size::Auto,
            padding: Edges::default(),
            gap: 0,
            direction: Direction::Column,
            top: None,
            overflow_y: Overflow::Visible,
            scroll_top: 0,
            style: Style::default(),
            classes: Vec::new(),
            hidden: false,
            role: Role::None,
            aria: None,
            aria_label: None,
            focusable: false,
            clickable: false,
            disabled: false,
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn col() -> Self {
        Self {
            id: generate_id("col"),
            direction: Direction::Column,
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            id: generate_id("row"),
            direction: Direction::Row,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Layout
    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn top(mut self, top: u16) -> Self {
        self.top = Some(top);
        self
    }

    // Scrolling
    pub fn overflow_y(mut self, overflow: Overflow) -> Self {
        self.overflow_y = overflow;
        self
    }

    pub fn scroll_top(mut self, offset: u16) -> Self {
        self.scroll_top = offset;
        self
    }

    /// Assign the scroll offset, clamped to `[0, max_scroll]`. This is the
    /// tree's equivalent of assigning `scrollTop`: callers hand over any
    /// value and the clamp happens here, nowhere else.
    pub fn set_scroll_top(&mut self, value: i32, max_scroll: u16) -> u16 {
        let clamped = value.clamp(0, max_scroll as i32) as u16;
        self.scroll_top = clamped;
        clamped
    }

    // Visual
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    // Accessibility
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn aria(mut self, aria: AriaRange) -> Self {
        self.aria = Some(aria);
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.push_child(child);
        }
        self
    }

    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    /// Move all children out, leaving the element empty. The wrap/unwrap
    /// contract depends on this moving nodes rather than rebuilding them.
    pub fn take_children(&mut self) -> Vec<Element> {
        match std::mem::take(&mut self.content) {
            Content::Children(children) => children,
            other => {
                self.content = other;
                Vec::new()
            }
        }
    }

    pub fn child_count(&self) -> usize {
        self.content.children().map_or(0, <[Element]>::len)
    }
}
