//! Tree surgery for attach/detach. Wrapping moves the container's existing
//! children into a content element, never rebuilding them, so host state held
//! on those nodes survives. Detaching restores the tree exactly.

use super::Parts;
use crate::accessibility::{AriaRange, Role};
use crate::element::{Content, Element};
use crate::types::{Direction, Overflow, ScrollTheme, Size};

/// Saved container fields, restored on unwrap.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Restore {
    pub direction: Direction,
    pub overflow_y: Overflow,
}

pub(crate) fn wrap_container(container: &mut Element, theme: &ScrollTheme) -> (Parts, Restore) {
    let restore = Restore {
        direction: container.direction,
        overflow_y: container.overflow_y,
    };

    let original = match std::mem::take(&mut container.content) {
        Content::Children(children) => children,
        Content::Text(text) => vec![Element::text(text)],
        Content::None => Vec::new(),
    };

    let mut content = Element::col()
        .class("scroll-content")
        .width(Size::Fill)
        .height(Size::Fill)
        .overflow_y(Overflow::Auto)
        .focusable(true);
    content.content = Content::Children(original);

    let thumb = Element::box_()
        .class("scroll-thumb")
        .role(Role::Slider)
        .aria_label("Scroll position")
        .focusable(true)
        .width(Size::Fill)
        .height(Size::Fixed(1))
        .top(0)
        .style(theme.thumb.clone());

    let track = Element::box_()
        .class("scroll-track")
        .width(Size::Fill)
        .height(Size::Fill)
        .style(theme.track.clone())
        .clickable(true)
        .child(thumb);

    let button_up = Element::text(theme.arrow_up.to_string())
        .class("scroll-button")
        .class("scroll-button-up")
        .role(Role::Button)
        .aria_label("Scroll up")
        .clickable(true)
        .width(Size::Fill)
        .height(Size::Fixed(1))
        .style(theme.button.clone());

    let button_down = Element::text(theme.arrow_down.to_string())
        .class("scroll-button")
        .class("scroll-button-down")
        .role(Role::Button)
        .aria_label("Scroll down")
        .clickable(true)
        .width(Size::Fill)
        .height(Size::Fixed(1))
        .style(theme.button.clone());

    let parts = Parts {
        content: content.id.clone(),
        bar: String::new(),
        track: track.id.clone(),
        thumb: thumb_id(&track),
        button_up: button_up.id.clone(),
        button_down: button_down.id.clone(),
    };

    let bar = Element::col()
        .class("scroll-bar")
        .role(Role::Scrollbar)
        .aria(AriaRange::default())
        .width(Size::Fixed(1))
        .height(Size::Fill)
        .children([button_up, track, button_down]);

    let parts = Parts {
        bar: bar.id.clone(),
        ..parts
    };

    container.direction = Direction::Row;
    container.overflow_y = Overflow::Visible;
    container.add_class("scroll-area");
    container.push_child(content);
    container.push_child(bar);

    (parts, restore)
}

pub(crate) fn unwrap_container(container: &mut Element, parts: &Parts, restore: Restore) {
    let children = container.take_children();
    let mut restored = Vec::new();

    for mut child in children {
        if child.id == parts.content {
            restored.append(&mut child.take_children());
        } else if child.id == parts.bar {
            // widget-owned, dropped
        } else {
            restored.push(child);
        }
    }

    container.content = Content::Children(restored);
    container.direction = restore.direction;
    container.overflow_y = restore.overflow_y;
    container.remove_class("scroll-area");
    container.remove_class("no-scroll");
}

fn thumb_id(track: &Element) -> String {
    track
        .content
        .children()
        .and_then(<[Element]>::first)
        .map(|thumb| thumb.id.clone())
        .unwrap_or_default()
}
