//! Paints the element tree into a cell buffer. Children of a scroll
//! container carry content-space rects; the painter translates them by the
//! container's scroll offset and clips to the viewport.

use crate::buffer::{Buffer, CONTINUATION};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::{char_width, truncate_to_width};
use crate::types::{Border, Overflow, Style};

pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buffer: &mut Buffer) {
    let clip = Rect::from_size(buffer.width(), buffer.height());
    draw_element(root, layout, buffer, clip, 0);
}

fn draw_element(
    element: &Element,
    layout: &LayoutResult,
    buffer: &mut Buffer,
    clip: Rect,
    offset_y: i32,
) {
    if element.hidden || clip.is_empty() {
        return;
    }
    let Some(rect) = layout.get(&element.id) else {
        return;
    };

    fill_rect(buffer, rect, offset_y, clip, &element.style);
    if element.style.border != Border::None {
        draw_border(buffer, rect, offset_y, clip, &element.style);
    }

    let border = if element.style.border == Border::None {
        0
    } else {
        1
    };
    let inner = rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    );

    match &element.content {
        Content::None => {}
        Content::Text(text) => draw_text(buffer, text, inner, offset_y, clip, &element.style),
        Content::Children(children) => {
            let clips_children = element.overflow_y.is_scrollable()
                || element.overflow_y == Overflow::Hidden;
            let child_clip = if clips_children {
                clip.intersection(screen_rect(inner, offset_y))
            } else {
                clip
            };
            let child_offset = if element.overflow_y.is_scrollable() {
                offset_y - element.scroll_top as i32
            } else {
                offset_y
            };
            for child in children {
                draw_element(child, layout, buffer, child_clip, child_offset);
            }
        }
    }
}

/// Clamp a content-space rect to the screen after vertical translation.
fn screen_rect(rect: Rect, offset_y: i32) -> Rect {
    let top = rect.y as i32 + offset_y;
    let bottom = top + rect.height as i32;
    if bottom <= 0 {
        return Rect::default();
    }
    let y = top.max(0) as u16;
    let height = (bottom - top.max(0)) as u16;
    Rect::new(rect.x, y, rect.width, height)
}

fn fill_rect(buffer: &mut Buffer, rect: Rect, offset_y: i32, clip: Rect, style: &Style) {
    if style.background.is_none() && style.fill.is_none() {
        return;
    }
    let bg = style.background.map(|c| c.to_rgb());
    let fg = style.foreground.map(|c| c.to_rgb());

    for row in 0..rect.height {
        let screen_y = rect.y as i32 + row as i32 + offset_y;
        let Ok(y) = u16::try_from(screen_y) else {
            continue;
        };
        for x in rect.x..rect.right() {
            if !clip.contains(x, y) {
                continue;
            }
            let Some(cell) = buffer.get_mut(x, y) else {
                continue;
            };
            cell.ch = style.fill.unwrap_or(' ');
            if let Some(bg) = bg {
                cell.bg = bg;
            }
            if let Some(fg) = fg {
                cell.fg = fg;
            }
            cell.style = style.text_style;
        }
    }
}

fn draw_border(buffer: &mut Buffer, rect: Rect, offset_y: i32, clip: Rect, style: &Style) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let glyphs = match style.border {
        Border::None => return,
        Border::Single => ['┌', '┐', '└', '┘', '─', '│'],
        Border::Rounded => ['╭', '╮', '╰', '╯', '─', '│'],
    };
    let fg = style.foreground.map(|c| c.to_rgb());
    let bg = style.background.map(|c| c.to_rgb());

    let mut put = |buffer: &mut Buffer, x: u16, screen_y: i32, ch: char| {
        let Ok(y) = u16::try_from(screen_y) else {
            return;
        };
        if !clip.contains(x, y) {
            return;
        }
        if let Some(cell) = buffer.get_mut(x, y) {
            cell.ch = ch;
            if let Some(fg) = fg {
                cell.fg = fg;
            }
            if let Some(bg) = bg {
                cell.bg = bg;
            }
        }
    };

    let top = rect.y as i32 + offset_y;
    let bottom = rect.bottom() as i32 - 1 + offset_y;

    put(buffer, rect.x, top, glyphs[0]);
    put(buffer, rect.right() - 1, top, glyphs[1]);
    put(buffer, rect.x, bottom, glyphs[2]);
    put(buffer, rect.right() - 1, bottom, glyphs[3]);
    for x in rect.x + 1..rect.right() - 1 {
        put(buffer, x, top, glyphs[4]);
        put(buffer, x, bottom, glyphs[4]);
    }
    for row in 1..rect.height - 1 {
        let y = rect.y as i32 + row as i32 + offset_y;
        put(buffer, rect.x, y, glyphs[5]);
        put(buffer, rect.right() - 1, y, glyphs[5]);
    }
}

fn draw_text(buffer: &mut Buffer, text: &str, inner: Rect, offset_y: i32, clip: Rect, style: &Style) {
    if inner.is_empty() {
        return;
    }
    let fg = style.foreground.map(|c| c.to_rgb());

    for (row, line) in text.lines().enumerate() {
        if row as u16 >= inner.height {
            break;
        }
        let screen_y = inner.y as i32 + row as i32 + offset_y;
        let Ok(y) = u16::try_from(screen_y) else {
            continue;
        };

        let mut x = inner.x;
        for ch in truncate_to_width(line, inner.width as usize).chars() {
            let width = char_width(ch).max(1) as u16;
            if clip.contains(x, y) {
                if let Some(cell) = buffer.get_mut(x, y) {
                    cell.ch = ch;
                    if let Some(fg) = fg {
                        cell.fg = fg;
                    }
                    cell.style = style.text_style;
                }
                if width == 2 && clip.contains(x + 1, y) {
                    if let Some(cell) = buffer.get_mut(x + 1, y) {
                        cell.ch = CONTINUATION;
                    }
                }
            }
            x += width;
        }
    }
}
