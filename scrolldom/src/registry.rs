//! The instance registry: an explicit state struct the host owns and threads
//! through its loop, rather than ambient globals.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, warn};

use crate::area::{self, ScrollArea, ScrollBehavior, ScrollOptions, FRAME};
use crate::element::{find_element, find_element_mut, Element};
use crate::event::{Event, Key, Modifiers, PointerButton};
use crate::geometry::page_extent;
use crate::hit::hit_path;
use crate::layout::{natural_height, LayoutResult};
use crate::scheduler::Scheduler;

/// Extra slack, beyond the overflow tolerance, before optimistic probing
/// bothers to attach a scrollbar at all.
const ATTACH_SLACK: u16 = 10;

/// Deferred work, dispatched back to the owning area by container id.
#[derive(Debug, Clone)]
pub enum TimerTask {
    SizeRefresh(String),
    ContentRefresh(String),
    RepeatStep(String),
    WheelFallback(String),
    HideBar(String),
}

impl TimerTask {
    fn container_id(&self) -> &str {
        match self {
            Self::SizeRefresh(id)
            | Self::ContentRefresh(id)
            | Self::RepeatStep(id)
            | Self::WheelFallback(id)
            | Self::HideBar(id) => id,
        }
    }
}

/// Owns every live [`ScrollArea`] plus the shared timer queue. Exactly one
/// instance per container: attaching twice hands back the existing one.
#[derive(Debug, Default)]
pub struct ScrollAreas {
    areas: HashMap<String, ScrollArea>,
    scheduler: Scheduler<TimerTask>,
    focused: Option<String>,
}

impl ScrollAreas {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Lifecycle ==========

    /// Wrap `container_id` and register a controller for it.
    ///
    /// Missing containers are a warn-and-skip, not an error: hosts probe
    /// optimistically across many templates. Attaching to an already-wrapped
    /// container returns the existing instance untouched.
    pub fn attach(
        &mut self,
        root: &mut Element,
        container_id: &str,
        options: ScrollOptions,
    ) -> Option<&mut ScrollArea> {
        if self.areas.contains_key(container_id) {
            debug!("scroll area already attached: {container_id}");
            return self.areas.get_mut(container_id);
        }

        let theme = options.theme.clone();
        let Some(container) = find_element_mut(root, container_id) else {
            warn!("scroll area target not found: {container_id}");
            return None;
        };

        let (parts, restore) = area::wrap_container(container, &theme);
        let area = ScrollArea::new(container_id.to_string(), parts, restore, options);
        debug!("scroll area attached: {container_id}");
        let _ = self.areas.insert(container_id.to_string(), area);
        self.areas.get_mut(container_id)
    }

    /// Probe a list of candidate containers and attach only where content
    /// actually overflows the laid-out rect.
    pub fn attach_overflowing(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        candidates: &[&str],
        options: &ScrollOptions,
    ) {
        for id in candidates {
            if self.areas.contains_key(*id) {
                if let Some(area) = self.areas.get_mut(*id) {
                    area.refresh(root, layout);
                }
                continue;
            }
            let Some(rect) = layout.get(id) else {
                continue;
            };
            let Some(element) = find_element(root, id) else {
                continue;
            };
            if natural_height(element) > rect.height.saturating_add(ATTACH_SLACK) {
                let _ = self.attach(root, id, options.clone());
            }
        }
    }

    /// Tear the widget down and restore the container to its pre-attach
    /// shape: children back in place, added nodes gone, timers cancelled.
    pub fn destroy(&mut self, root: &mut Element, container_id: &str) -> bool {
        let Some(mut area) = self.areas.remove(container_id) else {
            return false;
        };
        area.cancel_timers(&mut self.scheduler);
        let parts = area.parts().clone();
        if let Some(container) = find_element_mut(root, container_id) {
            area::unwrap_container(container, &parts, area.restore());
        }
        if self.focused.as_deref() == Some(container_id) {
            self.focused = None;
        }
        debug!("scroll area destroyed: {container_id}");
        true
    }

    pub fn destroy_all(&mut self, root: &mut Element) {
        let ids: Vec<String> = self.areas.keys().cloned().collect();
        for id in ids {
            let _ = self.destroy(root, &id);
        }
    }

    // ========== Lookup ==========

    pub fn get(&self, container_id: &str) -> Option<&ScrollArea> {
        self.areas.get(container_id)
    }

    pub fn get_mut(&mut self, container_id: &str) -> Option<&mut ScrollArea> {
        self.areas.get_mut(container_id)
    }

    pub fn contains(&self, container_id: &str) -> bool {
        self.areas.contains_key(container_id)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn focus(&mut self, container_id: &str) {
        if self.areas.contains_key(container_id) {
            self.focused = Some(container_id.to_string());
        }
    }

    // ========== Refresh ==========

    pub fn refresh(&mut self, root: &mut Element, layout: &LayoutResult, container_id: &str) {
        if let Some(area) = self.areas.get_mut(container_id) {
            area.refresh(root, layout);
        }
    }

    pub fn refresh_all(&mut self, root: &mut Element, layout: &LayoutResult) {
        for area in self.areas.values_mut() {
            area.refresh(root, layout);
        }
    }

    // ========== Event routing ==========

    /// Route one input event. Returns true when the event changed widget
    /// state and the host should re-render.
    pub fn handle_event(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        event: &Event,
        now: Instant,
    ) -> bool {
        match *event {
            Event::PointerDown {
                x,
                y,
                button: PointerButton::Primary,
            } => self.on_pointer_down(root, layout, x, y, now),
            Event::PointerMove { x, y } => self.on_pointer_move(root, layout, x, y, now),
            Event::PointerUp {
                button: PointerButton::Primary,
                ..
            } => self.on_pointer_up(root, layout),
            Event::Wheel { x, y, delta } => self.on_wheel(root, layout, x, y, delta, now),
            Event::Key { key, modifiers } => self.on_key(root, layout, key, modifiers, now),
            _ => false,
        }
    }

    fn on_pointer_down(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        x: u16,
        y: u16,
        now: Instant,
    ) -> bool {
        let path = hit_path(layout, root, x, y);
        let Some(area_id) = path
            .iter()
            .rev()
            .find(|id| self.areas.contains_key(*id))
            .cloned()
        else {
            return false;
        };
        self.focused = Some(area_id.clone());

        let hit = |id: &str| path.iter().any(|entry| entry == id);
        let Some(area) = self.areas.get_mut(&area_id) else {
            return false;
        };
        let parts = area.parts().clone();

        if hit(&parts.thumb) {
            area.start_drag(root, layout, y);
        } else if hit(&parts.button_up) {
            area.press_button(root, layout, &mut self.scheduler, now, -1);
        } else if hit(&parts.button_down) {
            area.press_button(root, layout, &mut self.scheduler, now, 1);
        } else if hit(&parts.track) {
            track_page(area, root, layout, y, now);
        } else {
            // Inside the container but not on the bar: focus only.
            return true;
        }

        area.poke_activity(root, layout, &mut self.scheduler, now);
        true
    }

    fn on_pointer_move(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        x: u16,
        y: u16,
        now: Instant,
    ) -> bool {
        // An active drag owns the pointer no matter where it wanders.
        let dragging: Option<String> = self
            .areas
            .iter()
            .find(|(_, area)| area.is_dragging())
            .map(|(id, _)| id.clone());
        if let Some(area) = dragging.and_then(|id| self.areas.get_mut(&id)) {
            area.drag_move(root, layout, y);
            area.poke_activity(root, layout, &mut self.scheduler, now);
            return true;
        }

        // A held button stops repeating when the pointer leaves it.
        let repeating: Option<String> = self
            .areas
            .iter()
            .find(|(_, area)| area.is_repeating())
            .map(|(id, _)| id.clone());
        if let Some(area) = repeating.and_then(|id| self.areas.get_mut(&id)) {
            let button_id = match area.repeat_direction() {
                Some(direction) if direction < 0 => area.parts().button_up.clone(),
                Some(_) => area.parts().button_down.clone(),
                None => return false,
            };
            let on_button = layout
                .get(&button_id)
                .is_some_and(|rect| rect.contains(x, y));
            if !on_button {
                area.release_button(&mut self.scheduler);
                return true;
            }
        }

        false
    }

    fn on_pointer_up(&mut self, root: &mut Element, layout: &LayoutResult) -> bool {
        let mut handled = false;
        let ids: Vec<String> = self.areas.keys().cloned().collect();
        for id in ids {
            let Some(area) = self.areas.get_mut(&id) else {
                continue;
            };
            if area.is_dragging() {
                area.end_drag(root, layout);
                handled = true;
            }
            if area.is_repeating() {
                area.release_button(&mut self.scheduler);
                handled = true;
            }
        }
        handled
    }

    fn on_wheel(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        x: u16,
        y: u16,
        delta: i16,
        now: Instant,
    ) -> bool {
        let path = hit_path(layout, root, x, y);
        let Some(area_id) = path
            .iter()
            .rev()
            .find(|id| self.areas.contains_key(*id))
            .cloned()
        else {
            return false;
        };
        let Some(area) = self.areas.get_mut(&area_id) else {
            return false;
        };
        area.note_wheel(root, &mut self.scheduler, now, delta);
        area.poke_activity(root, layout, &mut self.scheduler, now);
        true
    }

    fn on_key(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        key: Key,
        modifiers: Modifiers,
        now: Instant,
    ) -> bool {
        let Some(area_id) = self.focused.clone() else {
            return false;
        };
        let Some(area) = self.areas.get_mut(&area_id) else {
            return false;
        };
        let Some(metrics) = area.metrics(root, layout) else {
            return false;
        };

        let step = area.options().scroll_step as i32;
        let page = page_extent(metrics.viewport_extent, area.options().page_scroll_ratio) as i32;

        let handled = match key {
            Key::Up => {
                area.scroll_by(root, layout, -step, ScrollBehavior::Auto, now);
                true
            }
            Key::Down => {
                area.scroll_by(root, layout, step, ScrollBehavior::Auto, now);
                true
            }
            Key::PageUp => {
                area.scroll_by(root, layout, -page, ScrollBehavior::Auto, now);
                true
            }
            Key::PageDown => {
                area.scroll_by(root, layout, page, ScrollBehavior::Auto, now);
                true
            }
            Key::Home if modifiers.ctrl => {
                area.scroll_to(root, layout, 0, ScrollBehavior::Auto, now);
                true
            }
            Key::End if modifiers.ctrl => {
                area.scroll_to(
                    root,
                    layout,
                    metrics.content_extent as i32,
                    ScrollBehavior::Auto,
                    now,
                );
                true
            }
            _ => false,
        };

        if handled {
            area.poke_activity(root, layout, &mut self.scheduler, now);
        }
        handled
    }

    // ========== Tick ==========

    /// One pass of the cooperative loop: run the watchers, dispatch due
    /// timers, advance animations. Returns true when anything changed and
    /// the host should re-render.
    pub fn tick(&mut self, root: &mut Element, layout: &LayoutResult, now: Instant) -> bool {
        let mut changed = false;
        let ids: Vec<String> = self.areas.keys().cloned().collect();

        for id in &ids {
            let Some(area) = self.areas.get_mut(id) else {
                continue;
            };
            area.run_watchers(root, layout, &mut self.scheduler, now);
        }

        for (handle, task) in self.scheduler.fire_due(now) {
            let Some(area) = self.areas.get_mut(task.container_id()) else {
                continue;
            };
            match task {
                TimerTask::SizeRefresh(_) => {
                    if area.acknowledge_size(handle) {
                        area.refresh(root, layout);
                        changed = true;
                    }
                }
                TimerTask::ContentRefresh(_) => {
                    if area.acknowledge_content(handle) {
                        area.refresh(root, layout);
                        changed = true;
                    }
                }
                TimerTask::RepeatStep(_) => {
                    if area.is_repeat_handle(handle) {
                        area.repeat_step(root, layout, now);
                        changed = true;
                    }
                }
                TimerTask::WheelFallback(_) => {
                    if area.is_wheel_handle(handle) {
                        area.wheel_fallback(root, layout, now);
                        changed = true;
                    }
                }
                TimerTask::HideBar(_) => {
                    if area.is_hide_handle(handle) {
                        area.go_idle(root, layout);
                        changed = true;
                    }
                }
            }
        }

        for id in &ids {
            let Some(area) = self.areas.get_mut(id) else {
                continue;
            };
            if area.tick_animation(root, layout, now) {
                changed = true;
            }
        }

        changed
    }

    /// When the loop should wake next: the earliest timer deadline, or one
    /// frame out while an animation runs.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let mut deadline = self.scheduler.next_deadline();
        if self.areas.values().any(ScrollArea::is_animating) {
            let frame = now + FRAME;
            deadline = Some(deadline.map_or(frame, |d| d.min(frame)));
        }
        deadline
    }
}

/// Track click: page toward the click, direction picked against the thumb's
/// vertical midpoint.
fn track_page(
    area: &mut ScrollArea,
    root: &mut Element,
    layout: &LayoutResult,
    y: u16,
    now: Instant,
) {
    let Some(metrics) = area.metrics(root, layout) else {
        return;
    };
    let midpoint = layout
        .get(&area.parts().thumb)
        .map(|rect| rect.center().1)
        .unwrap_or(y);
    let page = page_extent(metrics.viewport_extent, area.options().page_scroll_ratio) as i32;
    let delta = if y < midpoint { -page } else { page };
    area.scroll_by(root, layout, delta, ScrollBehavior::Auto, now);
}
