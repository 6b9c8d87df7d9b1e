mod structure;

pub(crate) use structure::{unwrap_container, wrap_container, Restore};

use std::time::{Duration, Instant};

use log::debug;

use crate::animation::{Easing, ScrollAnimation};
use crate::element::{find_element, find_element_mut, Element};
use crate::geometry::{
    drag_offset, max_thumb_travel, thumb_extent, thumb_offset, ScrollMetrics,
};
use crate::layout::LayoutResult;
use crate::observe::{ContentWatcher, SizeWatcher};
use crate::registry::TimerTask;
use crate::scheduler::{Debounce, Scheduler, TimerHandle};
use crate::types::{ScrollTheme, Size};

/// One frame of the cooperative loop; paces wheel fallback checks and smooth
/// scrolling.
pub(crate) const FRAME: Duration = Duration::from_millis(16);

/// Delay before a held button starts repeating, and the repeat cadence.
pub(crate) const REPEAT_DELAY: Duration = Duration::from_millis(400);
pub(crate) const REPEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Debounce for size changes; short, sizes settle quickly.
pub(crate) const SIZE_DEBOUNCE: Duration = Duration::from_millis(50);
/// Debounce for content mutations; longer so height transitions settle.
pub(crate) const CONTENT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Duration of a smooth scroll.
pub(crate) const SMOOTH_DURATION: Duration = Duration::from_millis(200);

/// How a scroll command reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Tuning knobs recognized at attach time.
#[derive(Debug, Clone)]
pub struct ScrollOptions {
    /// Cells per arrow-key or button step.
    pub scroll_step: u16,
    /// Fraction of the viewport covered by one page step.
    pub page_scroll_ratio: f32,
    /// Wheel fallback speed multiplier.
    pub wheel_multiplier: f32,
    /// Fade the bar to its idle style when nothing scrolls.
    pub auto_hide: bool,
    /// Inactivity window before the bar goes idle.
    pub hide_delay: Duration,
    pub theme: ScrollTheme,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            scroll_step: 40,
            page_scroll_ratio: 0.9,
            wheel_multiplier: 1.0,
            auto_hide: false,
            hide_delay: Duration::from_millis(1500),
            theme: ScrollTheme::default(),
        }
    }
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_step(mut self, step: u16) -> Self {
        self.scroll_step = step;
        self
    }

    pub fn page_scroll_ratio(mut self, ratio: f32) -> Self {
        self.page_scroll_ratio = ratio;
        self
    }

    pub fn wheel_multiplier(mut self, multiplier: f32) -> Self {
        self.wheel_multiplier = multiplier;
        self
    }

    pub fn auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = delay;
        self
    }

    pub fn theme(mut self, theme: ScrollTheme) -> Self {
        self.theme = theme;
        self
    }
}

/// Ids of the nodes the widget added around the wrapped container.
#[derive(Debug, Clone)]
pub struct Parts {
    pub content: String,
    pub bar: String,
    pub track: String,
    pub thumb: String,
    pub button_up: String,
    pub button_down: String,
}

/// Ephemeral thumb-drag state; lives exactly as long as the gesture.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    start_y: u16,
    start_offset: u16,
}

/// Ephemeral button-repeat state; at most one per instance.
#[derive(Debug, Clone, Copy)]
struct RepeatSession {
    handle: TimerHandle,
    direction: i32,
}

/// Pending wheel fallback check. Deltas arriving before the check fires are
/// coalesced into it.
#[derive(Debug, Clone, Copy)]
struct WheelCheck {
    handle: TimerHandle,
    before: u16,
    delta: i32,
}

/// Controller for one wrapped container: owns the scrollbar parts, the
/// gesture sessions, the watchers, and every timer handle it ever schedules,
/// so destroy can cancel them all.
#[derive(Debug)]
pub struct ScrollArea {
    container_id: String,
    parts: Parts,
    options: ScrollOptions,
    restore: Restore,

    drag: Option<DragSession>,
    repeat: Option<RepeatSession>,
    wheel: Option<WheelCheck>,
    hide_timer: Option<TimerHandle>,
    idle: bool,
    animation: Option<ScrollAnimation>,

    size_watcher: SizeWatcher,
    content_watcher: ContentWatcher,
    size_debounce: Debounce,
    content_debounce: Debounce,
}

impl ScrollArea {
    pub(crate) fn new(
        container_id: String,
        parts: Parts,
        restore: Restore,
        options: ScrollOptions,
    ) -> Self {
        Self {
            container_id,
            parts,
            options,
            restore,
            drag: None,
            repeat: None,
            wheel: None,
            hide_timer: None,
            idle: false,
            animation: None,
            size_watcher: SizeWatcher::new(),
            content_watcher: ContentWatcher::new(),
            size_debounce: Debounce::new(SIZE_DEBOUNCE),
            content_debounce: Debounce::new(CONTENT_DEBOUNCE),
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Current scroll metrics from the last layout pass.
    pub fn metrics(&self, root: &Element, layout: &LayoutResult) -> Option<ScrollMetrics> {
        let content = find_element(root, &self.parts.content)?;
        let (_, viewport) = layout.viewport_size(&self.parts.content)?;
        let (_, extent) = layout.content_size(&self.parts.content)?;
        Some(ScrollMetrics::new(content.scroll_top, viewport, extent))
    }

    pub fn scroll_top(&self, root: &Element) -> u16 {
        find_element(root, &self.parts.content).map_or(0, |content| content.scroll_top)
    }

    // ========== Public scroll operations ==========

    /// Scroll to an absolute position. No clamping happens here; the tree's
    /// `set_scroll_top` primitive clamps when the value is applied.
    pub fn scroll_to(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        position: i32,
        behavior: ScrollBehavior,
        now: Instant,
    ) {
        match behavior {
            ScrollBehavior::Auto => {
                self.animation = None;
                self.apply_offset(root, layout, position);
            }
            ScrollBehavior::Smooth => self.animate_to(root, layout, position, now),
        }
    }

    /// Scroll by a relative delta.
    pub fn scroll_by(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        delta: i32,
        behavior: ScrollBehavior,
        now: Instant,
    ) {
        let current = self.scroll_top(root) as i32;
        self.scroll_to(root, layout, current + delta, behavior, now);
    }

    /// Scroll so that the element's top aligns with the viewport top, minus
    /// `offset`. Returns false when the element is not in the content.
    pub fn scroll_to_element(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        element_id: &str,
        offset: i32,
        now: Instant,
    ) -> bool {
        let Some(target_rect) = layout.get(element_id) else {
            return false;
        };
        let Some(content_rect) = layout.get(&self.parts.content) else {
            return false;
        };
        // The content wrapper has no padding or border, so its rect origin
        // is also its content-space origin.
        let target = target_rect.y as i32 - content_rect.y as i32 - offset;
        self.scroll_to(root, layout, target, ScrollBehavior::Auto, now);
        true
    }

    /// Force a full recomputation of the scrollbar. The escape hatch for
    /// layout changes the watchers have not caught up with yet.
    pub fn refresh(&mut self, root: &mut Element, layout: &LayoutResult) {
        self.update_scrollbar(root, layout);
    }

    // ========== Internals ==========

    fn apply_offset(&mut self, root: &mut Element, layout: &LayoutResult, position: i32) {
        let max_offset = self
            .metrics(root, layout)
            .map_or(0, |metrics| metrics.max_offset());
        if let Some(content) = find_element_mut(root, &self.parts.content) {
            let _ = content.set_scroll_top(position, max_offset);
        }
        self.update_scrollbar(root, layout);
    }

    fn animate_to(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        position: i32,
        now: Instant,
    ) {
        let Some(metrics) = self.metrics(root, layout) else {
            return;
        };
        let target = position.clamp(0, metrics.max_offset() as i32) as u16;
        self.animation = Some(ScrollAnimation::new(
            metrics.offset,
            target,
            now,
            SMOOTH_DURATION,
            Easing::EaseInOut,
        ));
    }

    /// Advance a running smooth scroll. Returns true when the offset moved.
    pub(crate) fn tick_animation(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        now: Instant,
    ) -> bool {
        let Some(animation) = self.animation.clone() else {
            return false;
        };
        let value = animation.value_at(now);
        if animation.finished(now) {
            self.animation = None;
        }

        let changed = self.scroll_top(root) != value;
        if changed {
            self.apply_offset(root, layout, value as i32);
        }
        changed
    }

    /// Recompute everything the scrollbar shows: visibility, state classes,
    /// thumb geometry, button states, and the exposed scroll value.
    pub(crate) fn update_scrollbar(&mut self, root: &mut Element, layout: &LayoutResult) {
        let Some(metrics) = self.metrics(root, layout) else {
            return;
        };

        if !metrics.has_overflow() {
            if let Some(container) = find_element_mut(root, &self.container_id) {
                container.add_class("no-scroll");
            }
            if let Some(bar) = find_element_mut(root, &self.parts.bar) {
                bar.hidden = true;
            }
            return;
        }

        if let Some(container) = find_element_mut(root, &self.container_id) {
            container.remove_class("no-scroll");
        }
        if let Some(bar) = find_element_mut(root, &self.parts.bar) {
            bar.hidden = false;
            bar.aria = Some(crate::accessibility::AriaRange::new(
                metrics.offset,
                0,
                metrics.max_offset(),
            ));
        }

        // Until the bar has been through a layout pass (first attach, or
        // just unhidden) there is no track rect; geometry settles on the
        // next tick.
        if let Some(track_rect) = layout.get(&self.parts.track) {
            let extent = thumb_extent(track_rect.height, &metrics);
            let offset = thumb_offset(track_rect.height, extent, &metrics);
            if let Some(thumb) = find_element_mut(root, &self.parts.thumb) {
                thumb.height = Size::Fixed(extent);
                thumb.top = Some(offset);
            }
        }

        self.apply_part_styles(root, &metrics);
    }

    fn apply_part_styles(&mut self, root: &mut Element, metrics: &ScrollMetrics) {
        let theme = self.options.theme.clone();

        if let Some(thumb) = find_element_mut(root, &self.parts.thumb) {
            thumb.style = if self.idle {
                theme.idle.clone()
            } else if self.drag.is_some() {
                theme.thumb_dragging.clone()
            } else {
                theme.thumb.clone()
            };
        }

        if let Some(track) = find_element_mut(root, &self.parts.track) {
            track.style = if self.idle {
                theme.idle.clone()
            } else {
                theme.track.clone()
            };
        }

        let up_disabled = metrics.at_top();
        let down_disabled = metrics.at_bottom();
        for (id, disabled) in [
            (self.parts.button_up.clone(), up_disabled),
            (self.parts.button_down.clone(), down_disabled),
        ] {
            if let Some(button) = find_element_mut(root, &id) {
                button.disabled = disabled;
                button.style = if self.idle {
                    theme.idle.clone()
                } else if disabled {
                    theme.button_disabled.clone()
                } else {
                    theme.button.clone()
                };
            }
        }
    }

    // ========== Dragging ==========

    pub(crate) fn start_drag(&mut self, root: &mut Element, layout: &LayoutResult, y: u16) {
        let start_offset = self.scroll_top(root);
        self.drag = Some(DragSession {
            start_y: y,
            start_offset,
        });
        if let Some(thumb) = find_element_mut(root, &self.parts.thumb) {
            thumb.add_class("dragging");
        }
        self.update_scrollbar(root, layout);
    }

    pub(crate) fn drag_move(&mut self, root: &mut Element, layout: &LayoutResult, y: u16) {
        let Some(session) = self.drag else {
            return;
        };
        let Some(metrics) = self.metrics(root, layout) else {
            return;
        };
        let (Some(track_rect), Some(thumb_rect)) = (
            layout.get(&self.parts.track),
            layout.get(&self.parts.thumb),
        ) else {
            return;
        };

        let max_travel = max_thumb_travel(track_rect.height, thumb_rect.height);
        let delta = y as i32 - session.start_y as i32;
        let Some(target) = drag_offset(session.start_offset, delta, max_travel, metrics.max_offset())
        else {
            // Nothing to scroll; ignore movement.
            return;
        };

        // Assigning the offset is what moves the thumb; no double
        // bookkeeping of thumb state.
        self.animation = None;
        self.apply_offset(root, layout, target);
    }

    pub(crate) fn end_drag(&mut self, root: &mut Element, layout: &LayoutResult) {
        if self.drag.take().is_none() {
            return;
        }
        if let Some(thumb) = find_element_mut(root, &self.parts.thumb) {
            thumb.remove_class("dragging");
        }
        self.update_scrollbar(root, layout);
    }

    // ========== Buttons ==========

    pub(crate) fn press_button(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        scheduler: &mut Scheduler<TimerTask>,
        now: Instant,
        direction: i32,
    ) {
        // Only one repeat timer may exist per instance; clear any leftover
        // before arming a new one.
        self.release_button(scheduler);

        let step = direction * self.options.scroll_step as i32;
        self.scroll_by(root, layout, step, ScrollBehavior::Auto, now);

        let handle = scheduler.schedule_repeating(
            now,
            REPEAT_DELAY,
            REPEAT_INTERVAL,
            TimerTask::RepeatStep(self.container_id.clone()),
        );
        self.repeat = Some(RepeatSession { handle, direction });
    }

    pub(crate) fn release_button(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        if let Some(session) = self.repeat.take() {
            let _ = scheduler.cancel(session.handle);
        }
    }

    pub(crate) fn is_repeat_handle(&self, handle: TimerHandle) -> bool {
        self.repeat.is_some_and(|session| session.handle == handle)
    }

    pub(crate) fn repeat_direction(&self) -> Option<i32> {
        self.repeat.map(|session| session.direction)
    }

    pub(crate) fn repeat_step(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        now: Instant,
    ) {
        let Some(direction) = self.repeat_direction() else {
            return;
        };
        let step = direction * self.options.scroll_step as i32;
        self.scroll_by(root, layout, step, ScrollBehavior::Auto, now);
    }

    // ========== Wheel ==========

    /// Record a wheel delta and arm the next-frame check. The host gets the
    /// first chance to scroll; only if the offset did not move by the time
    /// the check fires does the widget scroll manually.
    pub(crate) fn note_wheel(
        &mut self,
        root: &Element,
        scheduler: &mut Scheduler<TimerTask>,
        now: Instant,
        delta: i16,
    ) {
        match &mut self.wheel {
            Some(check) => check.delta += delta as i32,
            None => {
                let handle = scheduler.schedule(
                    now,
                    FRAME,
                    TimerTask::WheelFallback(self.container_id.clone()),
                );
                self.wheel = Some(WheelCheck {
                    handle,
                    before: self.scroll_top(root),
                    delta: delta as i32,
                });
            }
        }
    }

    pub(crate) fn is_wheel_handle(&self, handle: TimerHandle) -> bool {
        self.wheel.is_some_and(|check| check.handle == handle)
    }

    pub(crate) fn wheel_fallback(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        now: Instant,
    ) {
        let Some(check) = self.wheel.take() else {
            return;
        };
        let current = self.scroll_top(root);
        if current == check.before && check.delta != 0 {
            let delta = (check.delta as f32 * self.options.wheel_multiplier).round() as i32;
            self.scroll_by(root, layout, delta, ScrollBehavior::Auto, now);
        } else {
            // The host scrolled natively; just keep the thumb honest.
            self.update_scrollbar(root, layout);
        }
    }

    // ========== Auto-hide ==========

    /// Note scroll activity: leave the idle state and re-arm the hide timer.
    pub(crate) fn poke_activity(
        &mut self,
        root: &mut Element,
        layout: &LayoutResult,
        scheduler: &mut Scheduler<TimerTask>,
        now: Instant,
    ) {
        if !self.options.auto_hide {
            return;
        }
        if self.idle {
            self.idle = false;
            if let Some(bar) = find_element_mut(root, &self.parts.bar) {
                bar.remove_class("scroll-idle");
            }
            self.update_scrollbar(root, layout);
        }
        if let Some(handle) = self.hide_timer.take() {
            let _ = scheduler.cancel(handle);
        }
        self.hide_timer = Some(scheduler.schedule(
            now,
            self.options.hide_delay,
            TimerTask::HideBar(self.container_id.clone()),
        ));
    }

    pub(crate) fn is_hide_handle(&self, handle: TimerHandle) -> bool {
        self.hide_timer == Some(handle)
    }

    pub(crate) fn go_idle(&mut self, root: &mut Element, layout: &LayoutResult) {
        self.hide_timer = None;
        self.idle = true;
        if let Some(bar) = find_element_mut(root, &self.parts.bar) {
            bar.add_class("scroll-idle");
        }
        self.update_scrollbar(root, layout);
    }

    // ========== Watchers ==========

    pub(crate) fn run_watchers(
        &mut self,
        root: &Element,
        layout: &LayoutResult,
        scheduler: &mut Scheduler<TimerTask>,
        now: Instant,
    ) {
        let (Some(container_rect), Some(content_rect)) = (
            layout.get(&self.container_id),
            layout.get(&self.parts.content),
        ) else {
            return;
        };

        if self.size_watcher.check(container_rect, content_rect) {
            self.size_debounce.kick(
                scheduler,
                now,
                TimerTask::SizeRefresh(self.container_id.clone()),
            );
        }

        if let Some(content) = find_element(root, &self.parts.content) {
            if self.content_watcher.check(content) {
                self.content_debounce.kick(
                    scheduler,
                    now,
                    TimerTask::ContentRefresh(self.container_id.clone()),
                );
            }
        }
    }

    pub(crate) fn acknowledge_size(&mut self, handle: TimerHandle) -> bool {
        self.size_debounce.acknowledge(handle)
    }

    pub(crate) fn acknowledge_content(&mut self, handle: TimerHandle) -> bool {
        self.content_debounce.acknowledge(handle)
    }

    // ========== Teardown ==========

    /// Cancel every pending timer this instance owns. Nothing may fire
    /// against the instance after this returns.
    pub(crate) fn cancel_timers(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.release_button(scheduler);
        if let Some(check) = self.wheel.take() {
            let _ = scheduler.cancel(check.handle);
        }
        if let Some(handle) = self.hide_timer.take() {
            let _ = scheduler.cancel(handle);
        }
        self.size_debounce.cancel(scheduler);
        self.content_debounce.cancel(scheduler);
        self.animation = None;
        self.drag = None;
        debug!("scroll area {} timers cancelled", self.container_id);
    }

    pub(crate) fn restore(&self) -> Restore {
        self.restore
    }
}
