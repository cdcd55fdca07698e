//! Headless backend for testing
//!
//! This module provides an in-memory UI that needs no display, allowing the
//! controller to run in CI environments and in integration tests.
//!
//! # Design Invariants
//!
//! 1. **No rendering**: windows are rectangles with a property map. A forced
//!    invalidation only bumps a counter that tests can assert on.
//!
//! 2. **Deterministic layout**: host windows sit where they are put.
//!    Keyboards are anchored to the bottom edge of the screen, full width,
//!    with a per-resource height, so occlusion scenarios are reproducible.
//!
//! 3. **Explicit time**: nothing happens between calls. Open animations
//!    complete when [`HeadlessBackend::complete_open_animations`] is called
//!    and the idle queue empties only through [`HeadlessBackend::drain_idle`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write;

use anyhow::bail;
use tracing::debug;

use super::{Backend, WidgetId, WindowEvent, WindowEventKind, WindowId, WindowProp};
use crate::geometry::{Point, Rect, Size};
use crate::idle::{IdleQueue, IdleTask, ScheduleError};

/// Default keyboard height in logical pixels
pub const DEFAULT_KEYBOARD_HEIGHT: i32 = 200;

/// A window in the headless window stack
#[derive(Debug)]
pub struct HeadlessWindow {
    /// Resource name for windows opened through `open_window`
    pub name: Option<String>,
    pub rect: Rect,
    pub props: HashMap<WindowProp, String>,
    /// Open animation still running
    pub opening: bool,
    /// Count of forced invalidations (for assertions)
    pub invalidate_count: usize,
}

/// A widget placed inside a host window, or floating on the overlay
#[derive(Debug)]
pub struct HeadlessWidget {
    /// `None` for overlay widgets that belong to no window
    pub window: Option<WindowId>,
    /// Position relative to the window (to the screen when floating), and size
    pub rect: Rect,
    pub input_type: i32,
}

/// Headless UI state for testing without a real display
pub struct HeadlessBackend {
    pub screen: Size,
    windows: BTreeMap<WindowId, HeadlessWindow>,
    widgets: HashMap<WidgetId, HeadlessWidget>,
    subscriptions: HashSet<(WindowId, WindowEventKind)>,
    idle: IdleQueue,
    keyboard_height: i32,
    keyboard_heights: HashMap<String, i32>,
    missing_windows: HashSet<String>,
    next_window_id: u32,
    next_widget_id: u32,
    open_count: usize,
    close_count: usize,
    log: Vec<String>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(800, 480)
    }
}

impl HeadlessBackend {
    /// Create a new headless backend with a screen of the given size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            screen: Size::new(width, height),
            windows: BTreeMap::new(),
            widgets: HashMap::new(),
            subscriptions: HashSet::new(),
            idle: IdleQueue::new(),
            keyboard_height: DEFAULT_KEYBOARD_HEIGHT,
            keyboard_heights: HashMap::new(),
            missing_windows: HashSet::new(),
            next_window_id: 1,
            next_widget_id: 1,
            open_count: 0,
            close_count: 0,
            log: Vec::new(),
        }
    }

    /// Height of keyboards without a specific height
    pub fn set_keyboard_height(&mut self, height: i32) {
        self.keyboard_height = height;
    }

    /// Height of the keyboard opened from resource `name`
    pub fn set_keyboard_height_for(&mut self, name: &str, height: i32) {
        self.keyboard_heights.insert(name.to_string(), height);
    }

    /// Make `open_window(name)` fail, as if the resource did not exist
    pub fn set_missing_window(&mut self, name: &str) {
        self.missing_windows.insert(name.to_string());
    }

    /// Limit pending idle tasks; `Some(0)` makes every schedule fail
    pub fn set_idle_capacity(&mut self, capacity: Option<usize>) {
        self.idle.set_capacity(capacity);
    }

    /// Add a host window at the given screen rectangle
    pub fn add_window(&mut self, rect: Rect) -> WindowId {
        let id = self.alloc_window_id();
        self.windows.insert(
            id,
            HeadlessWindow {
                name: None,
                rect,
                props: HashMap::new(),
                opening: false,
                invalidate_count: 0,
            },
        );
        debug!(window = ?id, ?rect, "Added host window");
        id
    }

    /// Remove a window and every widget inside it
    pub fn remove_window(&mut self, window: WindowId) {
        if self.windows.remove(&window).is_some() {
            self.widgets.retain(|_, w| w.window != Some(window));
            self.subscriptions.retain(|(w, _)| *w != window);
        }
    }

    /// Add a widget to `window`; `rect` is relative to the window
    pub fn add_widget(&mut self, window: WindowId, rect: Rect, input_type: i32) -> WidgetId {
        self.insert_widget(Some(window), rect, input_type)
    }

    /// Add a widget on the overlay; `rect` is in screen coordinates
    pub fn add_floating_widget(&mut self, rect: Rect, input_type: i32) -> WidgetId {
        self.insert_widget(None, rect, input_type)
    }

    pub fn remove_widget(&mut self, widget: WidgetId) {
        self.widgets.remove(&widget);
    }

    pub fn set_input_type(&mut self, widget: WidgetId, input_type: i32) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.input_type = input_type;
        }
    }

    pub fn window(&self, window: WindowId) -> Option<&HeadlessWindow> {
        self.windows.get(&window)
    }

    pub fn window_name(&self, window: WindowId) -> Option<&str> {
        self.windows.get(&window)?.name.as_deref()
    }

    pub fn window_prop(&self, window: WindowId, prop: WindowProp) -> Option<&str> {
        self.windows.get(&window)?.props.get(&prop).map(String::as_str)
    }

    /// Keyboards currently open (windows created through `open_window`)
    pub fn open_keyboards(&self) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|(_, w)| w.name.is_some())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn invalidate_count(&self, window: WindowId) -> usize {
        self.windows
            .get(&window)
            .map(|w| w.invalidate_count)
            .unwrap_or(0)
    }

    pub fn is_subscribed(&self, window: WindowId, kind: WindowEventKind) -> bool {
        self.subscriptions.contains(&(window, kind))
    }

    /// Number of `open_window` calls that succeeded
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    /// Number of `close_window` calls on live windows
    pub fn close_count(&self) -> usize {
        self.close_count
    }

    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    /// Take every pending idle task, oldest first
    pub fn drain_idle(&mut self) -> Vec<IdleTask> {
        self.idle.drain()
    }

    /// Finish every running open animation.
    ///
    /// Returns the events that have a subscriber.
    pub fn complete_open_animations(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for (id, window) in self.windows.iter_mut() {
            if window.opening {
                window.opening = false;
                if self
                    .subscriptions
                    .contains(&(*id, WindowEventKind::OpenCompleted))
                {
                    events.push(WindowEvent::OpenCompleted(*id));
                }
            }
        }
        events
    }

    /// Calls made by the controller, one line each
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn format_log(&self) -> String {
        let mut output = String::new();
        for line in &self.log {
            writeln!(&mut output, "{}", line).ok();
        }
        output
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn insert_widget(&mut self, window: Option<WindowId>, rect: Rect, input_type: i32) -> WidgetId {
        let id = WidgetId(self.next_widget_id);
        self.next_widget_id += 1;
        self.widgets.insert(
            id,
            HeadlessWidget {
                window,
                rect,
                input_type,
            },
        );
        id
    }

    fn alloc_window_id(&mut self) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;
        id
    }

    fn keyboard_rect(&self, name: &str) -> Rect {
        let height = self
            .keyboard_heights
            .get(name)
            .copied()
            .unwrap_or(self.keyboard_height);
        Rect::new(0, self.screen.h - height, self.screen.w, height)
    }
}

impl Backend for HeadlessBackend {
    fn widget_alive(&self, widget: WidgetId) -> bool {
        self.widgets
            .get(&widget)
            .is_some_and(|w| w.window.map_or(true, |win| self.windows.contains_key(&win)))
    }

    fn window_alive(&self, window: WindowId) -> bool {
        self.windows.contains_key(&window)
    }

    fn input_type(&self, widget: WidgetId) -> i32 {
        self.widgets.get(&widget).map(|w| w.input_type).unwrap_or(0)
    }

    fn to_global(&self, widget: WidgetId) -> Option<Point> {
        let widget = self.widgets.get(&widget)?;
        let origin = match widget.window {
            Some(window) => {
                let rect = self.windows.get(&window)?.rect;
                Point::new(rect.x, rect.y)
            }
            None => Point::default(),
        };
        Some(Point::new(
            origin.x.saturating_add(widget.rect.x),
            origin.y.saturating_add(widget.rect.y),
        ))
    }

    fn widget_size(&self, widget: WidgetId) -> Option<Size> {
        let widget = self.widgets.get(&widget)?;
        Some(Size::new(widget.rect.w, widget.rect.h))
    }

    fn owning_window(&self, widget: WidgetId) -> Option<WindowId> {
        let window = self.widgets.get(&widget)?.window?;
        self.windows.contains_key(&window).then_some(window)
    }

    fn open_window(&mut self, name: &str) -> anyhow::Result<WindowId> {
        if self.missing_windows.contains(name) {
            self.log.push(format!("open {} failed", name));
            bail!("no window resource named {}", name);
        }

        let rect = self.keyboard_rect(name);
        let id = self.alloc_window_id();
        self.windows.insert(
            id,
            HeadlessWindow {
                name: Some(name.to_string()),
                rect,
                props: HashMap::new(),
                opening: true,
                invalidate_count: 0,
            },
        );
        self.open_count += 1;
        self.log.push(format!("open {} -> #{} y={}", name, id.0, rect.y));
        Ok(id)
    }

    fn close_window(&mut self, window: WindowId) {
        if self.windows.remove(&window).is_some() {
            self.close_count += 1;
            self.subscriptions.retain(|(w, _)| *w != window);
            self.log.push(format!("close #{}", window.0));
        }
    }

    fn window_rect(&self, window: WindowId) -> Option<Rect> {
        self.windows.get(&window).map(|w| w.rect)
    }

    fn set_window_y(&mut self, window: WindowId, y: i32) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.rect.y = y;
            self.log.push(format!("move #{} y={}", window.0, y));
        }
    }

    fn invalidate_forced(&mut self, window: WindowId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.invalidate_count += 1;
        }
    }

    fn set_window_prop(&mut self, window: WindowId, prop: WindowProp, value: &str) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.props.insert(prop, value.to_string());
            self.log
                .push(format!("prop #{} {}={:?}", window.0, prop.name(), value));
        }
    }

    fn subscribe(&mut self, window: WindowId, kind: WindowEventKind) {
        if self.windows.contains_key(&window) {
            self.subscriptions.insert((window, kind));
            self.log.push(format!("subscribe #{} {:?}", window.0, kind));
        }
    }

    fn unsubscribe(&mut self, window: WindowId, kind: WindowEventKind) {
        if self.subscriptions.remove(&(window, kind)) {
            self.log.push(format!("unsubscribe #{} {:?}", window.0, kind));
        }
    }

    fn schedule_idle(&mut self, task: IdleTask) -> Result<(), ScheduleError> {
        let IdleTask::CloseKeyboard(snapshot) = &task;
        let line = format!("schedule close #{} serial={}", snapshot.keyboard.0, snapshot.serial);
        match self.idle.push(task) {
            Ok(()) => {
                self.log.push(line);
                Ok(())
            }
            Err(e) => {
                self.log.push(format!("{} refused", line));
                Err(e)
            }
        }
    }
}
