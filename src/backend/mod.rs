//! Backend abstraction layer
//!
//! The controller never touches widgets or windows directly. Everything it
//! needs from the surrounding UI (widget tree, window manager, property
//! store, event subscriptions, idle scheduler) goes through the [`Backend`]
//! trait.
//!
//! - **Headless backend** (`headless`): an in-memory widget tree and window
//!   stack for tests and for hosts that only need the bookkeeping.
//!
//! # Design Invariants
//!
//! 1. **Handles, not references**: widgets and windows are named by
//!    [`WidgetId`] / [`WindowId`]. A handle may outlive the object it names;
//!    `widget_alive` / `window_alive` tell the two cases apart. The controller
//!    holding a handle never keeps anything alive.
//!
//! 2. **Synchronous window manager**: `open_window` returns a window that is
//!    already placed according to the backend's own layout rules, so its
//!    geometry can be read back immediately.
//!
//! 3. **Event delivery is the host's job**: the backend records subscriptions,
//!    and the host forwards matching [`WindowEvent`]s to the controller and
//!    drops the subscription when the handler returns [`PostAction::Remove`].

pub mod headless;

pub use headless::HeadlessBackend;

use serde::Serialize;

use crate::geometry::{Point, Rect, Size};
use crate::idle::{IdleTask, ScheduleError};

/// Handle to a widget in the UI tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WidgetId(pub u32);

/// Handle to a top-level window (host windows and keyboards alike)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WindowId(pub u32);

/// String properties the controller sets on keyboard windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowProp {
    OpenAnimHint,
    CloseAnimHint,
}

impl WindowProp {
    pub fn name(self) -> &'static str {
        match self {
            WindowProp::OpenAnimHint => "open_anim_hint",
            WindowProp::CloseAnimHint => "close_anim_hint",
        }
    }
}

/// Window events a handler can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    /// The window finished its open animation
    OpenCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    OpenCompleted(WindowId),
}

impl WindowEvent {
    pub fn window(&self) -> WindowId {
        match self {
            WindowEvent::OpenCompleted(window) => *window,
        }
    }

    pub fn kind(&self) -> WindowEventKind {
        match self {
            WindowEvent::OpenCompleted(_) => WindowEventKind::OpenCompleted,
        }
    }
}

/// What a subscriber wants after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    /// Keep the subscription
    Continue,
    /// Drop the subscription
    Remove,
}

/// Everything the input method controller needs from the UI.
pub trait Backend {
    /// Whether the widget still exists
    fn widget_alive(&self, widget: WidgetId) -> bool;

    /// Whether the window is still open
    fn window_alive(&self, window: WindowId) -> bool;

    /// Raw `INPUT_TYPE` property of a widget, 0 when unset
    fn input_type(&self, widget: WidgetId) -> i32;

    /// Top-left corner of the widget in screen coordinates
    fn to_global(&self, widget: WidgetId) -> Option<Point>;

    fn widget_size(&self, widget: WidgetId) -> Option<Size>;

    /// Top-level window containing the widget
    fn owning_window(&self, widget: WidgetId) -> Option<WindowId>;

    /// Open the window resource `name` (a keyboard), already positioned.
    fn open_window(&mut self, name: &str) -> anyhow::Result<WindowId>;

    fn close_window(&mut self, window: WindowId);

    /// Window geometry in screen coordinates
    fn window_rect(&self, window: WindowId) -> Option<Rect>;

    fn set_window_y(&mut self, window: WindowId, y: i32);

    /// Repaint the window on the next frame regardless of damage tracking
    fn invalidate_forced(&mut self, window: WindowId);

    fn set_window_prop(&mut self, window: WindowId, prop: WindowProp, value: &str);

    fn subscribe(&mut self, window: WindowId, kind: WindowEventKind);

    fn unsubscribe(&mut self, window: WindowId, kind: WindowEventKind);

    /// Queue a task to run once on a later tick
    fn schedule_idle(&mut self, task: IdleTask) -> Result<(), ScheduleError>;
}
