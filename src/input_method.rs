//! Input method controller
//!
//! Binds the on-screen keyboard to whichever editable widget holds focus.
//! The host calls [`InputMethod::request`] on every focus change, forwards
//! subscribed window events to [`InputMethod::handle_window_event`] and
//! drains the idle queue into [`InputMethod::run_idle`] once per tick.
//!
//! Focus loss does not close the keyboard right away: the close is deferred
//! to the next idle drain so that moving focus from one field to the next
//! keeps the same keyboard on screen.

use std::mem;

use tracing::{debug, error, info, warn};

use crate::backend::{
    Backend, PostAction, WidgetId, WindowEvent, WindowEventKind, WindowId, WindowProp,
};
use crate::config::Config;
use crate::event::Event;
use crate::geometry::{self, Rect};
use crate::idle::IdleTask;
use crate::input_type::InputType;
use crate::keyboard::{self, Layout};

/// The binding captured when focus was lost, carried by the deferred close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseSnapshot {
    pub widget: WidgetId,
    pub keyboard: WindowId,
    pub input_type: InputType,
    /// Distinguishes successive focus losses of the same widget
    pub serial: u64,
}

/// Focus binding state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    /// No widget bound, no keyboard
    #[default]
    Idle,
    /// A widget has focus and its keyboard is open
    Bound {
        widget: WidgetId,
        keyboard: WindowId,
        input_type: InputType,
    },
    /// Focus was lost; the keyboard stays open until the deferred close runs
    PendingClose(CloseSnapshot),
}

impl Binding {
    pub fn keyboard(&self) -> Option<WindowId> {
        match self {
            Binding::Idle => None,
            Binding::Bound { keyboard, .. } => Some(*keyboard),
            Binding::PendingClose(snapshot) => Some(snapshot.keyboard),
        }
    }

    /// Open keyboard and the input type it was selected for
    fn open_keyboard(&self) -> Option<(WindowId, InputType)> {
        match *self {
            Binding::Idle => None,
            Binding::Bound {
                keyboard,
                input_type,
                ..
            } => Some((keyboard, input_type)),
            Binding::PendingClose(snapshot) => Some((snapshot.keyboard, snapshot.input_type)),
        }
    }
}

/// A host window moved up to uncover the focused field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowShift {
    pub window: WindowId,
    pub delta: i32,
}

pub struct InputMethod {
    binding: Binding,
    shift: Option<WindowShift>,
    /// Keyboard whose open-completed event restores `shift`
    open_subscription: Option<WindowId>,
    config: Config,
    action_button_enabled: bool,
    next_serial: u64,
    pending_events: Vec<Event>,
}

impl Default for InputMethod {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl InputMethod {
    pub fn new(config: Config) -> Self {
        Self {
            binding: Binding::Idle,
            shift: None,
            open_subscription: None,
            action_button_enabled: config.action_button,
            config,
            next_serial: 1,
            pending_events: Vec::new(),
        }
    }

    /// Tear the controller down, closing any keyboard it still owns.
    pub fn destroy(mut self, backend: &mut dyn Backend) {
        self.restore_window_position(backend);
        if let Some(keyboard) = self.binding.keyboard() {
            self.close_keyboard(backend, keyboard, false);
        }
        self.binding = Binding::Idle;
        debug!("Input method destroyed");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    /// Widget currently bound, `None` while idle or waiting to close
    pub fn focused_widget(&self) -> Option<WidgetId> {
        match self.binding {
            Binding::Bound { widget, .. } => Some(widget),
            _ => None,
        }
    }

    /// Keyboard window currently open, including one waiting to close
    pub fn keyboard(&self) -> Option<WindowId> {
        self.binding.keyboard()
    }

    pub fn shift(&self) -> Option<WindowShift> {
        self.shift
    }

    pub fn action_button_enabled(&self) -> bool {
        self.action_button_enabled
    }

    pub fn enable_action_button(&mut self, enabled: bool) {
        if self.action_button_enabled != enabled {
            self.action_button_enabled = enabled;
            self.pending_events.push(Event::ActionButton { enabled });
        }
    }

    /// Drain events emitted since the last call
    pub fn take_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.pending_events)
    }

    /// Focus changed to `widget` (`None` when no editable widget has focus).
    pub fn request(&mut self, backend: &mut dyn Backend, widget: Option<WidgetId>) {
        let widget = widget.filter(|&w| {
            let alive = backend.widget_alive(w);
            if !alive {
                warn!(widget = ?w, "Focus request for a destroyed widget, treating as focus loss");
            }
            alive
        });

        match (self.binding, widget) {
            (Binding::Bound { widget: bound, .. }, Some(new)) if bound == new => {
                debug!(widget = ?new, "Widget already bound");
            }
            (Binding::Bound { widget, keyboard, input_type }, None) => {
                self.focus_lost(backend, widget, keyboard, input_type);
            }
            (Binding::Idle | Binding::PendingClose(_), None) => {}
            (_, Some(new)) => self.show_keyboard(backend, new),
        }
    }

    /// Handle a window event the controller subscribed to.
    pub fn handle_window_event(
        &mut self,
        backend: &mut dyn Backend,
        event: WindowEvent,
    ) -> PostAction {
        match event {
            WindowEvent::OpenCompleted(window) => {
                if self.open_subscription != Some(window) {
                    return PostAction::Continue;
                }
                self.open_subscription = None;
                debug!(keyboard = ?window, "Keyboard open completed");
                self.restore_window_position(backend);
                PostAction::Remove
            }
        }
    }

    /// Run a task previously handed to [`Backend::schedule_idle`].
    pub fn run_idle(&mut self, backend: &mut dyn Backend, task: IdleTask) {
        match task {
            IdleTask::CloseKeyboard(snapshot) => match self.binding {
                Binding::PendingClose(live) if live == snapshot => {
                    self.restore_window_position(backend);
                    self.close_keyboard(backend, snapshot.keyboard, true);
                    self.binding = Binding::Idle;
                }
                _ => {
                    debug!(serial = snapshot.serial, "Focus moved on, deferred close skipped");
                }
            },
        }
    }

    fn focus_lost(
        &mut self,
        backend: &mut dyn Backend,
        widget: WidgetId,
        keyboard: WindowId,
        input_type: InputType,
    ) {
        self.restore_window_position(backend);

        if !self.config.defer_close {
            self.close_keyboard(backend, keyboard, false);
            self.binding = Binding::Idle;
            return;
        }

        let snapshot = CloseSnapshot {
            widget,
            keyboard,
            input_type,
            serial: self.next_serial,
        };
        self.next_serial += 1;

        match backend.schedule_idle(IdleTask::CloseKeyboard(snapshot)) {
            Ok(()) => {
                debug!(widget = ?widget, keyboard = ?keyboard, "Keyboard close deferred");
                self.binding = Binding::PendingClose(snapshot);
            }
            Err(e) => {
                warn!("Cannot defer keyboard close, closing now: {}", e);
                self.close_keyboard(backend, keyboard, false);
                self.binding = Binding::Idle;
            }
        }
    }

    fn show_keyboard(&mut self, backend: &mut dyn Backend, widget: WidgetId) {
        let input_type = InputType::from_raw(backend.input_type(widget));
        let mut open_anim = true;

        if let Some((keyboard, current_type)) = self.binding.open_keyboard() {
            if !backend.window_alive(keyboard) {
                warn!(keyboard = ?keyboard, "Keyboard window vanished, opening a new one");
                if self.open_subscription == Some(keyboard) {
                    self.open_subscription = None;
                }
            } else if current_type == input_type {
                debug!(widget = ?widget, keyboard = ?keyboard, "Reusing open keyboard");
                self.binding = Binding::Bound {
                    widget,
                    keyboard,
                    input_type,
                };
                self.pending_events
                    .push(Event::KeyboardReused { widget, keyboard });
                return;
            } else {
                // A new keyboard replaces this one right away, so neither
                // window animates.
                backend.set_window_prop(keyboard, WindowProp::OpenAnimHint, "");
                backend.set_window_prop(keyboard, WindowProp::CloseAnimHint, "");
                self.close_keyboard(backend, keyboard, false);
                open_anim = false;
            }
        }
        self.binding = Binding::Idle;

        self.open_keyboard(backend, widget, input_type, open_anim);
    }

    fn open_keyboard(
        &mut self,
        backend: &mut dyn Backend,
        widget: WidgetId,
        input_type: InputType,
        open_anim: bool,
    ) {
        let layout = keyboard::select_layout(input_type);
        let name = self.config.keyboard_name(layout).to_string();

        let keyboard = match backend.open_window(&name) {
            Ok(keyboard) => keyboard,
            Err(e) => {
                error!(widget = ?widget, "Failed to open keyboard {}: {:#}", name, e);
                // An idle controller holds no shift
                self.restore_window_position(backend);
                return;
            }
        };
        info!(widget = ?widget, keyboard = ?keyboard, ?layout, "Keyboard opened: {}", name);

        self.binding = Binding::Bound {
            widget,
            keyboard,
            input_type,
        };
        self.pending_events.push(Event::KeyboardOpened {
            widget,
            keyboard,
            layout,
        });

        let (open_hint, close_hint) = if self.shift_for_keyboard(backend, widget, keyboard) {
            let hint = self.config.shift_anim_hint.clone();
            (hint.clone(), hint)
        } else {
            let open_hint = if open_anim {
                self.config.open_anim_hint.clone()
            } else {
                String::new()
            };
            (open_hint, self.config.close_anim_hint.clone())
        };

        backend.set_window_prop(keyboard, WindowProp::OpenAnimHint, &open_hint);
        backend.set_window_prop(keyboard, WindowProp::CloseAnimHint, &close_hint);
    }

    /// Move the widget's window up if `keyboard` covers the widget.
    ///
    /// Returns whether a shift was applied.
    fn shift_for_keyboard(
        &mut self,
        backend: &mut dyn Backend,
        widget: WidgetId,
        keyboard: WindowId,
    ) -> bool {
        let (Some(loc), Some(size), Some(kb_rect)) = (
            backend.to_global(widget),
            backend.widget_size(widget),
            backend.window_rect(keyboard),
        ) else {
            return false;
        };

        let field = Rect::from_loc_and_size(loc, size);
        if !geometry::is_occluded(field, kb_rect.y) {
            return false;
        }

        let Some((window, win_rect)) = backend
            .owning_window(widget)
            .and_then(|w| backend.window_rect(w).map(|rect| (w, rect)))
        else {
            debug!(widget = ?widget, "Field is covered but has no window to shift");
            return false;
        };

        if let Some(previous) = self.shift {
            // The earlier shift is dropped without being undone; callers
            // reach this only when replacing a keyboard of another type.
            warn!(
                window = ?previous.window,
                delta = previous.delta,
                "Replacing a window shift that was not restored"
            );
        }

        let delta = geometry::shift_delta(win_rect, kb_rect.y);
        backend.set_window_y(window, win_rect.y.saturating_sub(delta));
        backend.invalidate_forced(window);
        info!(window = ?window, delta, "Shifted window above keyboard");

        self.shift = Some(WindowShift { window, delta });
        self.pending_events
            .push(Event::WindowShifted { window, delta });

        backend.subscribe(keyboard, WindowEventKind::OpenCompleted);
        self.open_subscription = Some(keyboard);

        true
    }

    /// Undo the current window shift, if any. Safe to call repeatedly.
    fn restore_window_position(&mut self, backend: &mut dyn Backend) {
        let Some(WindowShift { window, delta }) = self.shift.take() else {
            return;
        };

        match backend.window_rect(window) {
            Some(rect) if backend.window_alive(window) => {
                backend.set_window_y(window, rect.y.saturating_add(delta));
                backend.invalidate_forced(window);
                info!(window = ?window, delta, "Restored window position");
                self.pending_events
                    .push(Event::WindowRestored { window, delta });
            }
            _ => {
                debug!(window = ?window, "Shifted window is gone, nothing to restore");
            }
        }
    }

    fn close_keyboard(&mut self, backend: &mut dyn Backend, keyboard: WindowId, deferred: bool) {
        if self.open_subscription == Some(keyboard) {
            backend.unsubscribe(keyboard, WindowEventKind::OpenCompleted);
            self.open_subscription = None;
        }

        if !backend.window_alive(keyboard) {
            debug!(keyboard = ?keyboard, "Keyboard already gone");
            return;
        }
        backend.close_window(keyboard);
        info!(keyboard = ?keyboard, deferred, "Keyboard closed");
        self.pending_events
            .push(Event::KeyboardClosed { keyboard, deferred });
    }
}

/// Layout a widget would get, without opening anything
pub fn layout_for(backend: &dyn Backend, widget: WidgetId) -> Layout {
    keyboard::select_layout(InputType::from_raw(backend.input_type(widget)))
}
