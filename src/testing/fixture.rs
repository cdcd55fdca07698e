//! Test fixture for integration testing
//!
//! The Fixture couples a headless backend with an input method controller
//! and plays the host's part: it forwards focus changes, delivers subscribed
//! window events and drains the idle queue once per tick.

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::backend::{Backend, HeadlessBackend, PostAction, WidgetId, WindowId};
use crate::config::Config;
use crate::event::Event;
use crate::geometry::Rect;
use crate::input_method::{Binding, InputMethod};
use crate::input_type::InputType;

/// Test fixture for integration testing
///
/// Provides a complete environment with:
/// - Headless backend with a portrait screen
/// - Input method controller
/// - One host window covering the screen
pub struct Fixture {
    backend: HeadlessBackend,
    im: InputMethod,
    window: WindowId,
}

impl Fixture {
    /// Portrait 480x800 screen, 200px keyboards, one full-screen window
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        init_tracing();

        let mut backend = HeadlessBackend::new(480, 800);
        backend.set_keyboard_height(200);
        let window = backend.add_window(Rect::new(0, 0, 480, 800));
        let im = InputMethod::new(config);

        info!("Test fixture initialized with headless backend");

        Self {
            backend,
            im,
            window,
        }
    }

    /// The full-screen host window
    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn backend(&self) -> &HeadlessBackend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut HeadlessBackend {
        &mut self.backend
    }

    pub fn im(&self) -> &InputMethod {
        &self.im
    }

    pub fn im_mut(&mut self) -> &mut InputMethod {
        &mut self.im
    }

    /// Add an editable field to the host window
    pub fn add_field(&mut self, y: i32, height: i32, input_type: InputType) -> WidgetId {
        let window = self.window;
        self.add_field_to(window, Rect::new(20, y, 440, height), input_type)
    }

    pub fn add_field_to(&mut self, window: WindowId, rect: Rect, input_type: InputType) -> WidgetId {
        self.backend.add_widget(window, rect, input_type.to_raw())
    }

    pub fn focus(&mut self, widget: WidgetId) {
        self.im.request(&mut self.backend, Some(widget));
    }

    pub fn blur(&mut self) {
        self.im.request(&mut self.backend, None);
    }

    /// One UI tick: finish open animations, then drain the idle queue
    pub fn dispatch(&mut self) {
        for event in self.backend.complete_open_animations() {
            if self.im.handle_window_event(&mut self.backend, event) == PostAction::Remove {
                self.backend.unsubscribe(event.window(), event.kind());
            }
        }

        for task in self.backend.drain_idle() {
            self.im.run_idle(&mut self.backend, task);
        }
    }

    pub fn binding(&self) -> Binding {
        self.im.binding()
    }

    pub fn keyboard(&self) -> Option<WindowId> {
        self.im.keyboard()
    }

    /// Resource name of the open keyboard
    pub fn keyboard_name(&self) -> Option<&str> {
        self.backend.window_name(self.im.keyboard()?)
    }

    pub fn window_y(&self, window: WindowId) -> Option<i32> {
        self.backend.window_rect(window).map(|r| r.y)
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.im.take_events()
    }

    /// Backend calls made so far, for snapshot testing
    pub fn format_log(&self) -> String {
        self.backend.format_log()
    }

    /// Destroy the controller, returning the backend for inspection
    pub fn destroy(self) -> HeadlessBackend {
        let Self {
            mut backend, im, ..
        } = self;
        im.destroy(&mut backend);
        backend
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

fn init_tracing() {
    // Several tests share the process; only the first install wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
