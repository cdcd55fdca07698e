//! On-screen keyboard controller
//!
//! Keeps a virtual keyboard bound to the focused editable widget: picks the
//! keyboard layout from the widget's input type, moves the host window up
//! when the keyboard would cover the field, and defers closing so that focus
//! hopping between fields keeps one keyboard on screen.
pub mod backend;
pub mod config;
pub mod event;
pub mod geometry;
pub mod idle;
pub mod input_method;
pub mod input_type;
pub mod keyboard;
pub mod testing;

pub use backend::{Backend, PostAction, WidgetId, WindowEvent, WindowEventKind, WindowId, WindowProp};
pub use config::Config;
pub use event::Event;
pub use idle::{IdleTask, ScheduleError};
pub use input_method::{layout_for, Binding, CloseSnapshot, InputMethod, WindowShift};
pub use input_type::InputType;
pub use keyboard::{select_layout, Layout};
