//! Events emitted by the input method controller.
//!
//! The host drains them with [`InputMethod::take_events`] and forwards them
//! wherever it needs them (JSON over IPC, a UI emitter, logs).
//!
//! [`InputMethod::take_events`]: crate::InputMethod::take_events

use serde::Serialize;

use crate::backend::{WidgetId, WindowId};
use crate::keyboard::Layout;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum Event {
    /// A keyboard window was opened for a widget
    #[serde(rename = "keyboard-opened")]
    KeyboardOpened {
        widget: WidgetId,
        keyboard: WindowId,
        layout: Layout,
    },
    /// Focus moved to a widget of the same input type; the keyboard stays
    #[serde(rename = "keyboard-reused")]
    KeyboardReused { widget: WidgetId, keyboard: WindowId },
    /// A keyboard window was closed
    #[serde(rename = "keyboard-closed")]
    KeyboardClosed { keyboard: WindowId, deferred: bool },
    /// A host window was moved up to uncover the focused field
    #[serde(rename = "window-shifted")]
    WindowShifted { window: WindowId, delta: i32 },
    /// A shifted host window went back to its position
    #[serde(rename = "window-restored")]
    WindowRestored { window: WindowId, delta: i32 },
    /// The keyboard's action button was enabled or disabled
    #[serde(rename = "action-button")]
    ActionButton { enabled: bool },
}
