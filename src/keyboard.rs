//! Keyboard layout selection
//!
//! Maps the focused widget's input type to the keyboard layout that is
//! opened for it. The mapping is fixed and total: anything without a
//! dedicated pad gets the full default keyboard.

use serde::{Deserialize, Serialize};

use crate::input_type::InputType;

/// Keyboard layouts the controller can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Full keyboard
    Default,
    Phone,
    Int,
    Float,
    Uint,
    Ufloat,
    Hex,
    /// Plain text pad for emails and passwords
    Ascii,
}

impl Layout {
    pub const ALL: [Layout; 8] = [
        Layout::Default,
        Layout::Phone,
        Layout::Int,
        Layout::Float,
        Layout::Uint,
        Layout::Ufloat,
        Layout::Hex,
        Layout::Ascii,
    ];

    /// Window resource name opened for this layout unless configured otherwise
    pub fn default_name(self) -> &'static str {
        match self {
            Layout::Default => "kb_default",
            Layout::Phone => "kb_phone",
            Layout::Int => "kb_int",
            Layout::Float => "kb_float",
            Layout::Uint => "kb_uint",
            Layout::Ufloat => "kb_ufloat",
            Layout::Hex => "kb_hex",
            Layout::Ascii => "kb_ascii",
        }
    }
}

/// Select the keyboard layout for an input type.
pub fn select_layout(input_type: InputType) -> Layout {
    match input_type {
        InputType::Phone => Layout::Phone,
        InputType::Int => Layout::Int,
        InputType::Float => Layout::Float,
        InputType::Uint => Layout::Uint,
        InputType::Ufloat => Layout::Ufloat,
        InputType::Hex => Layout::Hex,
        InputType::Email | InputType::Password => Layout::Ascii,
        _ => Layout::Default,
    }
}
