//! Input type classification of editable widgets
//!
//! Editable widgets declare what they expect to receive through the integer
//! `INPUT_TYPE` property. The controller only needs to tell the types apart,
//! so raw values are classified once and compared afterwards.

/// Classification of an editable field's expected content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputType {
    /// Free text (also the value of an unset property)
    #[default]
    Text,
    Int,
    Uint,
    Hex,
    Float,
    Ufloat,
    Email,
    Password,
    Phone,
    Date,
    Time,
    DateTime,
    Ipv4,
    Custom,
    CustomPassword,
    Ascii,
    /// A raw value this crate does not know about
    Unknown(i32),
}

impl InputType {
    /// Classify a raw `INPUT_TYPE` property value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => InputType::Text,
            1 => InputType::Int,
            2 => InputType::Uint,
            3 => InputType::Hex,
            4 => InputType::Float,
            5 => InputType::Ufloat,
            6 => InputType::Email,
            7 => InputType::Password,
            8 => InputType::Phone,
            9 => InputType::Date,
            10 => InputType::Time,
            11 => InputType::DateTime,
            12 => InputType::Ipv4,
            13 => InputType::Custom,
            14 => InputType::CustomPassword,
            15 => InputType::Ascii,
            other => InputType::Unknown(other),
        }
    }

    /// The raw property value for this type
    pub fn to_raw(self) -> i32 {
        match self {
            InputType::Text => 0,
            InputType::Int => 1,
            InputType::Uint => 2,
            InputType::Hex => 3,
            InputType::Float => 4,
            InputType::Ufloat => 5,
            InputType::Email => 6,
            InputType::Password => 7,
            InputType::Phone => 8,
            InputType::Date => 9,
            InputType::Time => 10,
            InputType::DateTime => 11,
            InputType::Ipv4 => 12,
            InputType::Custom => 13,
            InputType::CustomPassword => 14,
            InputType::Ascii => 15,
            InputType::Unknown(raw) => raw,
        }
    }
}
