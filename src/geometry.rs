//! Screen geometry and occlusion checks
//!
//! All coordinates are integer logical pixels with y growing downwards.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_loc_and_size(loc: Point, size: Size) -> Self {
        Self::new(loc.x, loc.y, size.w, size.h)
    }

    /// Saturates instead of overflowing at the edge of the coordinate space
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }
}

/// Whether a keyboard whose top edge sits at `keyboard_top` covers the field.
///
/// `field` must be in global coordinates.
pub fn is_occluded(field: Rect, keyboard_top: i32) -> bool {
    field.bottom() > keyboard_top
}

/// Distance the host window must move up so its bottom edge meets the
/// keyboard's top edge.
pub fn shift_delta(window: Rect, keyboard_top: i32) -> i32 {
    window.bottom().saturating_sub(keyboard_top)
}
