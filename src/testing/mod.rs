//! Testing infrastructure for the input method controller
//!
//! This module provides a test fixture for integration testing the
//! controller without a real UI.
//!
//! # Architecture
//!
//! 1. **HeadlessBackend**: an in-memory widget tree and window stack
//!    implementing [`Backend`](crate::backend::Backend), with explicit
//!    control over animations and the idle queue.
//!
//! 2. **Fixture**: the harness that owns backend and controller and acts as
//!    the host: focus changes, event delivery, per-tick idle drain.
//!
//! # Example
//!
//! ```ignore
//! use osk_core::testing::Fixture;
//! use osk_core::InputType;
//!
//! #[test]
//! fn test_keyboard_follows_focus() {
//!     let mut fixture = Fixture::new();
//!     let field = fixture.add_field(100, 40, InputType::Phone);
//!
//!     fixture.focus(field);
//!     assert_eq!(fixture.keyboard_name(), Some("kb_phone"));
//!
//!     fixture.blur();
//!     fixture.dispatch();
//!     assert!(fixture.keyboard().is_none());
//! }
//! ```

mod fixture;

pub use fixture::Fixture;
