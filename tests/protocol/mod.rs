//! Behavioral tests for the focus-to-keyboard protocol
//!
//! These tests verify the controller's reaction to focus changes, window
//! events and idle ticks using the test fixture.
//!
//! # Test Organization
//!
//! - `focus.rs` - Binding transitions, reuse and reselection
//! - `occlusion.rs` - Window shifting and its restoration
//! - `deferred_close.rs` - Deferred close races and fallbacks
//! - `config.rs` - Configured keyboard names and animation hints

mod config;
mod focus;
