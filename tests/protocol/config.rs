//! Configuration tests
//!
//! Tests for configured keyboard names, animation hints and the action button.

use osk_core::testing::Fixture;
use osk_core::{Config, Event, InputType, Layout, WindowProp};

fn fixture_from_json(json: &str) -> Fixture {
    Fixture::with_config(Config::from_json(json).expect("valid config"))
}

/// Test that a configured resource name replaces the built-in one
#[test]
fn test_keyboard_name_override() {
    let mut fixture = fixture_from_json(r#"{"keyboards": {"phone": "kb_phone_large"}}"#);
    let phone = fixture.add_field(100, 40, InputType::Phone);
    let text = fixture.add_field(200, 40, InputType::Text);

    fixture.focus(phone);
    assert_eq!(fixture.keyboard_name(), Some("kb_phone_large"));

    fixture.focus(text);
    assert_eq!(fixture.keyboard_name(), Some("kb_default"));
}

/// Test that a missing overridden resource is reported like any other
#[test]
fn test_keyboard_name_override_missing() {
    let mut fixture = fixture_from_json(r#"{"keyboards": {"hex": "kb_hex_compact"}}"#);
    fixture.backend_mut().set_missing_window("kb_hex_compact");
    let field = fixture.add_field(100, 40, InputType::Hex);

    fixture.focus(field);
    assert!(fixture.keyboard().is_none());
    insta::assert_snapshot!(fixture.format_log().trim_end(), @"open kb_hex_compact failed");
}

/// Test configured animation hints for an unshifted keyboard
#[test]
fn test_custom_open_close_hints() {
    let mut fixture =
        fixture_from_json(r#"{"open_anim_hint": "fade_in", "close_anim_hint": "fade_out"}"#);
    let field = fixture.add_field(100, 40, InputType::Text);

    fixture.focus(field);
    let keyboard = fixture.keyboard().unwrap();

    assert_eq!(
        fixture.backend().window_prop(keyboard, WindowProp::OpenAnimHint),
        Some("fade_in")
    );
    assert_eq!(
        fixture.backend().window_prop(keyboard, WindowProp::CloseAnimHint),
        Some("fade_out")
    );
}

/// Test that the shift hint wins over the open and close hints
#[test]
fn test_custom_shift_hint() {
    let mut fixture =
        fixture_from_json(r#"{"open_anim_hint": "fade_in", "shift_anim_hint": "slide"}"#);
    let field = fixture.add_field(700, 40, InputType::Float);

    fixture.focus(field);
    let keyboard = fixture.keyboard().unwrap();

    assert!(fixture.im().shift().is_some());
    assert_eq!(
        fixture.backend().window_prop(keyboard, WindowProp::OpenAnimHint),
        Some("slide")
    );
    assert_eq!(
        fixture.backend().window_prop(keyboard, WindowProp::CloseAnimHint),
        Some("slide")
    );
}

/// Test the configured initial action button state and its change event
#[test]
fn test_action_button() {
    let mut fixture = fixture_from_json(r#"{"action_button": false}"#);
    assert!(!fixture.im().action_button_enabled());

    fixture.im_mut().enable_action_button(true);
    fixture.im_mut().enable_action_button(true);

    assert!(fixture.im().action_button_enabled());
    assert_eq!(
        fixture.take_events(),
        vec![Event::ActionButton { enabled: true }]
    );
}

/// Test that the layout table serializes with snake case names
#[test]
fn test_config_round_trips_through_json() {
    let mut config = Config::default();
    config
        .keyboards
        .insert(Layout::Ufloat, "kb_ufloat_big".to_string());

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""ufloat":"kb_ufloat_big""#));
    assert_eq!(Config::from_json(&json).unwrap(), config);
}
