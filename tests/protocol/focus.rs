//! Focus binding tests
//!
//! Tests for binding transitions, keyboard reuse and reselection.

use osk_core::testing::Fixture;
use osk_core::{Backend, Binding, Event, InputType, Layout, WindowProp};

/// Test initial binding state
#[test]
fn test_initial_state() {
    let fixture = Fixture::new();

    assert_eq!(fixture.binding(), Binding::Idle);
    assert!(fixture.keyboard().is_none());
    assert!(fixture.im().focused_widget().is_none());
    assert!(fixture.im().shift().is_none());
}

/// Test that blurring with nothing bound does nothing
#[test]
fn test_blur_when_idle() {
    let mut fixture = Fixture::new();
    fixture.blur();
    fixture.dispatch();

    assert_eq!(fixture.binding(), Binding::Idle);
    assert_eq!(fixture.backend().idle_len(), 0);
    assert!(fixture.format_log().is_empty());
}

/// Test the layout chosen for each input type
#[test]
fn test_keyboard_per_input_type() {
    let cases = [
        (InputType::Text, "kb_default"),
        (InputType::Phone, "kb_phone"),
        (InputType::Int, "kb_int"),
        (InputType::Float, "kb_float"),
        (InputType::Uint, "kb_uint"),
        (InputType::Ufloat, "kb_ufloat"),
        (InputType::Hex, "kb_hex"),
        (InputType::Email, "kb_ascii"),
        (InputType::Password, "kb_ascii"),
        (InputType::Date, "kb_default"),
        (InputType::Unknown(42), "kb_default"),
    ];

    for (input_type, expected) in cases {
        let mut fixture = Fixture::new();
        let field = fixture.add_field(100, 40, input_type);
        fixture.focus(field);
        assert_eq!(fixture.keyboard_name(), Some(expected), "{:?}", input_type);
    }
}

/// Test that focusing the bound widget again changes nothing
#[test]
fn test_refocus_same_widget() {
    let mut fixture = Fixture::new();
    let field = fixture.add_field(700, 40, InputType::Int);

    fixture.focus(field);
    let binding = fixture.binding();
    let shift = fixture.im().shift();
    let y = fixture.window_y(fixture.window());
    fixture.take_events();

    fixture.focus(field);

    assert_eq!(fixture.binding(), binding);
    assert_eq!(fixture.im().shift(), shift);
    assert_eq!(fixture.window_y(fixture.window()), y);
    assert_eq!(fixture.backend().open_count(), 1);
    assert!(fixture.take_events().is_empty());
}

/// Test that moving between fields of the same type keeps the keyboard
#[test]
fn test_same_type_reuses_keyboard() {
    let mut fixture = Fixture::new();
    let a = fixture.add_field(100, 40, InputType::Email);
    let b = fixture.add_field(200, 40, InputType::Password);

    fixture.focus(a);
    let keyboard = fixture.keyboard().unwrap();
    fixture.take_events();

    // Email and password share a layout but are different input types
    fixture.focus(b);
    assert_ne!(fixture.keyboard(), Some(keyboard));

    let c = fixture.add_field(300, 40, InputType::Password);
    let keyboard = fixture.keyboard().unwrap();
    fixture.take_events();
    fixture.focus(c);

    assert_eq!(fixture.keyboard(), Some(keyboard));
    assert_eq!(fixture.im().focused_widget(), Some(c));
    assert_eq!(
        fixture.take_events(),
        vec![Event::KeyboardReused {
            widget: c,
            keyboard
        }]
    );
}

/// Test that a different input type replaces the keyboard without animations
#[test]
fn test_different_type_reselects_keyboard() {
    let mut fixture = Fixture::new();
    let a = fixture.add_field(100, 40, InputType::Phone);
    let b = fixture.add_field(200, 40, InputType::Hex);

    fixture.focus(a);
    let old = fixture.keyboard().unwrap();
    fixture.focus(b);
    let new = fixture.keyboard().unwrap();

    assert_ne!(old, new);
    assert!(!fixture.backend().window_alive(old));
    assert_eq!(fixture.keyboard_name(), Some("kb_hex"));
    assert_eq!(fixture.backend().open_keyboards(), vec![new]);

    // The replacement opens without animation
    assert_eq!(
        fixture.backend().window_prop(new, WindowProp::OpenAnimHint),
        Some("")
    );
    assert_eq!(
        fixture.backend().window_prop(new, WindowProp::CloseAnimHint),
        Some("")
    );

    let events = fixture.take_events();
    assert!(events.contains(&Event::KeyboardClosed {
        keyboard: old,
        deferred: false
    }));
    assert!(events.contains(&Event::KeyboardOpened {
        widget: b,
        keyboard: new,
        layout: Layout::Hex
    }));
}

/// Test that the closing keyboard has its animation hints cleared first
#[test]
fn test_replaced_keyboard_hints_cleared_before_close() {
    let mut fixture = Fixture::new();
    let a = fixture.add_field(100, 40, InputType::Phone);
    let b = fixture.add_field(200, 40, InputType::Text);

    fixture.focus(a);
    fixture.backend_mut().clear_log();
    fixture.focus(b);

    insta::assert_snapshot!(fixture.format_log().trim_end(), @r##"
    prop #2 open_anim_hint=""
    prop #2 close_anim_hint=""
    close #2
    open kb_default -> #3 y=600
    prop #3 open_anim_hint=""
    prop #3 close_anim_hint=""
    "##);
}

/// Test that a widget's input type is read at focus time
#[test]
fn test_input_type_read_on_focus() {
    let mut fixture = Fixture::new();
    let field = fixture.add_field(100, 40, InputType::Text);
    fixture
        .backend_mut()
        .set_input_type(field, InputType::Float.to_raw());

    fixture.focus(field);
    assert_eq!(fixture.keyboard_name(), Some("kb_float"));
}

/// Test that a widget removed from the tree cannot take focus
#[test]
fn test_dead_widget_request() {
    let mut fixture = Fixture::new();
    let field = fixture.add_field(100, 40, InputType::Text);
    fixture.backend_mut().remove_widget(field);

    fixture.focus(field);
    assert_eq!(fixture.binding(), Binding::Idle);
    assert_eq!(fixture.backend().open_count(), 0);
}

/// Test that a missing keyboard resource leaves the controller idle and retryable
#[test]
fn test_missing_keyboard_resource() {
    let mut fixture = Fixture::new();
    fixture.backend_mut().set_missing_window("kb_int");
    let a = fixture.add_field(100, 40, InputType::Text);
    let b = fixture.add_field(200, 40, InputType::Int);

    fixture.focus(a);
    fixture.focus(b);
    assert_eq!(fixture.binding(), Binding::Idle);
    assert!(fixture.backend().open_keyboards().is_empty());

    fixture.focus(a);
    assert_eq!(fixture.keyboard_name(), Some("kb_default"));
}
