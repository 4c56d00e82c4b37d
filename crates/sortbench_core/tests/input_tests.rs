//! Integration tests for edge detection, switch decoding and frames.

use sortbench_common::buttons::{BTN_CENTER, BTN_LEFT, BTN_RIGHT, BTN_UP};
use sortbench_core::display::{Frame, Glyph};
use sortbench_core::input::{ButtonEvent, EdgeDetector, Switches};

/// Tests that a held button yields a single press.
#[test]
fn test_held_button_fires_once() {
    let mut edges = EdgeDetector::default();
    assert_eq!(edges.pressed(BTN_UP), BTN_UP);
    assert_eq!(edges.pressed(BTN_UP), 0);
    assert_eq!(edges.pressed(BTN_UP), 0);
    assert_eq!(edges.pressed(0), 0);
    assert_eq!(edges.pressed(BTN_UP), BTN_UP);
}

/// Tests that a button held at boot is not a press once primed.
#[test]
fn test_primed_detector_ignores_initial_level() {
    let mut edges = EdgeDetector::new(BTN_CENTER);
    assert_eq!(edges.pressed(BTN_CENTER), 0);
    assert_eq!(edges.pressed(BTN_CENTER | BTN_LEFT), BTN_LEFT);
}

/// Tests that unassigned bits never produce events.
#[test]
fn test_unknown_bits_ignored() {
    let mut edges = EdgeDetector::default();
    assert_eq!(edges.pressed(0xFFFF_FF00), 0);
}

/// Tests that simultaneous presses are queued in handling order.
#[test]
fn test_event_queue_order() {
    let mut edges = EdgeDetector::default();
    let events = edges.events(BTN_CENTER | BTN_UP | BTN_LEFT | BTN_RIGHT);
    assert_eq!(
        events.as_slice(),
        &[
            ButtonEvent::Right,
            ButtonEvent::Left,
            ButtonEvent::Up,
            ButtonEvent::Center
        ]
    );
    assert!(edges.events(BTN_CENTER | BTN_UP | BTN_LEFT | BTN_RIGHT).is_empty());
}

/// Tests switch bit decoding.
#[test]
fn test_switch_decoding() {
    let sw = Switches(0x0000);
    assert!(!sw.sort_locked());
    assert!(!sw.upper_half());
    assert!(!sw.hardware_selected());

    let sw = Switches(0xD00B);
    assert_eq!(sw.size_code(), 0xB);
    assert!(sw.sort_locked());
    assert!(sw.upper_half());
    assert!(sw.hardware_selected());
}

/// Tests the text form of frames.
#[test]
fn test_frame_rendering() {
    assert_eq!(Frame::BUSY.to_string(), "----");
    assert_eq!(Frame::hex16(0x0A3F).to_string(), "0A3F");
    assert_eq!(Frame::decimal_pairs(9, 16).to_string(), "0916");
    assert_eq!(Frame::browse(0x0F, 0x00E2).to_string(), "0FE2");
}

/// Tests that digit 0 is the least significant nibble.
#[test]
fn test_frame_digit_order() {
    let frame = Frame::hex16(0x1234);
    assert_eq!(frame.0[0], Glyph::Hex(4));
    assert_eq!(frame.0[3], Glyph::Hex(1));
}

/// Tests the active-low segment encoding used by the display driver.
#[test]
fn test_segment_patterns() {
    assert_eq!(Glyph::Hex(0).segments(), 0xC0);
    assert_eq!(Glyph::Hex(8).segments(), 0x80);
    assert_eq!(Glyph::Hex(0xF).segments(), 0x8E);
    assert_eq!(Glyph::Dash.segments(), 0xBF);
    assert_eq!(Frame::BUSY.segment_word(), 0xBFBF_BFBF);
    assert_eq!(Frame::hex16(0x0A3F).segment_word(), 0xC088_B08E);
}
