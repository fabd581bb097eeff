mod common;
use common::*;

use core_events::Key;

#[test]
fn clean_buffer_quits_on_first_press() {
    let mut st = state_with(b"abc");
    assert!(press(&mut st, [Key::Quit]));
}

#[test]
fn dirty_buffer_needs_three_consecutive_presses() {
    let mut st = state_with(b"abc");
    press(&mut st, [Key::Byte(b'x')]);

    assert!(!press(&mut st, [Key::Quit]));
    assert_eq!(
        st.status_text(),
        Some("WARNING!!! File has unsaved changes. Press Ctrl-E 2 more times to quit.")
    );
    assert!(!press(&mut st, [Key::Quit]));
    assert!(press(&mut st, [Key::Quit]));
}

#[test]
fn intervening_key_resets_the_count() {
    let mut st = state_with(b"abc");
    press(&mut st, [Key::Byte(b'x')]);

    assert!(!press(&mut st, [Key::Quit, Key::Quit]));
    assert!(!press(&mut st, [Key::ArrowLeft]));
    assert_eq!(st.quit_guard.remaining(), 3);
    assert!(!press(&mut st, [Key::Quit]));
    assert!(!press(&mut st, [Key::Quit]));
    assert!(press(&mut st, [Key::Quit]));
}
