mod common;

use common::{lines, model, press, type_bytes};
use core_events::{Direction, Key};
use core_model::Cursor;
use pretty_assertions::assert_eq;

#[test]
fn backspace_at_line_start_merges_lines() {
    let mut m = model(&["ab", "cd"]);
    m.set_cursor(Cursor::new(1, 0));
    press(&mut m, Key::Backspace);
    assert_eq!(lines(&m), vec!["abcd"]);
    assert_eq!(m.cursor(), Cursor::new(0, 2));
}

#[test]
fn ctrl_h_and_del_byte_both_backspace() {
    let mut m = model(&["abc"]);
    m.set_cursor(Cursor::new(0, 3));
    type_bytes(&mut m, &[0x08, 0x7f]);
    assert_eq!(lines(&m), vec!["a"]);
}

#[test]
fn enter_splits_line() {
    let mut m = model(&["abcd"]);
    m.set_cursor(Cursor::new(0, 2));
    press(&mut m, Key::Enter);
    assert_eq!(lines(&m), vec!["ab", "cd"]);
    assert_eq!(m.cursor(), Cursor::new(1, 0));
}

#[test]
fn typing_a_session_from_scratch() {
    let mut m = model(&[]);
    type_bytes(&mut m, b"fn main() {\r\tok\r}");
    assert_eq!(lines(&m), vec!["fn main() {", "\tok", "}"]);
    assert_eq!(m.cursor(), Cursor::new(2, 1));
    assert!(m.state().dirty());
}

#[test]
fn noop_edits_leave_document_clean() {
    let mut m = model(&["ab", "cd"]);
    press(&mut m, Key::Backspace);
    m.set_cursor(Cursor::new(1, 2));
    press(&mut m, Key::Delete);
    m.set_cursor(Cursor::new(2, 0));
    press(&mut m, Key::Backspace);
    assert_eq!(lines(&m), vec!["ab", "cd"]);
    assert!(!m.state().dirty());
}

#[test]
fn escape_and_unbound_controls_do_nothing() {
    let mut m = model(&["ab"]);
    for key in [Key::Escape, Key::Control(0x01), Key::Control(0x1a)] {
        let r = press(&mut m, key);
        assert!(!r.dirty);
    }
    assert_eq!(lines(&m), vec!["ab"]);
    assert_eq!(m.cursor(), Cursor::new(0, 0));
}

#[test]
fn tab_renders_to_next_stop_and_cursor_follows_rendered_column() {
    let mut m = model(&["x"]);
    press(&mut m, Key::End);
    press(&mut m, Key::Char(b'\t'));
    press(&mut m, Key::Char(b'y'));
    let line = m.state().document.line(0).unwrap();
    assert_eq!(line.rendered(), b"x y");
    assert_eq!(m.cursor(), Cursor::new(0, 3));
    assert_eq!(m.view().rx, 3);
}

#[test]
fn moving_down_through_short_line_clamps_column() {
    let mut m = model(&["long line", "ab", "long line"]);
    press(&mut m, Key::End);
    press(&mut m, Key::Arrow(Direction::Down));
    assert_eq!(m.cursor(), Cursor::new(1, 2));
    press(&mut m, Key::Arrow(Direction::Down));
    assert_eq!(m.cursor(), Cursor::new(2, 2));
}

#[test]
fn ctrl_l_toggles_gutter_and_narrows_view() {
    let mut m = model(&["a"]);
    press(&mut m, Key::ctrl(b'l'));
    assert!(m.state().line_numbers);
    assert_eq!(m.gutter_width(), 2);
    assert_eq!(m.view().viewport.cols, 78);
    press(&mut m, Key::ctrl(b'l'));
    assert_eq!(m.gutter_width(), 0);
}

#[test]
fn horizontal_scroll_follows_long_line() {
    let long = "x".repeat(100);
    let mut m = common::model_sized(&[long.as_str()], 5, 20);
    press(&mut m, Key::End);
    assert_eq!(m.view().rx, 100);
    assert_eq!(m.view().viewport.col_offset, 81);
    press(&mut m, Key::Home);
    assert_eq!(m.view().viewport.col_offset, 0);
}

#[test]
fn page_down_scrolls_viewport() {
    let content: Vec<String> = (0..40).map(|i| format!("{i}")).collect();
    let refs: Vec<&str> = content.iter().map(String::as_str).collect();
    let mut m = common::model_sized(&refs, 10, 80);
    press(&mut m, Key::PageDown);
    assert_eq!(m.cursor().row, 19);
    assert_eq!(m.view().viewport.row_offset, 10);
    press(&mut m, Key::PageUp);
    assert_eq!(m.cursor().row, 0);
}
