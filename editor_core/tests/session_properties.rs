//! Integration tests for the document session
//!
//! These tests drive the public session API the way an embedding host does:
//! one operation at a time, checking observable state after each call.

use editor_core::{DocumentSession, EditorError, EditorMode, Motion};

const ALL_MOTIONS: [Motion; 11] = [
    Motion::Left,
    Motion::Right,
    Motion::Down,
    Motion::Up,
    Motion::WordForward,
    Motion::WordBackward,
    Motion::WordEnd,
    Motion::LineStart,
    Motion::LineEnd,
    Motion::BufferStart,
    Motion::BufferEnd,
];

/// Small deterministic generator so edit sequences are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

#[test]
fn test_length_tracks_edits() {
    let mut rng = Lcg(7);
    let mut session = DocumentSession::from_text("seed text\nsecond line");
    let mut expected = session.len();
    let mut model = session.text().into_bytes();

    for _ in 0..500 {
        if rng.next(3) == 0 && !model.is_empty() {
            let position = rng.next(model.len());
            let length = rng.next(model.len() - position + 1);
            session.delete(position, length).unwrap();
            model.drain(position..position + length);
            expected -= length;
        } else {
            let position = rng.next(model.len() + 1);
            let text = ["a", "xy", "\n", "word ", ""][rng.next(5)];
            session.insert(position, text).unwrap();
            model.splice(position..position, text.bytes());
            expected += text.len();
        }
        assert_eq!(session.len(), expected);
        assert_eq!(session.bytes(), model);
        assert!(session.cursor_position() <= session.len());
    }
}

#[test]
fn test_round_trip_load() {
    for text in ["", "a", "hello\nworld", "\n", "trailing\n", "\n\nx\n\n"] {
        let mut session = DocumentSession::new();
        session.load_text(text);
        assert_eq!(session.text(), text);
        assert_eq!(session.len(), text.len());
        assert_eq!(session.text(), session.text());
    }
}

#[test]
fn test_insert_then_delete_restores() {
    let original = "the quick\nbrown fox";
    for position in 0..=original.len() {
        let mut session = DocumentSession::from_text(original);
        session.insert(position, "JUMPS\n").unwrap();
        session.delete(position, 6).unwrap();
        assert_eq!(session.text(), original, "insert/delete at {position}");
    }
}

#[test]
fn test_out_of_range_is_atomic() {
    let mut session = DocumentSession::from_text("hello");
    session.set_position(3);
    let before = session.snapshot();

    assert!(matches!(
        session.insert(6, "x"),
        Err(EditorError::OutOfRange { .. })
    ));
    assert!(matches!(
        session.delete(3, 3),
        Err(EditorError::OutOfRange { .. })
    ));
    assert!(matches!(
        session.delete(usize::MAX, 2),
        Err(EditorError::OutOfRange { .. })
    ));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_motions_bounded_everywhere() {
    let text = "fn main() {\n    let x = 1;\n\n}\n";
    for start in 0..=text.len() {
        for motion in ALL_MOTIONS {
            let mut session = DocumentSession::from_text(text);
            session.set_position(start);
            for _ in 0..3 {
                session.apply_motion(motion);
                assert!(session.cursor_position() <= session.len());
                let line_start = session.buffer().lines().line_start(session.cursor_line());
                assert_eq!(line_start + session.cursor_column(), session.cursor_position());
            }
        }
    }
}

#[test]
fn test_left_right_saturate() {
    let mut session = DocumentSession::from_text("abc");
    for _ in 0..10 {
        session.apply_motion(Motion::Left);
    }
    assert_eq!(session.cursor_position(), 0);

    for _ in 0..10 {
        session.apply_motion(Motion::Right);
    }
    assert_eq!(session.cursor_position(), 3);
}

#[test]
fn test_sticky_column_round_trip() {
    let mut session = DocumentSession::from_text("a long first line\nshort\nlast");
    session.set_position(12);
    session.apply_motion(Motion::Down);
    assert_eq!((session.cursor_line(), session.cursor_column()), (1, 5));
    session.apply_motion(Motion::Up);
    assert_eq!((session.cursor_line(), session.cursor_column()), (0, 12));
}

#[test]
fn test_search_wraparound() {
    let mut session = DocumentSession::from_text("abcXabc");
    session.set_search_pattern("abc");
    session.set_position(4);
    assert_eq!(session.search_next(), Ok(4));
    assert_eq!(session.cursor_position(), 4);
    assert_eq!(session.search_next(), Ok(0));
    assert_eq!(session.cursor_position(), 0);
}

#[test]
fn test_search_restarts_after_edit() {
    let mut session = DocumentSession::from_text("abcXabc");
    session.set_search_pattern("abc");
    session.set_position(4);
    session.search_next().unwrap();
    session.insert(7, "!").unwrap();
    // The edit forgets the previous match, so the cursor's own match counts
    assert_eq!(session.search_next(), Ok(4));
}

#[test]
fn test_hello_world_scenario() {
    let mut session = DocumentSession::new();
    session.load_text("hello\nworld");
    assert_eq!(session.line_count(), 2);
    assert_eq!(session.line_text(0).as_deref(), Some("hello"));
    assert_eq!(session.line_text(1).as_deref(), Some("world"));
    assert_eq!(session.line_text(2), None);

    session.apply_motion(Motion::LineEnd);
    assert_eq!(session.cursor_position(), 4);
    session.apply_motion(Motion::Down);
    assert_eq!((session.cursor_line(), session.cursor_column()), (1, 4));
}

#[test]
fn test_append_scenario() {
    let mut session = DocumentSession::from_text("hello");
    session.insert(5, "!!!").unwrap();
    assert_eq!(session.text(), "hello!!!");
    assert_eq!(session.len(), 8);
}

#[test]
fn test_delete_prefix_scenario() {
    let mut session = DocumentSession::from_text("hello world");
    session.delete(0, 6).unwrap();
    assert_eq!(session.text(), "world");
    assert_eq!(session.cursor_position(), 0);
}

#[test]
fn test_mutation_ignores_mode() {
    let mut session = DocumentSession::from_text("abc");
    for mode in [
        EditorMode::Normal,
        EditorMode::Visual,
        EditorMode::CommandLine,
        EditorMode::SearchInput,
    ] {
        session.set_mode(mode);
        session.insert(0, "x").unwrap();
    }
    assert_eq!(session.text(), "xxxxabc");
}

#[test]
fn test_selection_outside_visual_is_cursor() {
    let mut session = DocumentSession::from_text("hello world");
    session.set_position(4);
    assert!(!session.has_selection());
    assert_eq!(session.selection_start(), 4);
    assert_eq!(session.selection_end(), 4);

    session.set_mode(EditorMode::Visual);
    session.set_position(9);
    assert_eq!(session.selection_start(), 4);
    assert_eq!(session.selection_end(), 9);

    session.set_position(1);
    assert_eq!(session.selection_start(), 1);
    assert_eq!(session.selection_end(), 4);
}

#[test]
fn test_anchor_clamped_after_shrink() {
    let mut session = DocumentSession::from_text("hello world");
    session.set_position(10);
    session.set_mode(EditorMode::Visual);
    session.delete(2, 8).unwrap();
    assert_eq!(session.text(), "hed");
    assert!(session.selection_end() <= session.len());
    assert!(session.selection_start() <= session.selection_end());
}
