use super::*;

#[test]
fn cursor_keywords() {
    assert_eq!(Cursor::Default.as_str(), "default");
    assert_eq!(Cursor::Crosshair.as_str(), "crosshair");
    assert_eq!(Cursor::Grabbing.as_str(), "grabbing");
}

#[test]
fn recording_cursor_starts_at_default() {
    let sink = RecordingCursor::new();
    assert_eq!(sink.current(), Cursor::Default);
    assert!(sink.history().is_empty());
}

#[test]
fn recording_cursor_tracks_history_in_order() {
    let sink = RecordingCursor::new();
    sink.set(Cursor::Crosshair);
    sink.set(Cursor::Grabbing);
    sink.set(Cursor::Default);
    assert_eq!(sink.history(), vec![Cursor::Crosshair, Cursor::Grabbing, Cursor::Default]);
    assert_eq!(sink.current(), Cursor::Default);
}

#[test]
fn noop_cursor_accepts_anything() {
    let sink = NoopCursor;
    sink.set(Cursor::Grabbing);
}
