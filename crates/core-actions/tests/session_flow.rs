use anyhow::Result;
use core_actions::io_ops::open_state;
use core_actions::session::HELP_MESSAGE;
use core_actions::{
    EditorSession, FsStorage, Phase, SessionOptions, Storage, StorageError, SuspendingPrompt,
};
use core_events::{CTRL_Q, CTRL_S, KeyEvent};
use core_input::{ByteSource, InputError, ScriptedBytes, ShutdownSignal};
use core_state::EditorState;
use core_terminal::{ScreenSize, TerminalBackend};
use core_text::{Document, Limits, Position};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::time::Instant;

#[derive(Default)]
struct NullBackend;

impl TerminalBackend for NullBackend {
    fn enter(&mut self) -> Result<()> {
        Ok(())
    }
    fn leave(&mut self) -> Result<()> {
        Ok(())
    }
    fn suspend(&mut self) -> Result<()> {
        Ok(())
    }
    fn resume(&mut self) -> Result<()> {
        Ok(())
    }
    fn set_title(&mut self, _title: &str) -> Result<()> {
        Ok(())
    }
}

/// Storage whose writes always fail.
struct ReadOnlyStorage;

impl Storage for ReadOnlyStorage {
    fn load(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        Err(StorageError::NotFound(path.to_path_buf()))
    }
    fn save(&mut self, path: &Path, _bytes: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

fn small_screen() -> ScreenSize {
    ScreenSize::new(40, 7)
}

type Session<St> = EditorSession<ScriptedBytes, Vec<u8>, St, SuspendingPrompt<NullBackend>>;

fn session_with<St: Storage>(state: EditorState, script: &[u8], storage: St) -> Session<St> {
    EditorSession::new(
        state,
        ScriptedBytes::from_bytes(script),
        Vec::new(),
        storage,
        SuspendingPrompt::new(NullBackend),
        SessionOptions::default(),
    )
    .with_geometry(small_screen)
}

fn state(text: &str) -> EditorState {
    EditorState::new(Document::from_text(text.as_bytes(), Limits::default()))
}

fn message(session: &Session<impl Storage>) -> Option<String> {
    session
        .state()
        .ephemeral_text(Instant::now())
        .map(str::to_string)
}

fn output(session: &Session<impl Storage>) -> String {
    String::from_utf8_lossy(session.output()).into_owned()
}

#[test]
fn dirty_quit_requires_three_presses() {
    let mut s = session_with(state("abc"), b"", FsStorage);
    s.handle_key(KeyEvent::Byte(b'x')).unwrap();
    assert!(s.state().dirty);

    assert_eq!(s.handle_key(KeyEvent::Byte(CTRL_Q)).unwrap(), Phase::Running);
    assert!(message(&s).unwrap().contains("Press Ctrl-Q 2 more times"));
    assert_eq!(s.handle_key(KeyEvent::Byte(CTRL_Q)).unwrap(), Phase::Running);
    assert!(message(&s).unwrap().contains("Press Ctrl-Q 1 more time "));
    assert_eq!(
        s.handle_key(KeyEvent::Byte(CTRL_Q)).unwrap(),
        Phase::Terminated
    );
}

#[test]
fn other_keys_reset_the_quit_guard() {
    let mut s = session_with(state("abc"), b"", FsStorage);
    s.handle_key(KeyEvent::Byte(b'x')).unwrap();
    s.handle_key(KeyEvent::Byte(CTRL_Q)).unwrap();
    s.handle_key(KeyEvent::Byte(CTRL_Q)).unwrap();
    s.handle_key(KeyEvent::Right).unwrap();
    assert_eq!(s.state().quit_confirmations_remaining, 3);
    s.handle_key(KeyEvent::Esc).unwrap();
    assert_eq!(s.handle_key(KeyEvent::Byte(CTRL_Q)).unwrap(), Phase::Running);
    assert_eq!(s.state().quit_confirmations_remaining, 2);
}

#[test]
fn clean_document_quits_on_first_press() {
    let mut s = session_with(state("abc"), b"", FsStorage);
    s.handle_key(KeyEvent::Down).unwrap();
    assert_eq!(
        s.handle_key(KeyEvent::Byte(CTRL_Q)).unwrap(),
        Phase::Terminated
    );
}

#[test]
fn save_to_known_file_clears_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut st = state("hello");
    st.file_name = Some(path.clone());
    let mut s = session_with(st, b"", FsStorage);
    s.handle_key(KeyEvent::End).unwrap();
    s.handle_key(KeyEvent::Byte(b'!')).unwrap();
    assert!(s.state().dirty);
    s.handle_key(KeyEvent::Byte(CTRL_S)).unwrap();
    assert!(!s.state().dirty);
    assert_eq!(std::fs::read(&path).unwrap(), b"hello!\n");
    assert_eq!(
        message(&s),
        Some(format!("7 bytes written to {}", path.display()))
    );
}

#[test]
fn save_failure_keeps_dirty_and_reports() {
    let mut st = state("abc");
    st.file_name = Some("/nowhere/out.txt".into());
    let mut s = session_with(st, b"", ReadOnlyStorage);
    s.handle_key(KeyEvent::Byte(b'x')).unwrap();
    s.handle_key(KeyEvent::Byte(CTRL_S)).unwrap();
    assert!(s.state().dirty);
    assert_eq!(
        message(&s).as_deref(),
        Some("Can't save! cannot write /nowhere/out.txt: read-only")
    );
}

#[test]
fn unnamed_save_prompts_for_a_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("named.txt");
    let mut script = b"hi".to_vec();
    script.push(CTRL_S);
    script.extend_from_slice(path.to_str().unwrap().as_bytes());
    script.push(b'\n');
    script.push(CTRL_Q);

    let mut s = session_with(state(""), &script, FsStorage);
    s.run().unwrap();
    assert_eq!(s.phase(), Phase::Terminated);
    assert_eq!(std::fs::read(&path).unwrap(), b"hi\n");
    assert_eq!(s.state().file_name.as_deref(), Some(path.as_path()));
    assert!(!s.state().dirty);
    assert!(output(&s).contains("Save as: "));
}

#[test]
fn blank_name_abandons_the_save() {
    // The prompt reads its answer from the session's own byte source.
    let mut s = session_with(state("y"), b"   \r", FsStorage);
    s.handle_key(KeyEvent::Byte(b'z')).unwrap();
    assert_eq!(s.handle_key(KeyEvent::Byte(CTRL_S)).unwrap(), Phase::Running);
    assert!(s.state().dirty);
    assert!(s.state().file_name.is_none());
    assert_eq!(message(&s).as_deref(), Some("Save aborted"));
}

#[test]
fn failed_prompted_save_asks_again() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("missing").join("x.txt");
    let good = dir.path().join("x.txt");
    let mut script = bad.to_str().unwrap().as_bytes().to_vec();
    script.push(b'\r');
    script.extend_from_slice(good.to_str().unwrap().as_bytes());
    script.push(b'\r');

    let mut s = session_with(state(""), &script, FsStorage);
    s.handle_key(KeyEvent::Byte(b'z')).unwrap();
    s.handle_key(KeyEvent::Byte(CTRL_S)).unwrap();
    assert!(s.state().dirty);
    assert!(s.state().file_name.is_none());
    assert!(message(&s).unwrap().starts_with("Can't save! "));

    s.handle_key(KeyEvent::Byte(CTRL_S)).unwrap();
    assert!(!s.state().dirty);
    assert_eq!(s.state().file_name.as_deref(), Some(good.as_path()));
    assert_eq!(std::fs::read(&good).unwrap(), b"z\n");
}

#[test]
fn run_clears_screen_on_exit() {
    let mut s = session_with(state("abc"), &[CTRL_Q], FsStorage);
    s.run().unwrap();
    assert!(output(&s).ends_with("\x1b[2J\x1b[1;1H"));
    assert_eq!(s.engine().metrics().frames, 1);
}

/// Idle source that raises the shutdown flag on its first wait.
struct SignalOnWait(ShutdownSignal);

impl ByteSource for SignalOnWait {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        self.0.signal();
        Ok(None)
    }
}

#[test]
fn termination_signal_ends_run_through_normal_exit() {
    let shutdown = ShutdownSignal::new();
    let mut st = state("abc");
    st.insert_char(b'x');
    let mut s = EditorSession::new(
        st,
        SignalOnWait(shutdown.clone()),
        Vec::new(),
        FsStorage,
        SuspendingPrompt::new(NullBackend),
        SessionOptions::default(),
    )
    .with_geometry(small_screen)
    .with_shutdown(shutdown);
    s.run().unwrap();
    assert_eq!(s.phase(), Phase::Terminated);
    assert!(s.state().dirty);
    assert_eq!(s.engine().metrics().frames, 1);
    assert!(String::from_utf8_lossy(s.output()).ends_with("\x1b[2J\x1b[1;1H"));
}

#[test]
fn termination_signal_interrupts_the_filename_prompt() {
    let shutdown = ShutdownSignal::new();
    let mut s = EditorSession::new(
        state(""),
        SignalOnWait(shutdown.clone()),
        Vec::new(),
        FsStorage,
        SuspendingPrompt::new(NullBackend),
        SessionOptions::default(),
    )
    .with_geometry(small_screen)
    .with_shutdown(shutdown);
    s.handle_key(KeyEvent::Byte(b'z')).unwrap();
    assert_eq!(s.handle_key(KeyEvent::Byte(CTRL_S)).unwrap(), Phase::Running);
    assert!(s.state().dirty);
    assert!(s.state().file_name.is_none());
    s.run().unwrap();
    assert_eq!(s.phase(), Phase::Terminated);
    assert_eq!(s.engine().metrics().frames, 0);
}

#[test]
fn closed_input_is_fatal() {
    let mut s = session_with(state("abc"), b"ab", FsStorage);
    let err = s.run().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InputError>(),
        Some(InputError::Disconnected)
    ));
    assert_eq!(s.state().document.line(0).unwrap().as_bytes(), b"ababc");
}

#[test]
fn idle_waits_repaint_without_input() {
    let mut src = ScriptedBytes::new();
    src.push_timeout().push_timeout().push_bytes(&[CTRL_Q]);
    let mut s = EditorSession::new(
        state("abc"),
        src,
        Vec::new(),
        FsStorage,
        SuspendingPrompt::new(NullBackend),
        SessionOptions::default(),
    )
    .with_geometry(small_screen);
    s.run().unwrap();
    assert_eq!(s.engine().metrics().frames, 3);
}

#[test]
fn viewport_follows_cursor_before_each_frame() {
    let text: String = (0..30).map(|i| format!("row {i}\n")).collect();
    let mut s = session_with(state(&text), b"", FsStorage);
    for _ in 0..10 {
        s.handle_key(KeyEvent::Down).unwrap();
    }
    s.refresh().unwrap();
    // 7 screen rows leave 5 text rows.
    assert_eq!(s.state().row_offset, 6);
    assert_eq!(s.state().cursor, Position::new(10, 0));
    let out = output(&s);
    assert!(out.contains("row 10"));
    assert!(!out.contains("row 5 "));
    assert!(out.ends_with("\x1b[5;1H\x1b[?25h"));
}

#[test]
fn page_keys_use_current_screen_height() {
    let text: String = (0..30).map(|i| format!("row {i}\n")).collect();
    let mut s = session_with(state(&text), b"", FsStorage);
    s.refresh().unwrap();
    s.handle_key(KeyEvent::PageDown).unwrap();
    assert_eq!(s.state().cursor.line, 5);
    assert_eq!(s.state().row_offset, 5);
    s.handle_key(KeyEvent::PageUp).unwrap();
    assert_eq!(s.state().cursor.line, 0);
    assert_eq!(s.state().row_offset, 0);
}

#[test]
fn missing_file_opens_named_and_help_is_available() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("later.txt");
    let opened = open_state(&FsStorage, Some(&path), Limits::default());
    let mut s = session_with(opened.state, &[], FsStorage);
    s.post_message(opened.notice.unwrap_or_else(|| HELP_MESSAGE.to_string()));
    assert_eq!(message(&s).as_deref(), Some("New file"));
    s.handle_key(KeyEvent::Byte(b'a')).unwrap();
    s.handle_key(KeyEvent::Byte(CTRL_S)).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"a\n");
}
