//! Editor actions: key translation, dispatch onto `EditorState`, storage and the session loop.
//!
//! Flow for one key: `KeyEvent` → `key_translator::translate` → `Action` →
//! `dispatcher::dispatch` (motion, edit and quit guard) → `EditorSession` (save, render).

pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;
pub mod prompt;
pub mod session;

pub use dispatcher::{DispatchContext, DispatchResult, dispatch};
pub use io_ops::{FsStorage, Storage, StorageError};
pub use key_translator::translate;
pub use prompt::{FilenamePrompt, SuspendingPrompt};
pub use session::{EditorSession, Phase, SessionOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Quit,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(u8),
    /// Backspace: delete left of the cursor or join with the previous line.
    DeleteBefore,
    /// Forward delete: delete under the cursor or join the next line.
    DeleteAt,
    SplitLine,
}
