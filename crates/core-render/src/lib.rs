//! Frame rendering for the editor.
//!
//! Components:
//! - `viewport`: keeps the cursor row inside the visible window and pages by whole screens.
//! - `status`: status bar and message line text.
//! - `writer`: queues terminal commands for one frame and flushes them in a single write.
//! - `render_engine`: walks `EditorState` and composes the full frame.
//!
//! Every frame is a full repaint. Rows are padded to the screen width instead of being
//! cleared first, which keeps the output free of flicker without a diff cache.

pub mod render_engine;
pub mod status;
pub mod viewport;
pub mod writer;

pub use render_engine::{RenderEngine, RenderMetrics, RenderOptions};
pub use viewport::{Viewport, reconcile};
