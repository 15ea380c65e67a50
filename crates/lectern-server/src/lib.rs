//! Watching and serving support for lectern.
//!
//! The dev command watches the pipeline inputs (spec, FAQ data, config) and
//! re-runs generation when they change; the serve command previews the built
//! site from disk. The site framework's own dev server handles everything
//! else.

pub mod preview;
pub mod watcher;

pub use preview::{PreviewConfig, PreviewServer, ServeError};
pub use watcher::{InputPaths, InputWatcher, WatchEvent};
