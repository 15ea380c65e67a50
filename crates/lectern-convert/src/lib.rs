//! Converter abstraction for turning an OpenAPI spec into Markdown.
//!
//! The converter itself is an external tool. This crate wraps it behind a
//! narrow contract (spec path in, markdown artifacts out) so the surrounding
//! pipeline never depends on which tool is configured.

pub mod command;
pub mod traits;

pub use command::CommandConverter;
pub use traits::{ConvertError, ConvertOutput, SpecConverter};
