//! OpenAPI document model for lectern.
//!
//! This crate loads the externally maintained OpenAPI/JSON spec into a typed,
//! read-only view. Only the fields the generation pipeline consumes are
//! modeled; the rest of the document passes through untouched.

pub mod document;

pub use document::{ApiSpec, SpecError, SpecInfo, SpecServer, SpecTag};
