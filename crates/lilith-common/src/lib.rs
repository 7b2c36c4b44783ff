//! Common data structures for Lilith.
//!
//! This crate provides the source location types shared by the tokenizer,
//! the reader and the diagnostic renderer:
//! - `Span`: a byte range into the source text
//! - `Position`: a 1-based line/column pair as reported to users

mod span;

pub use span::{Position, Span};
