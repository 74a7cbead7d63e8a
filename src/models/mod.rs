//! Data models for the library API

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookQuery, ValidationFailure};
