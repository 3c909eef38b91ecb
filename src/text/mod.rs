//! String and path utilities
//!
//! - `qw`: perl-style quote-word splitting
//! - `starts_with`: prefix test
//! - `normalize_path`: slash cleanup and `.`/`..` resolution without touching the filesystem
//! - `sanitize_filename`: make user supplied names safe to store

mod filename;
mod path;
mod words;

pub use filename::sanitize_filename;
pub use path::normalize_path;
pub use words::{qw, starts_with};
