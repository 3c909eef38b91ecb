//! Request handling and string/path helpers for hyper services.
//!
//! - [`context`]: explicit request snapshot passed to every helper
//! - [`http`]: request introspection and response builders
//! - [`text`]: quote-word splitting, path normalization, filename sanitization
//! - [`render`]: read a template file and expose data to it

pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod logger;
pub mod render;
pub mod text;

pub use context::RequestContext;
pub use error::{Error, Result};
pub use http::{
    bad_request, is_ajax, is_console, is_get, is_post, json_response, request_method,
    user_agent, wants_json, BadRequest, Halt,
};
pub use render::{render, Renderer};
pub use text::{normalize_path, qw, sanitize_filename, starts_with};
