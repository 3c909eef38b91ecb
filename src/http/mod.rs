//! HTTP helper module
//!
//! Request introspection and response builders, all driven by an explicit
//! [`RequestContext`](crate::context::RequestContext).

pub mod introspect;
pub mod response;

// Re-export commonly used items
pub use introspect::{
    is_ajax, is_console, is_get, is_post, request_method, user_agent, wants_json,
};
pub use response::{
    bad_request, build_404_response, build_500_response, build_html_response, json_response,
    json_response_with_status, BadRequest, Halt,
};
