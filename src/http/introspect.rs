//! Request introspection module
//!
//! Answers questions about the client from a [`RequestContext`]: does it
//! want JSON, is it an AJAX call, which method did it use.

use crate::context::RequestContext;
use hyper::header::{ACCEPT, USER_AGENT};
use hyper::Method;

const JSON_MIME: &str = "application/json";
const X_REQUESTED_WITH: &str = "x-requested-with";

/// True if the client sends `Accept` containing `application/json`, or if
/// the request is AJAX
///
/// # Examples
/// ```
/// use reqkit::{wants_json, RequestContext};
/// let ctx = RequestContext::builder()
///     .header("Accept", "text/html, application/json;q=0.9")
///     .build();
/// assert!(wants_json(&ctx));
/// ```
pub fn wants_json(ctx: &RequestContext) -> bool {
    let accepts_json = ctx
        .headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains(JSON_MIME));

    accepts_json || is_ajax(ctx)
}

/// True if the request was issued by browser script (`X-Requested-With`)
pub fn is_ajax(ctx: &RequestContext) -> bool {
    ctx.header(X_REQUESTED_WITH)
        .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"))
}

pub fn is_post(ctx: &RequestContext) -> bool {
    ctx.method.as_ref() == Some(&Method::POST)
}

pub fn is_get(ctx: &RequestContext) -> bool {
    ctx.method.as_ref() == Some(&Method::GET)
}

/// Request method, `None` outside a request
pub const fn request_method(ctx: &RequestContext) -> Option<&Method> {
    ctx.method.as_ref()
}

/// `User-Agent` header, `None` when absent or outside a request
pub fn user_agent(ctx: &RequestContext) -> Option<&str> {
    ctx.header(USER_AGENT.as_str())
}

/// True when the context was not taken from an HTTP request.
///
/// NOTE: says nothing about whether output is a terminal.
pub const fn is_console(ctx: &RequestContext) -> bool {
    ctx.method.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(headers: &[(&str, &str)]) -> RequestContext {
        headers
            .iter()
            .fold(RequestContext::builder().method(Method::GET), |b, (k, v)| {
                b.header(k, v)
            })
            .build()
    }

    #[test]
    fn test_wants_json_accept() {
        assert!(wants_json(&ctx_with(&[("Accept", "application/json")])));
        assert!(wants_json(&ctx_with(&[(
            "Accept",
            "text/html,application/json;q=0.9"
        )])));
        assert!(!wants_json(&ctx_with(&[("Accept", "text/html")])));
        assert!(!wants_json(&ctx_with(&[])));
    }

    #[test]
    fn test_wants_json_any_accept_value() {
        let ctx = ctx_with(&[("Accept", "text/html"), ("Accept", "application/json")]);
        assert!(wants_json(&ctx));
    }

    #[test]
    fn test_wants_json_value_is_case_sensitive() {
        assert!(!wants_json(&ctx_with(&[("Accept", "Application/JSON")])));
    }

    #[test]
    fn test_wants_json_ajax() {
        assert!(wants_json(&ctx_with(&[("X-Requested-With", "XMLHttpRequest")])));
        assert!(wants_json(&ctx_with(&[("x-requested-with", "xmlhttprequest")])));
        assert!(!wants_json(&ctx_with(&[("X-Requested-With", "fetch")])));
    }

    #[test]
    fn test_is_ajax() {
        assert!(is_ajax(&ctx_with(&[("X-Requested-With", "XMLHTTPREQUEST")])));
        assert!(!is_ajax(&ctx_with(&[("Accept", "application/json")])));
    }

    #[test]
    fn test_method_checks() {
        let post = RequestContext::builder().method(Method::POST).build();
        assert!(is_post(&post));
        assert!(!is_get(&post));
        assert_eq!(request_method(&post), Some(&Method::POST));

        let get = RequestContext::builder().method(Method::GET).build();
        assert!(is_get(&get));
        assert!(!is_post(&get));
    }

    #[test]
    fn test_console() {
        let ctx = RequestContext::console();
        assert!(is_console(&ctx));
        assert!(!is_get(&ctx));
        assert!(!is_post(&ctx));
        assert_eq!(request_method(&ctx), None);
        assert_eq!(user_agent(&ctx), None);

        assert!(!is_console(&ctx_with(&[])));
    }

    #[test]
    fn test_user_agent() {
        let ctx = ctx_with(&[("User-Agent", "Mozilla/5.0")]);
        assert_eq!(user_agent(&ctx), Some("Mozilla/5.0"));
    }
}
