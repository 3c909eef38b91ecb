//! HTTP response building module
//!
//! `bad_request` and `json_response` plus the few plain builders the
//! renderer and the demo server need. Builders never panic: a failed build
//! is logged and replaced by a bare response.

use crate::config::{JsonErrorStatus, ResponseConfig};
use crate::context::RequestContext;
use crate::http::introspect::wants_json;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::ext::ReasonPhrase;
use hyper::header::CONTENT_TYPE;
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const DEFAULT_MESSAGE: &str = "Bad Request";
pub const DEFAULT_CODE: u16 = 400;

const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// A "Bad Request" answer.
///
/// JSON clients (see [`wants_json`]) get `{"error": msg}` with an optional
/// `"detail"`; everyone else gets the status line `<code> <msg>` and, if a
/// detail was given, the HTML-escaped detail as a plain text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadRequest {
    msg: String,
    code: u16,
    detail: Option<String>,
}

impl Default for BadRequest {
    fn default() -> Self {
        Self {
            msg: DEFAULT_MESSAGE.to_string(),
            code: DEFAULT_CODE,
            detail: None,
        }
    }
}

impl BadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    #[must_use]
    pub const fn code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn non_empty_detail(&self) -> Option<&str> {
        self.detail.as_deref().filter(|d| !d.is_empty())
    }

    /// Build the finished response. Nothing may be written after it.
    pub fn into_response(self, ctx: &RequestContext, cfg: &ResponseConfig) -> Response<Full<Bytes>> {
        let json = wants_json(ctx);
        logger::log_bad_request(self.code, &self.msg, json);

        if json {
            self.json_response(cfg)
        } else {
            self.plain_response()
        }
    }

    /// Wrap the response so a handler can bail out with `?`
    pub fn halt(self, ctx: &RequestContext, cfg: &ResponseConfig) -> Halt {
        Halt(self.into_response(ctx, cfg))
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or_else(|_| {
            logger::log_warning(&format!(
                "Invalid status code {}, falling back to {DEFAULT_CODE}",
                self.code
            ));
            StatusCode::BAD_REQUEST
        })
    }

    fn json_response(&self, cfg: &ResponseConfig) -> Response<Full<Bytes>> {
        let status = match cfg.json_error_status {
            JsonErrorStatus::Ok => StatusCode::OK,
            JsonErrorStatus::Code => self.status(),
        };

        let mut body = serde_json::json!({ "error": self.msg });
        if let Some(detail) = self.non_empty_detail() {
            body["detail"] = serde_json::Value::from(detail);
        }

        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap_or_else(|e| {
                log_build_error("JSON error", &e);
                Response::new(Full::new(Bytes::new()))
            })
    }

    fn plain_response(&self) -> Response<Full<Bytes>> {
        let mut builder = Response::builder().status(self.status());
        let body = match self.non_empty_detail() {
            Some(detail) => {
                builder = builder.header(CONTENT_TYPE, TEXT_CONTENT_TYPE);
                Bytes::from(escape_html(detail))
            }
            None => Bytes::new(),
        };

        let mut response = builder.body(Full::new(body)).unwrap_or_else(|e| {
            log_build_error("bad request", &e);
            Response::new(Full::new(Bytes::new()))
        });

        // Status line carries the caller's message instead of the canonical reason
        match ReasonPhrase::try_from(self.msg.as_bytes()) {
            Ok(reason) => {
                response.extensions_mut().insert(reason);
            }
            Err(_) => logger::log_warning(&format!(
                "Message '{}' is not a valid reason phrase, using canonical reason",
                self.msg
            )),
        }

        response
    }
}

/// Bad request with default message and code
pub fn bad_request(ctx: &RequestContext) -> Response<Full<Bytes>> {
    BadRequest::default().into_response(ctx, &ResponseConfig::default())
}

/// A finished response that ends request processing
#[derive(Debug, thiserror::Error)]
#[error("request halted with status {}", .0.status())]
pub struct Halt(Response<Full<Bytes>>);

impl Halt {
    pub fn status(&self) -> StatusCode {
        self.0.status()
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        self.0
    }
}

impl From<Halt> for Response<Full<Bytes>> {
    fn from(halt: Halt) -> Self {
        halt.0
    }
}

/// Build JSON response (200)
pub fn json_response<T: Serialize>(body: &T) -> Response<Full<Bytes>> {
    json_response_with_status(StatusCode::OK, body)
}

/// Build JSON response with explicit status
pub fn json_response_with_status<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String) -> Response<Full<Bytes>> {
    let content_length = content.len();
    Response::builder()
        .status(200)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
}

fn build_text_response(status: StatusCode, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, TEXT_CONTENT_TYPE)
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(text)))
        })
}

/// Escape text for inclusion in HTML.
///
/// Encodes `& < > " '` only; other characters pass through as UTF-8.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::Method;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn html_client() -> RequestContext {
        RequestContext::builder()
            .method(Method::GET)
            .header("Accept", "text/html")
            .build()
    }

    fn json_client() -> RequestContext {
        RequestContext::builder()
            .method(Method::GET)
            .header("Accept", "application/json")
            .build()
    }

    fn reason(response: &Response<Full<Bytes>>) -> Option<&[u8]> {
        response
            .extensions()
            .get::<ReasonPhrase>()
            .map(ReasonPhrase::as_bytes)
    }

    #[tokio::test]
    async fn test_bad_request_defaults() {
        let response = bad_request(&html_client());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(reason(&response), Some(&b"Bad Request"[..]));
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_bad_request_plain_with_detail() {
        let response = BadRequest::new()
            .message("Missing Field")
            .code(422)
            .detail("<name> is required & must be \"set\"")
            .into_response(&html_client(), &ResponseConfig::default());

        assert_eq!(response.status().as_u16(), 422);
        assert_eq!(reason(&response), Some(&b"Missing Field"[..]));
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            TEXT_CONTENT_TYPE
        );
        assert_eq!(
            body_string(response).await,
            "&lt;name&gt; is required &amp; must be &quot;set&quot;"
        );
    }

    #[tokio::test]
    async fn test_bad_request_empty_detail_has_no_body() {
        let response = BadRequest::new()
            .detail("")
            .into_response(&html_client(), &ResponseConfig::default());
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_bad_request_json_answers_ok_by_default() {
        let response = BadRequest::new()
            .code(403)
            .into_response(&json_client(), &ResponseConfig::default());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Bad Request" }));
    }

    #[tokio::test]
    async fn test_bad_request_json_with_code_and_detail() {
        let cfg = ResponseConfig {
            json_error_status: JsonErrorStatus::Code,
        };
        let ajax = RequestContext::builder()
            .method(Method::POST)
            .header("X-Requested-With", "XMLHttpRequest")
            .build();
        let response = BadRequest::new()
            .message("Invalid token")
            .code(403)
            .detail("expired")
            .into_response(&ajax, &cfg);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Invalid token", "detail": "expired" })
        );
    }

    #[test]
    fn test_bad_request_invalid_code_falls_back() {
        let response = BadRequest::new()
            .code(42)
            .into_response(&html_client(), &ResponseConfig::default());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_request_invalid_reason_keeps_status() {
        let response = BadRequest::new()
            .message("line\nbreak")
            .into_response(&html_client(), &ResponseConfig::default());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(reason(&response).is_none());
    }

    #[test]
    fn test_halt_propagates_with_question_mark() {
        fn handler(ctx: &RequestContext) -> Result<Response<Full<Bytes>>, Halt> {
            if !crate::http::is_post(ctx) {
                return Err(BadRequest::new()
                    .code(405)
                    .message("Method Not Allowed")
                    .halt(ctx, &ResponseConfig::default()));
            }
            Ok(json_response(&"accepted"))
        }

        let response: Response<Full<Bytes>> =
            handler(&html_client()).unwrap_or_else(Into::into);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let post = RequestContext::builder().method(Method::POST).build();
        assert_eq!(handler(&post).unwrap().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_json_response() {
        let response = json_response(&serde_json::json!({ "ok": true, "n": 3 }));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
        assert_eq!(body_string(response).await, r#"{"n":3,"ok":true}"#);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("it's <b>"), "it&#039;s &lt;b&gt;");
        assert_eq!(escape_html("plain"), "plain");
        // Only markup-significant characters are encoded
        assert_eq!(escape_html("café © 5€"), "café © 5€");
    }
}
