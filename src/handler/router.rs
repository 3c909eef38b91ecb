//! Request routing dispatch module
//!
//! | Route              | Helper              |
//! |--------------------|---------------------|
//! | `GET /`            | request introspection summary |
//! | `GET /path?p=`     | `normalize_path`    |
//! | `GET /filename?name=` | `sanitize_filename` |
//! | `GET /words?q=`    | `qw`                |
//! | `GET /render/<file>` | `Renderer::render` |
//!
//! Any other method is answered with `bad_request`.

use super::AppState;
use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Request, Response};
use reqkit::http::{build_404_response, json_response};
use reqkit::logger::{self, AccessLogEntry};
use reqkit::{
    is_ajax, is_console, is_get, normalize_path, qw, request_method, sanitize_filename,
    starts_with, user_agent, wants_json, BadRequest, Halt, RequestContext,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

const RENDER_PREFIX: &str = "/render/";

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req).with_env(server_vars(&peer_addr));

    let response = route(&ctx, &state).await.unwrap_or_else(Halt::into_response);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::from_context(&ctx, peer_addr.ip().to_string());
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// CGI-style server variables for the request snapshot
fn server_vars(peer_addr: &SocketAddr) -> HashMap<String, String> {
    HashMap::from([
        ("REMOTE_ADDR".to_string(), peer_addr.ip().to_string()),
        ("REMOTE_PORT".to_string(), peer_addr.port().to_string()),
        (
            "SERVER_SOFTWARE".to_string(),
            format!("reqkit/{}", env!("CARGO_PKG_VERSION")),
        ),
    ])
}

async fn route(ctx: &RequestContext, state: &AppState) -> Result<Response<Full<Bytes>>, Halt> {
    if !is_get(ctx) {
        let method = request_method(ctx).map_or("-", |m| m.as_str());
        return Err(BadRequest::new()
            .code(405)
            .message("Method Not Allowed")
            .detail(format!("{method} is not supported, use GET"))
            .halt(ctx, &state.config.response));
    }

    let path = ctx.path().unwrap_or("/");
    let response = match path {
        "/" => json_response(&summary(ctx)),
        "/path" => {
            let input = required_param(ctx, state, "p")?;
            json_response(&json!({ "input": input, "normalized": normalize_path(&input) }))
        }
        "/filename" => {
            let input = required_param(ctx, state, "name")?;
            json_response(&json!({ "input": input, "sanitized": sanitize_filename(&input) }))
        }
        "/words" => {
            let input = required_param(ctx, state, "q")?;
            json_response(&json!({ "input": input, "words": qw(&input) }))
        }
        _ if starts_with(path, RENDER_PREFIX) => {
            let file = &path[RENDER_PREFIX.len()..];
            state.renderer.render_response(file, &summary(ctx)).await
        }
        _ => build_404_response(),
    };
    Ok(response)
}

/// What the helpers say about this request
fn summary(ctx: &RequestContext) -> Value {
    json!({
        "method": request_method(ctx).map(hyper::Method::as_str),
        "path": ctx.path(),
        "user_agent": user_agent(ctx),
        "wants_json": wants_json(ctx),
        "is_ajax": is_ajax(ctx),
        "is_console": is_console(ctx),
        "remote_addr": ctx.var("REMOTE_ADDR"),
    })
}

fn query_param(ctx: &RequestContext, name: &str) -> Option<String> {
    let query = ctx.uri.as_ref()?.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn required_param(ctx: &RequestContext, state: &AppState, name: &str) -> Result<String, Halt> {
    query_param(ctx, name).ok_or_else(|| {
        BadRequest::new()
            .detail(format!("missing query parameter '{name}'"))
            .halt(ctx, &state.config.response)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Method, StatusCode};
    use reqkit::config::Config;

    fn state() -> AppState {
        AppState::new(Config::default())
    }

    fn get(uri: &str) -> RequestContext {
        RequestContext::builder().method(Method::GET).uri(uri).build()
    }

    #[test]
    fn test_query_param_decodes() {
        let ctx = get("/path?p=a%2F.%2Fb&x=1");
        assert_eq!(query_param(&ctx, "p").as_deref(), Some("a/./b"));
        assert_eq!(query_param(&ctx, "missing"), None);
    }

    #[test]
    fn test_summary() {
        let ctx = RequestContext::builder()
            .method(Method::GET)
            .uri("/")
            .header("X-Requested-With", "XMLHttpRequest")
            .env("REMOTE_ADDR", "127.0.0.1")
            .build();
        let value = summary(&ctx);
        assert_eq!(value["method"], "GET");
        assert_eq!(value["wants_json"], true);
        assert_eq!(value["is_ajax"], true);
        assert_eq!(value["is_console"], false);
        assert_eq!(value["remote_addr"], "127.0.0.1");
    }

    #[tokio::test]
    async fn test_route_rejects_post() {
        let ctx = RequestContext::builder()
            .method(Method::POST)
            .uri("/")
            .build();
        let halt = route(&ctx, &state()).await.unwrap_err();
        assert_eq!(halt.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_route_missing_param_is_bad_request() {
        let halt = route(&get("/path"), &state()).await.unwrap_err();
        assert_eq!(halt.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_route_helpers() {
        let state = state();
        for uri in ["/", "/path?p=a/../b", "/filename?name=x.txt", "/words?q=a,b"] {
            let response = route(&get(uri), &state).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
        let response = route(&get("/nope"), &state).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
