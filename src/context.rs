//! Request context module
//!
//! A read-only snapshot of the request a helper is asked about: method, URI,
//! headers and server variables. Helpers never reach for ambient state, they
//! are handed one of these.

use hyper::header::{HeaderName, HeaderValue};
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Request, Uri};
use std::collections::HashMap;

/// Snapshot of the current request (or of a console invocation)
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: Option<Method>,
    pub uri: Option<Uri>,
    pub headers: HeaderMap,
    /// Server / environment variables
    pub env: HashMap<String, String>,
}

impl RequestContext {
    /// Snapshot an incoming request
    pub fn from_request<B>(req: &Request<B>) -> Self {
        Self {
            method: Some(req.method().clone()),
            uri: Some(req.uri().clone()),
            headers: req.headers().clone(),
            env: HashMap::new(),
        }
    }

    /// Snapshot request parts (after `Request::into_parts`)
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            method: Some(parts.method.clone()),
            uri: Some(parts.uri.clone()),
            headers: parts.headers.clone(),
            env: HashMap::new(),
        }
    }

    /// Context for code running outside any request, e.g. from a terminal.
    /// Carries the process environment.
    pub fn console() -> Self {
        Self {
            method: None,
            uri: None,
            headers: HeaderMap::new(),
            env: std::env::vars().collect(),
        }
    }

    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }

    /// Attach server variables to the snapshot
    #[must_use]
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// First value of a header as text, `None` if absent or not visible ASCII
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn path(&self) -> Option<&str> {
        self.uri.as_ref().map(Uri::path)
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }
}

/// Fluent construction for hosts that do not hand out a hyper `Request`
#[derive(Debug, Default)]
pub struct RequestContextBuilder {
    ctx: RequestContext,
}

impl RequestContextBuilder {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.ctx.method = Some(method);
        self
    }

    /// Set the URI; unparsable input leaves it unset
    #[must_use]
    pub fn uri(mut self, uri: &str) -> Self {
        self.ctx.uri = uri.parse().ok();
        self
    }

    /// Append a header; invalid names or values are skipped
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.ctx.headers.append(name, value);
        }
        self
    }

    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.ctx.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> RequestContext {
        self.ctx
    }
}
