//! Template rendering module
//!
//! Reads a template file from under a root directory and renders it with
//! the caller's data as its variable scope. Nothing is cached or
//! precompiled; each call is a one-off render.

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::http;
use crate::logger;
use crate::text::normalize_path;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct Renderer {
    root: PathBuf,
    autoescape: bool,
}

impl Renderer {
    pub fn new(root: impl Into<PathBuf>, autoescape: bool) -> Self {
        Self {
            root: root.into(),
            autoescape,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(&config.template_dir, config.autoescape)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a template name onto a file below the root
    fn resolve(&self, file: &str) -> Result<PathBuf> {
        let normalized = normalize_path(file);
        let escapes = normalized == ".."
            || normalized.starts_with("../")
            || normalized.starts_with('/')
            || Path::new(&normalized).is_absolute();
        if escapes {
            return Err(Error::PathEscapesRoot(file.to_string()));
        }
        Ok(self.root.join(normalized))
    }

    /// Render `file` with `data` exposed as template variables.
    ///
    /// `data` must serialize to a map (a struct or a JSON object).
    pub async fn render<T: Serialize>(&self, file: &str, data: &T) -> Result<String> {
        let path = self.resolve(file)?;
        let source = fs::read_to_string(&path).await?;
        let context = Context::from_serialize(data)?;
        let output = Tera::one_off(&source, &context, self.autoescape)?;
        logger::log_render(&path.display().to_string(), output.len());
        Ok(output)
    }

    /// Render into an HTML response; missing or out-of-root templates are a
    /// 404, anything else a 500
    pub async fn render_response<T: Serialize>(
        &self,
        file: &str,
        data: &T,
    ) -> Response<Full<Bytes>> {
        match self.render(file, data).await {
            Ok(html) => http::build_html_response(html),
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => http::build_404_response(),
            Err(Error::PathEscapesRoot(name)) => {
                logger::log_warning(&format!("Refusing template outside root: {name}"));
                http::build_404_response()
            }
            Err(e) => {
                logger::log_error(&format!("Failed to render '{file}': {e}"));
                http::build_500_response()
            }
        }
    }
}

/// Render a template relative to the working directory, without escaping
pub async fn render<T: Serialize>(file: &str, data: &T) -> Result<String> {
    Renderer::new(".", false).render(file, data).await
}
