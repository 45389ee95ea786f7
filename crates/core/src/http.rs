//! Request/response boundary types.
//!
//! The router speaks plain HTTP shapes: a method + URL + Accept header in,
//! a status + headers + body out. Only GET requests are ever intercepted;
//! everything else passes through untouched.

use serde::{Deserialize, Serialize};

/// An incoming resource request, as seen by the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method, uppercase ("GET", "POST", ...).
    pub method: String,

    /// Absolute URL or origin-relative path.
    pub url: String,

    /// Accept header, if the client sent one.
    #[serde(default)]
    pub accept: Option<String>,
}

impl Request {
    /// Convenience constructor for a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: "GET".to_string(), url: url.into(), accept: None }
    }

    /// Attach an Accept header.
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    /// The request path with query string and fragment stripped.
    ///
    /// Accepts both absolute URLs and origin-relative paths; anything
    /// unparseable falls back to the raw string minus query/fragment.
    pub fn path(&self) -> String {
        if self.url.starts_with('/') {
            let end = self.url.find(['?', '#']).unwrap_or(self.url.len());
            return self.url[..end].to_string();
        }
        match url::Url::parse(&self.url) {
            Ok(u) => u.path().to_string(),
            Err(_) => {
                let end = self.url.find(['?', '#']).unwrap_or(self.url.len());
                self.url[..end].to_string()
            }
        }
    }

    /// Whether the client declared it accepts HTML documents.
    pub fn accepts_html(&self) -> bool {
        self.accept.as_deref().is_some_and(|a| a.contains("text/html"))
    }
}

/// Where a routed response was ultimately produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServedFrom {
    Cache,
    Network,
    Fallback,
    /// Best-effort asset path that had nothing to serve.
    Missing,
}

/// A response produced by the router: either a cached snapshot, a live
/// network response, or a synthesized offline substitute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub served_from: ServedFrom,
}

impl RouteResponse {
    /// Content-Type header value, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
