use crate::router::ParamVec;
use http::Method;
use may_minihttp::Request as HttpRequest;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};

/// Raw HTTP request data extracted from the transport.
///
/// Produced by [`parse_request`] at the `may_minihttp` boundary and consumed
/// by the dispatcher. The body is kept as received; JSON decoding is the
/// body middleware's job.
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method token (GET, POST, etc.)
    pub method: String,
    /// Request target as received, path plus optional query string
    pub target: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Raw request body
    pub raw_body: String,
}

/// The request value handed to middlewares and handlers.
///
/// Built per inbound call by the dispatcher and discarded when the call
/// completes. `params` and `query` are attached by the dispatcher;
/// `parsed_body` by the body middleware.
#[derive(Debug)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Raw request body as received
    pub raw_body: String,
    /// JSON body attached by the body middleware (empty object for an
    /// empty raw body), absent until that middleware runs
    pub parsed_body: Option<serde_json::Value>,
    /// Path parameters in template order
    pub params: ParamVec,
    /// Query string parameters; a repeated key keeps the last occurrence
    pub query: HashMap<String, String>,
}

impl Request {
    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths (e.g., `/org/:id/user/:id`), returns the
    /// last occurrence.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Convert params to a HashMap for compatibility
    /// Note: this allocates - use get_param() in hot paths
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Parse an incoming HTTP request into a [`ParsedRequest`]
///
/// Extracts the method token, raw target, lowercased headers, and the raw
/// body from the transport request.
pub fn parse_request(req: HttpRequest) -> ParsedRequest {
    let method = req.method().to_string();
    let target = req.path().to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    debug!(
        header_count = headers.len(),
        header_names = ?headers.keys().take(20).collect::<Vec<_>>(),
        "Headers extracted"
    );

    let mut raw_body = String::new();
    if let Ok(size) = req.body().read_to_string(&mut raw_body) {
        if size > 0 {
            info!(body_size_bytes = size, "Request body read");
        }
    }

    info!(
        method = %method,
        target = %target,
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        target,
        headers,
        raw_body,
    }
}
