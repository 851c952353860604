//! Dispatcher core module - hot path for request dispatch.

use crate::router::{RouteMatch, Router};
use crate::server::{ParsedRequest, Request, Response};
use http::Method;
use std::collections::HashMap;
use tracing::{info, warn};
use url::Url;

/// Maps an inbound request to a route and drives its chain.
///
/// Owns the route table, shared read-only across all requests. The host is
/// used only to construct an absolute URL for target parsing; it does not
/// affect socket binding.
pub struct Dispatcher {
    router: Router,
    host: String,
}

impl Dispatcher {
    /// Wrap a finished route table for dispatching
    #[must_use]
    pub fn new(router: Router, host: impl Into<String>) -> Self {
        Self {
            router,
            host: host.into(),
        }
    }

    /// Dispatch one parsed request into `res`.
    ///
    /// Splits the target into path and query, scans the route table, and on
    /// a match builds the augmented [`Request`] and runs the route's chain.
    /// A miss writes the fixed 404 directly; no middleware or error handler
    /// observes unmatched requests.
    pub fn dispatch(&self, parsed: ParsedRequest, res: &mut Response) {
        let ParsedRequest {
            method,
            target,
            headers,
            raw_body,
        } = parsed;

        let Ok(method) = method.parse::<Method>() else {
            warn!(method = %method, "Unparseable method token");
            write_not_found(res);
            return;
        };

        let (path, query) = self.split_target(&target);

        match self.router.lookup(&method, &path) {
            Some(RouteMatch { route, params }) => {
                info!(
                    method = %method,
                    path = %path,
                    template = %route.path_template,
                    "Request dispatched"
                );
                let mut req = Request {
                    method,
                    path,
                    headers,
                    raw_body,
                    parsed_body: None,
                    params,
                    query,
                };
                route.invoke(&mut req, res);
            }
            None => write_not_found(res),
        }
    }

    /// Split a request target into its path and the flat query map.
    ///
    /// Parses the target as an absolute URL against the configured host.
    /// A repeated query key keeps the last occurrence; there is no
    /// multi-value support.
    fn split_target(&self, target: &str) -> (String, HashMap<String, String>) {
        if let Ok(url) = Url::parse(&format!("http://{}{}", self.host, target)) {
            let query = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            return (url.path().to_string(), query);
        }

        // Targets the URL parser rejects still get a best-effort split.
        let path = target.split('?').next().unwrap_or("/").to_string();
        let query = match target.find('?') {
            Some(pos) => url::form_urlencoded::parse(target[pos + 1..].as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
            None => HashMap::new(),
        };
        (path, query)
    }
}

fn write_not_found(res: &mut Response) {
    res.set_status(404);
    res.set_header("Content-Type", "text/plain");
    res.send("Not found");
}
