//! Router core module - hot path for route matching.

use crate::chain::{Chain, Handler};
use crate::server::{Request, Response};
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because they come from the static route table
/// (known at startup); values are per-request data from the URL and stay
/// `String`. Insertion order equals template order, so duplicate names keep
/// both entries and lookups resolve last-write-wins.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A registered route: compiled matcher, chain snapshot, terminal handler.
///
/// The chain snapshot is taken at registration time; middlewares and error
/// handlers registered afterwards never affect this route.
pub struct Route {
    /// HTTP method this route answers to
    pub method: Method,
    /// The template the route was registered with (e.g., `/users/:id`)
    pub path_template: String,
    /// Parameter names in template order
    pub param_names: Vec<Arc<str>>,
    regex: Regex,
    chain: Chain,
    handler: Arc<dyn Handler>,
}

impl Route {
    /// Run this route's chain snapshot through to the terminal handler.
    pub fn invoke(&self, req: &mut Request, res: &mut Response) {
        self.chain.run(self.handler.as_ref(), req, res);
    }
}

/// Result of successfully matching a request path to a route
pub struct RouteMatch<'r> {
    /// The matched route
    pub route: &'r Route,
    /// Path parameters extracted from the URL, in template order
    pub params: ParamVec,
}

/// Route table: registration-ordered, linear scan, first match wins.
///
/// The table is built during startup registration and read-only afterwards;
/// no locks are taken on the dispatch path.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty route table
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a route under `method` + `template`.
    ///
    /// Compiles the path pattern and stores `chain` as the route's snapshot.
    /// Re-registering the same method + template silently replaces the stored
    /// route in place, keeping its original table position.
    pub fn register(
        &mut self,
        method: Method,
        template: &str,
        chain: Chain,
        handler: Arc<dyn Handler>,
    ) {
        let (regex, param_names) = Self::path_to_regex(template);
        let route = Route {
            method,
            path_template: template.to_string(),
            param_names,
            regex,
            chain,
            handler,
        };

        if let Some(existing) = self
            .routes
            .iter_mut()
            .find(|r| r.method == route.method && r.path_template == route.path_template)
        {
            warn!(
                method = %route.method,
                template = %route.path_template,
                "Replaced existing route"
            );
            *existing = route;
        } else {
            info!(
                method = %route.method,
                template = %route.path_template,
                total_routes = self.routes.len() + 1,
                "Route registered"
            );
            self.routes.push(route);
        }
    }

    /// Match an inbound method + path against the table.
    ///
    /// Scans registered routes in registration order and returns the first
    /// structural match together with extracted parameters, or `None`.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        debug!(method = %method, path = %path, "Route match attempt");

        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            if let Some(caps) = route.regex.captures(path) {
                let mut params = ParamVec::new();
                for (i, name) in route.param_names.iter().enumerate() {
                    if let Some(m) = caps.get(i + 1) {
                        params.push((Arc::clone(name), m.as_str().to_string()));
                    }
                }
                info!(
                    method = %method,
                    path = %path,
                    template = %route.path_template,
                    path_params = ?params,
                    "Route matched"
                );
                return Some(RouteMatch { route, params });
            }
        }

        warn!(method = %method, path = %path, "No route matched");
        None
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if no routes have been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Print all registered routes to stdout
    ///
    /// Useful for verifying the table at startup.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!("[route] {} {}", route.method, route.path_template);
        }
    }

    /// Convert a route template to an anchored regex and extract parameter names
    ///
    /// Transforms templates like `/users/:id` into patterns like
    /// `^/users/([^/]+)$` and extracts parameter names `["id"]`. A parameter
    /// segment matches exactly one non-empty path segment, never a slash.
    /// Literal segments are escaped, so a template without parameters reduces
    /// to exact string equality. Repeated parameter names are kept as-is; the
    /// later capture wins on lookup.
    pub(crate) fn path_to_regex(path: &str) -> (Regex, Vec<Arc<str>>) {
        if path == "/" || path.is_empty() {
            return (
                Regex::new(r"^/$").expect("Failed to compile path regex"),
                Vec::new(),
            );
        }

        let mut pattern = String::with_capacity(path.len() + 5);
        pattern.push('^');
        let mut param_names: Vec<Arc<str>> = Vec::with_capacity(path.matches(':').count());

        for segment in path.split('/') {
            if let Some(name) = segment.strip_prefix(':') {
                pattern.push_str("/([^/]+)");
                param_names.push(Arc::from(name));
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        pattern.push('$');
        let regex = Regex::new(&pattern).expect("Failed to compile path regex");

        (regex, param_names)
    }
}
