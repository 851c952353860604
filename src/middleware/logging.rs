use tracing::info;

use crate::chain::{Middleware, Next};
use crate::server::{Request, Response};

/// Logs one line per request, then passes control on.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn handle(&self, req: &mut Request, res: &mut Response, next: &Next<'_>) {
        info!(method = %req.method, path = %req.path, "Request received");
        next.advance(req, res);
    }
}
