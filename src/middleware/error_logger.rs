use tracing::error;

use crate::chain::{ErrorHandler, Next};
use crate::server::{Request, Response};

/// Logs the error and, if no terminal write has happened yet, emits the
/// error message as the response body under whatever status is set.
pub struct ErrorLogger;

impl ErrorHandler for ErrorLogger {
    fn handle(
        &self,
        err: &anyhow::Error,
        req: &mut Request,
        res: &mut Response,
        _next: &Next<'_>,
    ) {
        error!(error = %err, method = %req.method, path = %req.path, "Request failed");
        if !res.headers_sent() {
            res.send(err.to_string());
        }
    }
}
