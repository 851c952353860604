use anyhow::Context;
use serde_json::{Map, Value};
use tracing::debug;

use crate::chain::{Middleware, Next};
use crate::server::{Request, Response};

/// Decodes the raw body as JSON and attaches it to the request.
///
/// An empty raw body attaches an empty object. A body that fails to decode
/// sets status 400 and diverts to the error path; the status survives as
/// long as an error handler emits the terminal write before the chain's 500
/// fallback runs.
pub struct JsonBodyMiddleware;

impl Middleware for JsonBodyMiddleware {
    fn handle(&self, req: &mut Request, res: &mut Response, next: &Next<'_>) {
        if req.raw_body.is_empty() {
            req.parsed_body = Some(Value::Object(Map::new()));
            next.advance(req, res);
            return;
        }

        let parsed: Result<Value, _> = serde_json::from_str(&req.raw_body)
            .context("request body is not valid JSON");
        match parsed {
            Ok(body) => {
                debug!(
                    body_fields = body.as_object().map(Map::len),
                    "JSON body parsed"
                );
                req.parsed_body = Some(body);
                next.advance(req, res);
            }
            Err(err) => {
                res.set_status(400);
                next.fail(err, req, res);
            }
        }
    }
}
