use may_minihttp::Response as HttpResponse;
use serde_json::Value;
use tracing::warn;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// Per-call response accumulator.
///
/// Collects a status code, headers, and a single terminal body write. Once
/// the terminal write has happened, further status/header mutation and
/// writes are no-ops, flagged at `warn` level. The accumulated state is
/// serialized into the transport response only after the chain returns.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    sent: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Create an empty response with status 200 and no body
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: None,
            sent: false,
        }
    }

    /// Current status code
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// True once the terminal write has happened
    #[must_use]
    pub fn headers_sent(&self) -> bool {
        self.sent
    }

    /// The terminal body, if one has been written
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Set the status code. No-op after the terminal write.
    pub fn set_status(&mut self, status: u16) {
        if self.sent {
            warn!(status, "Status change after response sent - ignored");
            return;
        }
        self.status = status;
    }

    /// Add or replace a header (case-insensitive on the name).
    /// No-op after the terminal write.
    pub fn set_header(&mut self, name: &str, value: &str) {
        if self.sent {
            warn!(header = name, "Header change after response sent - ignored");
            return;
        }
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// Get a header by name
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The terminal write: stores the body and seals the response.
    /// A second call is a no-op.
    pub fn send(&mut self, body: impl Into<Vec<u8>>) {
        if self.sent {
            warn!("Terminal write after response sent - ignored");
            return;
        }
        self.body = Some(body.into());
        self.sent = true;
    }

    /// Serialize `body` as JSON, set the content type, and send.
    pub fn send_json(&mut self, body: &Value) {
        self.set_header("Content-Type", "application/json");
        match serde_json::to_vec(body) {
            Ok(bytes) => self.send(bytes),
            Err(err) => {
                warn!(error = %err, "Failed to serialize JSON body");
                self.set_status(500);
                self.send(Vec::new());
            }
        }
    }

    /// Write the accumulated state into the transport response.
    pub(crate) fn write_to(self, out: &mut HttpResponse) {
        out.status_code(self.status as usize, status_reason(self.status));
        for (name, value) in &self.headers {
            out.header(header_line(name, value));
        }
        if let Some(body) = self.body {
            out.body_vec(body);
        }
    }
}

// may_minihttp takes header lines as &'static str; the common lines come
// from a static table and anything else is leaked per response.
fn header_line(name: &str, value: &str) -> &'static str {
    match (name, value) {
        ("Content-Type", "text/plain") => "Content-Type: text/plain",
        ("Content-Type", "application/json") => "Content-Type: application/json",
        _ => Box::leak(format!("{name}: {value}").into_boxed_str()),
    }
}
