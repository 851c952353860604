pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::ServerHandle;
pub use request::{parse_request, ParsedRequest, Request};
pub use response::Response;
pub use service::{App, AppService};
