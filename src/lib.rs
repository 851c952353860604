//! # Darter
//!
//! **Darter** is a minimal Express-style HTTP request dispatcher for Rust,
//! powered by the `may` coroutine runtime and `may_minihttp`.
//!
//! ## Overview
//!
//! Darter accepts an incoming request, matches it against a table of
//! registered routes, threads it through an ordered chain of middlewares,
//! and invokes a terminal handler, or reports a miss with a fixed 404.
//! Route templates carry named parameters (`/users/:id`), queries parse
//! into a flat last-wins map, and errors broadcast to every registered
//! error handler with a guaranteed 500 fallback.
//!
//! ## Architecture
//!
//! The library is organized into a few key modules:
//!
//! - **[`router`]** - Path-pattern compilation and the registration-ordered
//!   route table (regex matchers, first match wins)
//! - **[`chain`]** - The middleware/error-handler execution chain and its
//!   continuation contract
//! - **[`dispatcher`]** - Target parsing, route lookup, request
//!   augmentation, and the 404 miss path
//! - **[`server`]** - The `App` registration facade, request/response
//!   types, and the `may_minihttp` binding
//! - **[`middleware`]** - The stock request logger, JSON body decoder, and
//!   error logger
//! - **[`runtime_config`]** - Environment-driven runtime settings
//!
//! ## Request Handling Flow
//!
//! 1. `may_minihttp` parses the raw HTTP message and hands it to
//!    [`server::AppService`]
//! 2. The [`dispatcher::Dispatcher`] splits the target into path + query
//!    and scans the route table in registration order
//! 3. On a match, the route's chain snapshot runs each middleware in
//!    order; each receives the request, the response, and a
//!    [`chain::Next`] continuation it must invoke exactly once
//! 4. Control falls through to the terminal handler; an error anywhere
//!    diverts to a flat broadcast over all error handlers, with a generic
//!    500 synthesized if none of them writes a response
//! 5. On a miss, the dispatcher writes `404 Not found` directly; no
//!    middleware observes unmatched requests
//!
//! ## Quick Start
//!
//! ```no_run
//! use darter::middleware::{ErrorLogger, JsonBodyMiddleware, LoggingMiddleware};
//! use darter::server::{App, Request, Response};
//!
//! fn hello(_req: &mut Request, res: &mut Response) -> anyhow::Result<()> {
//!     res.set_header("Content-Type", "text/plain");
//!     res.send("Hello, World!");
//!     Ok(())
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = App::new();
//!     app.use_middleware(LoggingMiddleware);
//!     app.use_middleware(JsonBodyMiddleware);
//!     app.use_error_handler(ErrorLogger);
//!     app.get("/", hello);
//!     let handle = app.listen(3000)?;
//!     handle.join().ok();
//!     Ok(())
//! }
//! ```
//!
//! ## Runtime Considerations
//!
//! Darter uses the `may` coroutine runtime, not tokio or async-std. Each
//! connection is served on a coroutine; a request's own chain executes
//! strictly in registration order. There is no timeout or cancellation
//! primitive: a middleware that never invokes its continuation holds its
//! request indefinitely. Stack size is configurable via the
//! `DARTER_STACK_SIZE` environment variable.

pub mod chain;
pub mod dispatcher;
pub mod middleware;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use chain::{Chain, ErrorHandler, Handler, Middleware, Next};
pub use dispatcher::Dispatcher;
pub use router::{ParamVec, Route, RouteMatch, Router};
pub use server::{App, AppService, Request, Response};
