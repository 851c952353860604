//! # Router Module
//!
//! Path matching and route resolution. Route templates (e.g., `/users/:id`)
//! are compiled once at registration time into anchored regex matchers; each
//! incoming request is tested against the table in registration order and the
//! first structural match wins.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route templates into matchers plus ordered parameter names
//! - Storing routes together with their registration-time chain snapshot
//! - Matching inbound method + path pairs and extracting path parameters
//!
//! ## Example
//!
//! ```rust,ignore
//! use darter::router::Router;
//! use http::Method;
//!
//! if let Some(m) = router.lookup(&Method::GET, "/users/123") {
//!     println!("template: {}", m.route.path_template);
//!     println!("params: {:?}", m.params);
//! }
//! ```

mod core;

pub use core::{ParamVec, Route, RouteMatch, Router, MAX_INLINE_PARAMS};
