//! # Chain Module
//!
//! The middleware/error-handler execution chain: the control-flow core of
//! the crate.
//!
//! A [`Chain`] holds an ordered list of [`Middleware`] stages and a separate
//! ordered list of [`ErrorHandler`] stages. [`Chain::run`] wraps a terminal
//! [`Handler`] into a single sequential execution: each middleware receives
//! the request, the response, and a [`Next`] continuation it must invoke
//! exactly once, either [`Next::advance`] to fall through towards the
//! terminal handler, or [`Next::fail`] to divert to the error path.
//!
//! Errors are a flat broadcast: every registered error handler observes
//! every error, in registration order, and the chain guarantees a generic
//! 500 response when none of them writes one.
//!
//! Routes capture the chain contents at registration time (a cheap clone of
//! the `Arc` lists), so middlewares registered after a route never run for
//! it.

mod core;

pub use core::{Chain, ErrorHandler, Handler, Middleware, Next};
