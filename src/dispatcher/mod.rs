//! # Dispatcher Module
//!
//! Maps inbound requests to routes and drives execution.
//!
//! The dispatcher sits between the transport and the chain: it parses the
//! request target into a path and the flat query map, scans the route table
//! for the first structural match, builds the augmented request, and runs
//! the matched route's chain snapshot. Unmatched requests get the fixed
//! `404 Not found` without touching any middleware or error handler.

mod core;

pub use core::Dispatcher;
