//! Tests for the middleware chain: execution order, error broadcast,
//! short-circuiting, and the 500 fallback

use anyhow::anyhow;
use darter::chain::{Chain, ErrorHandler, Handler, Middleware, Next};
use darter::router::ParamVec;
use darter::server::{Request, Response};
use http::Method;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().expect("log lock").clone()
}

fn make_request() -> Request {
    Request {
        method: Method::GET,
        path: "/".to_string(),
        headers: HashMap::new(),
        raw_body: String::new(),
        parsed_body: None,
        params: ParamVec::new(),
        query: HashMap::new(),
    }
}

struct Recorder {
    name: &'static str,
    log: Log,
}

impl Middleware for Recorder {
    fn handle(&self, req: &mut Request, res: &mut Response, next: &Next<'_>) {
        self.log
            .lock()
            .expect("log lock")
            .push(self.name.to_string());
        next.advance(req, res);
    }
}

// Completes the response without ever invoking the continuation.
struct ShortCircuit;

impl Middleware for ShortCircuit {
    fn handle(&self, _req: &mut Request, res: &mut Response, _next: &Next<'_>) {
        res.send("early");
    }
}

struct SetStatusAndFail {
    status: u16,
}

impl Middleware for SetStatusAndFail {
    fn handle(&self, req: &mut Request, res: &mut Response, next: &Next<'_>) {
        res.set_status(self.status);
        next.fail(anyhow!("middleware rejected request"), req, res);
    }
}

struct RecordingErrorHandler {
    name: &'static str,
    log: Log,
}

impl ErrorHandler for RecordingErrorHandler {
    fn handle(
        &self,
        _err: &anyhow::Error,
        _req: &mut Request,
        _res: &mut Response,
        _next: &Next<'_>,
    ) {
        self.log
            .lock()
            .expect("log lock")
            .push(self.name.to_string());
    }
}

struct WritingErrorHandler;

impl ErrorHandler for WritingErrorHandler {
    fn handle(
        &self,
        err: &anyhow::Error,
        _req: &mut Request,
        res: &mut Response,
        _next: &Next<'_>,
    ) {
        if !res.headers_sent() {
            res.send(err.to_string());
        }
    }
}

struct TerminalRecorder {
    log: Log,
}

impl Handler for TerminalRecorder {
    fn call(&self, _req: &mut Request, res: &mut Response) -> anyhow::Result<()> {
        self.log.lock().expect("log lock").push("terminal".to_string());
        res.send("done");
        Ok(())
    }
}

struct FailingHandler;

impl Handler for FailingHandler {
    fn call(&self, _req: &mut Request, _res: &mut Response) -> anyhow::Result<()> {
        Err(anyhow!("handler exploded"))
    }
}

#[test]
fn test_middleware_runs_in_registration_order() {
    let log = new_log();
    let mut chain = Chain::new();
    chain.use_middleware(Arc::new(Recorder {
        name: "a",
        log: log.clone(),
    }));
    chain.use_middleware(Arc::new(Recorder {
        name: "b",
        log: log.clone(),
    }));

    let terminal = TerminalRecorder { log: log.clone() };
    let mut req = make_request();
    let mut res = Response::new();
    chain.run(&terminal, &mut req, &mut res);

    assert_eq!(entries(&log), vec!["a", "b", "terminal"]);
    assert_eq!(res.status(), 200);
    assert_eq!(res.body(), Some(b"done".as_slice()));
}

#[test]
fn test_cloned_chain_is_a_snapshot() {
    let log = new_log();
    let mut chain = Chain::new();
    chain.use_middleware(Arc::new(Recorder {
        name: "a",
        log: log.clone(),
    }));

    let snapshot = chain.clone();
    chain.use_middleware(Arc::new(Recorder {
        name: "late",
        log: log.clone(),
    }));

    let terminal = TerminalRecorder { log: log.clone() };
    let mut req = make_request();
    let mut res = Response::new();
    snapshot.run(&terminal, &mut req, &mut res);

    assert_eq!(entries(&log), vec!["a", "terminal"]);
}

#[test]
fn test_handler_error_broadcasts_to_all_error_handlers_in_order() {
    let log = new_log();
    let mut chain = Chain::new();
    chain.use_error_handler(Arc::new(RecordingErrorHandler {
        name: "e1",
        log: log.clone(),
    }));
    chain.use_error_handler(Arc::new(RecordingErrorHandler {
        name: "e2",
        log: log.clone(),
    }));

    let mut req = make_request();
    let mut res = Response::new();
    chain.run(&FailingHandler, &mut req, &mut res);

    // Every error handler observes the error exactly once, in order.
    assert_eq!(entries(&log), vec!["e1", "e2"]);
}

#[test]
fn test_unrecovered_error_falls_back_to_500() {
    let log = new_log();
    let mut chain = Chain::new();
    chain.use_error_handler(Arc::new(RecordingErrorHandler {
        name: "e1",
        log: log.clone(),
    }));

    let mut req = make_request();
    let mut res = Response::new();
    chain.run(&FailingHandler, &mut req, &mut res);

    assert_eq!(res.status(), 500);
    assert_eq!(res.body(), Some(b"Internal Server Error".as_slice()));
}

#[test]
fn test_error_handler_write_preserves_preset_status() {
    let mut chain = Chain::new();
    chain.use_middleware(Arc::new(SetStatusAndFail { status: 400 }));
    chain.use_error_handler(Arc::new(WritingErrorHandler));

    let log = new_log();
    let terminal = TerminalRecorder { log: log.clone() };
    let mut req = make_request();
    let mut res = Response::new();
    chain.run(&terminal, &mut req, &mut res);

    // The error handler produced the terminal write, so the 500 fallback
    // never ran and the middleware's 400 survives.
    assert_eq!(res.status(), 400);
    assert_eq!(res.body(), Some(b"middleware rejected request".as_slice()));
    assert!(entries(&log).is_empty());
}

#[test]
fn test_failed_middleware_skips_rest_of_chain() {
    let log = new_log();
    let mut chain = Chain::new();
    chain.use_middleware(Arc::new(SetStatusAndFail { status: 400 }));
    chain.use_middleware(Arc::new(Recorder {
        name: "after",
        log: log.clone(),
    }));
    chain.use_error_handler(Arc::new(RecordingErrorHandler {
        name: "e1",
        log: log.clone(),
    }));

    let terminal = TerminalRecorder { log: log.clone() };
    let mut req = make_request();
    let mut res = Response::new();
    chain.run(&terminal, &mut req, &mut res);

    assert_eq!(entries(&log), vec!["e1"]);
}

#[test]
fn test_middleware_may_complete_response_without_advancing() {
    let log = new_log();
    let mut chain = Chain::new();
    chain.use_middleware(Arc::new(ShortCircuit));
    chain.use_middleware(Arc::new(Recorder {
        name: "after",
        log: log.clone(),
    }));

    let terminal = TerminalRecorder { log: log.clone() };
    let mut req = make_request();
    let mut res = Response::new();
    chain.run(&terminal, &mut req, &mut res);

    assert!(entries(&log).is_empty());
    assert_eq!(res.body(), Some(b"early".as_slice()));
}

#[test]
fn test_empty_chain_runs_terminal_handler_directly() {
    let log = new_log();
    let chain = Chain::new();
    let terminal = TerminalRecorder { log: log.clone() };
    let mut req = make_request();
    let mut res = Response::new();
    chain.run(&terminal, &mut req, &mut res);

    assert_eq!(entries(&log), vec!["terminal"]);
}
