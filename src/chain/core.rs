use std::sync::Arc;

use crate::server::{Request, Response};
use tracing::{debug, error};

/// A pipeline stage that may inspect or mutate the request and response
/// before passing control on.
///
/// A middleware must eventually invoke its continuation exactly once:
/// [`Next::advance`] to continue the chain, or [`Next::fail`] to divert to
/// the error handlers. Invoking neither leaves the exchange without a
/// terminal write; there is no built-in timeout guarding against this.
pub trait Middleware: Send + Sync {
    fn handle(&self, req: &mut Request, res: &mut Response, next: &Next<'_>);
}

/// A pipeline stage invoked only after an error has been signaled.
///
/// Every registered error handler sees every error; each is responsible for
/// checking [`Response::headers_sent`] before writing.
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, err: &anyhow::Error, req: &mut Request, res: &mut Response, next: &Next<'_>);
}

/// The route-specific terminal stage, invoked once all middlewares have
/// passed control through. An `Err` return diverts to the error handlers.
pub trait Handler: Send + Sync {
    fn call(&self, req: &mut Request, res: &mut Response) -> anyhow::Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&mut Request, &mut Response) -> anyhow::Result<()> + Send + Sync,
{
    fn call(&self, req: &mut Request, res: &mut Response) -> anyhow::Result<()> {
        self(req, res)
    }
}

/// Ordered middleware list plus ordered error-handler list.
///
/// Both lists are append-only. Cloning a chain is cheap (`Arc` elements) and
/// is how routes capture the chain contents at registration time.
#[derive(Clone, Default)]
pub struct Chain {
    middlewares: Vec<Arc<dyn Middleware>>,
    error_handlers: Vec<Arc<dyn ErrorHandler>>,
}

impl Chain {
    /// Create an empty chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware to the chain
    pub fn use_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Append an error handler to the chain
    pub fn use_error_handler(&mut self, eh: Arc<dyn ErrorHandler>) {
        self.error_handlers.push(eh);
    }

    /// Drive `req`/`res` through every middleware in registration order,
    /// then the terminal handler.
    ///
    /// Any error signaled along the way is broadcast to the error handlers;
    /// if none of them produces a terminal write, a generic 500 is emitted
    /// so no matched request is left without a response.
    pub fn run(&self, terminal: &dyn Handler, req: &mut Request, res: &mut Response) {
        debug!(
            middleware_count = self.middlewares.len(),
            error_handler_count = self.error_handlers.len(),
            "Chain execution start"
        );
        let next = Next {
            middlewares: &self.middlewares,
            error_handlers: &self.error_handlers,
            terminal,
            index: 0,
        };
        next.advance(req, res);
    }
}

/// The per-request continuation handed to each stage: a cursor into the
/// middleware list plus the capability to invoke the next stage.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    middlewares: &'a [Arc<dyn Middleware>],
    error_handlers: &'a [Arc<dyn ErrorHandler>],
    terminal: &'a dyn Handler,
    index: usize,
}

impl Next<'_> {
    /// Continue the chain without an error.
    ///
    /// Invokes the middleware at the cursor with an advanced continuation,
    /// or the terminal handler once the middleware list is exhausted. An
    /// `Err` from the terminal handler is captured and routed to
    /// [`Next::fail`].
    pub fn advance(&self, req: &mut Request, res: &mut Response) {
        if let Some(mw) = self.middlewares.get(self.index) {
            let next = Next {
                index: self.index + 1,
                ..*self
            };
            mw.handle(req, res, &next);
        } else if let Err(err) = self.terminal.call(req, res) {
            self.fail(err, req, res);
        }
    }

    /// Divert to the error path.
    ///
    /// Broadcasts `err` to every registered error handler in registration
    /// order; every handler runs regardless of whether an earlier one
    /// already completed the response. Afterwards, if no handler produced a
    /// terminal write, a generic 500 is synthesized.
    pub fn fail(&self, err: anyhow::Error, req: &mut Request, res: &mut Response) {
        error!(error = %err, path = %req.path, "Request error signaled");
        for eh in self.error_handlers {
            eh.handle(&err, req, res, self);
        }
        if !res.headers_sent() {
            res.set_status(500);
            res.set_header("Content-Type", "text/plain");
            res.send("Internal Server Error");
        }
    }
}
