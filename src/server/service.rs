use super::http_server::ServerHandle;
use super::request::parse_request;
use super::response::Response;
use crate::chain::{Chain, ErrorHandler, Handler, Middleware};
use crate::dispatcher::Dispatcher;
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use http::Method;
use may_minihttp::{HttpServer, HttpService, Request as HttpRequest, Response as HttpResponse};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// The registration facade: middlewares, error handlers, routes, startup.
///
/// An `App` is an explicit value owned by the process; nothing here is
/// global. Middlewares and error handlers must be registered before the
/// routes that should use them: each route captures the chain contents at
/// registration time, so later `use_*` calls do not retroactively apply.
pub struct App {
    chain: Chain,
    router: Router,
    config: RuntimeConfig,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an app configured from the environment
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    /// Create an app with an explicit runtime configuration
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            chain: Chain::new(),
            router: Router::new(),
            config,
        }
    }

    /// Append a middleware to the chain used by subsequently registered routes
    pub fn use_middleware(&mut self, mw: impl Middleware + 'static) {
        self.chain.use_middleware(Arc::new(mw));
    }

    /// Append an error handler to the chain used by subsequently registered routes
    pub fn use_error_handler(&mut self, eh: impl ErrorHandler + 'static) {
        self.chain.use_error_handler(Arc::new(eh));
    }

    /// Register a `GET` route
    pub fn get(&mut self, path: &str, handler: impl Handler + 'static) {
        self.route(Method::GET, path, handler);
    }

    /// Register a `POST` route
    pub fn post(&mut self, path: &str, handler: impl Handler + 'static) {
        self.route(Method::POST, path, handler);
    }

    /// Register a `PUT` route
    pub fn put(&mut self, path: &str, handler: impl Handler + 'static) {
        self.route(Method::PUT, path, handler);
    }

    /// Register a route under an arbitrary method
    pub fn route(&mut self, method: Method, path: &str, handler: impl Handler + 'static) {
        self.router
            .register(method, path, self.chain.clone(), Arc::new(handler));
    }

    /// Bind the app to `0.0.0.0:port` and start serving.
    ///
    /// Logs the registered route table and returns a handle the caller can
    /// join or stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound.
    pub fn listen(self, port: u16) -> io::Result<ServerHandle> {
        may::config().set_stack_size(self.config.stack_size);
        self.router.dump_routes();
        let service = AppService::new(Dispatcher::new(self.router, self.config.host));
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let handle = HttpServer(service).start(addr)?;
        info!(port, "Server listening");
        Ok(ServerHandle::new(addr, handle))
    }
}

/// The `may_minihttp` service: parse the raw request, dispatch, serialize
/// the accumulated response back into the transport.
#[derive(Clone)]
pub struct AppService {
    dispatcher: Arc<Dispatcher>,
}

impl AppService {
    /// Wrap a dispatcher for serving
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: HttpRequest, res: &mut HttpResponse) -> io::Result<()> {
        let parsed = parse_request(req);
        let mut response = Response::new();
        self.dispatcher.dispatch(parsed, &mut response);
        response.write_to(res);
        Ok(())
    }
}
