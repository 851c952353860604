use may::coroutine::JoinHandle;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

/// Handle to a running HTTP server.
///
/// Returned by [`App::listen`](crate::server::App::listen). The server runs
/// until the handle is stopped or the process exits.
pub struct ServerHandle {
    probe_addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    pub(crate) fn new(bind_addr: SocketAddr, handle: JoinHandle<()>) -> Self {
        // An unspecified bind address is not connectable; probe loopback.
        let probe_addr = if bind_addr.ip().is_unspecified() {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), bind_addr.port())
        } else {
            bind_addr
        };
        Self { probe_addr, handle }
    }

    /// Block until the server accepts TCP connections.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the port is still not connectable after ~250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        let deadline = Instant::now() + Duration::from_millis(250);
        while Instant::now() < deadline {
            if TcpStream::connect(self.probe_addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Cancel the server coroutine and wait for it to exit.
    pub fn stop(self) {
        // SAFETY: cancel() is marked unsafe by the may runtime. The handle is
        // valid for the lifetime of self and cancellation is the intended
        // shutdown path.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
    }

    /// Block until the server coroutine finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}
