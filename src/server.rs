//! The serve loop shared by the binaries and by in-process test use.
//!
//! One connection is fully read, routed and answered before the next is
//! accepted. Responses are fixtures or pure functions of the request, so
//! nothing is shared between requests and ordering never matters.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::http::{read_request, Request, Response};

/// A service is a pure router from request to response.
pub type Router = fn(&Request) -> Response;

/// An in-process double bound to an ephemeral local port, for tests
/// that want to point a client at a live listener.
pub struct MockServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join_handle: Option<tokio::task::JoinHandle<()>>,
}

impl MockServer {
    pub async fn start(router: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let join_handle = tokio::spawn(async move {
            serve(listener, router, shutdown_rx).await;
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            join_handle: Some(join_handle),
        })
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.join_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.join_handle.take() {
            handle.abort();
        }
    }
}

/// Accept-and-answer loop. The connection is awaited inline so a single
/// request is in flight at a time; the shutdown arm wins ties.
pub async fn serve(listener: TcpListener, router: Router, mut shutdown_rx: oneshot::Receiver<()>) {
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown_rx => {
                break;
            }
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _)) => {
                        let _ = handle_connection(stream, router).await;
                    }
                    Err(err) => {
                        eprintln!("mock server accept error: {}", err);
                        break;
                    }
                }
            }
        }
    }
}

async fn handle_connection(mut stream: TcpStream, router: Router) -> std::io::Result<()> {
    let request = match read_request(&mut stream).await? {
        Some(request) => request,
        None => return Ok(()),
    };

    let response = router(&request);
    response.write_to(&mut stream).await
}

/// Bind `0.0.0.0:<port>`, print the startup banner and serve until
/// Ctrl+C. Request bodies are never logged; test output stays clean.
///
/// # Errors
/// Returns the bind error when the port is unavailable.
pub async fn run(name: &str, port: u16, router: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;

    println!("Mock {} server running on http://localhost:{}", name, port);
    println!("Press Ctrl+C to stop");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = shutdown_tx.send(());
    });

    serve(listener, router, shutdown_rx).await;
    println!("\nShutting down...");

    Ok(())
}

/// Read the optional positional port argument.
///
/// # Errors
/// Returns a message when the argument is present but not a port number.
pub fn port_from_args(default: u16) -> Result<u16, String> {
    match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .map_err(|_| format!("invalid port argument: {}", arg)),
        None => Ok(default),
    }
}
