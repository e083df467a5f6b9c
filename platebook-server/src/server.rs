//! HTTP server implementation

use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use crate::handlers::handle_request;
use crate::state::AppState;

pub struct PlatebookServer {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl PlatebookServer {
    /// Bind the listening socket
    pub async fn bind(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` resolves
    ///
    /// Connections already accepted keep running on their own tasks.
    pub async fn serve<S>(self, shutdown: S) -> std::io::Result<()>
    where
        S: Future<Output = ()>,
    {
        info!("Platebook server listening on {}", self.local_addr()?);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (stream, remote_addr) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            error!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };
                    debug!("New connection from {}", remote_addr);

                    let state = self.state.clone();
                    tokio::spawn(async move {
                        Self::handle_connection(stream, remote_addr, state).await;
                    });
                }
                _ = &mut shutdown => {
                    info!("Shutdown requested, no longer accepting connections");
                    return Ok(());
                }
            }
        }
    }

    async fn handle_connection(stream: TcpStream, remote_addr: SocketAddr, state: Arc<AppState>) {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req: Request<Incoming>| {
            let state = state.clone();
            async move { handle_request(req, state).await }
        });

        if let Err(err) = auto::Builder::new(TokioExecutor::new())
            .serve_connection(io, service)
            .await
        {
            debug!("Connection error from {}: {}", remote_addr, err);
        }
    }
}
