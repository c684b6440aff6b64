use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use nano_http::connection::HttpConnection;
use nano_http::handler::Handler;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::router::Router;

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Arc<Router>>,
    address: Option<String>,
    lookahead_limit: usize,
    workers: usize,
}

impl ServerBuilder {
    fn new() -> Self {
        let defaults = ServerConfig::default();
        Self { router: None, address: None, lookahead_limit: defaults.lookahead_limit, workers: defaults.workers }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Uses an existing routing table, which may keep receiving registrations
    /// through other handles while the server runs.
    pub fn router(mut self, router: Arc<Router>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn lookahead_limit(mut self, limit: usize) -> Self {
        self.lookahead_limit = limit;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Takes address, lookahead limit and pool size from `config`.
    pub fn config(self, config: ServerConfig) -> Self {
        self.address(config.address).lookahead_limit(config.lookahead_limit).workers(config.workers)
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        let resolved = address
            .to_socket_addrs()
            .map_err(|source| ServerBuildError::InvalidAddress { address: address.clone(), source })?
            .collect::<Vec<_>>();

        if resolved.is_empty() {
            return Err(ServerBuildError::UnresolvedAddress { address });
        }
        if self.lookahead_limit == 0 {
            return Err(ServerBuildError::ZeroLimit);
        }
        if self.workers == 0 {
            return Err(ServerBuildError::ZeroWorkers);
        }

        Ok(Server {
            router: self.router.unwrap_or_default(),
            address: resolved,
            lookahead_limit: self.lookahead_limit,
            workers: self.workers,
        })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address {address}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("address {address} resolved to nothing")]
    UnresolvedAddress { address: String },
    #[error("lookahead limit must be positive")]
    ZeroLimit,
    #[error("worker pool must have at least one worker")]
    ZeroWorkers,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("bind server error: {source}")]
    Bind {
        #[from]
        source: io::Error,
    },
}

/// An HTTP server answering one request per connection.
///
/// The accept loop never waits for a connection to be processed: each
/// connection gets its own task, which first takes a permit from a pool of
/// `workers` permits. At most `workers` connections are processed at once,
/// the others wait for a permit.
#[derive(Debug)]
pub struct Server {
    router: Arc<Router>,
    address: Vec<SocketAddr>,
    lookahead_limit: usize,
    workers: usize,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Registers `handler` for `method` and `path` on the shared routing table.
    pub fn register<H>(&self, method: impl Into<String>, path: impl Into<String>, handler: H)
    where
        H: Handler + 'static,
    {
        self.router.register(method, path, handler);
    }

    /// A handle to the routing table, usable after the server has started.
    pub fn router(&self) -> Arc<Router> {
        Arc::clone(&self.router)
    }

    pub fn address(&self) -> &[SocketAddr] {
        &self.address
    }

    /// Binds the configured address and serves forever.
    pub async fn start(self) -> Result<(), ServerError> {
        let tcp_listener = TcpListener::bind(self.address.as_slice()).await.inspect_err(|e| error!(cause = %e, "bind server error"))?;
        self.serve(tcp_listener).await;
        Ok(())
    }

    /// Serves connections accepted from `tcp_listener` forever.
    pub async fn serve(self, tcp_listener: TcpListener) {
        match tcp_listener.local_addr() {
            Ok(local_addr) => info!(port = local_addr.port(), "server started"),
            Err(e) => warn!(cause = %e, "server started on unknown address"),
        }

        let pool = Arc::new(Semaphore::new(self.workers));
        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            info!(port = remote_addr.port(), "new connection");
            tokio::spawn(process(tcp_stream, remote_addr, Arc::clone(&self.router), Arc::clone(&pool), self.lookahead_limit));
        }
    }
}

async fn process(tcp_stream: TcpStream, remote_addr: SocketAddr, router: Arc<Router>, pool: Arc<Semaphore>, lookahead_limit: usize) {
    // the pool is never closed, so acquiring only fails on shutdown of the runtime
    let Ok(_permit) = pool.acquire_owned().await else {
        return;
    };

    let (reader, writer) = tcp_stream.into_split();
    let connection = HttpConnection::with_limit(reader, writer, lookahead_limit);
    match connection.process(router.as_ref()).await {
        Ok(()) => {
            debug!(port = remote_addr.port(), "finished process, connection shutdown");
        }
        Err(e) => {
            error!(port = remote_addr.port(), cause = %e, "service has error, connection shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_address() {
        assert!(matches!(Server::builder().build(), Err(ServerBuildError::MissingAddress)));
    }

    #[test]
    fn build_rejects_bad_address() {
        let error = Server::builder().address("not an address").build().unwrap_err();
        assert!(matches!(error, ServerBuildError::InvalidAddress { .. }));
    }

    #[test]
    fn build_rejects_zero_sizes() {
        let error = Server::builder().address("127.0.0.1:0").lookahead_limit(0).build().unwrap_err();
        assert!(matches!(error, ServerBuildError::ZeroLimit));

        let error = Server::builder().address("127.0.0.1:0").workers(0).build().unwrap_err();
        assert!(matches!(error, ServerBuildError::ZeroWorkers));
    }

    #[test]
    fn build_from_config() {
        let config = ServerConfig { address: "127.0.0.1:9000".to_string(), lookahead_limit: 128, workers: 2 };
        let server = Server::builder().config(config).build().unwrap();

        assert_eq!(server.address(), ["127.0.0.1:9000".parse::<SocketAddr>().unwrap()]);
        assert_eq!(server.lookahead_limit, 128);
        assert_eq!(server.workers, 2);
    }

    #[test]
    fn router_handle_is_shared() {
        let router = Arc::new(Router::new());
        let server = Server::builder().address("127.0.0.1:0").router(Arc::clone(&router)).build().unwrap();

        server.register("GET", "/a", Router::new());
        assert!(router.contains("GET", "/a"));
        assert!(server.router().contains("GET", "/a"));
    }
}
