//! Exact-match routing and a pooled accept loop for `nano-http`.
//!
//! ```no_run
//! use http::Response;
//! use nano_http::handler::make_handler;
//! use nano_http::protocol::Request;
//! use nano_web::Server;
//! use std::convert::Infallible;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::builder().address("127.0.0.1:8080").build().unwrap();
//!     server.register("GET", "/hello", make_handler(|_: &Request| async {
//!         Ok::<_, Infallible>(Response::new("hello world"))
//!     }));
//!     server.start().await.unwrap();
//! }
//! ```

mod config;
mod logging;
mod server;

pub mod router;

pub use config::ServerConfig;
pub use config::DEFAULT_ADDRESS;
pub use config::DEFAULT_WORKERS;
pub use logging::init_logging;
pub use router::Router;
pub use server::Server;
pub use server::ServerBuildError;
pub use server::ServerBuilder;
pub use server::ServerError;
