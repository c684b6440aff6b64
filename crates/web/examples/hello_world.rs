use bytes::Bytes;
use http::{Response, StatusCode};
use nano_http::handler::make_handler;
use nano_http::protocol::Request;
use nano_web::{init_logging, Server, ServerConfig};
use std::convert::Infallible;
use tracing::Level;

#[tokio::main]
async fn main() {
    init_logging(Level::INFO);

    let server = match Server::builder().config(ServerConfig::default()).build() {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(cause = %e, "invalid server config");
            return;
        }
    };

    server.register(
        "GET",
        "/hello",
        make_handler(|_: &Request| async { Ok::<_, Infallible>(Response::new("hello world\r\n")) }),
    );

    server.register(
        "POST",
        "/echo",
        make_handler(|request: &Request| {
            let body = request.body().cloned().unwrap_or_else(Bytes::new);
            let content_type = request.header("Content-Type").unwrap_or("application/octet-stream").to_owned();
            async move {
                Response::builder().status(StatusCode::OK).header(http::header::CONTENT_TYPE, content_type).body(body)
            }
        }),
    );

    if let Err(e) = server.start().await {
        tracing::error!(cause = %e, "server stopped");
    }
}
