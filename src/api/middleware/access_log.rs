//! Combined-log-format access logging (`accesslog` decorator).

use axum::{
    extract::{ConnectInfo, Request},
    http::header,
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

/// Logs one line per request in combined log format.
///
/// The client address is taken from the connection info when the server was
/// started with `into_make_service_with_connect_info`, `-` otherwise.
pub async fn layer(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    let method = req.method().to_string();
    let uri = req.uri().to_string();
    let version = format!("{:?}", req.version());

    let ua = header_value(&req, header::USER_AGENT);
    let referer = header_value(&req, header::REFERER);

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let ms = start.elapsed().as_millis();

    tracing::info!(
        target: "access",
        r#"{ip} - - "{method} {uri} {version}" {status} - "{referer}" "{ua}" {ms}ms"#,
    );

    response
}

fn header_value(req: &Request, name: header::HeaderName) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
