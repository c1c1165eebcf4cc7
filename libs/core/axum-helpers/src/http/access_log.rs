//! One line per request in NCSA Common Log Format.
//!
//! ```text
//! 127.0.0.1 - - [02/Jan/2006:15:04:05 -0700] "GET /v1/users HTTP/1.1" 200 512
//! ```

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, FixedOffset, Local};
use http_body_util::BodyExt;
use std::fmt;
use std::net::SocketAddr;

const CLF_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Fields of a single access log line.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: Option<String>,
    pub user: Option<String>,
    pub time: DateTime<FixedOffset>,
    pub method: String,
    pub uri: String,
    pub protocol: String,
    pub status: u16,
    pub bytes: u64,
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} [{}] \"{} {} {}\" {} {}",
            self.remote_addr.as_deref().unwrap_or("-"),
            self.user.as_deref().unwrap_or("-"),
            self.time.format(CLF_TIME_FORMAT),
            self.method,
            self.uri,
            self.protocol,
            self.status,
            self.bytes
        )
    }
}

/// Emits its entry when dropped.
struct PendingEntry(AccessLogEntry);

impl Drop for PendingEntry {
    fn drop(&mut self) {
        tracing::info!(target: "access_log", "{}", self.0);
    }
}

/// Add every data frame of `body` to `entry.bytes`.
///
/// The entry is logged once the body is finished or abandoned.
fn count_body(body: Body, entry: AccessLogEntry) -> Body {
    let mut pending = PendingEntry(entry);

    Body::new(body.map_frame(move |frame| {
        if let Some(data) = frame.data_ref() {
            pending.0.bytes += data.len() as u64;
        }
        frame
    }))
}

/// Middleware emitting an [`AccessLogEntry`] at info level on target `access_log`.
///
/// Bytes are counted as they are written, so anything encoding the body
/// must sit inside this layer. The remote address is only known when the
/// server was started with `into_make_service_with_connect_info::<SocketAddr>()`.
pub async fn access_log(request: Request, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let time = Local::now().fixed_offset();
    let method = request.method().to_string();
    let uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let protocol = format!("{:?}", request.version());

    let (parts, body) = next.run(request).await.into_parts();

    let entry = AccessLogEntry {
        remote_addr,
        user: None,
        time,
        method,
        uri,
        protocol,
        status: parts.status.as_u16(),
        bytes: 0,
    };

    Response::from_parts(parts, count_body(body, entry))
}
