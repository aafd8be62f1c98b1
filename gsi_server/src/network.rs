use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use gsi_proto::{decode_snapshot, Snapshot};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, ServerConfig};

/// Caller logic run once per decoded update.
///
/// Runs on tokio's blocking pool, so a slow handler holds up only its own
/// request. An error makes the listener answer 500, which the game client
/// treats as "retry this update".
pub trait SnapshotHandler: Send + Sync + 'static {
    fn handle(&self, snapshot: Snapshot) -> anyhow::Result<()>;
}

impl<F> SnapshotHandler for F
where
    F: Fn(Snapshot) -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn handle(&self, snapshot: Snapshot) -> anyhow::Result<()> {
        self(snapshot)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to bind {target}: {source}")]
    Bind {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server stopped: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Clone)]
struct IngestState {
    path: Arc<str>,
    handler: Arc<dyn SnapshotHandler>,
}

/// Build the router that accepts game updates at `path`.
///
/// `path` is matched literally, never as a route pattern, so any path the
/// config parser accepts is servable. A path ending in `/` also covers every
/// path below it; the default `/` accepts updates on any path.
pub fn router<H>(path: &str, handler: H, max_body_bytes: usize) -> Router
where
    H: SnapshotHandler,
{
    let state = IngestState {
        path: Arc::from(path),
        handler: Arc::new(handler),
    };
    Router::new()
        .fallback(ingest)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Bind the configured address and serve until the process is stopped.
pub async fn serve<H>(config: &ServerConfig, handler: H) -> Result<(), ServerError>
where
    H: SnapshotHandler,
{
    let address = config.listen_address()?;
    let target = address.bind_target();
    let listener = TcpListener::bind(&target)
        .await
        .map_err(|source| ServerError::Bind {
            target: target.clone(),
            source,
        })?;

    info!(
        target: "gsi::server",
        bind = %target,
        path = %address.path,
        "gsi listener ready"
    );

    let app = router(&address.path, handler, config.max_body_bytes());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(target: "gsi::server", "Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!(target: "gsi::server", "shutdown requested");
}

async fn ingest(
    State(state): State<IngestState>,
    uri: Uri,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !serves(&state.path, uri.path()) {
        debug!(target: "gsi::server", path = uri.path(), "request.ignored=unknown_path");
        return StatusCode::NOT_FOUND.into_response();
    }

    if method != Method::POST {
        return reject(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("bad request method: {method}"),
        );
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !is_json(content_type) {
        return reject(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("bad content type for request: got '{content_type}', required 'application/json'"),
        );
    }

    let snapshot = match decode_snapshot(&body) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            return reject(
                StatusCode::BAD_REQUEST,
                format!("unable to decode request body: {err}"),
            );
        }
    };

    debug!(
        target: "gsi::server",
        bytes = body.len(),
        in_match = snapshot.is_in_match(),
        "update.decoded"
    );

    let handler = Arc::clone(&state.handler);
    let message = match tokio::task::spawn_blocking(move || handler.handle(snapshot)).await {
        Ok(Ok(())) => return StatusCode::OK.into_response(),
        Ok(Err(err)) => format!("responding to game update: {err:#}"),
        Err(err) => format!("game update handler did not finish: {err}"),
    };
    error!(target: "gsi::server", "{}", message);
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

fn serves(path: &str, requested: &str) -> bool {
    if path.ends_with('/') {
        requested.starts_with(path)
    } else {
        requested == path
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn reject(status: StatusCode, message: String) -> Response {
    warn!(target: "gsi::server", status = status.as_u16(), "{}", message);
    (status, message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_accepts_parameters() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
        assert!(!is_json("text/plain"));
        assert!(!is_json(""));
        assert!(!is_json("application/jsonp"));
    }

    #[test]
    fn paths_match_literally() {
        assert!(serves("/", "/"));
        assert!(serves("/", "/anything/below"));
        assert!(serves("/gsi", "/gsi"));
        assert!(!serves("/gsi", "/gsi/extra"));
        assert!(!serves("/gsi", "/"));
        assert!(serves("/gsi/", "/gsi/match"));
        assert!(serves("/gsi/:player", "/gsi/:player"));
        assert!(!serves("/gsi/:player", "/gsi/someone"));
        assert!(serves("/gsi/{", "/gsi/{"));
    }

    #[test]
    fn closures_are_handlers() {
        let handler = |snapshot: Snapshot| -> anyhow::Result<()> {
            anyhow::ensure!(snapshot.hero.is_some(), "no hero");
            Ok(())
        };
        assert!(handler.handle(Snapshot::default()).is_err());
    }
}
