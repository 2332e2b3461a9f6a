use crate::collector::collect_body;
use crate::error::{RelayError, Result};
use crate::logging::{LogLevel, SharedLogger};
use crate::translate::request::translate_request_body;
use crate::translate::response::translate_response_body;
use crate::upstream::{UpstreamClient, UpstreamResponse};

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const EMBEDDINGS_PATH: &str = "/v1/embeddings";

/// Headers describing the upstream connection or framing, which no longer hold
/// once the body has been re-buffered and re-encoded.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub logger: SharedLogger,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(EMBEDDINGS_PATH, post(handle_embeddings).fallback(handle_not_found))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_not_found() -> RelayError {
    RelayError::NotFound
}

async fn handle_embeddings(State(state): State<Arc<AppState>>, request: Request) -> Response {
    // The route matches on path alone; the relay only answers the bare path.
    if request.uri().query().is_some() {
        return RelayError::NotFound.into_response();
    }

    let request_id = uuid::Uuid::new_v4().to_string();

    match relay(&state, &request_id, request.into_body()).await {
        Ok((response, in_len, out_len)) => {
            state.logger.request(
                LogLevel::Info,
                &request_id,
                "relayed",
                serde_json::json!({
                    "status": response.status().as_u16(),
                    "request_bytes": in_len,
                    "response_bytes": out_len,
                }),
            );
            response
        }
        Err(err) => {
            let status = err.status();
            tracing::warn!(request_id = %request_id, status = status.as_u16(), error = %err, "relay failed");
            state.logger.request(
                LogLevel::Warn,
                &request_id,
                err.to_string(),
                serde_json::json!({ "status": status.as_u16() }),
            );
            err.into_response()
        }
    }
}

/// Collect → translate → forward → collect → translate. Returns the reply plus
/// inbound and outbound body sizes for the request log.
async fn relay(
    state: &AppState,
    request_id: &str,
    body: Body,
) -> Result<(Response, usize, usize)> {
    let raw = collect_body(body.into_data_stream())
        .await
        .map_err(RelayError::bad_request)?;

    let forward = translate_request_body(&raw).map_err(RelayError::bad_request)?;

    tracing::info!(
        request_id = %request_id,
        url = %state.upstream.url(),
        body_len = forward.len(),
        "forwarding embeddings request"
    );

    let upstream = state.upstream.send(forward).await?;
    let translated = translate_response_body(&upstream.body)?;

    let out_len = translated.len();
    Ok((build_reply(upstream, translated), raw.len(), out_len))
}

/// Mirror the upstream status and headers around the translated body.
fn build_reply(upstream: UpstreamResponse, body: Vec<u8>) -> Response {
    let headers = forwarded_headers(&upstream.headers, body.len());

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = headers;
    response
}

/// Copy upstream headers (keeping repeated values), drop hop-by-hop framing
/// and set `content-length` to the byte length of the new body.
pub fn forwarded_headers(upstream: &HeaderMap, body_len: usize) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(upstream.len() + 1);
    for (name, value) in upstream.iter() {
        if is_hop_by_hop(name) || name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out.insert(header::CONTENT_LENGTH, HeaderValue::from(body_len));
    out
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}
