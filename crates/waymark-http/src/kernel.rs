//! HTTP kernel
//!
//! Turns dispatch outcomes into HTTP responses. A resource becomes a `200`,
//! the two "not found" kinds become `404`, invalid input becomes `400` and
//! anything else keeps the status of the underlying error. Failures without a
//! message get the canonical reason phrase as their body.

use crate::errors::{HttpError, HttpResult};
use crate::logging::structured::log_dispatch;
use crate::request::DispatchRequest;
use crate::routing::Dispatcher;
use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Transport-level outcome of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelResponse {
    pub status: StatusCode,
    pub body: String,
    pub content_type: &'static str,
    pub request_id: String,
}

impl IntoResponse for KernelResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        if let Ok(value) = HeaderValue::from_str(&self.request_id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}

#[derive(Clone)]
pub struct Kernel {
    dispatcher: Arc<Dispatcher>,
}

impl Kernel {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatch one request and build its response
    pub async fn handle(&self, request: DispatchRequest) -> KernelResponse {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "dispatch",
            request_id = %request_id,
            method = %request.method(),
            path = %request.path()
        );

        async move {
            let started = Instant::now();
            let (status, body, content_type) = match self.dispatcher.route(&request).await {
                Ok(resource) => {
                    let content_type = resource.content_type();
                    (StatusCode::OK, resource.into_body_string(), content_type)
                }
                Err(error) => {
                    let status = error.status_code();
                    let body = error.message().unwrap_or_else(|| {
                        status.canonical_reason().unwrap_or_default().to_string()
                    });
                    tracing::debug!(
                        target: "waymark::kernel",
                        "Dispatch failed with {}: {}",
                        error.error_code(),
                        body
                    );
                    (status, body, "text/plain; charset=utf-8")
                }
            };

            log_dispatch(
                &request_id,
                request.method().as_str(),
                request.path(),
                status.as_u16(),
                started.elapsed().as_millis(),
            );

            KernelResponse {
                status,
                body,
                content_type,
                request_id,
            }
        }
        .instrument(span)
        .await
    }

    /// Router that sends every request through the dispatcher
    pub fn into_router(self) -> Router {
        Router::new().fallback(move |request: Request<Body>| {
            let kernel = self.clone();
            async move {
                kernel
                    .handle(DispatchRequest::from_http(&request))
                    .await
                    .into_response()
            }
        })
    }

    /// Serve on `addr` until Ctrl+C
    pub async fn serve(self, addr: SocketAddr) -> HttpResult<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| HttpError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::info!(target: "waymark::kernel", "Listening on {}", addr);

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(target: "waymark::kernel", "Failed to listen for Ctrl+C: {}", e);
                }
            })
            .await
            .map_err(|e| HttpError::internal(format!("Server error: {}", e)))
    }
}
