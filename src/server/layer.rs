//! Tower layer that validates requests before the wrapped route runs
//!
//! On success the layer attaches [`ParsedData`](crate::core::validate::ParsedData)
//! to the request's extensions
//! and forwards the request with its body bytes restored, so handlers keep
//! raw access alongside the validated view. On rejection it responds 400
//! immediately and the inner service is never called.

use axum::body::{Body, to_bytes};
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use serde_json::Value;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::core::error::PreflightError;
use crate::core::query::query_to_value;
use crate::core::validate::{RouteSchemas, validate_sources};

/// Cap on buffered request bodies, matching axum's default extractor limit.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Wraps a route with schema validation.
///
/// ```rust,ignore
/// let app = Router::new().route(
///     "/items",
///     post(create_item).layer(ValidateLayer::new(
///         RouteSchemas::new().body(item_schema()),
///     )),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ValidateLayer {
    schemas: RouteSchemas,
}

impl ValidateLayer {
    pub fn new(schemas: RouteSchemas) -> Self {
        Self { schemas }
    }
}

impl<S> Layer<S> for ValidateLayer {
    type Service = ValidateService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidateService {
            inner,
            schemas: self.schemas.clone(),
        }
    }
}

/// Middleware service produced by [`ValidateLayer`]
#[derive(Clone, Debug)]
pub struct ValidateService<S> {
    inner: S,
    schemas: RouteSchemas,
}

impl<S> Service<Request<Body>> for ValidateService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let schemas = self.schemas.clone();
        // Take the service that was polled ready and leave the clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let (mut parts, body) = req.into_parts();

            let query_input = schemas
                .has_query()
                .then(|| query_to_value(parts.uri.query().unwrap_or("")));

            // Body bytes are buffered only when a body schema asks for them,
            // and restored on the forwarded request either way.
            let (body_input, body) = if schemas.has_body() {
                let bytes = match to_bytes(body, BODY_LIMIT).await {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        let err = PreflightError::Internal(anyhow::Error::new(err));
                        return Ok(err.into_response());
                    }
                };
                let value = if bytes.is_empty() {
                    Value::Null
                } else {
                    match serde_json::from_slice(&bytes) {
                        Ok(value) => value,
                        Err(err) => {
                            // Unparseable bodies are not validation failures.
                            let err = PreflightError::Internal(err.into());
                            return Ok(err.into_response());
                        }
                    }
                };
                (Some(value), Body::from(bytes))
            } else {
                (None, body)
            };

            match validate_sources(&schemas, query_input, body_input) {
                Ok(parsed) => {
                    parts.extensions.insert(parsed);
                    inner.call(Request::from_parts(parts, body)).await
                }
                Err(err) => {
                    tracing::debug!(
                        path = %parts.uri.path(),
                        code = err.error_code(),
                        "request rejected before handler"
                    );
                    Ok(err.into_response())
                }
            }
        })
    }
}
