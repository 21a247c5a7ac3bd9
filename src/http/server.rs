//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, metrics)
//! - Resolve the lookup query and call the upstream gateway
//! - Serve until the shutdown broadcast fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query as Params, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{ApiError, ServiceDescriptor};
use crate::identity::{IdentityError, IdentityRotator};
use crate::observability::metrics;
use crate::upstream::{Query, UpstreamError, UpstreamGateway, UpstreamResult};

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: UpstreamGateway,
    pub descriptor: Arc<ServiceDescriptor>,
}

/// HTTP server for the lookup proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server that rotates identities uniformly at random.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let identities = IdentityRotator::random(config.upstream.identities.clone())?;
        Self::with_identities(config, identities)
    }

    /// Create a server with a caller-supplied identity rotator.
    pub fn with_identities(
        config: ProxyConfig,
        identities: IdentityRotator,
    ) -> Result<Self, ServerError> {
        let port = config
            .listener
            .bind_address
            .parse::<SocketAddr>()
            .map_err(|_| ServerError::BindAddress(config.listener.bind_address.clone()))?
            .port();

        let gateway = UpstreamGateway::new(&config.upstream, identities)?;
        let state = AppState {
            gateway,
            descriptor: Arc::new(ServiceDescriptor::new(&config.descriptor, port)),
        };

        let router = build_router(state);
        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health/status", get(health_handler))
        .route(
            "/api/{*path}",
            get(lookup_handler).fallback(method_not_allowed),
        )
        .with_state(state)
        .layer(middleware::from_fn(track_request))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(set_request_id_layer())
}

async fn index_handler(State(state): State<AppState>) -> Json<ServiceDescriptor> {
    Json(state.descriptor.as_ref().clone())
}

async fn health_handler() -> &'static str {
    "OK"
}

/// Lookup handler. The path suffix after `/api/` is ignored.
///
/// Parameters are collected as pairs so a repeated key keeps its first value
/// instead of rejecting the request.
async fn lookup_handler(
    State(state): State<AppState>,
    Params(params): Params<Vec<(String, String)>>,
) -> Response {
    let first = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    let Some(query) = Query::from_params(first("address"), first("txid")) else {
        return ApiError::InvalidRequest.into_response();
    };

    match state.gateway.fetch(&query).await {
        UpstreamResult::Present(body) => Json(body).into_response(),
        UpstreamResult::Absent => match query {
            Query::Address(_) => ApiError::AddressNotFound.into_response(),
            Query::Transaction(_) => ApiError::TransactionNotFound.into_response(),
        },
    }
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Log and count every request once it has a response.
async fn track_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let request_id = request_id(&request).to_string();

    let response = next.run(request).await;
    let status = response.status().as_u16();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );
    metrics::record_request(&method, status, start);

    response
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::http::request::X_REQUEST_ID;

    fn router() -> Router {
        HttpServer::new(ProxyConfig::default()).unwrap().router()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: Method, uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn index_returns_descriptor() {
        let response = router().oneshot(request(Method::GET, "/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["name"], "BlockHub");
        assert_eq!(json["run"], "./route.sh");
        assert_eq!(json["port"], "9000");
        assert_eq!(json["stream"], true);
        assert_eq!(json["datasets"], true);
        assert_eq!(json["api"], true);
    }

    #[tokio::test]
    async fn health_status_is_ok() {
        let response = router()
            .oneshot(request(Method::GET, "/health/status"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn missing_parameters_is_bad_request() {
        for uri in ["/api/x", "/api/x?other=1", "/api/x?address=&txid="] {
            let response = router().oneshot(request(Method::GET, uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                body_json(response).await,
                serde_json::json!({"error": "Invalid request"})
            );
        }
    }

    #[tokio::test]
    async fn non_get_is_method_not_allowed() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let response = router()
                .oneshot(request(method.clone(), "/api/x?address=foo"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
            assert_eq!(
                body_json(response).await,
                serde_json::json!({"error": "Method not allowed"})
            );
        }
    }

    #[tokio::test]
    async fn request_id_is_generated_or_propagated() {
        let response = router().oneshot(request(Method::GET, "/")).await.unwrap();
        let generated = response.headers().get(X_REQUEST_ID).unwrap();
        assert_eq!(generated.len(), 36);

        let req = axum::http::Request::builder()
            .uri("/")
            .header(X_REQUEST_ID, "caller-id")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(req).await.unwrap();
        assert_eq!(response.headers().get(X_REQUEST_ID).unwrap(), "caller-id");
    }

    #[test]
    fn rejects_bad_bind_address() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "localhost".into();
        assert!(matches!(
            HttpServer::new(config),
            Err(ServerError::BindAddress(_))
        ));
    }

    #[test]
    fn rejects_empty_identities() {
        let mut config = ProxyConfig::default();
        config.upstream.identities.clear();
        assert!(matches!(
            HttpServer::new(config),
            Err(ServerError::Identity(IdentityError::Empty))
        ));
    }
}
