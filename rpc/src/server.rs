//! Axum-based RPC server.

use crate::error::RpcError;
use crate::handlers;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use campaign_enrollment::EnrollmentWorkflow;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// Shared handler state.
pub struct RpcState {
    pub workflow: Arc<EnrollmentWorkflow>,
}

/// CORS policy restricted to `origins`, without credentials.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, RpcError> {
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o).map_err(|_| RpcError::InvalidOrigin(o.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(false))
}

pub fn router(state: Arc<RpcState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/get-subscription", get(handlers::get_subscription))
        .route("/task", get(handlers::issue_task))
        .route("/verifytask", post(handlers::verify_task))
        .layer(cors)
        .with_state(state)
}

pub struct RpcServer {
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl RpcServer {
    pub fn new(port: u16, cors_origins: Vec<String>) -> Self {
        Self { port, cors_origins }
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn start<F>(
        &self,
        workflow: Arc<EnrollmentWorkflow>,
        shutdown: F,
    ) -> Result<(), RpcError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(Arc::new(RpcState { workflow }), cors_layer(&self.cors_origins)?);
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| RpcError::Server(format!("failed to bind {addr}: {e}")))?;
        info!(%addr, "RPC server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("RPC server stopped");
        Ok(())
    }
}
