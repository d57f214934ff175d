//! Axum server for DocSign

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rustdoc::bare_urls)]

use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Response;
use axum::routing::{get, post};
use axum::Router;
use docsign_common::signature::DEFAULT_SUCCESS_MESSAGE;
use docsign_common::Error;
use router_handlers::*;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod router_handlers;

pub use router_handlers::into_response;

/// Signing service configuration
///
/// Passed in at startup; the router never reads globals or the environment.
#[derive(Clone)]
pub struct SigningConfig {
    /// Shared secret every signature must present
    pub pin: String,
    /// PDF served from `/api/pdf`
    pub document_path: PathBuf,
    /// Message returned for an accepted signature
    pub success_message: String,
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("pin", &"<redacted>")
            .field("document_path", &self.document_path)
            .field("success_message", &self.success_message)
            .finish()
    }
}

impl SigningConfig {
    /// Create new [`SigningConfig`] with the default success message
    pub fn new<P, D>(pin: P, document_path: D) -> Self
    where
        P: Into<String>,
        D: Into<PathBuf>,
    {
        Self {
            pin: pin.into(),
            document_path: document_path.into(),
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Set success message
    pub fn with_success_message<S>(mut self, message: S) -> Self
    where
        S: Into<String>,
    {
        self.success_message = message.into();
        self
    }
}

/// DocSign State
#[derive(Debug, Clone)]
pub struct SigningState {
    config: Arc<SigningConfig>,
}

/// Create signing [`Router`] with the `/api` endpoints and service layers
pub fn create_signing_router(config: SigningConfig) -> Router {
    with_service_layers(signing_routes(config))
}

/// `/api` routes without middleware
pub fn signing_routes(config: SigningConfig) -> Router {
    let state = SigningState {
        config: Arc::new(config),
    };

    let api_router = Router::new()
        .route("/pdf", get(get_pdf))
        .route("/sign", post(post_sign))
        .route("/status", get(get_status));

    Router::new()
        .nest("/api", api_router)
        .fallback(fallback)
        .with_state(state)
}

/// Wrap a router with panic recovery, CORS and request tracing
pub fn with_service_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!("Handler panicked: {message}");

    into_response(Error::Internal)
}
