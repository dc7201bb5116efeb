//! HTTP surface: `GET /render-skin`.
//!
//! 200 with `image/png` on success, 400 with a plain-text reason when the
//! query is rejected, 500 with the engine's message when rendering fails.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use log::{debug, error, warn};

use crate::validate::{validate, RawQuery};
use crate::RenderGateway;

/// Shared per-process state; the gateway is the only thing in it.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<dyn RenderGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn RenderGateway>) -> Self {
        Self { gateway }
    }
}

impl From<Box<dyn RenderGateway>> for AppState {
    fn from(gateway: Box<dyn RenderGateway>) -> Self {
        Self::new(Arc::from(gateway))
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/render-skin", get(render_skin))
        .with_state(state)
}

pub async fn render_skin(State(state): State<AppState>, Query(query): Query<RawQuery>) -> Response {
    let options = match validate(&query) {
        Ok(options) => options,
        Err(failure) => {
            warn!("rejected render request: field={} {}", failure.field, failure.message);
            return (StatusCode::BAD_REQUEST, failure.to_string()).into_response();
        }
    };

    debug!("rendering via {}: {:?}", state.gateway.name(), options);
    match state.gateway.render(options).await {
        Ok(png) => {
            debug!("rendered {} bytes", png.len());
            ([(header::CONTENT_TYPE, "image/png")], png).into_response()
        }
        Err(e) => {
            error!("render failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render skin: {}", e),
            )
                .into_response()
        }
    }
}
