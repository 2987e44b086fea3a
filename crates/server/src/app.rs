//! Router, handlers and CORS

use crate::error::ApiError;
use crate::response::{GenerateResponse, StatusResponse};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::{middleware, Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use convenio::{AssetStore, ConvenioRenderer};
use std::sync::Arc;
use tracing::info;

/// The single route served
pub const ENDPOINT: &str = "/api/generar-convenio-pdf";

/// Version reported by `GET`
pub const TEMPLATE_VERSION: &str = "Plantilla 2026 FINAL";

pub const ALLOW_METHODS: &str = "GET,OPTIONS,POST,PUT";
pub const ALLOW_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Content-Type";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    renderer: Arc<ConvenioRenderer>,
}

impl AppState {
    pub fn new(renderer: ConvenioRenderer) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }

    /// State whose renderer reads images from `assets`
    pub fn with_assets(assets: AssetStore) -> Self {
        Self::new(ConvenioRenderer::new(assets))
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            ENDPOINT,
            get(status).post(generate).options(preflight),
        )
        .layer(middleware::map_response(cors_headers))
        .with_state(state)
}

/// Attach the CORS headers to every response
async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "active".to_string(),
        version: TEMPLATE_VERSION.to_string(),
        endpoint: ENDPOINT.to_string(),
    })
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Render an agreement from the request body
///
/// The body is read as raw bytes so that malformed JSON produces the same
/// error envelope as a validation failure.
async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = convenio::parse_request_slice(&body)?;

    let renderer = Arc::clone(&state.renderer);
    let input = request.input.clone();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&input)).await??;

    info!(
        numero = %request.input.agreement_number,
        file_name = %request.file_name(),
        bytes = pdf.len(),
        "agreement generated"
    );

    Ok(Json(GenerateResponse::new(&request, STANDARD.encode(&pdf))))
}
