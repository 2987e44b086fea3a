//! Convenio Server - HTTP endpoint for agreement PDFs
//!
//! One path, dispatched by method:
//! - `GET` reports the template version
//! - `OPTIONS` answers CORS preflight
//! - `POST` renders an agreement and returns it base64-encoded in JSON
//!
//! # Example
//!
//! ```ignore
//! use convenio_server::{router, AppState};
//!
//! let app = router(AppState::with_assets(AssetStore::new("assets")));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

mod app;
mod error;
pub mod response;

pub use app::{router, AppState, ALLOW_HEADERS, ALLOW_METHODS, ENDPOINT, TEMPLATE_VERSION};
pub use error::ApiError;
