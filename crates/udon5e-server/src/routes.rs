//! Router construction and request handlers.

use axum::extract::{Query, State};
use axum::http::{header, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use udon5e::scrape::{SheetFetcher, SheetUrl};
use udon5e::ConvertOptions;

use crate::AppError;

/// Path of the conversion endpoint.
pub const CONVERT_PATH: &str = "/create-5e-udonarium-pc";

/// Shared state for handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: SheetFetcher,
}

impl AppState {
    pub fn new(fetcher: SheetFetcher) -> Self {
        Self { fetcher }
    }
}

/// Query parameters of the conversion endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertParams {
    pub url: Option<String>,
    /// `"true"` writes sheet numbers into the chat palette.
    pub simple_palette: Option<String>,
    pub rollcommand: Option<String>,
}

impl ConvertParams {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            use_computed_values: self.simple_palette.as_deref() == Some("true"),
            roll_command: self.rollcommand.clone().unwrap_or_default(),
        }
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Browsers download the archive cross-origin and read its name from the header.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET])
        .expose_headers([header::CONTENT_DISPOSITION]);

    Router::new()
        .route(CONVERT_PATH, get(create_udonarium_pc).layer(cors))
        .route("/hello", get(hello))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello."
}

/// GET /create-5e-udonarium-pc: fetch a sheet and answer with its zip.
async fn create_udonarium_pc(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
) -> Result<Response, AppError> {
    let raw_url = params
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or(AppError::MissingUrl)?;
    let url = SheetUrl::parse(raw_url).map_err(|_| AppError::InvalidUrl(raw_url.to_string()))?;

    let page = state
        .fetcher
        .fetch(&url)
        .await
        .map_err(udon5e::Error::from)?;

    // Parsed documents are not Send; convert off the async workers.
    let options = params.options();
    let conversion = tokio::task::spawn_blocking(move || udon5e::convert(&page, &options))
        .await
        .map_err(|e| AppError::Task(e.to_string()))??;

    tracing::info!(
        id = url.id(),
        name = %conversion.record.name,
        bytes = conversion.archive.len(),
        "serving character archive"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, conversion.content_disposition),
        ],
        conversion.archive,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_options() {
        let params = ConvertParams {
            simple_palette: Some("true".to_string()),
            rollcommand: Some("default".to_string()),
            ..ConvertParams::default()
        };
        let options = params.options();
        assert!(options.use_computed_values);
        assert_eq!(options.roll_command, "default");

        let params = ConvertParams {
            simple_palette: Some("1".to_string()),
            ..ConvertParams::default()
        };
        let options = params.options();
        assert!(!options.use_computed_values);
        assert_eq!(options.roll_command, "");
    }
}
