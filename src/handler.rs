//! HTTP request handlers for the URL shortener API
//!
//! Each handler runs exactly one store transaction. redb calls block, so
//! they are moved onto tokio's blocking pool instead of running on the
//! async workers.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::database::AppState;
use crate::error::AppError;
use crate::model::{MessageResponse, ShortenRequest, ShortenResponse};
use crate::shortcode::ShortCode;

/// JSON body extractor whose rejection is an [`AppError::Input`].
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// Shortens a URL
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **201 Created** - `{"short_url": ..., "original_url": ...}`
/// - **4xx** - Body missing or not valid JSON
///
/// Shortening the same URL twice returns the same short URL; the second
/// write stores an identical value.
pub async fn shorten_url(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ShortenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let code = ShortCode::derive(&payload.url);

    let store = state.store.clone();
    let (txn_code, txn_url) = (code.clone(), payload.url.clone());
    tokio::task::spawn_blocking(move || store.create(&txn_code, &txn_url)).await??;

    tracing::info!(%code, url = %payload.url, "short URL created");

    let response = ShortenResponse {
        short_url: code.to_url(&state.base_url),
        original_url: payload.url,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Redirects a short code to its original URL
///
/// # Response
///
/// - **301 Moved Permanently** - `Location` set to the stored URL
/// - **404 Not Found** - Code unknown
/// - **500 Internal Server Error** - Stored URL can't be sent as a `Location` header
pub async fn redirect_url(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let code = ShortCode::from_raw(code);

    let store = state.store.clone();
    let url = tokio::task::spawn_blocking(move || store.resolve(&code)).await??;
    let location = HeaderValue::from_bytes(url.as_bytes())
        .map_err(|_| AppError::InvalidRedirectTarget(url))?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}

/// Deletes a short code
///
/// # Response
///
/// - **200 OK** - `{"message": "URL deleted successfully"}`
/// - **404 Not Found** - Nothing has been shortened yet
///
/// Deleting a code that is not stored is not an error.
pub async fn delete_url(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let code = ShortCode::from_raw(code);

    let store = state.store.clone();
    let txn_code = code.clone();
    tokio::task::spawn_blocking(move || store.delete(&txn_code)).await??;

    tracing::info!(%code, "short URL deleted");

    Ok(Json(MessageResponse {
        message: "URL deleted successfully".to_string(),
    }))
}
