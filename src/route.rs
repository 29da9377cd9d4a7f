//! Route definitions for the URL shortener API

use axum::routing::{get, post};
use axum::Router;

use crate::database::AppState;
use crate::handler::{delete_url, redirect_url, shorten_url};

/// Creates the application router
///
/// # Route Definitions
///
/// - `POST /shorten` - Shortens a URL
/// - `GET /{code}` - Redirects to the original URL
/// - `DELETE /{code}` - Deletes a short code
///
/// # Example Usage
///
/// ```no_run
/// # use shorturls::database::{AppState, MappingStore};
/// # use shorturls::route::create_app;
/// let store = MappingStore::open("shorturls.db").unwrap();
/// let state = AppState { store, base_url: "http://localhost:3000".to_string() };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_url))
        .route("/{code}", get(redirect_url).delete(delete_url))
        .with_state(state)
}
