//! Request and response bodies

use serde::{Deserialize, Serialize};

/// Request payload for shortening a URL
///
/// # Example
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct ShortenRequest {
    /// The URL to shorten; stored as-is
    pub url: String,
}

/// Response returned after a URL is shortened
///
/// # Example
/// ```json
/// {
///   "short_url": "http://localhost:3000/2cf24dba",
///   "original_url": "https://example.com/very/long/url"
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
