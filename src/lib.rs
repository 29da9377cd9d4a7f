//! URL shortener backed by an embedded redb database
//!
//! Short codes are derived from the SHA-256 digest of the URL, so the same
//! URL always shortens to the same code.

pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod shortcode;
