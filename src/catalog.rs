//! Read-only access to the remote movie catalog (TMDB v3 endpoints).
//!
//! The client forwards parameters and hands back the decoded JSON body
//! untouched. Interpreting payloads is left to [`model`].

pub mod client;
pub mod error;
pub mod model;
pub mod poster;
pub mod request;

pub use client::{CatalogClient, CatalogConfig};
pub use error::CatalogError;
pub use model::{Genre, MovieDetails, MoviePage, MovieSummary};
pub use request::{CatalogRequest, CatalogResponse, MovieId, Page, RequestKind};

/// Locale sent as the `language` parameter when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "es-ES";

/// Public TMDB v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
