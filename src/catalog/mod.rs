pub mod client;
#[cfg(test)]
pub mod fake;
pub mod genres;
pub mod images;
pub mod types;

use async_trait::async_trait;

pub use client::TmdbClient;
pub use genres::{find_genre, genre_name, genre_names, GenreRef, GENRES};
pub use images::{BackdropSize, ImageUrls, PosterSize, ProfileSize};
pub use types::*;

/// Read-only access to the remote movie catalog. One call is one GET;
/// nothing is cached or retried.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn trending(&self) -> CatalogResult<Vec<Movie>>;
    async fn popular(&self) -> CatalogResult<Vec<Movie>>;
    async fn top_rated(&self) -> CatalogResult<Vec<Movie>>;
    async fn upcoming(&self) -> CatalogResult<Vec<Movie>>;
    async fn by_genre(&self, genre_id: u64) -> CatalogResult<Vec<Movie>>;
    async fn details(&self, movie_id: u64) -> CatalogResult<MovieDetails>;
    async fn reviews(&self, movie_id: u64) -> CatalogResult<Vec<Review>>;
    async fn search(&self, query: &str) -> CatalogResult<Vec<Movie>>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to fetch data: {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    Decode(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
