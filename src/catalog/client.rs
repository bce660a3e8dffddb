use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::*;
use super::{Catalog, CatalogError, CatalogResult};
use crate::config::TmdbConfig;

/// Catalog backed by the TMDB v3 REST API.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> CatalogResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("reelwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> CatalogResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint = endpoint, "catalog request");

        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        query.push(("api_key", self.api_key.as_str()));
        query.extend_from_slice(params);

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> CatalogResult<Vec<T>> {
        let page: Paged<T> = self.fetch(endpoint, params).await?;
        Ok(page.results)
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn trending(&self) -> CatalogResult<Vec<Movie>> {
        self.fetch_list("/trending/movie/week", &[]).await
    }

    async fn popular(&self) -> CatalogResult<Vec<Movie>> {
        self.fetch_list("/movie/popular", &[]).await
    }

    async fn top_rated(&self) -> CatalogResult<Vec<Movie>> {
        self.fetch_list("/movie/top_rated", &[]).await
    }

    async fn upcoming(&self) -> CatalogResult<Vec<Movie>> {
        self.fetch_list("/movie/upcoming", &[]).await
    }

    async fn by_genre(&self, genre_id: u64) -> CatalogResult<Vec<Movie>> {
        let genre = genre_id.to_string();
        self.fetch_list("/discover/movie", &[("with_genres", genre.as_str())])
            .await
    }

    async fn details(&self, movie_id: u64) -> CatalogResult<MovieDetails> {
        self.fetch(
            &format!("/movie/{}", movie_id),
            &[("append_to_response", "videos,credits,similar")],
        )
        .await
    }

    async fn reviews(&self, movie_id: u64) -> CatalogResult<Vec<Review>> {
        self.fetch_list(&format!("/movie/{}/reviews", movie_id), &[])
            .await
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Movie>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_list("/search/movie", &[("query", query)]).await
    }
}
