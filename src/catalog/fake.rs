use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::types::*;
use super::{Catalog, CatalogError, CatalogResult};

/// In-memory catalog for tests. Movies registered with `with_movie`
/// answer detail requests; ids in `failing` answer with a 500.
#[derive(Default)]
pub struct FakeCatalog {
    pub trending: Vec<Movie>,
    pub popular: Vec<Movie>,
    pub top_rated: Vec<Movie>,
    pub upcoming: Vec<Movie>,
    pub by_genre: HashMap<u64, Vec<Movie>>,
    pub search_results: Vec<Movie>,
    pub reviews: HashMap<u64, Vec<Review>>,
    pub movies: HashMap<u64, Movie>,
    pub failing: HashSet<u64>,
    pub fail_lists: bool,
    pub calls: AtomicUsize,
}

pub fn movie(id: u64, title: &str, release_date: &str, vote_average: f64, vote_count: u64) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: format!("Overview of {}", title),
        poster_path: Some(format!("/poster{}.jpg", id)),
        backdrop_path: None,
        release_date: if release_date.is_empty() {
            None
        } else {
            Some(release_date.to_string())
        },
        vote_average,
        vote_count,
        genre_ids: vec![28],
    }
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, movie: Movie) -> Self {
        self.movies.insert(movie.id, movie);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn list(&self, movies: &[Movie]) -> CatalogResult<Vec<Movie>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists {
            return Err(CatalogError::Status(503));
        }
        Ok(movies.to_vec())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn trending(&self) -> CatalogResult<Vec<Movie>> {
        self.list(&self.trending)
    }

    async fn popular(&self) -> CatalogResult<Vec<Movie>> {
        self.list(&self.popular)
    }

    async fn top_rated(&self) -> CatalogResult<Vec<Movie>> {
        self.list(&self.top_rated)
    }

    async fn upcoming(&self) -> CatalogResult<Vec<Movie>> {
        self.list(&self.upcoming)
    }

    async fn by_genre(&self, genre_id: u64) -> CatalogResult<Vec<Movie>> {
        let movies = self.by_genre.get(&genre_id).cloned().unwrap_or_default();
        self.list(&movies)
    }

    async fn details(&self, movie_id: u64) -> CatalogResult<MovieDetails> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&movie_id) {
            return Err(CatalogError::Status(500));
        }
        let movie = self
            .movies
            .get(&movie_id)
            .cloned()
            .ok_or(CatalogError::Status(404))?;
        Ok(MovieDetails {
            movie,
            runtime: 125,
            tagline: "A tagline".to_string(),
            status: "Released".to_string(),
            ..Default::default()
        })
    }

    async fn reviews(&self, movie_id: u64) -> CatalogResult<Vec<Review>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&movie_id) {
            return Err(CatalogError::Status(500));
        }
        Ok(self.reviews.get(&movie_id).cloned().unwrap_or_default())
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Movie>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.list(&self.search_results)
    }
}
