use serde::Serialize;
use tracing::debug;

use super::filter::filter_by_year;
use super::sort::{sort_movies, SortKey, DEFAULT_SORT};
use crate::catalog::{Catalog, CatalogResult, Movie, GENRES};

/// Oldest year offered by the release year filter.
pub const FIRST_FILTER_YEAR: i32 = 1970;

#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: String,
    pub genre: Option<u64>,
    pub year: String,
    /// `None` leaves the catalog's order untouched.
    pub sort: Option<SortKey>,
}

impl SearchRequest {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            sort: DEFAULT_SORT.parse().ok(),
            ..Default::default()
        }
    }

    /// Free text wins over the genre selector.
    pub fn source(&self) -> SearchSource {
        let query = self.query.trim();
        if !query.is_empty() {
            SearchSource::Query(query.to_string())
        } else if let Some(genre) = self.genre {
            SearchSource::Genre(genre)
        } else {
            SearchSource::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSource {
    Query(String),
    Genre(u64),
    None,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub source: SearchSource,
    pub movies: Vec<Movie>,
}

/// Fetches candidates for the request's source, then narrows them by
/// release year and orders them by the sort key.
pub async fn run_search(catalog: &dyn Catalog, request: &SearchRequest) -> CatalogResult<SearchOutcome> {
    let source = request.source();

    let movies = match &source {
        SearchSource::Query(query) => catalog.search(query).await?,
        SearchSource::Genre(genre) => catalog.by_genre(*genre).await?,
        SearchSource::None => {
            return Ok(SearchOutcome {
                source,
                movies: Vec::new(),
            })
        }
    };
    debug!(source = ?source, candidates = movies.len(), "search fetched");

    let movies = filter_by_year(movies, &request.year);
    let movies = match request.sort {
        Some(key) => sort_movies(movies, key),
        None => movies,
    };

    Ok(SearchOutcome { source, movies })
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub genres: Vec<FilterOption>,
    pub sort_by: Vec<FilterOption>,
    pub years: Vec<FilterOption>,
}

fn option(value: &str, label: &str) -> FilterOption {
    FilterOption {
        value: value.to_string(),
        label: label.to_string(),
    }
}

/// Choices offered by the search filters. The empty value means "any".
pub fn filter_options(current_year: i32) -> FilterOptions {
    let mut genres = vec![option("", "All Genres")];
    genres.extend(GENRES.iter().map(|g| option(&g.id.to_string(), g.name)));

    let sort_by = vec![
        option("popularity.desc", "Popularity (Descending)"),
        option("popularity.asc", "Popularity (Ascending)"),
        option("vote_average.desc", "Rating (Descending)"),
        option("vote_average.asc", "Rating (Ascending)"),
        option("release_date.desc", "Release Date (Descending)"),
        option("release_date.asc", "Release Date (Ascending)"),
        option("title.asc", "Title (A-Z)"),
        option("title.desc", "Title (Z-A)"),
    ];

    let mut years = vec![option("", "All Years")];
    years.extend((FIRST_FILTER_YEAR..=current_year).rev().map(|y| {
        let y = y.to_string();
        option(&y, &y)
    }));

    FilterOptions {
        genres,
        sort_by,
        years,
    }
}
