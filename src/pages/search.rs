use axum::{
    extract::{Query, State},
    response::Redirect,
    Form, Json,
};
use chrono::{Datelike, Utc};

use super::forms::SearchForm;
use super::types::{MovieCard, SearchPage};
use super::PageError;
use crate::browse::search::{filter_options, FilterOptions};
use crate::browse::{run_search, SearchRequest, SearchSource, DEFAULT_SORT};
use crate::catalog::genre_name;
use crate::server::AppState;
use crate::util::QueryParams;

pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<SearchPage>, PageError> {
    let genre = match params.get("genre") {
        Some(raw) => Some(
            raw.parse::<u64>()
                .map_err(|_| PageError::BadRequest("Invalid genre"))?,
        ),
        None => None,
    };
    let sort_by = params.get("sort_by").unwrap_or(DEFAULT_SORT).to_string();

    let request = SearchRequest {
        query: params.get("query").unwrap_or_default().to_string(),
        genre,
        year: params.get("year").unwrap_or_default().to_string(),
        sort: sort_by.parse().ok(),
    };

    let outcome = run_search(state.catalog.as_ref(), &request)
        .await
        .map_err(|e| PageError::fetch("Failed to search movies. Please try again later.", e))?;

    let heading = match outcome.source {
        SearchSource::Query(ref query) => Some(format!("Search results for \"{}\"", query)),
        SearchSource::Genre(id) => Some(format!("{} Movies", genre_name(id).unwrap_or("Genre"))),
        SearchSource::None => None,
    };

    let (message, hint) = match (&outcome.source, outcome.movies.is_empty()) {
        (SearchSource::None, _) => (
            Some("Search for movies".to_string()),
            Some("Enter a search term or select a genre to find movies".to_string()),
        ),
        (_, true) => (
            Some("No movies found".to_string()),
            Some("Try adjusting your search or filters".to_string()),
        ),
        _ => (None, None),
    };

    Ok(Json(SearchPage {
        query: request.query.clone(),
        genre,
        sort_by,
        year: request.year.clone(),
        heading,
        movies: MovieCard::list(&outcome.movies, &state.images),
        message,
        hint,
    }))
}

/// Turns the search box submission into a shareable results URL.
pub async fn submit_search(Form(form): Form<SearchForm>) -> Redirect {
    let query = form.query.trim();
    if query.is_empty() {
        Redirect::to("/search")
    } else {
        Redirect::to(&format!("/search?query={}", urlencoding::encode(query)))
    }
}

pub async fn search_filters() -> Json<FilterOptions> {
    Json(filter_options(Utc::now().year()))
}
