use axum::{
    extract::{Query, State},
    Json,
};

use super::types::{GenresPage, MovieCard};
use super::PageError;
use crate::catalog::{find_genre, GENRES};
use crate::server::AppState;
use crate::util::QueryParams;

/// Movies shown under a selected genre.
const GENRE_PREVIEW: usize = 6;

pub async fn genres_page(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<GenresPage>, PageError> {
    let selected = match params.get("genre") {
        Some(raw) => {
            let id = raw
                .parse::<u64>()
                .map_err(|_| PageError::BadRequest("Invalid genre"))?;
            Some(find_genre(id).ok_or(PageError::NotFound("Genre not found"))?)
        }
        None => None,
    };

    let movies = match selected {
        Some(genre) => {
            let mut movies = state
                .catalog
                .by_genre(genre.id)
                .await
                .map_err(|e| PageError::fetch("Failed to fetch movies. Please try again later.", e))?;
            movies.truncate(GENRE_PREVIEW);
            MovieCard::list(&movies, &state.images)
        }
        None => Vec::new(),
    };

    Ok(Json(GenresPage {
        genres: GENRES.to_vec(),
        selected,
        movies,
    }))
}
