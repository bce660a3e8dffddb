use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use super::forms::ReviewForm;
use super::types::{MovieDetailsPage, ReviewView, WatchlistStatus};
use super::{parse_movie_id, require_user, PageError};
use crate::catalog::{AuthorDetails, Review};
use crate::server::AppState;

pub async fn movie_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MovieDetailsPage>, PageError> {
    let movie_id = parse_movie_id(&id)?;
    let catalog = state.catalog.as_ref();

    let (details, reviews) = tokio::try_join!(catalog.details(movie_id), catalog.reviews(movie_id))
        .map_err(|e| PageError::fetch("Failed to fetch movie details. Please try again later.", e))?;

    let in_watchlist = state.watchlist.is_in_watchlist(movie_id).await;
    let is_authenticated = state.session.is_authenticated().await;

    Ok(Json(MovieDetailsPage::new(
        &details,
        &reviews,
        &state.images,
        in_watchlist,
        is_authenticated,
    )))
}

/// Adds the movie when it is not listed, removes it otherwise.
pub async fn toggle_watchlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WatchlistStatus>, PageError> {
    let movie_id = parse_movie_id(&id)?;
    require_user(&state, "Please sign in to manage your watchlist").await?;

    if state.watchlist.is_in_watchlist(movie_id).await {
        state
            .watchlist
            .remove_from_watchlist(movie_id)
            .await
            .map_err(PageError::watchlist)?;
        return Ok(Json(WatchlistStatus {
            movie_id,
            in_watchlist: false,
            watched: None,
        }));
    }

    let details = state
        .catalog
        .details(movie_id)
        .await
        .map_err(|e| PageError::fetch("Failed to fetch movie details. Please try again later.", e))?;
    state
        .watchlist
        .add_to_watchlist(&details.movie)
        .await
        .map_err(PageError::watchlist)?;

    Ok(Json(WatchlistStatus {
        movie_id,
        in_watchlist: true,
        watched: Some(false),
    }))
}

/// Accepts a review for display only; it is never stored or sent on.
pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReviewForm>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewView>), PageError> {
    let movie_id = parse_movie_id(&id)?;
    let Json(form) = payload?;
    let user = require_user(&state, "Please sign in to write a review").await?;
    form.validate()?;

    let now = Utc::now();
    let review = Review {
        id: format!("temp-{}", now.timestamp_millis()),
        author: "You".to_string(),
        content: form.content.trim().to_string(),
        created_at: now.to_rfc3339(),
        author_details: AuthorDetails {
            rating: Some(f64::from(form.rating) * 2.0),
            avatar_path: None,
            username: user.username,
        },
    };
    info!("Review for movie {} accepted ({} stars)", movie_id, form.rating);

    Ok((StatusCode::CREATED, Json(ReviewView::new(&review, &state.images))))
}
