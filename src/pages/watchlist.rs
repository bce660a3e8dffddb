use axum::{
    extract::{Path, Query, State},
    Json,
};
use futures::future::try_join_all;

use super::types::{MovieCard, WatchlistEntry, WatchlistPage, WatchlistStatus};
use super::{parse_movie_id, require_user, PageError};
use crate::server::AppState;
use crate::util::QueryParams;
use crate::watchlist::WatchedFilter;

const SIGN_IN_MESSAGE: &str = "Please sign in to view your watchlist";

pub async fn watchlist_page(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<WatchlistPage>, PageError> {
    require_user(&state, SIGN_IN_MESSAGE).await?;

    let filter_name = params.get("filter").unwrap_or("all");
    let filter = WatchedFilter::parse(filter_name).ok_or(PageError::BadRequest("Invalid filter"))?;

    let items = state.watchlist.items().await;
    let catalog = state.catalog.as_ref();

    // One failed lookup fails the page; nothing is shown half-loaded.
    let details = try_join_all(items.iter().map(|item| catalog.details(item.movie_id)))
        .await
        .map_err(|e| PageError::fetch("Failed to load watchlist. Please try again later.", e))?;

    let count = items.len();
    let entries: Vec<WatchlistEntry> = items
        .into_iter()
        .zip(details)
        .filter(|(item, _)| filter.matches(item))
        .map(|(item, details)| WatchlistEntry {
            movie: MovieCard::new(&details.movie, &state.images),
            item,
        })
        .collect();

    let message = if count == 0 {
        Some("Your watchlist is empty".to_string())
    } else if entries.is_empty() {
        Some("No movies match the selected filter".to_string())
    } else {
        None
    };

    Ok(Json(WatchlistPage {
        count,
        filter: filter_name.to_string(),
        entries,
        message,
    }))
}

pub async fn toggle_watched(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<WatchlistStatus>, PageError> {
    let movie_id = parse_movie_id(&movie_id)?;
    require_user(&state, SIGN_IN_MESSAGE).await?;

    let watched = state
        .watchlist
        .toggle_watched(movie_id)
        .await
        .map_err(PageError::watchlist)?
        .ok_or(PageError::NotFound("Movie is not in your watchlist"))?;

    Ok(Json(WatchlistStatus {
        movie_id,
        in_watchlist: true,
        watched: Some(watched),
    }))
}

pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<WatchlistStatus>, PageError> {
    let movie_id = parse_movie_id(&movie_id)?;
    require_user(&state, SIGN_IN_MESSAGE).await?;

    if !state
        .watchlist
        .remove_from_watchlist(movie_id)
        .await
        .map_err(PageError::watchlist)?
    {
        return Err(PageError::NotFound("Movie is not in your watchlist"));
    }

    Ok(Json(WatchlistStatus {
        movie_id,
        in_watchlist: false,
        watched: None,
    }))
}

#[cfg(test)]
mod tests {
    use crate::catalog::fake::{movie, FakeCatalog};
    use crate::server::test_support::{send, sign_in, test_state};
    use axum::http::{Method, StatusCode};

    fn catalog() -> FakeCatalog {
        FakeCatalog::new()
            .with_movie(movie(1, "Heat", "1995-12-15", 7.9, 7000))
            .with_movie(movie(2, "Collateral", "2004-08-04", 7.3, 6000))
            .with_movie(movie(3, "Thief", "1981-03-27", 7.2, 600))
    }

    async fn add(state: &crate::server::AppState, ids: &[u64]) {
        for id in ids {
            let (status, _) = send(state, Method::POST, &format!("/movie/{}/watchlist", id), None).await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    fn ids(body: &serde_json::Value) -> Vec<u64> {
        body["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["item"]["movieId"].as_u64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_requires_sign_in() {
        let state = test_state(catalog()).await;
        let (status, body) = send(&state, Method::GET, "/watchlist", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Please sign in to view your watchlist");
    }

    #[tokio::test]
    async fn test_watchlist_in_insertion_order() {
        let state = test_state(catalog()).await;
        sign_in(&state).await;

        let (_, body) = send(&state, Method::GET, "/watchlist", None).await;
        assert_eq!(body["count"], 0);
        assert_eq!(body["message"], "Your watchlist is empty");

        add(&state, &[3, 1, 2]).await;
        let (status, body) = send(&state, Method::GET, "/watchlist", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(ids(&body), vec![3, 1, 2]);
        assert_eq!(body["entries"][1]["movie"]["title"], "Heat");
    }

    #[tokio::test]
    async fn test_watched_filter() {
        let state = test_state(catalog()).await;
        sign_in(&state).await;
        add(&state, &[1, 2, 3]).await;

        let (status, body) = send(&state, Method::POST, "/watchlist/2/watched", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["watched"], true);

        let (_, body) = send(&state, Method::GET, "/watchlist?filter=watched", None).await;
        assert_eq!(ids(&body), vec![2]);
        assert_eq!(body["count"], 3);

        let (_, body) = send(&state, Method::GET, "/watchlist?filter=to-watch", None).await;
        assert_eq!(ids(&body), vec![1, 3]);

        let (status, _) = send(&state, Method::GET, "/watchlist?filter=later", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&state, Method::POST, "/watchlist/2/watched", None).await;
        assert_eq!(body["watched"], false);
        let (_, body) = send(&state, Method::GET, "/watchlist?filter=watched", None).await;
        assert_eq!(body["message"], "No movies match the selected filter");

        for id in [1, 2, 3] {
            send(&state, Method::POST, &format!("/watchlist/{}/watched", id), None).await;
        }
        let (_, body) = send(&state, Method::GET, "/watchlist?filter=to-watch", None).await;
        assert_eq!(body["message"], "No movies match the selected filter");
    }

    #[tokio::test]
    async fn test_remove() {
        let state = test_state(catalog()).await;
        sign_in(&state).await;
        add(&state, &[1, 2]).await;

        let (status, body) = send(&state, Method::DELETE, "/watchlist/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["in_watchlist"], false);

        let (status, _) = send(&state, Method::DELETE, "/watchlist/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&state, Method::GET, "/watchlist", None).await;
        assert_eq!(ids(&body), vec![2]);
    }

    #[tokio::test]
    async fn test_one_failed_lookup_fails_the_page() {
        let mut catalog = catalog();
        catalog.failing.insert(2);
        let state = test_state(catalog).await;
        sign_in(&state).await;
        add(&state, &[1, 3]).await;
        state
            .watchlist
            .add_to_watchlist(&movie(2, "Collateral", "2004-08-04", 7.3, 6000))
            .await
            .unwrap();

        let (status, body) = send(&state, Method::GET, "/watchlist", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to load watchlist. Please try again later.");
        assert!(body.get("entries").is_none());
    }
}
