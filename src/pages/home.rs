use axum::{extract::State, Json};
use chrono::{Datelike, Utc};

use super::types::{HomePage, MovieCard, MovieHero};
use super::PageError;
use crate::catalog::Movie;
use crate::server::AppState;

/// How many trending movies take turns as the featured hero.
const FEATURED_POOL: usize = 5;

pub async fn home_page(State(state): State<AppState>) -> Result<Json<HomePage>, PageError> {
    let catalog = state.catalog.as_ref();

    let (trending, popular, top_rated, upcoming) = tokio::try_join!(
        catalog.trending(),
        catalog.popular(),
        catalog.top_rated(),
        catalog.upcoming(),
    )
    .map_err(|e| PageError::fetch("Failed to fetch movies. Please try again later.", e))?;

    let images = state.images.as_ref();
    let featured = pick_featured(&trending, Utc::now().ordinal0() as usize)
        .map(|movie| MovieHero::new(movie, images));

    Ok(Json(HomePage {
        featured,
        trending: MovieCard::list(&trending, images),
        popular: MovieCard::list(&popular, images),
        top_rated: MovieCard::list(&top_rated, images),
        upcoming: MovieCard::list(&upcoming, images),
    }))
}

/// Picks one of the first few trending movies, rotating with `seed`.
pub fn pick_featured(trending: &[Movie], seed: usize) -> Option<&Movie> {
    let pool = trending.len().min(FEATURED_POOL);
    if pool == 0 {
        return None;
    }
    trending.get(seed % pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fake::{movie, FakeCatalog};
    use crate::server::test_support::{send, test_state};
    use axum::http::{Method, StatusCode};

    #[test]
    fn test_pick_featured() {
        let movies: Vec<Movie> = (1..=8).map(|i| movie(i, "M", "", 0.0, 0)).collect();
        assert_eq!(pick_featured(&movies, 0).unwrap().id, 1);
        assert_eq!(pick_featured(&movies, 4).unwrap().id, 5);
        assert_eq!(pick_featured(&movies, 5).unwrap().id, 1);
        assert_eq!(pick_featured(&movies[..2], 3).unwrap().id, 2);
        assert!(pick_featured(&[], 3).is_none());
    }

    #[tokio::test]
    async fn test_home_page_lists() {
        let mut catalog = FakeCatalog::new();
        catalog.trending = vec![movie(1, "Dune: Part Two", "2024-02-27", 8.2, 5000)];
        catalog.popular = vec![movie(2, "Inside Out 2", "2024-06-11", 7.6, 4000)];
        catalog.upcoming = vec![movie(3, "Joker: Folie a Deux", "2024-10-01", 5.9, 900)];
        let state = test_state(catalog).await;

        let (status, body) = send(&state, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["featured"]["id"], 1);
        assert_eq!(body["featured"]["genres"][0], "Action");
        assert_eq!(body["trending"][0]["year"], "2024");
        assert_eq!(body["popular"][0]["rating"], "7.6");
        assert_eq!(body["top_rated"].as_array().unwrap().len(), 0);
        assert_eq!(body["upcoming"][0]["poster_url"], "https://image.tmdb.org/t/p/w342/poster3.jpg");
    }

    #[tokio::test]
    async fn test_home_page_fails_as_a_whole() {
        let mut catalog = FakeCatalog::new();
        catalog.trending = vec![movie(1, "Dune: Part Two", "2024-02-27", 8.2, 5000)];
        catalog.fail_lists = true;
        let state = test_state(catalog).await;

        let (status, body) = send(&state, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to fetch movies. Please try again later.");
        assert!(body.get("trending").is_none());
    }
}
