use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::forms::ProfileForm;
use super::types::{GenreChoice, ProfilePage};
use super::{require_user, PageError};
use crate::catalog::GENRES;
use crate::server::AppState;
use crate::session::{ProfileUpdate, User};

const SIGN_IN_MESSAGE: &str = "Please sign in to view your profile";

fn render(user: User, message: Option<String>) -> ProfilePage {
    let genres = GENRES
        .iter()
        .map(|g| GenreChoice {
            id: g.id,
            name: g.name,
            selected: user.favorite_genres.contains(&g.id),
        })
        .collect();
    ProfilePage {
        user,
        genres,
        message,
    }
}

pub async fn profile_page(State(state): State<AppState>) -> Result<Json<ProfilePage>, PageError> {
    let user = require_user(&state, SIGN_IN_MESSAGE).await?;
    Ok(Json(render(user, None)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    payload: Result<Json<ProfileForm>, JsonRejection>,
) -> Result<Json<ProfilePage>, PageError> {
    require_user(&state, SIGN_IN_MESSAGE).await?;
    let Json(form) = payload?;
    form.validate()?;

    let update = ProfileUpdate {
        username: Some(form.username.trim().to_string()),
        email: Some(form.email.trim().to_string()),
        profile_image: None,
        favorite_genres: form.favorite_genres,
    };
    let user = state
        .session
        .update_profile(update)
        .await
        .map_err(|e| PageError::session("Failed to update profile. Please try again.", e))?
        .ok_or(PageError::Unauthorized(SIGN_IN_MESSAGE))?;

    Ok(Json(render(user, Some("Profile updated successfully".to_string()))))
}

#[cfg(test)]
mod tests {
    use crate::catalog::fake::FakeCatalog;
    use crate::server::test_support::{send, sign_in, test_state};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_profile_page() {
        let state = test_state(FakeCatalog::new()).await;

        let (status, _) = send(&state, Method::GET, "/profile", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        sign_in(&state).await;
        let (status, body) = send(&state, Method::GET, "/profile", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "moviefan");
        let selected: Vec<u64> = body["genres"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|g| g["selected"] == true)
            .map(|g| g["id"].as_u64().unwrap())
            .collect();
        assert_eq!(selected, vec![28, 12, 14]);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let state = test_state(FakeCatalog::new()).await;
        sign_in(&state).await;

        let (status, body) = send(
            &state,
            Method::POST,
            "/profile",
            Some(json!({"username": "", "email": "user@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Username and email are required");

        let (status, _) = send(
            &state,
            Method::POST,
            "/profile",
            Some(json!({"username": "   ", "email": "user@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.session.current().await.unwrap().username, "moviefan");

        let (status, body) = send(
            &state,
            Method::POST,
            "/profile",
            Some(json!({"username": "filmbuff", "email": "buff@example.com", "favoriteGenres": [18]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "filmbuff");
        assert_eq!(body["user"]["favoriteGenres"], json!([18]));
        assert_eq!(body["message"], "Profile updated successfully");

        let current = state.session.current().await.unwrap();
        assert_eq!(current.email, "buff@example.com");
        assert_eq!(current.profile_image, "https://i.pravatar.cc/150?img=68");
    }
}
