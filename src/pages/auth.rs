use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use super::forms::{LoginForm, RegisterForm};
use super::PageError;
use crate::server::AppState;
use crate::session::User;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginForm>, JsonRejection>,
) -> Result<Json<User>, PageError> {
    let Json(form) = payload?;
    form.validate()?;

    let user = state
        .session
        .login(&form.email, &form.password)
        .await
        .map_err(|e| PageError::session("Failed to sign in. Please try again.", e))?;
    state
        .watchlist
        .switch_user(Some(&user))
        .await
        .map_err(PageError::watchlist)?;

    Ok(Json(user))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterForm>, JsonRejection>,
) -> Result<Json<User>, PageError> {
    let Json(form) = payload?;
    form.validate()?;

    let user = state
        .session
        .register(&form.username, &form.email, &form.password)
        .await
        .map_err(|e| PageError::session("Failed to create account. Please try again.", e))?;
    state
        .watchlist
        .switch_user(Some(&user))
        .await
        .map_err(PageError::watchlist)?;

    Ok(Json(user))
}

pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, PageError> {
    state
        .session
        .logout()
        .await
        .map_err(|e| PageError::session("Failed to sign out. Please try again.", e))?;
    state
        .watchlist
        .switch_user(None)
        .await
        .map_err(PageError::watchlist)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::catalog::fake::{movie, FakeCatalog};
    use crate::server::test_support::{send, test_state};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_flow() {
        let catalog = FakeCatalog::new().with_movie(movie(550, "Fight Club", "1999-10-15", 8.4, 28000));
        let state = test_state(catalog).await;

        let (status, body) = send(
            &state,
            Method::POST,
            "/login",
            Some(json!({"email": "user@example.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");

        let (status, body) = send(
            &state,
            Method::POST,
            "/login",
            Some(json!({"email": "user@example.com", "password": "password"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "moviefan");
        assert_eq!(body["favoriteGenres"], json!([28, 12, 14]));

        let (status, _) = send(&state, Method::POST, "/movie/550/watchlist", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&state, Method::POST, "/logout", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(!state.session.is_authenticated().await);
        assert!(state.watchlist.is_empty().await);

        // Signing back in brings the stored watchlist with it.
        send(
            &state,
            Method::POST,
            "/login",
            Some(json!({"email": "user@example.com", "password": "password"})),
        )
        .await;
        assert!(state.watchlist.is_in_watchlist(550).await);
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let state = test_state(FakeCatalog::new()).await;
        let (status, body) = send(&state, Method::POST, "/login", Some(json!({"email": ""}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Please fill in all fields");
    }

    #[tokio::test]
    async fn test_register() {
        let state = test_state(FakeCatalog::new()).await;

        let (status, body) = send(
            &state,
            Method::POST,
            "/register",
            Some(json!({
                "username": "cinephile",
                "email": "cine@example.com",
                "password": "hunter22",
                "confirmPassword": "hunter2"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Passwords do not match");

        let (status, body) = send(
            &state,
            Method::POST,
            "/register",
            Some(json!({
                "username": "cinephile",
                "email": "cine@example.com",
                "password": "hunter2",
                "confirmPassword": "hunter2"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "cinephile");
        assert_eq!(body["email"], "cine@example.com");
        assert_eq!(body["id"], "user-1");
        assert!(state.session.is_authenticated().await);
    }
}
