pub mod auth;
pub mod error;
pub mod forms;
pub mod genres;
pub mod home;
pub mod movie;
pub mod profile;
pub mod search;
pub mod types;
pub mod watchlist;

pub use error::PageError;

use crate::server::AppState;
use crate::session::User;

/// The signed-in user, or 401 with `message`.
pub(crate) async fn require_user(state: &AppState, message: &'static str) -> Result<User, PageError> {
    state
        .session
        .current()
        .await
        .ok_or(PageError::Unauthorized(message))
}

/// Movie ids in paths must be positive integers.
pub(crate) fn parse_movie_id(raw: &str) -> Result<u64, PageError> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(PageError::BadRequest("Invalid movie ID")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_id() {
        assert_eq!(parse_movie_id("603").unwrap(), 603);
        assert!(parse_movie_id("0").is_err());
        assert!(parse_movie_id("-4").is_err());
        assert!(parse_movie_id("abc").is_err());
    }
}
