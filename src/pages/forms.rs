use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

pub const REVIEW_MIN_CHARS: usize = 10;
pub const REVIEW_MAX_CHARS: usize = 500;
pub const MAX_STARS: u8 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Username and email are required")]
    ProfileFieldsRequired,
    #[error("Please select a rating")]
    NoRating,
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("Review must be at least 10 characters")]
    ReviewTooShort,
    #[error("Review must be at most 500 characters")]
    ReviewTooLong,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

fn check_email(email: &str) -> Result<(), FormError> {
    if email_pattern().is_match(email.trim()) {
        Ok(())
    } else {
        Err(FormError::InvalidEmail)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "confirm_password")]
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(FormError::MissingFields);
        }
        check_email(&self.email)?;
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "favorite_genres")]
    pub favorite_genres: Option<Vec<u64>>,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.username.trim().is_empty() || self.email.trim().is_empty() {
            return Err(FormError::ProfileFieldsRequired);
        }
        check_email(&self.email)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewForm {
    /// Stars, 1 to 5. Zero or missing means nothing was selected.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub content: String,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.rating == 0 {
            return Err(FormError::NoRating);
        }
        if self.rating > MAX_STARS {
            return Err(FormError::RatingOutOfRange);
        }
        if self.content.trim().chars().count() < REVIEW_MIN_CHARS {
            return Err(FormError::ReviewTooShort);
        }
        if self.content.chars().count() > REVIEW_MAX_CHARS {
            return Err(FormError::ReviewTooLong);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            email: "user@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_register_checks() {
        let mut form = RegisterForm {
            username: "fan".to_string(),
            email: "fan@example.com".to_string(),
            password: "secret".to_string(),
            confirm_password: "secrets".to_string(),
        };
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));

        form.confirm_password = "secret".to_string();
        assert_eq!(form.validate(), Ok(()));

        form.email = "not-an-email".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));

        form.username.clear();
        assert_eq!(form.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_profile_requires_username_and_email() {
        let form = ProfileForm {
            username: String::new(),
            email: "a@b.co".to_string(),
            favorite_genres: None,
        };
        assert_eq!(form.validate(), Err(FormError::ProfileFieldsRequired));

        let blank = ProfileForm {
            username: "   ".to_string(),
            email: "a@b.co".to_string(),
            favorite_genres: None,
        };
        assert_eq!(blank.validate(), Err(FormError::ProfileFieldsRequired));
    }

    #[test]
    fn test_review_checks() {
        let review = |rating: u8, content: &str| ReviewForm {
            rating,
            content: content.to_string(),
        };
        assert_eq!(review(0, "A perfectly fine film.").validate(), Err(FormError::NoRating));
        assert_eq!(review(6, "A perfectly fine film.").validate(), Err(FormError::RatingOutOfRange));
        assert_eq!(review(4, "   too short    ").validate(), Err(FormError::ReviewTooShort));
        assert_eq!(review(4, &"x".repeat(501)).validate(), Err(FormError::ReviewTooLong));
        assert_eq!(review(4, "A perfectly fine film.").validate(), Ok(()));
    }
}
