use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Movie;

pub const DEFAULT_SORT: &str = "popularity.desc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Ordered by vote count.
    Popularity,
    VoteAverage,
    /// Compares the raw date strings, which only orders correctly for
    /// ISO 8601 dates.
    ReleaseDate,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Popularity => "popularity",
            SortField::VoteAverage => "vote_average",
            SortField::ReleaseDate => "release_date",
            SortField::Title => "title",
        }
    }

    fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            SortField::Popularity => a.vote_count.cmp(&b.vote_count),
            SortField::VoteAverage => a
                .vote_average
                .partial_cmp(&b.vote_average)
                .unwrap_or(Ordering::Equal),
            SortField::ReleaseDate => a.release_date_str().cmp(b.release_date_str()),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A sort token such as `title.asc` or `popularity.desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl FromStr for SortKey {
    type Err = String;

    /// Any direction other than `desc` sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s.split_once('.').unwrap_or((s, ""));
        let field = match field {
            "popularity" => SortField::Popularity,
            "vote_average" => SortField::VoteAverage,
            "release_date" => SortField::ReleaseDate,
            "title" => SortField::Title,
            _ => return Err(format!("unknown sort field: {}", field)),
        };
        let direction = if direction == "desc" {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Ok(SortKey { field, direction })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{}.{}", self.field.as_str(), direction)
    }
}

/// Stable sort: movies that compare equal keep their incoming order in
/// both directions.
pub fn sort_movies(mut movies: Vec<Movie>, key: SortKey) -> Vec<Movie> {
    movies.sort_by(|a, b| {
        let ordering = key.field.compare(a, b);
        match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    movies
}
