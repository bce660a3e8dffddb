use crate::catalog::Movie;

/// Keeps movies whose release date starts with `year`. An empty year
/// keeps everything; a movie without a release date never matches a
/// non-empty year.
pub fn filter_by_year(movies: Vec<Movie>, year: &str) -> Vec<Movie> {
    if year.is_empty() {
        return movies;
    }
    movies
        .into_iter()
        .filter(|movie| match movie.release_date.as_deref() {
            Some(date) if !date.is_empty() => date.starts_with(year),
            _ => false,
        })
        .collect()
}
