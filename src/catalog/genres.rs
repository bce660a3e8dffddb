use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GenreRef {
    pub id: u64,
    pub name: &'static str,
}

/// TMDB's fixed movie genre list.
pub const GENRES: &[GenreRef] = &[
    GenreRef { id: 28, name: "Action" },
    GenreRef { id: 12, name: "Adventure" },
    GenreRef { id: 16, name: "Animation" },
    GenreRef { id: 35, name: "Comedy" },
    GenreRef { id: 80, name: "Crime" },
    GenreRef { id: 99, name: "Documentary" },
    GenreRef { id: 18, name: "Drama" },
    GenreRef { id: 10751, name: "Family" },
    GenreRef { id: 14, name: "Fantasy" },
    GenreRef { id: 36, name: "History" },
    GenreRef { id: 27, name: "Horror" },
    GenreRef { id: 10402, name: "Music" },
    GenreRef { id: 9648, name: "Mystery" },
    GenreRef { id: 10749, name: "Romance" },
    GenreRef { id: 878, name: "Science Fiction" },
    GenreRef { id: 10770, name: "TV Movie" },
    GenreRef { id: 53, name: "Thriller" },
    GenreRef { id: 10752, name: "War" },
    GenreRef { id: 37, name: "Western" },
];

pub fn find_genre(id: u64) -> Option<GenreRef> {
    GENRES.iter().copied().find(|g| g.id == id)
}

pub fn genre_name(id: u64) -> Option<&'static str> {
    find_genre(id).map(|g| g.name)
}

/// Names for the given ids, skipping ids not in the table.
pub fn genre_names(ids: &[u64]) -> Vec<&'static str> {
    ids.iter().filter_map(|id| genre_name(*id)).collect()
}
