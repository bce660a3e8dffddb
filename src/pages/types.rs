use serde::Serialize;

use crate::browse::format::{
    format_date, format_runtime, format_vote_average, truncate_text, year_from_date,
};
use crate::catalog::{
    genre_names, BackdropSize, CastMember, CrewMember, GenreRef, ImageUrls, Movie, MovieDetails,
    PosterSize, ProductionCompany, ProfileSize, Review, Video,
};
use crate::session::User;
use crate::watchlist::WatchlistItem;

const CARD_TITLE_CHARS: usize = 30;
const CARD_OVERVIEW_CHARS: usize = 100;
const HERO_GENRES: usize = 3;
const DETAIL_VIDEOS: usize = 4;
const DETAIL_COMPANIES: usize = 4;
const DETAIL_CAST: usize = 12;
const DETAIL_CREW: usize = 8;
const CREW_JOBS: &[&str] = &["Director", "Producer", "Screenplay", "Writer"];

#[derive(Debug, Serialize)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_url: String,
    pub rating: String,
    pub year: String,
}

impl MovieCard {
    pub fn new(movie: &Movie, images: &ImageUrls) -> Self {
        Self {
            id: movie.id,
            title: truncate_text(&movie.title, CARD_TITLE_CHARS),
            overview: truncate_text(&movie.overview, CARD_OVERVIEW_CHARS),
            poster_url: images.poster(movie.poster_path.as_deref(), PosterSize::Medium),
            rating: format_vote_average(movie.vote_average),
            year: year_from_date(movie.release_date_str()),
        }
    }

    pub fn list(movies: &[Movie], images: &ImageUrls) -> Vec<Self> {
        movies.iter().map(|m| Self::new(m, images)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct MovieHero {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub backdrop_url: String,
    pub rating: String,
    pub year: String,
    pub genres: Vec<&'static str>,
}

impl MovieHero {
    pub fn new(movie: &Movie, images: &ImageUrls) -> Self {
        let mut genres = genre_names(&movie.genre_ids);
        genres.truncate(HERO_GENRES);
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            backdrop_url: images.backdrop(movie.backdrop_path.as_deref(), BackdropSize::Large),
            rating: format_vote_average(movie.vote_average),
            year: year_from_date(movie.release_date_str()),
            genres,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewView {
    pub id: String,
    pub author: String,
    pub initial: String,
    pub avatar_url: Option<String>,
    pub content: String,
    pub created: String,
    /// Author rating on a five star scale.
    pub stars: Option<u8>,
}

impl ReviewView {
    pub fn new(review: &Review, images: &ImageUrls) -> Self {
        let stars = review
            .author_details
            .rating
            .filter(|r| *r > 0.0)
            .map(|r| (r / 2.0).round().clamp(0.0, 5.0) as u8);
        Self {
            id: review.id.clone(),
            author: review.author.clone(),
            initial: review
                .author
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect::<String>())
                .unwrap_or_default(),
            avatar_url: images.avatar(review.author_details.avatar_path.as_deref()),
            content: review.content.clone(),
            created: format_date(&review.created_at),
            stars,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoView {
    pub name: String,
    pub site: String,
    pub kind: String,
    pub url: Option<String>,
}

impl VideoView {
    fn new(video: &Video) -> Self {
        let url = if video.site == "YouTube" {
            Some(format!("https://www.youtube.com/watch?v={}", video.key))
        } else {
            None
        };
        Self {
            name: video.name.clone(),
            site: video.site.clone(),
            kind: video.video_type.clone(),
            url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonView {
    pub id: u64,
    pub name: String,
    /// Character for cast members, job for crew.
    pub role: String,
    pub profile_url: String,
}

impl PersonView {
    fn cast(person: &CastMember, images: &ImageUrls) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            role: person.character.clone(),
            profile_url: images.profile(person.profile_path.as_deref(), ProfileSize::Medium),
        }
    }

    fn crew(person: &CrewMember, images: &ImageUrls) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            role: person.job.clone(),
            profile_url: images.profile(person.profile_path.as_deref(), ProfileSize::Small),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompanyView {
    pub name: String,
    pub logo_url: Option<String>,
}

impl CompanyView {
    fn new(company: &ProductionCompany, images: &ImageUrls) -> Self {
        Self {
            name: company.name.clone(),
            logo_url: company
                .logo_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| images.poster(Some(p), PosterSize::Small)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieDetailsPage {
    pub id: u64,
    pub title: String,
    pub tagline: String,
    pub overview: String,
    pub poster_url: String,
    pub backdrop_url: String,
    pub rating: String,
    pub vote_count: u64,
    pub runtime: String,
    pub release_date: String,
    pub status: String,
    pub budget: u64,
    pub revenue: u64,
    pub homepage: String,
    pub genres: Vec<String>,
    pub trailer: Option<VideoView>,
    pub videos: Vec<VideoView>,
    pub production_companies: Vec<CompanyView>,
    pub cast: Vec<PersonView>,
    pub crew: Vec<PersonView>,
    pub similar: Vec<MovieCard>,
    pub reviews: Vec<ReviewView>,
    pub in_watchlist: bool,
    pub is_authenticated: bool,
}

impl MovieDetailsPage {
    pub fn new(
        details: &MovieDetails,
        reviews: &[Review],
        images: &ImageUrls,
        in_watchlist: bool,
        is_authenticated: bool,
    ) -> Self {
        let movie = &details.movie;
        let videos: &[Video] = details
            .videos
            .as_ref()
            .map(|v| v.results.as_slice())
            .unwrap_or_default();
        let trailer = videos
            .iter()
            .find(|v| v.site == "YouTube" && (v.video_type == "Trailer" || v.video_type == "Teaser"))
            .map(VideoView::new);

        let (cast, crew) = match details.credits {
            Some(ref credits) => (
                credits
                    .cast
                    .iter()
                    .take(DETAIL_CAST)
                    .map(|p| PersonView::cast(p, images))
                    .collect(),
                credits
                    .crew
                    .iter()
                    .filter(|p| CREW_JOBS.contains(&p.job.as_str()))
                    .take(DETAIL_CREW)
                    .map(|p| PersonView::crew(p, images))
                    .collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        let similar = details
            .similar
            .as_ref()
            .map(|s| MovieCard::list(&s.results, images))
            .unwrap_or_default();

        Self {
            id: movie.id,
            title: movie.title.clone(),
            tagline: details.tagline.clone(),
            overview: movie.overview.clone(),
            poster_url: images.poster(movie.poster_path.as_deref(), PosterSize::Large),
            backdrop_url: images.backdrop(movie.backdrop_path.as_deref(), BackdropSize::Large),
            rating: format_vote_average(movie.vote_average),
            vote_count: movie.vote_count,
            runtime: format_runtime(details.runtime),
            release_date: format_date(movie.release_date_str()),
            status: details.status.clone(),
            budget: details.budget,
            revenue: details.revenue,
            homepage: details.homepage.clone(),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            trailer,
            videos: videos.iter().take(DETAIL_VIDEOS).map(VideoView::new).collect(),
            production_companies: details
                .production_companies
                .iter()
                .take(DETAIL_COMPANIES)
                .map(|c| CompanyView::new(c, images))
                .collect(),
            cast,
            crew,
            similar,
            reviews: reviews.iter().map(|r| ReviewView::new(r, images)).collect(),
            in_watchlist,
            is_authenticated,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub featured: Option<MovieHero>,
    pub trending: Vec<MovieCard>,
    pub popular: Vec<MovieCard>,
    pub top_rated: Vec<MovieCard>,
    pub upcoming: Vec<MovieCard>,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub genre: Option<u64>,
    pub sort_by: String,
    pub year: String,
    pub heading: Option<String>,
    pub movies: Vec<MovieCard>,
    pub message: Option<String>,
    pub hint: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenresPage {
    pub genres: Vec<GenreRef>,
    pub selected: Option<GenreRef>,
    pub movies: Vec<MovieCard>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistEntry {
    pub item: WatchlistItem,
    pub movie: MovieCard,
}

#[derive(Debug, Serialize)]
pub struct WatchlistPage {
    pub count: usize,
    pub filter: String,
    pub entries: Vec<WatchlistEntry>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistStatus {
    pub movie_id: u64,
    pub in_watchlist: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GenreChoice {
    pub id: u64,
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub user: User,
    pub genres: Vec<GenreChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
