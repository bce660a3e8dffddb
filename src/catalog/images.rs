pub const NO_POSTER: &str = "/images/no-poster.jpg";
pub const NO_BACKDROP: &str = "/images/no-backdrop.jpg";
pub const NO_PROFILE: &str = "/images/no-profile.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    Small,
    Medium,
    Large,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::Small => "w185",
            PosterSize::Medium => "w342",
            PosterSize::Large => "w500",
            PosterSize::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropSize {
    Small,
    Medium,
    Large,
    Original,
}

impl BackdropSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackdropSize::Small => "w300",
            BackdropSize::Medium => "w780",
            BackdropSize::Large => "w1280",
            BackdropSize::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSize {
    Small,
    Medium,
    Large,
    Original,
}

impl ProfileSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileSize::Small => "w45",
            ProfileSize::Medium => "w185",
            ProfileSize::Large => "h632",
            ProfileSize::Original => "original",
        }
    }
}

/// Builds image URLs from the path fragments the catalog returns.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl ImageUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn poster(&self, path: Option<&str>, size: PosterSize) -> String {
        self.build(path, size.as_str(), NO_POSTER)
    }

    pub fn backdrop(&self, path: Option<&str>, size: BackdropSize) -> String {
        self.build(path, size.as_str(), NO_BACKDROP)
    }

    pub fn profile(&self, path: Option<&str>, size: ProfileSize) -> String {
        self.build(path, size.as_str(), NO_PROFILE)
    }

    /// Like `profile`, but without a placeholder: callers render an
    /// initial instead.
    pub fn avatar(&self, path: Option<&str>) -> Option<String> {
        match path {
            Some(p) if !p.is_empty() => Some(self.build(Some(p), ProfileSize::Small.as_str(), "")),
            _ => None,
        }
    }

    fn build(&self, path: Option<&str>, size: &str, placeholder: &str) -> String {
        match path {
            Some(p) if !p.is_empty() => format!("{}/{}{}", self.base_url, size, p),
            _ => placeholder.to_string(),
        }
    }
}
