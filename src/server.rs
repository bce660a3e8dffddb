use axum::{
    handler::HandlerWithoutStateExt,
    response::Redirect,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::catalog::{Catalog, ImageUrls};
use crate::config::Config;
use crate::pages;
use crate::session::SessionStore;
use crate::watchlist::WatchlistStore;

/// Everything a page needs. The stores are shared by all requests; the
/// service has exactly one local user.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn Catalog>,
    pub session: Arc<SessionStore>,
    pub watchlist: Arc<WatchlistStore>,
    pub images: Arc<ImageUrls>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<dyn Catalog>,
        session: Arc<SessionStore>,
        watchlist: Arc<WatchlistStore>,
    ) -> Self {
        let images = Arc::new(ImageUrls::new(&config.tmdb.image_base_url));
        Self {
            config: Arc::new(config),
            catalog,
            session,
            watchlist,
            images,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(pages::home::home_page))
        .route("/movie/:id", get(pages::movie::movie_page))
        .route("/movie/:id/watchlist", post(pages::movie::toggle_watchlist))
        .route("/movie/:id/reviews", post(pages::movie::submit_review))
        .route(
            "/search",
            get(pages::search::search_page).post(pages::search::submit_search),
        )
        .route("/search/filters", get(pages::search::search_filters))
        .route("/genres", get(pages::genres::genres_page))
        .route("/watchlist", get(pages::watchlist::watchlist_page))
        .route(
            "/watchlist/:movie_id/watched",
            post(pages::watchlist::toggle_watched),
        )
        .route(
            "/watchlist/:movie_id",
            delete(pages::watchlist::remove_from_watchlist),
        )
        .route("/login", post(pages::auth::login))
        .route("/register", post(pages::auth::register))
        .route("/logout", post(pages::auth::logout))
        .route(
            "/profile",
            get(pages::profile::profile_page).post(pages::profile::update_profile),
        )
        .fallback(redirect_home);

    if let Some(ref directory) = state.config.assets.directory {
        // Files that exist are served; everything else still redirects.
        router = router.fallback_service(
            ServeDir::new(directory).fallback(redirect_home.into_service()),
        );
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_home() -> Redirect {
    Redirect::to("/")
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::catalog::fake::FakeCatalog;
    use crate::db::MemoryRepository;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    pub fn test_config() -> Config {
        Config::from_yaml("dbdir: /tmp\ntmdb:\n  api_key: test\nsession:\n  simulated_delay_ms: 0\n")
            .expect("test config")
    }

    pub async fn test_state(catalog: FakeCatalog) -> AppState {
        let storage = Arc::new(MemoryRepository::new());
        let session = Arc::new(
            SessionStore::open(storage.clone(), Duration::ZERO)
                .await
                .expect("session store"),
        );
        let watchlist = Arc::new(WatchlistStore::new(storage));
        AppState::new(test_config(), Arc::new(catalog), session, watchlist)
    }

    pub async fn sign_in(state: &AppState) {
        let user = state
            .session
            .login(crate::session::DEMO_EMAIL, crate::session::DEMO_PASSWORD)
            .await
            .expect("login");
        state.watchlist.switch_user(Some(&user)).await.expect("switch");
    }

    pub async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = build_router(state.clone())
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}
