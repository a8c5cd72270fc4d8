//! story-proxy - stateless listing proxy
//!
//! Forwards one query to the Reddit JSON API per request and answers with
//! normalized `Story` payloads.

use axum::routing::get;
use axum::Router;
use reddit_client::RedditApiClient;
use std::sync::Arc;
use threadist_core::{AppConfig, CoreError, ListingDefaults};
use tower_http::trace::TraceLayer;

pub mod cors;
pub mod error;
pub mod handlers;

pub use error::ProxyError;

/// Mount point used by deployed clients.
pub const STORIES_PATH: &str = "/functions/v1/reddit-stories";
pub const STORIES_SHORT_PATH: &str = "/reddit-stories";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct ProxyState {
    pub reddit: Arc<RedditApiClient>,
    pub defaults: Arc<ListingDefaults>,
}

impl ProxyState {
    pub fn new(reddit: RedditApiClient, defaults: ListingDefaults) -> Self {
        Self {
            reddit: Arc::new(reddit),
            defaults: Arc::new(defaults),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let reddit = RedditApiClient::new(&config.upstream)?;
        Ok(Self::new(reddit, config.defaults.clone()))
    }
}

/// Build application router
pub fn build_router(state: ProxyState) -> Router {
    let stories = get(handlers::stories)
        .post(handlers::stories)
        .options(handlers::preflight);

    let router = Router::new()
        .route(STORIES_PATH, stories.clone())
        .route(STORIES_SHORT_PATH, stories)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    cors::with_cors_headers(router)
}
