use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reddit_client::ListingQuery;
use serde::Deserialize;
use threadist_core::{CoreError, ListingDefaults, StoriesPayload, StoryPayload};
use tracing::{debug, info};

use crate::{ProxyError, ProxyState};

/// Raw query string of the stories endpoint. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct StoriesParams {
    pub subreddit: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoriesRequest {
    Single { id: String },
    Listing(ListingQuery),
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl StoriesParams {
    /// `sort` and `limit` are not validated here; unknown values are passed
    /// through and left to the upstream.
    pub fn resolve(self, defaults: &ListingDefaults) -> StoriesRequest {
        if let Some(id) = present(self.id) {
            return StoriesRequest::Single { id };
        }

        StoriesRequest::Listing(ListingQuery {
            subreddit: present(self.subreddit).unwrap_or_else(|| defaults.subreddit.clone()),
            sort: present(self.sort).unwrap_or_else(|| defaults.sort.to_string()),
            limit: present(self.limit).unwrap_or_else(|| defaults.limit.to_string()),
        })
    }
}

pub async fn stories(
    State(state): State<ProxyState>,
    params: Result<Query<StoriesParams>, QueryRejection>,
) -> Result<Response, ProxyError> {
    let Query(params) = params.map_err(|e| CoreError::InvalidInput {
        message: e.body_text(),
    })?;

    match params.resolve(&state.defaults) {
        StoriesRequest::Single { id } => {
            debug!("Looking up story {}", id);
            let story = state.reddit.get_story(&id).await?;
            Ok(Json(StoryPayload { story }).into_response())
        }
        StoriesRequest::Listing(query) => {
            let stories = state.reddit.list_stories(&query).await?;
            info!(
                "Serving {} stories from r/{} ({}, limit {})",
                stories.len(),
                query.subreddit,
                query.sort,
                query.limit
            );
            Ok(Json(StoriesPayload { stories }).into_response())
        }
    }
}

/// Cross-origin preflight: 200 with an empty body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
