use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use threadist_core::{CoreError, RedditApiError, SortMode, Story, UpstreamConfig};
use tracing::{debug, error, info, warn};
use url::Url;

/// Permalinks from the API are relative to this host.
const REDDIT_WEB_BASE: &str = "https://reddit.com";

/// Posts whose self-text is this short or shorter are dropped from listings.
pub const MIN_CONTENT_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    pub selftext: Option<String>,
    pub author: String,
    pub subreddit: String,
    pub url: String,
    pub permalink: String,
    pub created_utc: f64,
    pub ups: i64,
    pub num_comments: u64,
    pub over_18: bool,
    pub stickied: bool,
    pub is_self: bool,
}

impl RedditPostData {
    /// Raw self-text longer than [`MIN_CONTENT_CHARS`], measured in UTF-16
    /// code units.
    pub fn has_story_content(&self) -> bool {
        self.selftext
            .as_deref()
            .map(|text| text.encode_utf16().count() > MIN_CONTENT_CHARS)
            .unwrap_or(false)
    }
}

/// Parameters of one subreddit listing fetch.
///
/// `sort` and `limit` are carried as given by the caller and forwarded
/// verbatim; the upstream decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub subreddit: String,
    pub sort: String,
    pub limit: String,
}

impl ListingQuery {
    pub fn new(subreddit: impl Into<String>, sort: SortMode, limit: u32) -> Self {
        Self {
            subreddit: subreddit.into(),
            sort: sort.to_string(),
            limit: limit.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedditApiClient {
    http_client: Client,
    base_url: Url,
    user_agent: String,
}

impl RedditApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| CoreError::InvalidInput {
            message: format!("Invalid upstream base URL {}: {}", config.base_url, e),
        })?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// `{base}/r/{subreddit}/{sort}.json?limit={limit}&raw_json=1`
    pub fn listing_url(&self, query: &ListingQuery) -> Result<Url, CoreError> {
        let file = format!("{}.json", query.sort);
        let mut url = self.endpoint_url(&["r", &query.subreddit, &file])?;
        url.query_pairs_mut()
            .append_pair("limit", &query.limit)
            .append_pair("raw_json", "1");
        Ok(url)
    }

    /// `{base}/comments/{id}.json?raw_json=1`
    pub fn post_url(&self, post_id: &str) -> Result<Url, CoreError> {
        let file = format!("{}.json", post_id);
        let mut url = self.endpoint_url(&["comments", &file])?;
        url.query_pairs_mut().append_pair("raw_json", "1");
        Ok(url)
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, CoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CoreError::Internal {
                message: format!("Upstream base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues the single GET for `url`. Non-2xx statuses become errors.
    async fn make_request(&self, url: Url) -> Result<Response, CoreError> {
        info!("Making Reddit API request: GET {}", url.path());

        let response = match self.http_client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for GET {}: {}", url.path(), e);
                if e.is_timeout() {
                    return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!("Request failed with status: {} for {}", status, url.path());
            return Err(CoreError::RedditApi(RedditApiError::UpstreamStatus {
                status_code: status.as_u16(),
            }));
        }

        debug!("Request successful: {} {}", status, url.path());
        Ok(response)
    }

    pub async fn get_subreddit_posts(
        &self,
        query: &ListingQuery,
    ) -> Result<RedditListing<RedditPostData>, CoreError> {
        let url = self.listing_url(query)?;
        let response = self.make_request(url).await?;

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse subreddit posts: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse posts for r/{}", query.subreddit),
            })
        })?;

        info!(
            "Retrieved {} posts from r/{} ({})",
            listing.data.children.len(),
            query.subreddit,
            query.sort
        );
        Ok(listing)
    }

    /// Fetches the post half of a comments thread.
    ///
    /// Returns `None` when the thread carries no post payload.
    pub async fn get_post(&self, post_id: &str) -> Result<Option<RedditPostData>, CoreError> {
        let url = self.post_url(post_id)?;
        let response = match self.make_request(url).await {
            Ok(response) => response,
            Err(CoreError::RedditApi(RedditApiError::UpstreamStatus { status_code }))
                if status_code == StatusCode::NOT_FOUND.as_u16() =>
            {
                warn!("Reddit reports post {} as missing", post_id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let thread: serde_json::Value = response.json().await.map_err(|e| {
            error!("Failed to parse comments thread: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse thread {}", post_id),
            })
        })?;

        let Some(post) = thread
            .get(0)
            .and_then(|listing| listing.pointer("/data/children/0/data"))
            .filter(|data| !data.is_null())
        else {
            return Ok(None);
        };

        let post: RedditPostData = serde_json::from_value(post.clone()).map_err(|e| {
            error!("Failed to parse post {}: {}", post_id, e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse post {}", post_id),
            })
        })?;

        debug!("Retrieved post {} from r/{}", post.id, post.subreddit);
        Ok(Some(post))
    }

    /// One listing fetch, filtered to text stories, in upstream order.
    pub async fn list_stories(&self, query: &ListingQuery) -> Result<Vec<Story>, CoreError> {
        let listing = self.get_subreddit_posts(query).await?;
        let fetched = listing.data.children.len();

        let stories: Vec<Story> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .filter(RedditPostData::has_story_content)
            .map(Story::from)
            .collect();

        debug!(
            "Kept {} of {} posts from r/{} as stories",
            stories.len(),
            fetched,
            query.subreddit
        );
        Ok(stories)
    }

    pub async fn get_story(&self, post_id: &str) -> Result<Story, CoreError> {
        match self.get_post(post_id).await? {
            Some(post) => Ok(Story::from(post)),
            None => Err(CoreError::RedditApi(RedditApiError::PostNotFound {
                post_id: post_id.to_string(),
            })),
        }
    }
}

impl From<RedditPostData> for Story {
    fn from(post_data: RedditPostData) -> Self {
        let created_at =
            DateTime::<Utc>::from_timestamp_millis((post_data.created_utc * 1000.0) as i64)
                .unwrap_or_default();

        Self {
            reddit_id: post_data.id.clone(),
            reddit_url: format!("{}{}", REDDIT_WEB_BASE, post_data.permalink),
            id: post_data.id,
            title: post_data.title,
            content: post_data.selftext.unwrap_or_default(),
            author: post_data.author,
            subreddit: post_data.subreddit,
            upvotes: post_data.ups,
            comments: post_data.num_comments,
            created_at,
            is_narrated: false,
            audio_url: None,
        }
    }
}
