use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use threadist_core::{
    communities, community_or_placeholder, ClientConfig, CommunitiesPayload, CommunityPayload,
    CoreError, SortMode, StoriesPayload, StoryPayload,
};
use tracing::{debug, error, warn};
use url::Url;

/// Path segments of the stories endpoint below the proxy base URL.
const STORIES_ENDPOINT: [&str; 3] = ["functions", "v1", "reddit-stories"];

pub const NETWORK_ERROR: &str = "Network error";
pub const REQUEST_FAILED: &str = "Request failed";

/// Outcome of every client operation: a payload or an error message, never
/// both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Data(T),
    Error(String),
}

impl<T> ApiResponse<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, ApiResponse::Data(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Data(data) => Some(data),
            ApiResponse::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResponse::Data(_) => None,
            ApiResponse::Error(message) => Some(message.as_str()),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        match self {
            ApiResponse::Data(data) => ApiResponse::Data(f(data)),
            ApiResponse::Error(message) => ApiResponse::Error(message),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiResponse::Data(data) => Ok(data),
            ApiResponse::Error(message) => Err(message),
        }
    }
}

impl<T> From<Result<T, String>> for ApiResponse<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => ApiResponse::Data(data),
            Err(message) => ApiResponse::Error(message),
        }
    }
}

/// Listing parameters; unset fields fall back to the proxy's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub subreddit: Option<String>,
    pub sort: Option<SortMode>,
    pub limit: Option<u32>,
}

impl ListParams {
    pub fn sorted(sort: SortMode) -> Self {
        Self {
            sort: Some(sort),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    endpoint: Url,
    anon_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let mut endpoint = Url::parse(&config.proxy_url).map_err(|e| CoreError::InvalidInput {
            message: format!("Invalid proxy URL {}: {}", config.proxy_url, e),
        })?;
        endpoint
            .path_segments_mut()
            .map_err(|_| CoreError::InvalidInput {
                message: format!("Proxy URL cannot carry a path: {}", config.proxy_url),
            })?
            .pop_if_empty()
            .extend(STORIES_ENDPOINT);

        Ok(Self {
            http_client: Client::builder().build()?,
            endpoint,
            anon_key: config.anon_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn request<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> ApiResponse<T> {
        let mut url = self.endpoint.clone();
        let present: Vec<&(&str, String)> =
            params.iter().filter(|(_, value)| !value.is_empty()).collect();
        if !present.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in present {
                pairs.append_pair(key, value);
            }
        }

        let mut request = self
            .http_client
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(key) = &self.anon_key {
            request = request.bearer_auth(key);
        }

        debug!("Requesting {}", url);
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("API request failed: {}", e);
                return ApiResponse::Error(NETWORK_ERROR.to_string());
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to read API response: {}", e);
                return ApiResponse::Error(NETWORK_ERROR.to_string());
            }
        };

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(Value::as_str)
                        .filter(|message| !message.is_empty())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| REQUEST_FAILED.to_string());
            warn!("API request returned {}: {}", status, message);
            return ApiResponse::Error(message);
        }

        match serde_json::from_slice(&body) {
            Ok(data) => ApiResponse::Data(data),
            Err(e) => {
                error!("Failed to decode API response: {}", e);
                ApiResponse::Error(NETWORK_ERROR.to_string())
            }
        }
    }

    pub async fn list(&self, params: &ListParams) -> ApiResponse<StoriesPayload> {
        let sort = params.sort.unwrap_or_default();
        let limit = params.limit.unwrap_or(threadist_core::DEFAULT_LIMIT);
        self.request(&[
            ("subreddit", params.subreddit.clone().unwrap_or_default()),
            ("sort", sort.to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }

    pub async fn get_one(&self, id: &str) -> ApiResponse<StoryPayload> {
        self.request(&[("id", id.to_string())]).await
    }

    pub fn list_communities(&self) -> ApiResponse<CommunitiesPayload> {
        ApiResponse::Data(CommunitiesPayload {
            subreddits: communities().to_vec(),
        })
    }

    /// Never fails: unknown names get a placeholder record.
    pub fn get_community(&self, name: &str) -> ApiResponse<CommunityPayload> {
        ApiResponse::Data(CommunityPayload {
            subreddit: community_or_placeholder(name),
        })
    }

    pub async fn list_community_stories(
        &self,
        name: &str,
        params: &ListParams,
    ) -> ApiResponse<StoriesPayload> {
        let params = ListParams {
            subreddit: Some(name.to_string()),
            ..params.clone()
        };
        self.list(&params).await
    }
}
