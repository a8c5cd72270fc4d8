use threadist_core::{ConfigError, CoreError, ErrorExt, RedditApiError};

#[test]
fn test_error_codes() {
    let reddit_error = CoreError::RedditApi(RedditApiError::UpstreamStatus { status_code: 503 });
    assert_eq!(reddit_error.error_code(), "REDDIT_UPSTREAM_STATUS");

    let not_found = CoreError::RedditApi(RedditApiError::PostNotFound {
        post_id: "abc123".to_string(),
    });
    assert_eq!(not_found.error_code(), "REDDIT_POST_NOT_FOUND");

    let config_error = ConfigError::FileNotFound {
        path: "threadist.toml".to_string(),
    };
    assert_eq!(config_error.error_code(), "CONFIG_FILE_NOT_FOUND");

    let input_error = CoreError::InvalidInput {
        message: "Failed to deserialize query string".to_string(),
    };
    assert_eq!(input_error.error_code(), "INVALID_INPUT");
}

#[test]
fn test_not_found_maps_to_404() {
    let error = CoreError::RedditApi(RedditApiError::PostNotFound {
        post_id: "abc123".to_string(),
    });
    assert_eq!(error.http_status(), 404);
    assert_eq!(error.response_message(), "Post not found");

    let error = CoreError::NotFound {
        resource: "story".to_string(),
    };
    assert_eq!(error.http_status(), 404);
}

#[test]
fn test_everything_else_maps_to_500() {
    let upstream = CoreError::RedditApi(RedditApiError::UpstreamStatus { status_code: 503 });
    assert_eq!(upstream.http_status(), 500);
    assert_eq!(upstream.response_message(), "Reddit API error: 503");

    // A missing subreddit is still an upstream failure, not a not-found.
    let missing = CoreError::RedditApi(RedditApiError::UpstreamStatus { status_code: 404 });
    assert_eq!(missing.http_status(), 500);
    assert_eq!(missing.response_message(), "Reddit API error: 404");

    let malformed = CoreError::RedditApi(RedditApiError::InvalidResponse {
        details: "expected a listing".to_string(),
    });
    assert_eq!(malformed.http_status(), 500);

    let timeout = CoreError::RedditApi(RedditApiError::RequestTimeout);
    assert_eq!(timeout.http_status(), 500);

    let input = CoreError::InvalidInput {
        message: "Failed to deserialize query string".to_string(),
    };
    assert_eq!(input.http_status(), 500);
    assert_eq!(input.response_message(), "Failed to deserialize query string");
}

#[test]
fn test_logging_does_not_panic() {
    let error = CoreError::RedditApi(RedditApiError::UpstreamStatus { status_code: 502 });
    error.log_error().log_warn();

    let config_error = ConfigError::InvalidValue {
        field: "defaults.limit".to_string(),
        value: "0".to_string(),
    };
    config_error.log_error();
}
