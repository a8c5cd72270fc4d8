use crate::error::*;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    /// Stable machine-readable tag carried in log lines.
    fn error_code(&self) -> &'static str;
    /// HTTP status the proxy answers with for this error.
    fn http_status(&self) -> u16;
    /// Message placed in the `{error}` body returned to callers.
    fn response_message(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "CoreError: {}", self);
        if let CoreError::RedditApi(e) = self {
            error!("Reddit API error details: {:?}", e);
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "CoreError (warning): {}", self);
        self
    }

    fn error_code(&self) -> &'static str {
        match self {
            CoreError::RedditApi(e) => e.error_code(),
            CoreError::Network(_) => "NETWORK",
            CoreError::InvalidInput { .. } => "INVALID_INPUT",
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::Internal { .. } => "INTERNAL",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            CoreError::RedditApi(e) => e.http_status(),
            CoreError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    fn response_message(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.response_message(),
            CoreError::InvalidInput { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl ErrorExt for RedditApiError {
    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "RedditApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "RedditApiError (warning): {}", self);
        self
    }

    fn error_code(&self) -> &'static str {
        match self {
            RedditApiError::UpstreamStatus { .. } => "REDDIT_UPSTREAM_STATUS",
            RedditApiError::PostNotFound { .. } => "REDDIT_POST_NOT_FOUND",
            RedditApiError::RequestTimeout => "REDDIT_TIMEOUT",
            RedditApiError::InvalidResponse { .. } => "REDDIT_INVALID_RESPONSE",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            RedditApiError::PostNotFound { .. } => 404,
            _ => 500,
        }
    }

    fn response_message(&self) -> String {
        self.to_string()
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "ConfigError (warning): {}", self);
        self
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::Parse(_) => "CONFIG_PARSE",
        }
    }

    fn http_status(&self) -> u16 {
        500
    }

    fn response_message(&self) -> String {
        self.to_string()
    }
}
