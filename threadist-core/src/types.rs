use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A text post reshaped from the upstream listing API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub subreddit: String,
    pub upvotes: i64,
    pub comments: u64,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    pub is_narrated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub reddit_id: String,
    #[serde(default)]
    pub reddit_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members: u64,
    pub online: u64,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Timestamps go out with millisecond precision, `2023-11-14T22:13:20.000Z`.
/// Any RFC 3339 form is accepted on input.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Hot,
    New,
    Rising,
}

impl SortMode {
    /// Feed tab order.
    pub const TABS: [SortMode; 3] = [SortMode::Hot, SortMode::Rising, SortMode::New];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Hot => "hot",
            SortMode::New => "new",
            SortMode::Rising => "rising",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(SortMode::Hot),
            "new" => Ok(SortMode::New),
            "rising" => Ok(SortMode::Rising),
            other => Err(CoreError::InvalidInput {
                message: format!("Invalid sort mode: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoriesPayload {
    pub stories: Vec<Story>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryPayload {
    pub story: Story,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunitiesPayload {
    pub subreddits: Vec<Community>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPayload {
    pub subreddit: Community,
}

/// Body of every failed proxy response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("hot".parse::<SortMode>().unwrap(), SortMode::Hot);
        assert_eq!("new".parse::<SortMode>().unwrap(), SortMode::New);
        assert_eq!("rising".parse::<SortMode>().unwrap(), SortMode::Rising);

        let err = "top".parse::<SortMode>().unwrap_err();
        assert!(err.to_string().contains("top"));
    }

    #[test]
    fn test_sort_mode_wire_format() {
        assert_eq!(serde_json::to_string(&SortMode::Rising).unwrap(), "\"rising\"");
        assert_eq!(SortMode::default(), SortMode::Hot);
        assert_eq!(SortMode::TABS[1], SortMode::Rising);
    }

    #[test]
    fn test_story_omits_unset_audio_url() {
        let story = Story {
            id: "abc".to_string(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            author: "someone".to_string(),
            subreddit: "nosleep".to_string(),
            upvotes: 10,
            comments: 2,
            created_at: DateTime::<Utc>::from_timestamp(1_640_995_200, 0).unwrap(),
            is_narrated: false,
            audio_url: None,
            reddit_id: "abc".to_string(),
            reddit_url: "https://reddit.com/r/nosleep/comments/abc/title/".to_string(),
        };

        let value = serde_json::to_value(&story).unwrap();
        assert!(value.get("audio_url").is_none());
        assert_eq!(value["is_narrated"], false);
        assert_eq!(value["created_at"], "2022-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_story_timestamp_accepts_any_rfc3339() {
        let value = serde_json::json!({
            "id": "abc",
            "title": "Title",
            "content": "Body",
            "author": "someone",
            "subreddit": "nosleep",
            "upvotes": 1,
            "comments": 0,
            "created_at": "2023-11-14T22:13:20Z",
            "is_narrated": false
        });
        let story: Story = serde_json::from_value(value).unwrap();
        assert_eq!(story.created_at.timestamp(), 1_700_000_000);
        assert_eq!(
            serde_json::to_value(&story).unwrap()["created_at"],
            "2023-11-14T22:13:20.000Z"
        );
    }
}
