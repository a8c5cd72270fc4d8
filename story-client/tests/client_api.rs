//! Client data layer against a mocked proxy.

use serde_json::json;
use story_client::{ApiClient, ApiResponse, FeedView, ListParams, NETWORK_ERROR, REQUEST_FAILED};
use threadist_core::{ClientConfig, SortMode};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/functions/v1/reddit-stories";

fn client_for(server: &MockServer, anon_key: Option<&str>) -> ApiClient {
    ApiClient::new(&ClientConfig {
        proxy_url: server.uri(),
        anon_key: anon_key.map(str::to_string),
    })
    .expect("Should build client")
}

fn story_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "The house at the end of the lane",
        "content": "Nobody on our street ever talked about the house at the end of the lane. ".repeat(2),
        "author": "narrator",
        "subreddit": "nosleep",
        "upvotes": 512,
        "comments": 40,
        "created_at": "2023-11-14T22:13:20Z",
        "is_narrated": false,
        "reddit_id": id,
        "reddit_url": format!("https://reddit.com/r/nosleep/comments/{}/", id)
    })
}

#[tokio::test]
async fn test_list_sends_defaults_and_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("sort", "hot"))
        .and(query_param("limit", "25"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "stories": [story_json("s1")] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server, Some("anon-key"))
        .list(&ListParams::default())
        .await;

    let payload = response.into_result().unwrap();
    assert_eq!(payload.stories.len(), 1);
    assert_eq!(payload.stories[0].id, "s1");
    assert_eq!(payload.stories[0].upvotes, 512);

    // No subreddit filter is sent unless one is asked for.
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0]
        .url
        .query_pairs()
        .all(|(key, _)| key != "subreddit"));
}

#[tokio::test]
async fn test_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("id", "gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Post not found" })))
        .mount(&server)
        .await;

    let response = client_for(&server, None).get_one("gone").await;
    assert_eq!(response, ApiResponse::Error("Post not found".to_string()));
}

#[tokio::test]
async fn test_error_without_message_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let response = client_for(&server, None).list(&ListParams::default()).await;
    assert_eq!(response.error(), Some(REQUEST_FAILED));
}

#[tokio::test]
async fn test_malformed_success_body_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let response = client_for(&server, None).list(&ListParams::default()).await;
    assert_eq!(response.error(), Some(NETWORK_ERROR));
}

#[tokio::test]
async fn test_transport_failure_is_a_network_error() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);
    drop(server);

    let response = client.get_one("abc").await;
    assert_eq!(response, ApiResponse::Error(NETWORK_ERROR.to_string()));
}

#[tokio::test]
async fn test_community_stories_bind_subreddit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("subreddit", "LetsNotMeet"))
        .and(query_param("sort", "new"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stories": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let params = ListParams::sorted(SortMode::New).with_limit(5);
    let response = client_for(&server, None)
        .list_community_stories("LetsNotMeet", &params)
        .await;
    assert!(response.is_data());
}

#[tokio::test]
async fn test_feed_refetch_after_failure() {
    let server = MockServer::start().await;
    let client = client_for(&server, None);
    let mut feed = FeedView::new(ListParams::sorted(SortMode::Rising).with_limit(20));

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Reddit API error: 503" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("sort", "rising"))
        .and(query_param("limit", "20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "stories": [story_json("a"), story_json("b")] })),
        )
        .mount(&server)
        .await;

    feed.refetch(&client).await;
    assert_eq!(feed.error(), Some("Reddit API error: 503"));
    assert!(feed.cards().is_empty());

    feed.refetch(&client).await;
    assert_eq!(feed.error(), None);
    let ids: Vec<&str> = feed.cards().iter().map(|c| c.story.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(feed.cards()[0].display_count(), 512);
}
