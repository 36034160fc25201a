use std::sync::Arc;

use scout_common::LeadCriteria;
use scout_search::{LeadSearcher, SearchError, SearchProvider, TavilyClient, TavilyOptions};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TavilyClient {
    TavilyClient::new(
        "tvly-test".to_string(),
        TavilyOptions {
            endpoint: server.uri(),
            ..TavilyOptions::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn sends_fixed_parameters_and_builds_digest() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(json!({
            "api_key": "tvly-test",
            "query": "Bedrijven in de IT-diensten gevestigd in Utrecht.",
            "search_depth": "advanced",
            "include_answer": false,
            "include_images": false,
            "include_raw_content": false,
            "max_results": 40
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "ignored",
            "results": [
                {"title": "Acme IT", "url": "https://acme.nl", "content": "Beheer en hosting", "score": 0.91},
                {"title": "Beta Soft", "url": "https://beta.nl", "content": "Maatwerk software", "score": 0.85},
                {"title": "Gamma", "url": "https://gamma.nl", "content": "Cloud migraties", "score": 0.7}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let searcher = LeadSearcher::new(Arc::new(client_for(&server)));
    let digest = searcher
        .search(&LeadCriteria::new("IT-diensten", "Utrecht", ""))
        .await
        .unwrap();

    assert_eq!(digest.hit_count(), 3);
    assert!(digest
        .as_str()
        .contains("--- Resultaat 3 ---\nTitel: Gamma\nURL: https://gamma.nl\nInhoud: Cloud migraties"));
}

#[tokio::test]
async fn service_unavailable_is_an_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.search("anything").await.unwrap_err();

    match err {
        SearchError::Http(http) => {
            assert_eq!(http.status().map(|s| s.as_u16()), Some(503));
            assert!(http.to_string().contains("upstream overloaded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_result_list_gives_empty_digest() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let searcher = LeadSearcher::new(Arc::new(client_for(&server)));
    let digest = searcher.search(&LeadCriteria::default()).await.unwrap();
    assert!(digest.is_empty());
}

#[tokio::test]
async fn endpoint_behind_a_path_prefix_posts_under_that_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tavily/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"title": "Acme IT", "url": "https://acme.nl", "content": "Beheer"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TavilyClient::new(
        "tvly-test".to_string(),
        TavilyOptions {
            endpoint: format!("{}/tavily", server.uri()),
            ..TavilyOptions::default()
        },
    )
    .unwrap();
    let hits = client.search("bakkers in Utrecht").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Acme IT");
}

#[test]
fn blank_api_key_is_rejected_up_front() {
    let err = TavilyClient::new("  ".into(), TavilyOptions::default())
        .err()
        .expect("blank key must fail");
    assert!(matches!(err, SearchError::Config(_)));
}
