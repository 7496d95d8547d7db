use httpmock::prelude::*;
use lcstats::{Config, FetchFailure, LeetCodeClient, ProfileStats, Username};
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;

fn client_for(server: &MockServer) -> LeetCodeClient {
    let config = Config {
        endpoint: server.url("/graphql"),
        profile_base: server.base_url(),
        timeout: Duration::from_secs(5),
    };
    LeetCodeClient::new(config).unwrap()
}

fn alice() -> Username {
    Username::parse("alice").unwrap()
}

fn profile_body(ranking: serde_json::Value) -> serde_json::Value {
    json!({
        "data": {
            "matchedUser": {
                "submitStatsGlobal": {
                    "acSubmissionNum": [
                        {"difficulty": "All", "count": 150},
                        {"difficulty": "Easy", "count": 80},
                        {"difficulty": "Medium", "count": 60},
                        {"difficulty": "Hard", "count": 10}
                    ]
                },
                "profile": {"ranking": ranking}
            }
        }
    })
}

#[tokio::test]
async fn fetch_normalizes_profile() {
    let server = MockServer::start_async().await;
    let referer = format!("{}/alice/", server.base_url());
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .header("content-type", "application/json")
            .header("referer", referer.as_str())
            .json_body_partial(
                r#"{"operationName":"getUserProfile","variables":{"username":"alice"}}"#,
            )
            .body_contains("matchedUser(username: $username)");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(profile_body(json!(12345)));
    });

    let stats = client_for(&server).fetch(&alice()).await.unwrap();
    mock.assert();

    assert_eq!(stats.username(), "alice");
    assert_eq!(stats.count("Easy"), Some(80));
    assert_eq!(stats.count("Medium"), Some(60));
    assert_eq!(stats.count("Hard"), Some(10));
    assert_eq!(stats.count("All"), None);
    assert_eq!(stats.counts().len(), 3);
    assert_eq!(stats.total_solved(), 150);
    assert_eq!(stats.ranking(), Some(12345));

    assert_eq!(
        serde_json::to_value(&stats).unwrap(),
        json!({
            "username": "alice",
            "counts_by_difficulty": {"Easy": 80, "Medium": 60, "Hard": 10},
            "total_solved": 150,
            "ranking": 12345
        })
    );
}

#[tokio::test]
async fn null_ranking_is_kept_as_none() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(profile_body(json!(null)));
    });

    let stats = client_for(&server).fetch(&alice()).await.unwrap();
    assert_eq!(stats.ranking(), None);
    assert_eq!(stats.total_solved(), 150);
    assert!(lcstats::report::render(&stats).contains("Global Rank:  N/A"));
}

#[tokio::test]
async fn unknown_user_is_a_failure() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(json!({
            "errors": [{"message": "That user does not exist."}],
            "data": {"matchedUser": null}
        }));
    });

    let ghost = Username::parse("no-such-user").unwrap();
    assert_eq!(client_for(&server).fetch(&ghost).await, Err(FetchFailure));
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/graphql");
        // A valid body must not rescue a bad status.
        then.status(500).json_body(profile_body(json!(1)));
    });

    assert_eq!(client_for(&server).fetch(&alice()).await, Err(FetchFailure));
    mock.assert_hits(1);
}

#[tokio::test]
async fn success_status_other_than_200_is_a_failure() {
    for status in [201, 202, 203] {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(status).json_body(profile_body(json!(12345)));
        });

        assert_eq!(
            client_for(&server).fetch(&alice()).await,
            Err(FetchFailure),
            "status {status} must not produce stats"
        );
        mock.assert_hits(1);
    }
}

#[tokio::test]
async fn forbidden_status_is_a_failure() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(403).body("forbidden");
    });

    assert_eq!(client_for(&server).fetch(&alice()).await, Err(FetchFailure));
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(json!({
            "data": {"matchedUser": {"submitStatsGlobal": null, "profile": {"ranking": 3}}}
        }));
    });

    assert_eq!(client_for(&server).fetch(&alice()).await, Err(FetchFailure));
}

#[tokio::test]
async fn connection_refused_is_a_failure() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = Config {
        endpoint: format!("http://127.0.0.1:{port}/graphql"),
        profile_base: format!("http://127.0.0.1:{port}"),
        timeout: Duration::from_secs(2),
    };
    let client = LeetCodeClient::new(config).unwrap();

    assert_eq!(client.fetch(&alice()).await, Err(FetchFailure));
}

#[tokio::test]
async fn stalled_upstream_hits_the_timeout() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(profile_body(json!(1)));
    });

    let config = Config {
        endpoint: server.url("/graphql"),
        profile_base: server.base_url(),
        timeout: Duration::from_millis(200),
    };
    let client = LeetCodeClient::new(config).unwrap();

    assert_eq!(client.fetch(&alice()).await, Err(FetchFailure));
}

#[tokio::test]
async fn repeated_fetches_are_identical() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(profile_body(json!(12345)));
    });

    let client = client_for(&server);
    let first: ProfileStats = client.fetch(&alice()).await.unwrap();
    let second: ProfileStats = client.fetch(&alice()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    // One request per call, no caching.
    mock.assert_hits(2);
}
