use events_core::{parse_events, Action, EventRecord};
use log::{debug, error, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

pub const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("got response status {0}")]
    Http(StatusCode),
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

pub async fn fetch_events(
    client: &Client,
    endpoint: &Url,
    api_key: &str,
) -> Result<Vec<EventRecord>, FetchError> {
    debug!("Sending HTTP request to {endpoint}");
    let response = client
        .get(endpoint.clone())
        .header(API_KEY_HEADER, api_key)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(status));
    }

    debug!("Reading response body");
    let body = response.bytes().await?;

    Ok(parse_events(&body)?)
}

/// Runs the one startup fetch and turns its outcome into a view action.
/// Every kind of failure ends up as [`Action::FetchFailed`].
pub async fn load(client: &Client, endpoint: &Url, api_key: &str) -> Action {
    match fetch_events(client, endpoint, api_key).await {
        Ok(events) => {
            info!("Fetched {} events", events.len());
            Action::FetchSucceeded(events)
        }
        Err(err) => {
            error!("Failed to fetch events: {err}");
            Action::FetchFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{http::HeaderMap, response::IntoResponse, routing::get, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    const KEY: &str = "test-key";

    async fn spawn_upstream(router: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{addr}/events").parse().unwrap()
    }

    async fn sheet(headers: HeaderMap) -> axum::response::Response {
        if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some(KEY) {
            return (StatusCode::UNAUTHORIZED, "missing api key").into_response();
        }

        Json(json!({
            "data": [
                {
                    "iD": "1",
                    "event": "Gala",
                    "category": "Dinner",
                    "startDate": "2024-05-01",
                    "startTime": "18:00",
                    "endTime": "20:00",
                    "avaiability": 12
                },
                {
                    "iD": "2",
                    "event": "BBQ",
                    "category": "Outdoor",
                    "startDate": "2024-05-01",
                    "startTime": "12:00",
                    "endTime": "14:00",
                    "avaiability": 0
                }
            ]
        }))
        .into_response()
    }

    #[tokio::test]
    async fn fetches_and_parses_events() {
        let url = spawn_upstream(Router::new().route("/events", get(sheet))).await;

        let events = fetch_events(&Client::new(), &url, KEY).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Gala");
        assert_eq!(events[1].availability, 0);
    }

    #[tokio::test]
    async fn sends_api_key_header() {
        let url = spawn_upstream(Router::new().route("/events", get(sheet))).await;

        let err = fetch_events(&Client::new(), &url, "wrong").await.unwrap_err();

        assert!(matches!(err, FetchError::Http(StatusCode::UNAUTHORIZED)));
    }

    #[tokio::test]
    async fn server_error_fails_the_load() {
        let router = Router::new().route(
            "/events",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = spawn_upstream(router).await;

        assert_eq!(load(&Client::new(), &url, KEY).await, Action::FetchFailed);
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_failure() {
        let router = Router::new().route("/events", get(|| async { Json(json!({ "rows": [] })) }));
        let url = spawn_upstream(router).await;

        let err = fetch_events(&Client::new(), &url, KEY).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url: Url = format!("http://{addr}/events").parse().unwrap();

        let err = fetch_events(&Client::new(), &url, KEY).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn successful_load_becomes_fetch_succeeded() {
        let url = spawn_upstream(Router::new().route("/events", get(sheet))).await;

        match load(&Client::new(), &url, KEY).await {
            Action::FetchSucceeded(events) => assert_eq!(events.len(), 2),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
