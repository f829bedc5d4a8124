//! HTTP client for the social platform.

use crate::types::{TimelineResponse, UserLookupResponse};
use campaign_verification::{ExternalUser, LookupError, Post, PostLookup};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Public API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";

/// Default timeout for lookup requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// The timeline endpoint accepts 5..=100 results per page.
const MIN_TIMELINE_RESULTS: u32 = 5;
const MAX_TIMELINE_RESULTS: u32 = 100;

/// Client for the user-lookup and user-timeline endpoints.
pub struct XApiClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl XApiClient {
    /// Create a client with default timeout settings.
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self::with_timeout(base_url, bearer_token, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        }
    }

    fn user_url(&self, handle: &str) -> String {
        format!("{}/2/users/by/username/{}", self.base_url, handle)
    }

    fn timeline_url(&self, user_id: &str, max_results: u32) -> String {
        format!(
            "{}/2/users/{}/tweets?max_results={}",
            self.base_url,
            user_id,
            max_results.clamp(MIN_TIMELINE_RESULTS, MAX_TIMELINE_RESULTS)
        )
    }

    /// GET `url` and decode the JSON body. `Ok(None)` on 404.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, LookupError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::Unreachable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    LookupError::Unreachable(format!("connection failed: {e}"))
                } else {
                    LookupError::RequestFailed(e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::TOO_MANY_REQUESTS => return Err(LookupError::RateLimited),
            s if !s.is_success() => {
                return Err(LookupError::RequestFailed(format!("HTTP status {s}")))
            }
            _ => {}
        }

        let body = response.json::<T>().await.map_err(|e| {
            LookupError::InvalidResponse(format!("failed to parse lookup response: {e}"))
        })?;
        Ok(Some(body))
    }
}

#[async_trait::async_trait]
impl PostLookup for XApiClient {
    async fn resolve_user(&self, handle: &str) -> Result<Option<ExternalUser>, LookupError> {
        let Some(resp) = self
            .get_json::<UserLookupResponse>(&self.user_url(handle))
            .await?
        else {
            return Ok(None);
        };
        if resp.data.is_none() {
            if let Some(problem) = resp.errors.first() {
                debug!(handle, title = %problem.title, detail = %problem.detail, "user lookup returned no data");
            }
        }
        Ok(resp.data.map(|d| ExternalUser {
            id: d.id,
            username: d.username,
        }))
    }

    async fn recent_posts(
        &self,
        user: &ExternalUser,
        max_results: u32,
    ) -> Result<Vec<Post>, LookupError> {
        let resp = self
            .get_json::<TimelineResponse>(&self.timeline_url(&user.id, max_results))
            .await?;
        Ok(resp
            .map(|r| r.data)
            .unwrap_or_default()
            .into_iter()
            .take(max_results as usize)
            .map(|t| Post {
                id: t.id,
                text: t.text,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = XApiClient::new(DEFAULT_API_BASE_URL, "token");
        drop(client);
    }

    #[test]
    fn urls_trim_trailing_slash() {
        let client = XApiClient::new("http://localhost:8080/", "token");
        assert_eq!(
            client.user_url("alice"),
            "http://localhost:8080/2/users/by/username/alice"
        );
    }

    #[test]
    fn timeline_page_size_is_clamped() {
        let client = XApiClient::new("http://x", "t");
        assert!(client.timeline_url("1", 1).ends_with("max_results=5"));
        assert!(client.timeline_url("1", 20).ends_with("max_results=20"));
        assert!(client.timeline_url("1", 500).ends_with("max_results=100"));
    }

    #[test]
    fn test_user_lookup_deserialization() {
        let json = r#"{"data": {"id": "2244994945", "name": "Dev", "username": "dev"}}"#;
        let resp: UserLookupResponse = serde_json::from_str(json).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.id, "2244994945");
        assert_eq!(data.username, "dev");
    }

    #[test]
    fn test_unknown_user_deserialization() {
        let json = r#"{"errors": [{"value": "nobody", "detail": "Could not find user with username: [nobody].", "title": "Not Found Error", "resource_type": "user", "type": "https://api.twitter.com/2/problems/resource-not-found"}]}"#;
        let resp: UserLookupResponse = serde_json::from_str(json).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors[0].title, "Not Found Error");
    }

    #[test]
    fn test_empty_timeline_deserialization() {
        let json = r#"{"meta": {"result_count": 0}}"#;
        let resp: TimelineResponse = serde_json::from_str(json).unwrap();
        assert!(resp.data.is_empty());
    }

    #[test]
    fn test_timeline_deserialization() {
        let json = r#"{"data": [{"id": "1", "text": "code a1b2c3d4", "edit_history_tweet_ids": ["1"]}], "meta": {"result_count": 1}}"#;
        let resp: TimelineResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.data[0].text, "code a1b2c3d4");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_lookup_error() {
        let client = XApiClient::with_timeout("http://127.0.0.1:1", "t", Duration::from_millis(500));
        let result = client.resolve_user("alice").await;
        assert!(result.is_err());
    }
}
