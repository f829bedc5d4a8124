//! Wire payloads of the social platform API.

use serde::Deserialize;

/// `GET /2/users/by/username/{handle}`.
///
/// An unknown handle still answers 200, with `errors` set and `data` absent.
#[derive(Debug, Deserialize)]
pub struct UserLookupResponse {
    pub data: Option<UserData>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
}

/// `GET /2/users/{id}/tweets`. `data` is absent when the timeline is empty.
#[derive(Debug, Deserialize)]
pub struct TimelineResponse {
    #[serde(default)]
    pub data: Vec<TweetData>,
}

#[derive(Debug, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiProblem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}
