//! Thin HTTP wrapper over the Hack or Snooze REST API.
//!
//! All operations are JSON over HTTPS against a fixed base endpoint. This
//! module knows nothing about client-side state; it issues one request per
//! call and hands back wire records for the entity layer to construct
//! [`Story`](crate::Story) and [`User`](crate::User) values from.

use crate::error::{Error, Result};
use crate::story::StoryDraft;
use crate::user::Token;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://hack-or-snooze-v3.herokuapp.com";

/// Hack or Snooze API client.
#[derive(Clone)]
pub struct Api {
    client: reqwest::Client,
    base_url: String,
}

impl Api {
    /// Create a new client against the production endpoint.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: API_BASE.to_string(),
        }
    }

    /// Override the base endpoint (useful for pointing at a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the full story collection. No authentication required.
    pub async fn stories(&self) -> Result<Vec<StoryRecord>> {
        let response = self
            .client
            .get(format!("{}/stories", self.base_url))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body: StoriesResponse = parse_json(check_status(response).await?).await?;
        Ok(body.stories)
    }

    /// Fetch one story by identifier. No authentication required.
    pub async fn story(&self, story_id: &str) -> Result<StoryRecord> {
        let response = self
            .client
            .get(format!("{}/stories/{story_id}", self.base_url))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body: StoryResponse = parse_json(check_status(response).await?).await?;
        Ok(body.story)
    }

    /// Create a new story. The token rides in the request body.
    pub async fn create_story(&self, token: &Token, draft: &StoryDraft) -> Result<StoryRecord> {
        let response = self
            .client
            .post(format!("{}/stories", self.base_url))
            .json(&CreateStoryBody { token, story: draft })
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body: StoryResponse = parse_json(check_status(response).await?).await?;
        Ok(body.story)
    }

    /// Register a new account, returning the profile and an issued token.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<(UserRecord, Token)> {
        let response = self
            .client
            .post(format!("{}/signup", self.base_url))
            .json(&SignupBody {
                user: SignupUser {
                    username,
                    password,
                    name,
                },
            })
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body: AuthResponse = parse_json(check_status(response).await?).await?;
        Ok((body.user, body.token))
    }

    /// Log in with existing credentials, returning the profile and a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<(UserRecord, Token)> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginBody {
                user: LoginUser { username, password },
            })
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body: AuthResponse = parse_json(check_status(response).await?).await?;
        Ok((body.user, body.token))
    }

    /// Fetch a user's profile, authenticating with the token as a query
    /// parameter.
    pub async fn user(&self, token: &Token, username: &str) -> Result<UserRecord> {
        let response = self
            .client
            .get(format!("{}/users/{username}", self.base_url))
            .query(&[("token", token.as_str())])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body: UserResponse = parse_json(check_status(response).await?).await?;
        Ok(body.user)
    }

    /// Mark a story as one of the user's favorites. 2xx body is unused.
    pub async fn add_favorite(&self, token: &Token, username: &str, story_id: &str) -> Result<()> {
        let response = self
            .client
            .post(format!(
                "{}/users/{username}/favorites/{story_id}",
                self.base_url
            ))
            .json(&TokenBody { token })
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }

    /// Remove a story from the user's favorites. 2xx body is unused.
    pub async fn remove_favorite(
        &self,
        token: &Token,
        username: &str,
        story_id: &str,
    ) -> Result<()> {
        let response = self
            .client
            .delete(format!(
                "{}/users/{username}/favorites/{story_id}",
                self.base_url
            ))
            .json(&TokenBody { token })
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a non-success status to the error taxonomy; pass 2xx through.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = status.as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(classify_status(code, message))
}

fn classify_status(status: u16, message: String) -> Error {
    match status {
        401 | 403 => Error::Auth(message),
        404 => Error::NotFound(message),
        400 | 409 | 422 => Error::Validation(message),
        _ => Error::Api { status, message },
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| Error::Parse(e.to_string()))
}

// ============================================================================
// Wire records
// ============================================================================

/// One story as the service represents it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// One user profile as the service represents it.
///
/// The user's own stories arrive under the wire key `stories`; the rename
/// keeps the client-side name `own_stories`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub favorites: Vec<StoryRecord>,
    #[serde(rename = "stories")]
    pub own_stories: Vec<StoryRecord>,
}

// ============================================================================
// Internal request/response envelopes
// ============================================================================

#[derive(Serialize)]
struct CreateStoryBody<'a> {
    token: &'a Token,
    story: &'a StoryDraft,
}

#[derive(Serialize)]
struct TokenBody<'a> {
    token: &'a Token,
}

#[derive(Serialize)]
struct SignupBody<'a> {
    user: SignupUser<'a>,
}

#[derive(Serialize)]
struct SignupUser<'a> {
    username: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    user: LoginUser<'a>,
}

#[derive(Serialize)]
struct LoginUser<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct StoriesResponse {
    stories: Vec<StoryRecord>,
}

#[derive(Deserialize)]
struct StoryResponse {
    story: StoryRecord,
}

#[derive(Deserialize)]
struct UserResponse {
    user: UserRecord,
}

#[derive(Deserialize)]
struct AuthResponse {
    user: UserRecord,
    token: Token,
}
