//! Authenticated user sessions and favorite management.
//!
//! A [`User`] only ever comes into existence through [`User::signup`],
//! [`User::login`], or [`User::restore_session`]. It holds exactly one token
//! for its lifetime; logging out is simply dropping the value.

use crate::api::{Api, UserRecord};
use crate::error::Result;
use crate::story::Story;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque server-issued session credential.
///
/// Required for every mutating call and never validated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// An authenticated user session.
///
/// `favorites` mirrors the server's record of the user's favorites as of the
/// last operation the client performed; favorite mutations apply locally
/// before the remote call resolves (optimistic update) and are not rolled
/// back if the remote call fails.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    favorites: Vec<Story>,
    own_stories: Vec<Story>,
    token: Token,
}

impl User {
    fn from_record(record: UserRecord, token: Token) -> Self {
        Self {
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            favorites: record.favorites.into_iter().map(Story::from_record).collect(),
            own_stories: record
                .own_stories
                .into_iter()
                .map(Story::from_record)
                .collect(),
            token,
        }
    }

    /// Register a new account and return the authenticated session.
    ///
    /// [`Error::Validation`](crate::Error::Validation) (duplicate username,
    /// weak password) and [`Error::Network`](crate::Error::Network) propagate.
    pub async fn signup(api: &Api, username: &str, password: &str, name: &str) -> Result<Self> {
        let (record, token) = api.signup(username, password, name).await?;
        Ok(Self::from_record(record, token))
    }

    /// Log in with existing credentials and return the authenticated session.
    ///
    /// [`Error::Auth`](crate::Error::Auth) (bad credentials) and
    /// [`Error::Network`](crate::Error::Network) propagate.
    pub async fn login(api: &Api, username: &str, password: &str) -> Result<Self> {
        let (record, token) = api.login(username, password).await?;
        Ok(Self::from_record(record, token))
    }

    /// Rebuild a session from a previously stored token and username.
    ///
    /// This is the one fail-soft operation in the client: on ANY failure (bad
    /// token, network error, malformed response) it logs the failure and
    /// returns `None`, so a corrupt or expired stored credential degrades to
    /// anonymous browsing instead of blocking startup.
    pub async fn restore_session(api: &Api, token: Token, username: &str) -> Option<Self> {
        match api.user(&token, username).await {
            Ok(record) => Some(Self::from_record(record, token)),
            Err(err) => {
                tracing::warn!(username, error = %err, "session restore failed");
                None
            }
        }
    }

    /// Mark a story as a favorite.
    ///
    /// The local favorites list is updated before the remote call is awaited
    /// (optimistic update). If the story is already a favorite the local list
    /// is left unchanged, keeping favorites unique by `story_id`. A remote
    /// failure propagates but does NOT roll back the local state; callers
    /// that need strict agreement with the server must re-fetch the profile.
    pub async fn add_favorite(&mut self, api: &Api, story: &Story) -> Result<()> {
        if !self.is_favorite(story) {
            self.favorites.push(story.clone());
        }
        api.add_favorite(&self.token, &self.username, &story.story_id)
            .await
    }

    /// Remove a story from the favorites.
    ///
    /// Locally idempotent: the list is filtered by `story_id` before the
    /// remote call is awaited, so a second call is a no-op on local state.
    /// Same no-rollback contract as [`User::add_favorite`].
    pub async fn remove_favorite(&mut self, api: &Api, story: &Story) -> Result<()> {
        self.favorites.retain(|s| s.story_id != story.story_id);
        api.remove_favorite(&self.token, &self.username, &story.story_id)
            .await
    }

    /// Whether the story is currently in the local favorites.
    pub fn is_favorite(&self, story: &Story) -> bool {
        self.favorites.iter().any(|s| s.story_id == story.story_id)
    }

    /// The user's favorite stories, in server order plus local additions.
    pub fn favorites(&self) -> &[Story] {
        &self.favorites
    }

    /// The stories this user authored.
    pub fn own_stories(&self) -> &[Story] {
        &self.own_stories
    }

    /// The session token.
    pub fn token(&self) -> &Token {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: &str) -> Story {
        Story {
            story_id: id.to_string(),
            title: "T".to_string(),
            author: "A".to_string(),
            url: "http://x.com".to_string(),
            username: "u".to_string(),
            created_at: Utc::now(),
        }
    }

    fn user() -> User {
        User {
            username: "u".to_string(),
            name: "U".to_string(),
            created_at: Utc::now(),
            favorites: Vec::new(),
            own_stories: Vec::new(),
            token: Token::new("t"),
        }
    }

    /// An Api whose every call fails with a connection error.
    fn unreachable_api() -> Api {
        Api::new().with_base_url("http://127.0.0.1:1")
    }

    #[test]
    fn test_from_record_maps_fields() {
        let json = r#"{
            "username": "hueter",
            "name": "Michael",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "favorites": [
                {"storyId": "f1", "title": "t", "author": "a", "url": "http://x.com",
                 "username": "u", "createdAt": "2024-01-01T00:00:00.000Z"}
            ],
            "stories": [
                {"storyId": "s1", "title": "t", "author": "a", "url": "http://x.com",
                 "username": "u", "createdAt": "2024-01-01T00:00:00.000Z"}
            ]
        }"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        let user = User::from_record(record, Token::new("tok"));
        assert_eq!(user.username, "hueter");
        assert_eq!(user.favorites().len(), 1);
        assert_eq!(user.own_stories().len(), 1);
        assert_eq!(user.own_stories()[0].story_id, "s1");
        assert_eq!(user.token().as_str(), "tok");
    }

    #[tokio::test]
    async fn test_add_favorite_applies_locally_despite_remote_failure() {
        let api = unreachable_api();
        let mut u = user();
        let s = story("1");

        let result = u.add_favorite(&api, &s).await;

        assert!(result.is_err());
        assert!(u.is_favorite(&s));
        assert_eq!(u.favorites().len(), 1);
    }

    #[tokio::test]
    async fn test_add_favorite_is_unique_by_story_id() {
        let api = unreachable_api();
        let mut u = user();
        let s = story("1");

        let _ = u.add_favorite(&api, &s).await;
        let _ = u.add_favorite(&api, &s).await;

        assert_eq!(u.favorites().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_favorite_applies_locally_despite_remote_failure() {
        let api = unreachable_api();
        let mut u = user();
        let s = story("1");
        let _ = u.add_favorite(&api, &s).await;

        let result = u.remove_favorite(&api, &s).await;

        assert!(result.is_err());
        assert!(!u.is_favorite(&s));
        assert!(u.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_remove_favorite_is_idempotent() {
        let api = unreachable_api();
        let mut u = user();
        let s = story("1");
        let other = story("2");
        let _ = u.add_favorite(&api, &other).await;

        let _ = u.remove_favorite(&api, &s).await;
        let _ = u.remove_favorite(&api, &s).await;

        assert_eq!(u.favorites().len(), 1);
        assert!(u.is_favorite(&other));
    }

    #[tokio::test]
    async fn test_restore_session_fails_soft() {
        let api = unreachable_api();
        let restored = User::restore_session(&api, Token::new("stale"), "hueter").await;
        assert!(restored.is_none());
    }

    #[test]
    fn test_is_favorite_keyed_by_story_id() {
        let mut u = user();
        u.favorites.push(story("1"));

        let mut same_id = story("1");
        same_id.title = "different title".to_string();
        assert!(u.is_favorite(&same_id));
        assert!(!u.is_favorite(&story("2")));
    }
}
