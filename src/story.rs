//! Story entities: single records and the ordered front-page list.

use crate::api::{Api, StoryRecord};
use crate::error::{Error, Result};
use crate::user::User;
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// One story record.
///
/// Constructed from a server-supplied record and never mutated afterwards.
/// `story_id` is server-assigned, opaque, and unique within any list or
/// favorites set it appears in.
#[derive(Debug, Clone)]
pub struct Story {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Build a story from its wire record.
    pub fn from_record(record: StoryRecord) -> Self {
        Self {
            story_id: record.story_id,
            title: record.title,
            author: record.author,
            url: record.url,
            username: record.username,
            created_at: record.created_at,
        }
    }

    /// Fetch one story by identifier.
    ///
    /// [`Error::NotFound`] and [`Error::Network`] propagate to the caller.
    pub async fn fetch(api: &Api, story_id: &str) -> Result<Self> {
        let record = api.story(story_id).await?;
        Ok(Self::from_record(record))
    }

    /// Derive the display hostname from the story URL.
    ///
    /// Computed on demand, not stored. Fails with [`Error::MalformedUrl`]
    /// when the URL is not an absolute URL with a host component.
    pub fn hostname(&self) -> Result<String> {
        let parsed = Url::parse(&self.url).map_err(|e| Error::MalformedUrl(e.to_string()))?;
        parsed
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| Error::MalformedUrl(format!("no host in {}", self.url)))
    }
}

/// Payload for creating a new story.
#[derive(Debug, Clone, Serialize)]
pub struct StoryDraft {
    pub author: String,
    pub title: String,
    pub url: String,
}

/// The ordered story collection shown to users.
///
/// Insertion order is display order: newly created stories go to the front,
/// never the back. There is no removal operation.
#[derive(Debug, Clone, Default)]
pub struct StoryList {
    stories: Vec<Story>,
}

impl StoryList {
    /// Fetch the full remote story collection. No authentication required.
    pub async fn fetch(api: &Api) -> Result<Self> {
        let records = api.stories().await?;
        Ok(Self::from_records(records))
    }

    fn from_records(records: Vec<StoryRecord>) -> Self {
        Self {
            stories: records.into_iter().map(Story::from_record).collect(),
        }
    }

    /// Create a story on the service and prepend it to this list.
    ///
    /// Issues an authenticated create request with the user's token; on
    /// success the resulting story lands at index 0 and a reference to it is
    /// returned. [`Error::Auth`], [`Error::Validation`] and
    /// [`Error::Network`] propagate uncaught.
    pub async fn add_story(&mut self, api: &Api, user: &User, draft: &StoryDraft) -> Result<&Story> {
        let record = api.create_story(user.token(), draft).await?;
        self.prepend(Story::from_record(record));
        Ok(&self.stories[0])
    }

    fn prepend(&mut self, story: Story) {
        self.stories.insert(0, story);
    }

    /// The stories in display order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Story> {
        self.stories.iter()
    }
}
