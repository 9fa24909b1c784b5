//! Minimal Hack or Snooze API client.
//!
//! This crate provides the client-side data and session layer for the Hack or
//! Snooze story-sharing service:
//! - [`Story`] and [`StoryList`] for browsing and submitting stories
//! - [`User`] for signup, login, session restoration, and favorites
//! - [`Api`] as the thin HTTP wrapper underneath
//!
//! # Quick Start
//!
//! ```ignore
//! use snooze::{Api, StoryDraft, StoryList, User};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Api::new();
//!
//!     let mut stories = StoryList::fetch(&api).await?;
//!     let mut user = User::login(&api, "hueter", "foo123").await?;
//!
//!     let draft = StoryDraft {
//!         author: "Matt Lane".to_string(),
//!         title: "The best story ever".to_string(),
//!         url: "https://www.rithmschool.com".to_string(),
//!     };
//!     let story = stories.add_story(&api, &user, &draft).await?.clone();
//!
//!     user.add_favorite(&api, &story).await?;
//!     println!("favorited a story from {}", story.hostname()?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod story;
pub mod user;

// Re-export for convenience
pub use api::{Api, StoryRecord, UserRecord};
pub use error::{Error, Result};
pub use story::{Story, StoryDraft, StoryList};
pub use user::{Token, User};
