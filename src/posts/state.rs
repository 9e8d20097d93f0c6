use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{content::ImageRef, week::DayOfWeek};

/// Lifecycle of one day's post.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PostStatus {
    Idle,
    Generating,
    Ready,
    Failed {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Idle
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub day: DayOfWeek,
    /// Empty until the first successful generation.
    pub text: String,
    pub image: Option<ImageRef>,
    #[serde(flatten)]
    pub status: PostStatus,
    pub generated_at: Option<DateTime<Utc>>,
}

impl PostRecord {
    pub fn new(day: DayOfWeek) -> Self {
        Self {
            day,
            text: String::new(),
            image: None,
            status: PostStatus::Idle,
            generated_at: None,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.status == PostStatus::Generating
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            PostStatus::Failed { error_message } => Some(error_message),
            _ => None,
        }
    }

    /// Marks the record as generating. Previous text and image stay until the
    /// attempt resolves.
    pub fn begin_generation(&mut self) {
        self.status = PostStatus::Generating;
    }

    pub fn complete(&mut self, text: String, image: ImageRef, at: DateTime<Utc>) {
        self.text = text;
        self.image = Some(image);
        self.generated_at = Some(at);
        self.status = PostStatus::Ready;
    }

    /// Content from earlier attempts is kept; only the status changes.
    pub fn fail(&mut self, error_message: impl Into<String>) {
        self.status = PostStatus::Failed {
            error_message: error_message.into(),
        };
    }
}

/// Generation state for the whole week plus the selected day.
///
/// Every day owns exactly one slot, fixed at construction.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostBoard {
    posts: [PostRecord; 7],
    selected_day: DayOfWeek,
}

impl Default for PostBoard {
    fn default() -> Self {
        Self {
            posts: DayOfWeek::ALL.map(PostRecord::new),
            selected_day: DayOfWeek::Monday,
        }
    }
}

impl PostBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, day: DayOfWeek) -> &PostRecord {
        &self.posts[day.index()]
    }

    pub fn post_mut(&mut self, day: DayOfWeek) -> &mut PostRecord {
        &mut self.posts[day.index()]
    }

    pub fn posts(&self) -> impl Iterator<Item = &PostRecord> {
        self.posts.iter()
    }

    pub fn selected_day(&self) -> DayOfWeek {
        self.selected_day
    }

    pub fn select_day(&mut self, day: DayOfWeek) {
        self.selected_day = day;
    }

    pub fn current_post(&self) -> &PostRecord {
        self.post(self.selected_day)
    }
}
