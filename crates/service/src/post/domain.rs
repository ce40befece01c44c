use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: i32,
}

/// Partial update. `content: Some(None)` clears the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub published: Option<bool>,
    pub author_id: Option<i32>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.published.is_none() && self.author_id.is_none()
    }

    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title { post.title = title; }
        if let Some(content) = self.content { post.content = content; }
        if let Some(published) = self.published { post.published = published; }
        if let Some(author_id) = self.author_id { post.author_id = author_id; }
    }
}

impl From<models::post::Model> for Post {
    fn from(m: models::post::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            published: m.published,
            author_id: m.author_id,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}
