use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Number of leading characters of the text used as a display title.
pub const TITLE_LENGTH: usize = 30;

/// A published post, as read back from the store: author and group
/// columns are joined in so listings and the detail page can render
/// without further lookups.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
    pub group_id: Option<i64>,
    pub group_title: Option<String>,
    pub group_slug: Option<String>,
}

impl Post {
    /// First `TITLE_LENGTH` characters of the text, counted in chars so
    /// multi-byte input never splits.
    pub fn preview_title(&self) -> String {
        self.text.chars().take(TITLE_LENGTH).collect()
    }

    pub fn pub_date_display(&self) -> String {
        self.pub_date.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn has_group(&self) -> bool {
        self.group_id.is_some()
    }

    pub fn group_name(&self) -> &str {
        self.group_title.as_deref().unwrap_or("")
    }

    pub fn group_link(&self) -> String {
        self.group_slug
            .as_deref()
            .map(|slug| format!("/group/{slug}/"))
            .unwrap_or_default()
    }
}

/// Fields the caller controls when publishing. `pub_date` is assigned by
/// the store at insert time and never updated afterwards.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub text: String,
    pub group_id: Option<i64>,
}

/// The only fields an edit may touch.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub text: String,
    pub group_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_text(text: &str) -> Post {
        Post {
            id: 1,
            text: text.to_string(),
            pub_date: Utc::now(),
            author_id: Uuid::new_v4(),
            author_username: "author".to_string(),
            group_id: None,
            group_title: None,
            group_slug: None,
        }
    }

    #[test]
    fn preview_title_keeps_short_text_whole() {
        let post = post_with_text("short enough");
        assert_eq!(post.preview_title(), "short enough");
    }

    #[test]
    fn preview_title_truncates_to_thirty_chars() {
        let post = post_with_text(&"x".repeat(80));
        assert_eq!(post.preview_title().chars().count(), TITLE_LENGTH);
    }

    #[test]
    fn preview_title_counts_chars_not_bytes() {
        let post = post_with_text(&"ф".repeat(40));
        assert_eq!(post.preview_title().chars().count(), TITLE_LENGTH);
    }

    #[test]
    fn group_link_is_empty_without_group() {
        let post = post_with_text("text");
        assert!(!post.has_group());
        assert_eq!(post.group_link(), "");
    }
}
