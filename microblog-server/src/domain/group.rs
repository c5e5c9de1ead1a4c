use sqlx::FromRow;

/// A community posts may optionally belong to. Groups are created by an
/// administrative process and referenced, never owned, by posts.
#[derive(Debug, Clone, FromRow)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}
