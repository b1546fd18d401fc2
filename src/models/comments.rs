use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub post_id: i64,
    pub author_id: i64,
    pub created: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CommentView {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub author_username: String,
}

pub struct NewComment {
    pub text: String,
    pub post_id: i64,
    pub author_id: i64,
}

impl Comment {
    pub async fn create(db_pool: &SqlitePool, new: NewComment) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (text,post_id,author_id,created) VALUES (?,?,?,?) RETURNING *",
        )
        .bind(&new.text)
        .bind(new.post_id)
        .bind(new.author_id)
        .bind(super::now())
        .fetch_one(db_pool)
        .await?;

        tracing::debug!(comment_id = comment.id, post_id = comment.post_id, "comment added");
        Ok(comment)
    }

    /// Oldest first.
    pub async fn list_for_post(db_pool: &SqlitePool, post_id: i64) -> AppResult<Vec<CommentView>> {
        Ok(sqlx::query_as(
            "SELECT c.id, c.text, c.post_id, c.author_id, c.created, u.username AS author_username \
             FROM comments c JOIN users u ON u.id = c.author_id \
             WHERE c.post_id=? ORDER BY c.created, c.id",
        )
        .bind(post_id)
        .fetch_all(db_pool)
        .await?)
    }
}
