use std::fmt;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use time::OffsetDateTime;

use crate::{feed::Feed, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub pub_date: OffsetDateTime,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub image: Option<String>,
}

/// A post with what a feed needs to show it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PostView {
    #[sqlx(flatten)]
    pub post: Post,
    pub author_username: String,
    pub group_slug: Option<String>,
    pub group_title: Option<String>,
    pub comment_count: i64,
}

pub struct NewPost {
    pub text: String,
    pub author_id: i64,
    pub group_id: Option<i64>,
    pub image: Option<String>,
}

/// The editable part of a post.
pub struct PostChanges {
    pub text: String,
    pub group_id: Option<i64>,
    pub image: Option<String>,
}

const VIEW_SELECT: &str = "SELECT p.id, p.text, p.pub_date, p.author_id, p.group_id, p.image, \
    u.username AS author_username, g.slug AS group_slug, g.title AS group_title, \
    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count \
    FROM posts p \
    JOIN users u ON u.id = p.author_id \
    LEFT JOIN post_groups g ON g.id = p.group_id";

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let head: String = self.text.chars().take(15).collect();
        f.write_str(&head)
    }
}

impl Post {
    pub async fn create(db_pool: &SqlitePool, new: NewPost) -> AppResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (text,pub_date,author_id,group_id,image) VALUES (?,?,?,?,?) RETURNING *",
        )
        .bind(&new.text)
        .bind(super::now())
        .bind(new.author_id)
        .bind(new.group_id)
        .bind(&new.image)
        .fetch_one(db_pool)
        .await?;

        tracing::info!(post_id = post.id, author_id = post.author_id, "post created");
        Ok(post)
    }

    pub async fn get(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Post>> {
        Ok(sqlx::query_as("SELECT * FROM posts WHERE id=?")
            .bind(id)
            .fetch_optional(db_pool)
            .await?)
    }

    pub async fn view(db_pool: &SqlitePool, id: i64) -> AppResult<Option<PostView>> {
        Ok(sqlx::query_as(&format!("{VIEW_SELECT} WHERE p.id=?"))
            .bind(id)
            .fetch_optional(db_pool)
            .await?)
    }

    /// Replaces text, group and image. Author and publish date never change.
    pub async fn update(db_pool: &SqlitePool, id: i64, changes: PostChanges) -> AppResult<()> {
        sqlx::query("UPDATE posts SET text=?, group_id=?, image=? WHERE id=?")
            .bind(&changes.text)
            .bind(changes.group_id)
            .bind(&changes.image)
            .bind(id)
            .execute(db_pool)
            .await?;

        tracing::info!(post_id = id, "post edited");
        Ok(())
    }

    pub async fn delete(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM posts WHERE id=?")
            .bind(id)
            .execute(db_pool)
            .await?;
        Ok(())
    }

    pub async fn count(db_pool: &SqlitePool, feed: &Feed) -> AppResult<i64> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM posts p");
        feed.push_filter(&mut query);

        Ok(query.build_query_scalar().fetch_one(db_pool).await?)
    }

    /// Newest first; posts published in the same second keep insertion order.
    pub async fn list(
        db_pool: &SqlitePool,
        feed: &Feed,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<PostView>> {
        let mut query = QueryBuilder::<Sqlite>::new(VIEW_SELECT);
        feed.push_filter(&mut query);
        query
            .push(" ORDER BY p.pub_date DESC, p.id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        Ok(query.build_query_as().fetch_all(db_pool).await?)
    }
}
