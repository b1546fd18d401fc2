use sqlx::SqlitePool;

use crate::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Follow {
    pub id: i64,
    pub user_id: i64,
    pub author_id: i64,
}

impl Follow {
    /// Subscribes `user_id` to `author_id`. Following yourself or following
    /// twice creates nothing; the result says whether a row was added.
    pub async fn follow(db_pool: &SqlitePool, user_id: i64, author_id: i64) -> AppResult<bool> {
        if user_id == author_id {
            return Ok(false);
        }

        let created = sqlx::query(
            "INSERT INTO follows (user_id,author_id) VALUES (?,?) \
             ON CONFLICT (user_id,author_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(author_id)
        .execute(db_pool)
        .await?
        .rows_affected()
            == 1;

        if created {
            tracing::info!(user_id, author_id, "follow");
        }
        Ok(created)
    }

    /// Deleting a follow that doesn't exist is not an error.
    pub async fn unfollow(db_pool: &SqlitePool, user_id: i64, author_id: i64) -> AppResult<bool> {
        let deleted = sqlx::query("DELETE FROM follows WHERE user_id=? AND author_id=?")
            .bind(user_id)
            .bind(author_id)
            .execute(db_pool)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            tracing::info!(user_id, author_id, "unfollow");
        }
        Ok(deleted)
    }

    pub async fn find(db_pool: &SqlitePool, user_id: i64, author_id: i64) -> AppResult<Option<Follow>> {
        Ok(sqlx::query_as("SELECT * FROM follows WHERE user_id=? AND author_id=?")
            .bind(user_id)
            .bind(author_id)
            .fetch_optional(db_pool)
            .await?)
    }

    pub async fn exists(db_pool: &SqlitePool, user_id: i64, author_id: i64) -> AppResult<bool> {
        Ok(Follow::find(db_pool, user_id, author_id).await?.is_some())
    }

    pub async fn count_followers(db_pool: &SqlitePool, author_id: i64) -> AppResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE author_id=?")
            .bind(author_id)
            .fetch_one(db_pool)
            .await?)
    }

    pub async fn count_following(db_pool: &SqlitePool, user_id: i64) -> AppResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE user_id=?")
            .bind(user_id)
            .fetch_one(db_pool)
            .await?)
    }
}
