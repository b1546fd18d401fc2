use std::fmt;

use anyhow::anyhow;
use sqlx::SqlitePool;

use crate::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

pub struct NewGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl Group {
    pub async fn create(db_pool: &SqlitePool, new: NewGroup) -> AppResult<Group> {
        if !is_valid_slug(&new.slug) {
            return Err(anyhow!("invalid group slug {:?}", new.slug).into());
        }
        if new.title.trim().is_empty() || new.title.chars().count() > 200 {
            return Err(anyhow!("group title must be 1 to 200 characters").into());
        }

        let group = sqlx::query_as::<_, Group>(
            "INSERT INTO post_groups (title,slug,description) VALUES (?,?,?) RETURNING *",
        )
        .bind(&new.title)
        .bind(&new.slug)
        .bind(&new.description)
        .fetch_one(db_pool)
        .await?;

        tracing::info!(group_id = group.id, "created group {}", group.slug);
        Ok(group)
    }

    pub async fn get(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Group>> {
        Ok(sqlx::query_as("SELECT * FROM post_groups WHERE id=?")
            .bind(id)
            .fetch_optional(db_pool)
            .await?)
    }

    pub async fn find_by_slug(db_pool: &SqlitePool, slug: &str) -> AppResult<Option<Group>> {
        Ok(sqlx::query_as("SELECT * FROM post_groups WHERE slug=?")
            .bind(slug)
            .fetch_optional(db_pool)
            .await?)
    }

    pub async fn list_all(db_pool: &SqlitePool) -> AppResult<Vec<Group>> {
        Ok(sqlx::query_as("SELECT * FROM post_groups ORDER BY title, id")
            .fetch_all(db_pool)
            .await?)
    }

    /// Deletes the group. Its posts stay, with no group.
    pub async fn delete(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM post_groups WHERE id=?")
            .bind(id)
            .execute(db_pool)
            .await?;
        Ok(())
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    (1..=200).contains(&slug.len())
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
