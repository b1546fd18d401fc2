use std::fmt;

use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    password_hash: String,
    pub date_joined: OffsetDateTime,
}

pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.username)
    }
}

impl User {
    pub async fn create(db_pool: &SqlitePool, new: NewUser, hash_cost: u32) -> AppResult<User> {
        let NewUser { username, first_name, last_name, email, password } = new;
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, hash_cost)).await??;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username,first_name,last_name,email,password_hash,date_joined) \
             VALUES (?,?,?,?,?,?) RETURNING *",
        )
        .bind(&username)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&password_hash)
        .bind(super::now())
        .fetch_one(db_pool)
        .await?;

        tracing::info!(user_id = user.id, "adding @{}", user.username);
        Ok(user)
    }

    pub async fn get(db_pool: &SqlitePool, id: i64) -> AppResult<Option<User>> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE id=?")
            .bind(id)
            .fetch_optional(db_pool)
            .await?)
    }

    pub async fn find_by_username(db_pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
        Ok(sqlx::query_as("SELECT * FROM users WHERE username=?")
            .bind(username)
            .fetch_optional(db_pool)
            .await?)
    }

    /// Looks the user up and checks the password; `None` on any mismatch.
    pub async fn authenticate(
        db_pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        let Some(user) = User::find_by_username(db_pool, username).await? else {
            return Ok(None);
        };

        let password = password.to_owned();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;

        Ok(matches.then_some(user))
    }

    /// Removes the user together with their posts, comments and follows.
    pub async fn delete(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE id=?")
            .bind(id)
            .execute(db_pool)
            .await?;
        Ok(())
    }

    pub async fn post_count(db_pool: &SqlitePool, id: i64) -> AppResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id=?")
            .bind(id)
            .fetch_one(db_pool)
            .await?)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// Usernames are 1 to 150 letters, digits or `@.+-_`.
pub fn is_valid_username(username: &str) -> bool {
    (1..=150).contains(&username.chars().count())
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
}
