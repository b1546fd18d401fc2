use std::{fmt::Display, num::NonZeroU32, num::NonZeroUsize, str::FromStr};

use anyhow::Context;

use crate::pagination::Paginator;

pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_address: String,
    pub posts_per_page: NonZeroU32,
    /// Lifetime of a cached home feed page.
    pub index_cache_ttl: std::time::Duration,
    pub page_cache_capacity: NonZeroUsize,
    pub session_inactivity: time::Duration,
    pub secure_cookies: bool,
    pub password_hash_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite://yatube.db?mode=rwc".to_owned(),
            database_max_connections: 16,
            bind_address: "0.0.0.0:8080".to_owned(),
            posts_per_page: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
            index_cache_ttl: std::time::Duration::from_secs(20),
            page_cache_capacity: NonZeroUsize::new(256).unwrap_or(NonZeroUsize::MIN),
            session_inactivity: time::Duration::minutes(60),
            secure_cookies: false,
            password_hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Reads the configuration from the environment (and `.env`), falling
    /// back to defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Config> {
        let defaults = Config::default();
        Ok(Config {
            database_url: dotenv::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: var_or("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?,
            bind_address: dotenv::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            posts_per_page: var_or("POSTS_PER_PAGE", defaults.posts_per_page)?,
            index_cache_ttl: std::time::Duration::from_secs(
                var_or("INDEX_CACHE_SECONDS", defaults.index_cache_ttl.as_secs())?,
            ),
            page_cache_capacity: var_or("PAGE_CACHE_CAPACITY", defaults.page_cache_capacity)?,
            session_inactivity: time::Duration::minutes(
                var_or("SESSION_INACTIVITY_MINUTES", defaults.session_inactivity.whole_minutes())?,
            ),
            secure_cookies: var_or("SECURE_COOKIES", defaults.secure_cookies)?,
            password_hash_cost: var_or("PASSWORD_HASH_COST", defaults.password_hash_cost)?,
        })
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.posts_per_page)
    }
}

fn var_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match dotenv::var(name) {
        Ok(value) => parse_var(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_var<T>(name: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|err| anyhow::anyhow!("{err}"))
        .with_context(|| format!("Invalid configuration: {name}={value}"))
}
