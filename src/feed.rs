use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    models::posts::{Post, PostView},
    pagination::{Page, Paginator},
    AppResult,
};

/// Which posts a feed shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    All,
    Group(i64),
    Author(i64),
    /// Posts by the authors this user follows.
    FollowedBy(i64),
}

impl Feed {
    /// Appends the `WHERE` clause selecting this feed's posts (aliased `p`).
    pub(crate) fn push_filter(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        match *self {
            Feed::All => {}
            Feed::Group(group_id) => {
                query.push(" WHERE p.group_id = ").push_bind(group_id);
            }
            Feed::Author(author_id) => {
                query.push(" WHERE p.author_id = ").push_bind(author_id);
            }
            Feed::FollowedBy(user_id) => {
                query
                    .push(" WHERE p.author_id IN (SELECT author_id FROM follows WHERE user_id = ")
                    .push_bind(user_id)
                    .push(")");
            }
        }
    }
}

/// Loads one page of a feed. Page numbers out of range are clamped.
pub async fn load(
    db_pool: &SqlitePool,
    feed: Feed,
    paginator: Paginator,
    requested: i64,
) -> AppResult<Page<PostView>> {
    let count = Post::count(db_pool, &feed).await?;
    let span = paginator.span(count, requested);
    let posts = Post::list(db_pool, &feed, span.limit, span.offset).await?;

    Ok(Page::new(posts, span))
}
