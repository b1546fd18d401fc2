use std::sync::Arc;

use axum::{debug_handler, extract::{Query, State}, response::Html};
use sqlx::SqlitePool;

use crate::{
    cache::{self, PageCache, INDEX_PAGE},
    feed::{self, Feed},
    include_res,
    pagination::PageQuery,
    res::{self, fill},
    session::Viewer,
    AppResult, AppState, Config,
};

use super::cards;

/// The home feed. The rendered posts are cached per page for a short while,
/// so new posts show up once the entry expires.
#[debug_handler(state = AppState)]
pub(crate) async fn index(
    State(db_pool): State<SqlitePool>,
    State(page_cache): State<Arc<dyn PageCache>>,
    State(config): State<Arc<Config>>,
    Viewer(viewer): Viewer,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let key = cache::key(INDEX_PAGE, query.number());

    let posts = match page_cache.get(&key) {
        Some(posts) => posts,
        None => {
            let page = feed::load(&db_pool, Feed::All, config.paginator(), query.number()).await?;
            let posts = cards::feed(&page);
            page_cache.set(&key, posts.clone(), config.index_cache_ttl);
            posts
        }
    };

    Ok(Html(res::page(
        viewer.as_ref(),
        "Latest updates",
        &fill(include_res!(str, "/pages/posts/index.html"), &[("feed", &posts)]),
    )))
}
