use std::sync::Arc;

use axum::{debug_handler, extract::{Path, Query, State}, response::Html};
use sqlx::SqlitePool;

use crate::{
    feed::{self, Feed},
    include_res,
    models::groups::Group,
    pagination::PageQuery,
    res::{self, escape, fill},
    session::Viewer,
    AppError, AppResult, AppState, Config,
};

use super::cards;

#[debug_handler(state = AppState)]
pub(crate) async fn group_posts(
    Path(slug): Path<String>,
    State(db_pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    Viewer(viewer): Viewer,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let group = Group::find_by_slug(&db_pool, &slug)
        .await?
        .ok_or(AppError::NotFound)?;

    let page = feed::load(&db_pool, Feed::Group(group.id), config.paginator(), query.number()).await?;

    let content = fill(
        include_res!(str, "/pages/posts/group_list.html"),
        &[
            ("title", &escape(&group.title)),
            ("description", &escape(&group.description)),
            ("feed", &cards::feed(&page)),
        ],
    );
    Ok(Html(res::page(viewer.as_ref(), &group.title, &content)))
}
