use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use sqlx::SqlitePool;

use crate::{
    feed::{self, Feed},
    include_res,
    models::{follows::Follow, users::User},
    pagination::PageQuery,
    res::{self, fill},
    session::LoggedIn,
    AppError, AppResult, AppState, Config,
};

use super::{cards, profile_url};

#[debug_handler(state = AppState)]
pub(crate) async fn follow_index(
    State(db_pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    LoggedIn(user): LoggedIn,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let page = feed::load(&db_pool, Feed::FollowedBy(user.id), config.paginator(), query.number()).await?;

    let content = fill(
        include_res!(str, "/pages/posts/follow.html"),
        &[("feed", &cards::feed(&page))],
    );
    Ok(Html(res::page(Some(&user), "Following", &content)))
}

/// Following yourself, or someone you already follow, just goes home.
#[debug_handler(state = AppState)]
pub(crate) async fn profile_follow(
    Path(username): Path<String>,
    State(db_pool): State<SqlitePool>,
    LoggedIn(user): LoggedIn,
) -> AppResult<Redirect> {
    let author = User::find_by_username(&db_pool, &username)
        .await?
        .ok_or(AppError::NotFound)?;

    if Follow::follow(&db_pool, user.id, author.id).await? {
        Ok(Redirect::to("/follow/"))
    } else {
        Ok(Redirect::to("/"))
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn profile_unfollow(
    Path(username): Path<String>,
    State(db_pool): State<SqlitePool>,
    LoggedIn(user): LoggedIn,
) -> AppResult<Redirect> {
    let author = User::find_by_username(&db_pool, &username)
        .await?
        .ok_or(AppError::NotFound)?;

    Follow::unfollow(&db_pool, user.id, author.id).await?;
    Ok(Redirect::to(&profile_url(&author.username)))
}
