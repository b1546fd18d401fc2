use std::sync::Arc;

use axum::{debug_handler, extract::{Path, Query, State}, response::Html};
use sqlx::SqlitePool;

use crate::{
    feed::{self, Feed},
    include_res,
    models::{follows::Follow, users::User},
    pagination::PageQuery,
    res::{self, escape, fill},
    session::Viewer,
    AppError, AppResult, AppState, Config,
};

use super::cards;

#[debug_handler(state = AppState)]
pub(crate) async fn profile(
    Path(username): Path<String>,
    State(db_pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    Viewer(viewer): Viewer,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let author = User::find_by_username(&db_pool, &username)
        .await?
        .ok_or(AppError::NotFound)?;

    let page = feed::load(&db_pool, Feed::Author(author.id), config.paginator(), query.number()).await?;

    let following = match &viewer {
        Some(viewer) => Follow::exists(&db_pool, viewer.id, author.id).await?,
        None => false,
    };
    let follow_button = match &viewer {
        Some(viewer) if viewer.id != author.id => {
            let button = if following {
                include_res!(str, "/pages/posts/unfollow_button.html")
            } else {
                include_res!(str, "/pages/posts/follow_button.html")
            };
            fill(button, &[("username", &escape(&author.username))])
        }
        _ => String::new(),
    };

    let full_name = match author.full_name() {
        name if name.is_empty() => author.username.clone(),
        name => name,
    };

    let content = fill(
        include_res!(str, "/pages/posts/profile.html"),
        &[
            ("full_name", &escape(&full_name)),
            ("username", &escape(&author.username)),
            ("posts_count", &page.count.to_string()),
            ("followers", &Follow::count_followers(&db_pool, author.id).await?.to_string()),
            ("following", &Follow::count_following(&db_pool, author.id).await?.to_string()),
            ("follow_button", &follow_button),
            ("feed", &cards::feed(&page)),
        ],
    );
    Ok(Html(res::page(viewer.as_ref(), &format!("Profile of {full_name}"), &content)))
}
