use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;

use crate::{
    forms::PostForm,
    models::{groups::Group, posts::Post},
    res,
    session::LoggedIn,
    AppError, AppResult, AppState,
};

use super::{cards::{self, PostFormValues}, parse_post_id};

/// Loads the post, or sends anyone but its author back to the post page.
async fn editable_post(db_pool: &SqlitePool, raw_id: &str, user_id: i64) -> AppResult<Result<Post, Response>> {
    let post_id = parse_post_id(raw_id)?;
    let post = Post::get(db_pool, post_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if post.author_id != user_id {
        tracing::debug!(post_id, user_id, "edit refused, not the author");
        return Ok(Err(Redirect::to(&format!("/posts/{post_id}/")).into_response()));
    }
    Ok(Ok(post))
}

#[debug_handler(state = AppState)]
pub(crate) async fn post_edit_page(
    Path(post_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    LoggedIn(user): LoggedIn,
) -> AppResult<Response> {
    let post = match editable_post(&db_pool, &post_id, user.id).await? {
        Ok(post) => post,
        Err(redirect) => return Ok(redirect),
    };

    let groups = Group::list_all(&db_pool).await?;
    let values = PostFormValues {
        text: &post.text,
        group_id: post.group_id,
        image: post.image.as_deref().unwrap_or_default(),
    };
    let form = cards::post_form(true, &format!("/posts/{}/edit/", post.id), values, &groups, &[]);
    Ok(Html(res::page(Some(&user), "Edit post", &form)).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn post_edit(
    Path(post_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    LoggedIn(user): LoggedIn,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let post = match editable_post(&db_pool, &post_id, user.id).await? {
        Ok(post) => post,
        Err(redirect) => return Ok(redirect),
    };

    match form.clean(&db_pool).await? {
        Ok(changes) => {
            Post::update(&db_pool, post.id, changes).await?;
            Ok(Redirect::to(&format!("/posts/{}/", post.id)).into_response())
        }
        Err(errors) => {
            let groups = Group::list_all(&db_pool).await?;
            let values = PostFormValues {
                text: &form.text,
                group_id: form.group.as_deref().and_then(|group| group.parse().ok()),
                image: form.image.as_deref().unwrap_or_default(),
            };
            let page = cards::post_form(true, &format!("/posts/{}/edit/", post.id), values, &groups, &errors);
            Ok(Html(res::page(Some(&user), "Edit post", &page)).into_response())
        }
    }
}
