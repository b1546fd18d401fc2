use axum::{
    debug_handler,
    extract::{Path, State},
    response::Redirect,
    Form,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    forms::CommentForm,
    models::{comments::{Comment, NewComment}, posts::Post},
    session::LoggedIn,
    AppError, AppResult, AppState,
};

use super::parse_post_id;

/// Adds a comment and goes back to the post either way; an empty comment is
/// dropped without complaint.
#[debug_handler(state = AppState)]
pub(crate) async fn add_comment(
    Path(post_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    LoggedIn(user): LoggedIn,
    Form(form): Form<CommentForm>,
) -> AppResult<Redirect> {
    let post_id = parse_post_id(&post_id)?;
    let post = Post::get(&db_pool, post_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if form.validate().is_ok() {
        Comment::create(
            &db_pool,
            NewComment {
                text: form.text,
                post_id: post.id,
                author_id: user.id,
            },
        )
        .await?;
    }

    Ok(Redirect::to(&format!("/posts/{}/", post.id)))
}
