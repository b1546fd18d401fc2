use axum::{debug_handler, extract::{Path, State}, response::Html};
use sqlx::SqlitePool;

use crate::{
    include_res,
    models::{comments::Comment, posts::Post, users::User},
    res::{self, date, escape, fill, markdown},
    session::Viewer,
    AppError, AppResult, AppState,
};

use super::{cards, parse_post_id};

#[debug_handler(state = AppState)]
pub(crate) async fn post_detail(
    Path(post_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    Viewer(viewer): Viewer,
) -> AppResult<Html<String>> {
    let post_id = parse_post_id(&post_id)?;
    let view = Post::view(&db_pool, post_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let comments: String = Comment::list_for_post(&db_pool, post_id)
        .await?
        .iter()
        .map(cards::comment)
        .collect();

    let is_author = viewer.as_ref().is_some_and(|viewer| viewer.id == view.post.author_id);
    let edit_link = if is_author {
        format!("<a class=\"button\" href=\"/posts/{post_id}/edit/\">Edit</a>")
    } else {
        String::new()
    };
    let comment_form = if viewer.is_some() {
        fill(
            include_res!(str, "/pages/posts/comment_form.html"),
            &[("id", &post_id.to_string())],
        )
    } else {
        String::new()
    };

    let content = fill(
        include_res!(str, "/pages/posts/post_detail.html"),
        &[
            ("id", &post_id.to_string()),
            ("date", &date(&view.post.pub_date)),
            ("author", &escape(&view.author_username)),
            ("posts_count", &User::post_count(&db_pool, view.post.author_id).await?.to_string()),
            (
                "group_link",
                &cards::group_link(view.group_slug.as_deref(), view.group_title.as_deref()),
            ),
            ("image", &cards::image(view.post.image.as_deref())),
            ("text", &markdown(&view.post.text)),
            ("edit_link", &edit_link),
            ("comments", &comments),
            ("comment_form", &comment_form),
        ],
    );
    Ok(Html(res::page(viewer.as_ref(), &format!("Post {}", view.post), &content)))
}
