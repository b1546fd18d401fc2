mod cards;
mod comment;
mod create;
mod detail;
mod edit;
mod follow;
mod group;
mod index;
mod profile;

use axum::{routing::{get, post}, Router};

use crate::{AppError, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index))
        .route("/group/{slug}/", get(group::group_posts))
        .route("/profile/{username}/", get(profile::profile))
        .route("/profile/{username}/follow/", get(follow::profile_follow))
        .route("/profile/{username}/unfollow/", get(follow::profile_unfollow))
        .route("/follow/", get(follow::follow_index))
        .route("/create/", get(create::post_create_page).post(create::post_create))
        .route("/posts/{post_id}/", get(detail::post_detail))
        .route("/posts/{post_id}/edit/", get(edit::post_edit_page).post(edit::post_edit))
        .route("/posts/{post_id}/comment/", post(comment::add_comment))
}

/// Post ids in paths that aren't numbers name no post.
fn parse_post_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::NotFound)
}

/// Profile path with the username percent-encoded, fit for a `Location` header.
fn profile_url(username: &str) -> String {
    let username: String = url::form_urlencoded::byte_serialize(username.as_bytes()).collect();
    format!("/profile/{username}/")
}
