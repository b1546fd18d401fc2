use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;

use crate::{
    forms::PostForm,
    models::{groups::Group, posts::{NewPost, Post}},
    res,
    session::LoggedIn,
    AppResult, AppState,
};

use super::{
    cards::{self, PostFormValues},
    profile_url,
};

#[debug_handler(state = AppState)]
pub(crate) async fn post_create_page(
    State(db_pool): State<SqlitePool>,
    LoggedIn(user): LoggedIn,
) -> AppResult<Html<String>> {
    let groups = Group::list_all(&db_pool).await?;
    let form = cards::post_form(
        false,
        "/create/",
        PostFormValues { text: "", group_id: None, image: "" },
        &groups,
        &[],
    );
    Ok(Html(res::page(Some(&user), "New post", &form)))
}

#[debug_handler(state = AppState)]
pub(crate) async fn post_create(
    State(db_pool): State<SqlitePool>,
    LoggedIn(user): LoggedIn,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    match form.clean(&db_pool).await? {
        Ok(fields) => {
            Post::create(
                &db_pool,
                NewPost {
                    text: fields.text,
                    author_id: user.id,
                    group_id: fields.group_id,
                    image: fields.image,
                },
            )
            .await?;

            Ok(Redirect::to(&profile_url(&user.username)).into_response())
        }
        Err(errors) => {
            let groups = Group::list_all(&db_pool).await?;
            let values = PostFormValues {
                text: &form.text,
                group_id: form.group.as_deref().and_then(|group| group.parse().ok()),
                image: form.image.as_deref().unwrap_or_default(),
            };
            let page = cards::post_form(false, "/create/", values, &groups, &errors);
            Ok(Html(res::page(Some(&user), "New post", &page)).into_response())
        }
    }
}
