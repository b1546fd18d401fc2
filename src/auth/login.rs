use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    forms::LoginForm,
    include_res,
    models::users::User,
    res::{self, escape, fill, form_errors},
    session::{self, safe_next, Viewer},
    AppResult, AppState,
};

#[derive(Deserialize)]
pub(crate) struct LoginQuery {
    pub(crate) next: Option<String>,
}

fn login_form(username: &str, next: &str, errors: &[String]) -> String {
    res::page(
        None,
        "Log in",
        &fill(
            include_res!(str, "/pages/auth/login.html"),
            &[
                ("errors", &form_errors(errors)),
                ("username", &escape(username)),
                ("next", &escape(next)),
            ],
        ),
    )
}

#[debug_handler(state = AppState)]
pub(crate) async fn login_page(
    Query(LoginQuery { next }): Query<LoginQuery>,
    Viewer(viewer): Viewer,
) -> Response {
    let next = safe_next(next.as_deref());
    if viewer.is_some() {
        return Redirect::to(next).into_response();
    }
    Html(login_form("", next, &[])).into_response()
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let next = safe_next(form.next.as_deref());

    let Some(user) = User::authenticate(&db_pool, &form.username, &form.password).await? else {
        tracing::debug!("failed login for @{}", form.username);
        let errors = ["Please enter a correct username and password.".to_owned()];
        return Ok(Html(login_form(&form.username, next, &errors)).into_response());
    };

    session::log_in(&session, &user).await?;
    Ok(Redirect::to(next).into_response())
}
