use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    forms::SignupForm,
    include_res,
    models::users::{NewUser, User},
    res::{self, escape, fill, form_errors},
    session::{self, Viewer},
    AppResult, AppState, Config,
};

fn signup_form(form: &SignupForm, errors: &[String]) -> String {
    res::page(
        None,
        "Sign up",
        &fill(
            include_res!(str, "/pages/auth/signup.html"),
            &[
                ("errors", &form_errors(errors)),
                ("username", &escape(&form.username)),
                ("first_name", &escape(&form.first_name)),
                ("last_name", &escape(&form.last_name)),
                ("email", &escape(form.email.as_deref().unwrap_or_default())),
            ],
        ),
    )
}

#[debug_handler(state = AppState)]
pub(crate) async fn signup_page(Viewer(viewer): Viewer) -> Response {
    if viewer.is_some() {
        return Redirect::to("/").into_response();
    }
    Html(signup_form(&SignupForm::default(), &[])).into_response()
}

#[debug_handler(state = AppState)]
pub(crate) async fn signup(
    State(db_pool): State<SqlitePool>,
    State(config): State<Arc<Config>>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let errors = form.clean(&db_pool).await?;
    if !errors.is_empty() {
        return Ok(Html(signup_form(&form, &errors)).into_response());
    }

    let user = User::create(
        &db_pool,
        NewUser {
            username: form.username,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email.unwrap_or_default(),
            password: form.password1,
        },
        config.password_hash_cost,
    )
    .await?;

    session::log_in(&session, &user).await?;
    Ok(Redirect::to("/").into_response())
}
