use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{models::users::User, AppError, AppResult, AppState};

pub const USER_ID: &str = "user_id";

pub const LOGIN_URL: &str = "/auth/login/";

/// The user making the request, if anyone is logged in.
pub struct Viewer(pub Option<User>);

/// A logged-in user. Anonymous requests are redirected to the login page.
pub struct LoggedIn(pub User);

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| anyhow!(msg))?;

        let Some(user_id) = session.get::<i64>(USER_ID).await? else {
            return Ok(Viewer(None));
        };

        let user = User::get(&state.db_pool, user_id).await?;
        if user.is_none() {
            // the account is gone
            session.flush().await?;
        }
        Ok(Viewer(user))
    }
}

impl FromRequestParts<AppState> for LoggedIn {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Viewer(user) = Viewer::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match user {
            Some(user) => Ok(LoggedIn(user)),
            None => {
                let uri = parts
                    .extensions
                    .get::<OriginalUri>()
                    .map(|OriginalUri(uri)| uri)
                    .unwrap_or(&parts.uri);
                let next = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
                Err(Redirect::to(&login_url(next)).into_response())
            }
        }
    }
}

pub fn login_url(next: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("{LOGIN_URL}?{query}")
}

/// Only local absolute paths are followed after login.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") && !next.contains('\\') => next,
        _ => "/",
    }
}

pub async fn log_in(session: &Session, user: &User) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(USER_ID, user.id).await?;
    tracing::debug!(user_id = user.id, "welcome @{}", user.username);
    Ok(())
}

pub async fn log_out(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}
