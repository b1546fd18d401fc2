mod login;
mod logout;
mod signup;

use axum::{routing::get, Router};

use crate::AppState;

use login::{login, login_page};
use logout::logout;
use signup::{signup, signup_page};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login/", get(login_page).post(login))
        .route("/logout/", get(logout))
        .route("/signup/", get(signup_page).post(signup))
}
