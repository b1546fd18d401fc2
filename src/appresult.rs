use axum::{http::StatusCode, response::{Html, IntoResponse, Response}};

use crate::{include_res, res};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(res::error_page(include_res!(str, "/pages/errors/404.html"))),
            )
                .into_response(),
            AppError::Internal(err) => {
                tracing::error!("request failed: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(res::error_page(include_res!(str, "/pages/errors/500.html"))),
                )
                    .into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            err => AppError::Internal(err.into()),
        }
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(tower_sessions::session::Error);
apperr_impl!(bcrypt::BcryptError);
apperr_impl!(tokio::task::JoinError);
