#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sqlx::SqlitePool;
use tower::ServiceExt;
use yatube::{
    app, db,
    models::{
        groups::{Group, NewGroup},
        posts::{NewPost, Post},
        users::{NewUser, User},
    },
    AppState, Config,
};

pub const PASSWORD: &str = "correct horse battery";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Number of post cards (or the detail article) on the page.
    pub fn post_count(&self) -> usize {
        self.body.matches("<article class=\"post\"").count()
    }

    pub fn is_redirect_to(&self, location: &str) -> bool {
        self.status.is_redirection() && self.location.as_deref() == Some(location)
    }
}

pub async fn test_app() -> TestApp {
    test_app_with(Config::default()).await
}

pub async fn test_app_with(config: Config) -> TestApp {
    let config = Config {
        database_url: "sqlite::memory:".to_owned(),
        password_hash_cost: 4,
        ..config
    };
    let db_pool = db::connect(&config.database_url, 1)
        .await
        .expect("Should create the test database");
    let state = AppState::new(db_pool, config);
    TestApp {
        app: app(state.clone()),
        state,
    }
}

impl TestApp {
    pub fn db(&self) -> &SqlitePool {
        &self.state.db_pool
    }

    pub async fn create_user(&self, username: &str) -> User {
        User::create(
            self.db(),
            NewUser {
                username: username.to_owned(),
                first_name: String::new(),
                last_name: String::new(),
                email: String::new(),
                password: PASSWORD.to_owned(),
            },
            4,
        )
        .await
        .expect("Should create user")
    }

    pub async fn create_group(&self, slug: &str) -> Group {
        Group::create(
            self.db(),
            NewGroup {
                title: format!("Group {slug}"),
                slug: slug.to_owned(),
                description: format!("About {slug}"),
            },
        )
        .await
        .expect("Should create group")
    }

    pub async fn create_post(&self, author: &User, text: &str, group: Option<&Group>) -> Post {
        Post::create(
            self.db(),
            NewPost {
                text: text.to_owned(),
                author_id: author.id,
                group_id: group.map(|group| group.id),
                image: None,
            },
        )
        .await
        .expect("Should create post")
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let header_str = |name| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let status = response.status();
        let location = header_str(header::LOCATION);
        let set_cookie = header_str(header::SET_COOKIE);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");

        TestResponse {
            status,
            location,
            set_cookie,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::get(path);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.request(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let mut request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.request(request.body(Body::from(body)).unwrap()).await
    }

    /// Logs in through the login form and returns the session cookie.
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .post_form("/auth/login/", &[("username", username), ("password", PASSWORD)], None)
            .await;
        assert!(response.status.is_redirection(), "login failed for {username}");
        session_cookie(&response)
    }
}

pub fn session_cookie(response: &TestResponse) -> String {
    response
        .set_cookie
        .as_deref()
        .and_then(|cookie| cookie.split(';').next())
        .expect("Should set a session cookie")
        .to_owned()
}
