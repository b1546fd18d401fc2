use std::collections::HashSet;

use axum::{debug_handler, http::header, response::IntoResponse};
use time::OffsetDateTime;

use crate::{models::users::User, AppError};

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

/// Substitutes `{name}` placeholders in a single pass, so substituted values
/// are never scanned again. Unknown placeholders are left as they are.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let value = rest.find('}').and_then(|end| {
            let name = &rest[1..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (end, *value))
        });
        match value {
            Some((end, value)) => {
                out.push_str(value);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape(text: &str) -> String {
    askama_escape::escape(text, askama_escape::Html).to_string()
}

/// Renders user-written Markdown. Raw HTML is shown as text and link
/// targets are limited to web and mail URLs.
pub fn markdown(text: &str) -> String {
    use pulldown_cmark::{Event, Options, Parser};

    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
            _ => event,
        });

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);

    ammonia::Builder::default()
        .url_schemes(HashSet::from(["http", "https", "mailto"]))
        .clean(&html_output)
        .to_string()
}

pub fn date(timestamp: &OffsetDateTime) -> String {
    format!(
        "{} {:02}:{:02}",
        timestamp.date(),
        timestamp.hour(),
        timestamp.minute()
    )
}

/// Wraps `content` in the site layout with a navigation bar for `viewer`.
pub fn page(viewer: Option<&User>, title: &str, content: &str) -> String {
    let nav = match viewer {
        Some(user) => fill(
            include_res!(str, "/pages/nav_user.html"),
            &[("username", &escape(&user.username))],
        ),
        None => include_res!(str, "/pages/nav_guest.html").to_owned(),
    };

    fill(
        include_res!(str, "/pages/base.html"),
        &[("title", &escape(title)), ("nav", &nav), ("content", content)],
    )
}

pub fn form_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|error| format!("<li>{}</li>\n", escape(error)))
        .collect();
    fill(include_res!(str, "/pages/form_errors.html"), &[("errors", &items)])
}

pub fn error_page(content: &str) -> String {
    page(None, "Error", content)
}

#[debug_handler]
pub async fn not_found() -> AppError {
    AppError::NotFound
}

#[debug_handler]
pub async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_res!(str, "/static/style.css"),
    )
}
