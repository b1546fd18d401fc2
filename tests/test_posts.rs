mod common;

use axum::http::StatusCode;
use yatube::{
    feed::Feed,
    models::{comments::Comment, posts::Post},
};

use crate::common::test_app;

#[tokio::test]
async fn test_create_post_redirects_to_profile() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    let group = app.create_group("cats").await;
    let cookie = app.login("author").await;

    let form_page = app.get("/create/", Some(&cookie)).await;
    assert_eq!(form_page.status, StatusCode::OK);
    assert!(form_page.body.contains("New post"));
    assert!(form_page.body.contains("Group cats"));

    let group_id = group.id.to_string();
    let response = app
        .post_form(
            "/create/",
            &[("text", "A brand new post"), ("group", &group_id), ("image", "")],
            Some(&cookie),
        )
        .await;
    assert!(response.is_redirect_to("/profile/author/"));

    assert_eq!(Post::count(app.db(), &Feed::Author(author.id)).await.unwrap(), 1);
    let posts = Post::list(app.db(), &Feed::Group(group.id), 10, 0).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].post.text, "A brand new post");
    assert_eq!(posts[0].post.image, None);
}

#[tokio::test]
async fn test_create_post_invalid_form() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    let cookie = app.login("author").await;

    let response = app
        .post_form("/create/", &[("text", ""), ("group", "")], Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Text is required."));

    let response = app
        .post_form("/create/", &[("text", "text"), ("group", "9999")], Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Select a valid group."));

    assert_eq!(Post::count(app.db(), &Feed::Author(author.id)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_guest_is_sent_to_login() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    let post = app.create_post(&author, "hello", None).await;

    let response = app.get("/create/", None).await;
    assert!(response.is_redirect_to("/auth/login/?next=%2Fcreate%2F"));

    let response = app.post_form("/create/", &[("text", "sneaky")], None).await;
    assert!(response.is_redirect_to("/auth/login/?next=%2Fcreate%2F"));
    assert_eq!(Post::count(app.db(), &Feed::All).await.unwrap(), 1);

    let edit = format!("/posts/{}/edit/", post.id);
    let response = app.get(&edit, None).await;
    assert!(response.is_redirect_to(&format!("/auth/login/?next=%2Fposts%2F{}%2Fedit%2F", post.id)));

    let comment = format!("/posts/{}/comment/", post.id);
    let response = app.post_form(&comment, &[("text", "hi")], None).await;
    assert!(response.status.is_redirection());
    assert!(Comment::list_for_post(app.db(), post.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_author_can_edit_post() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    let post = app.create_post(&author, "first draft", None).await;
    let cookie = app.login("author").await;
    let edit = format!("/posts/{}/edit/", post.id);

    let form_page = app.get(&edit, Some(&cookie)).await;
    assert_eq!(form_page.status, StatusCode::OK);
    assert!(form_page.body.contains("Edit post"));
    assert!(form_page.body.contains("first draft"));

    let response = app
        .post_form(&edit, &[("text", "final version"), ("group", "")], Some(&cookie))
        .await;
    assert!(response.is_redirect_to(&format!("/posts/{}/", post.id)));

    let edited = Post::get(app.db(), post.id).await.unwrap().unwrap();
    assert_eq!(edited.text, "final version");
    assert_eq!(edited.pub_date, post.pub_date);
    assert_eq!(edited.author_id, author.id);
}

#[tokio::test]
async fn test_only_author_can_edit_post() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    app.create_user("intruder").await;
    let post = app.create_post(&author, "original text", None).await;
    let cookie = app.login("intruder").await;
    let edit = format!("/posts/{}/edit/", post.id);
    let detail = format!("/posts/{}/", post.id);

    let response = app.get(&edit, Some(&cookie)).await;
    assert!(response.is_redirect_to(&detail));

    let response = app
        .post_form(&edit, &[("text", "defaced")], Some(&cookie))
        .await;
    assert!(response.is_redirect_to(&detail));

    let unchanged = Post::get(app.db(), post.id).await.unwrap().unwrap();
    assert_eq!(unchanged.text, "original text");

    let page = app.get(&detail, Some(&cookie)).await;
    assert!(!page.body.contains(&edit));
}

#[tokio::test]
async fn test_edit_unknown_post() {
    let app = test_app().await;
    app.create_user("author").await;
    let cookie = app.login("author").await;

    let response = app.get("/posts/404/edit/", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    app.create_user("reader").await;
    let post = app.create_post(&author, "discuss", None).await;
    let cookie = app.login("reader").await;
    let comment = format!("/posts/{}/comment/", post.id);
    let detail = format!("/posts/{}/", post.id);

    let response = app
        .post_form(&comment, &[("text", "Nice post")], Some(&cookie))
        .await;
    assert!(response.is_redirect_to(&detail));

    // empty comments are dropped silently
    let response = app.post_form(&comment, &[("text", "")], Some(&cookie)).await;
    assert!(response.is_redirect_to(&detail));

    let comments = Comment::list_for_post(app.db(), post.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment.text, "Nice post");
    assert_eq!(comments[0].author_username, "reader");

    let page = app.get(&detail, None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Nice post"));

    let response = app
        .post_form("/posts/404/comment/", &[("text", "lost")], Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_detail() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    let group = app.create_group("dogs").await;
    app.create_post(&author, "older", None).await;
    let post = app.create_post(&author, "about dogs", Some(&group)).await;

    let page = app.get(&format!("/posts/{}/", post.id), None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("about dogs"));
    assert!(page.body.contains("/group/dogs/"));
    assert!(page.body.contains("<span id=\"posts-count\">2</span>"));
    // guests get no comment form
    assert!(!page.body.contains(&format!("/posts/{}/comment/", post.id)));

    let cookie = app.login("author").await;
    let page = app.get(&format!("/posts/{}/", post.id), Some(&cookie)).await;
    assert!(page.body.contains(&format!("/posts/{}/edit/", post.id)));
    assert!(page.body.contains(&format!("/posts/{}/comment/", post.id)));
}

#[tokio::test]
async fn test_not_found() {
    let app = test_app().await;

    for path in [
        "/unexisting_page/",
        "/posts/404/",
        "/posts/not-a-number/",
        "/group/nothing-here/",
        "/profile/nobody/",
    ] {
        let response = app.get(path, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert!(response.body.contains("Page not found"), "{path}");
    }
}

#[tokio::test]
async fn test_post_cascades() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    let reader = app.create_user("reader").await;
    let post = app.create_post(&author, "soon gone", None).await;
    app.post_form(
        &format!("/posts/{}/comment/", post.id),
        &[("text", "bye")],
        Some(&app.login(&reader.username).await),
    )
    .await;

    Post::delete(app.db(), post.id).await.unwrap();
    assert!(Comment::list_for_post(app.db(), post.id).await.unwrap().is_empty());
    assert_eq!(Post::get(app.db(), post.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_redirects_to_unicode_profile() {
    let app = test_app().await;
    app.create_user("сергей").await;
    app.create_user("reader").await;
    let profile = "/profile/%D1%81%D0%B5%D1%80%D0%B3%D0%B5%D0%B9/";

    let cookie = app.login("сергей").await;
    let response = app
        .post_form("/create/", &[("text", "Привет")], Some(&cookie))
        .await;
    assert!(response.is_redirect_to(profile));

    let page = app.get(profile, None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.post_count(), 1);
    assert!(page.body.contains("Привет"));

    let cookie = app.login("reader").await;
    let response = app
        .get(&format!("{}unfollow/", profile), Some(&cookie))
        .await;
    assert!(response.is_redirect_to(profile));
}

#[tokio::test]
async fn test_post_links_are_sanitized() {
    let app = test_app().await;
    let author = app.create_user("author").await;
    let post = app
        .create_post(
            &author,
            "[click me](javascript:alert(document.cookie)) ![pic](javascript:alert(1)) [ok](https://example.com/)",
            None,
        )
        .await;

    for path in ["/".to_owned(), format!("/posts/{}/", post.id), "/profile/author/".to_owned()] {
        let page = app.get(&path, None).await;
        assert_eq!(page.status, StatusCode::OK, "{path}");
        assert!(!page.body.contains("javascript:"), "{path}");
        assert!(page.body.contains("href=\"https://example.com/\""), "{path}");
    }
}
