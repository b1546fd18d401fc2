use crate::{
    include_res,
    models::{comments::CommentView, groups::Group, posts::PostView},
    pagination::Page,
    res::{date, escape, fill, markdown},
};

pub(crate) fn group_link(slug: Option<&str>, title: Option<&str>) -> String {
    match (slug, title) {
        (Some(slug), Some(title)) => fill(
            include_res!(str, "/pages/posts/group_link.html"),
            &[("slug", &escape(slug)), ("title", &escape(title))],
        ),
        _ => String::new(),
    }
}

pub(crate) fn image(src: Option<&str>) -> String {
    match src {
        Some(src) => fill(include_res!(str, "/pages/posts/image.html"), &[("src", &escape(src))]),
        None => String::new(),
    }
}

pub(crate) fn post_card(view: &PostView) -> String {
    fill(
        include_res!(str, "/pages/posts/post_card.html"),
        &[
            ("id", &view.post.id.to_string()),
            ("author", &escape(&view.author_username)),
            ("date", &date(&view.post.pub_date)),
            ("image", &image(view.post.image.as_deref())),
            ("text", &markdown(&view.post.text)),
            ("comment_count", &view.comment_count.to_string()),
            (
                "group_link",
                &group_link(view.group_slug.as_deref(), view.group_title.as_deref()),
            ),
        ],
    )
}

fn paginator<T>(page: &Page<T>) -> String {
    if page.num_pages <= 1 {
        return String::new();
    }

    let mut links = String::from("<nav class=\"pagination\">");
    if let Some(previous) = page.previous_page_number() {
        links += "<a href=\"?page=1\">&laquo; first</a>";
        links += &format!("<a href=\"?page={previous}\">previous</a>");
    }
    links += &format!(
        "<span class=\"current\">Page {} of {}</span>",
        page.number, page.num_pages
    );
    if let Some(next) = page.next_page_number() {
        links += &format!("<a href=\"?page={next}\">next</a>");
        links += &format!("<a href=\"?page={}\">last &raquo;</a>", page.num_pages);
    }
    links += "</nav>";
    links
}

/// A page of post cards followed by the page links.
pub(crate) fn feed(page: &Page<PostView>) -> String {
    if page.is_empty() {
        return "<p class=\"empty\">No posts yet.</p>".to_owned();
    }

    let mut html: String = page.items.iter().map(post_card).collect();
    html += &paginator(page);
    html
}

pub(crate) fn comment(view: &CommentView) -> String {
    fill(
        include_res!(str, "/pages/posts/comment.html"),
        &[
            ("author", &escape(&view.author_username)),
            ("date", &date(&view.comment.created)),
            ("text", &escape(&view.comment.text)),
        ],
    )
}

/// What the post form shows: submitted or stored values.
pub(crate) struct PostFormValues<'a> {
    pub text: &'a str,
    pub group_id: Option<i64>,
    pub image: &'a str,
}

pub(crate) fn post_form(
    is_edit: bool,
    action: &str,
    values: PostFormValues,
    groups: &[Group],
    errors: &[String],
) -> String {
    let group_options: String = groups
        .iter()
        .map(|group| {
            let selected = if values.group_id == Some(group.id) { " selected" } else { "" };
            format!(
                "        <option value=\"{}\"{selected}>{}</option>\n",
                group.id,
                escape(&group.title)
            )
        })
        .collect();

    let (heading, button) = if is_edit {
        ("Edit post", "Save")
    } else {
        ("New post", "Add")
    };

    fill(
        include_res!(str, "/pages/posts/create_post.html"),
        &[
            ("heading", heading),
            ("errors", &crate::res::form_errors(errors)),
            ("action", &escape(action)),
            ("text", &escape(values.text)),
            ("group_options", &group_options),
            ("image", &escape(values.image)),
            ("button", button),
        ],
    )
}
