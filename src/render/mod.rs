use crate::i18n::{I18n, Locale};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

mod description;
pub mod event_type;
pub mod user;

pub use description::event_type_description;

/// SEO metadata for the document head.
#[derive(Debug, Clone, Copy)]
pub struct Head<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub name: &'a str,
    pub avatar: &'a str,
}

pub fn document(locale: Locale, root_class: &str, head: Option<Head<'_>>, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="{}" class="{}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">"#,
        locale.code(),
        attr(root_class),
    );

    if let Some(head) = head {
        let _ = write!(
            html,
            concat!(
                r#"<title>{title}</title>"#,
                r#"<meta name="description" content="{description}">"#,
                r#"<meta property="og:title" content="{title}">"#,
                r#"<meta property="og:description" content="{description}">"#,
                r#"<meta property="og:site_name" content="{name}">"#,
                r#"<meta property="og:image" content="{avatar}">"#,
            ),
            title = attr(head.title),
            description = attr(head.description),
            name = attr(head.name),
            avatar = attr(head.avatar),
        );
    }

    let _ = write!(html, "</head><body>{body}</body></html>");
    html
}

pub fn loader(i18n: &I18n, locale: Locale) -> String {
    format!(
        r#"<div class="loader" role="status"><span class="loader-inner">{}</span></div>"#,
        text(i18n.t(locale, "loading"))
    )
}

pub fn not_found_page() -> String {
    document(
        Locale::En,
        "",
        None,
        r#"<main class="not-found"><h1>404</h1><p>This page could not be found.</p></main>"#,
    )
}

/// JSON embedded in a `<script>` must not be able to close the tag.
pub(crate) fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .expect("page state should serialize")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
