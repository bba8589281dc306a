use super::{document, event_type_description, Head};
use crate::booking::EventType;
use crate::i18n::{I18n, Locale};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

pub fn render_event_type_page(
    i18n: &I18n,
    locale: Locale,
    username: &str,
    event_type: &EventType,
) -> String {
    let head = Head {
        title: &event_type.title,
        description: event_type.description.as_deref().unwrap_or(&event_type.title),
        name: username,
        avatar: "",
    };

    let body = format!(
        concat!(
            r#"<main class="max-w-3xl px-4 py-24 mx-auto" data-testid="event-type">"#,
            r#"<p><a href="/{username_href}">{username}</a></p>"#,
            r#"<h1 class="text-3xl font-bold">{title}</h1>{description}"#,
            "</main>",
        ),
        username_href = attr(&urlencoding::encode(username)),
        username = text(username),
        title = text(&event_type.title),
        description = event_type_description(i18n, locale, event_type),
    );

    document(locale, "", Some(head), &body)
}
