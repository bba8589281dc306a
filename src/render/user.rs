use super::{document, event_type_description, Head};
use crate::booking::{UserEventTypes, DEFAULT_AVATAR};
use crate::i18n::{I18n, Locale};
use crate::query::{Query, QueryClient};
use crate::theme::Theme;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    /// the user's event types are not in the query cache yet
    Loading,
    /// data is there, but the stored theme can't be applied
    ThemePending(UserEventTypes),
    Ready(UserEventTypes, Theme),
}

impl PageState {
    pub fn of(client: &QueryClient, username: &str) -> PageState {
        let Some(data) = client.user_event_types(username) else {
            return PageState::Loading;
        };

        match Theme::resolve(data.user.theme.as_deref()) {
            Some(theme) => PageState::Ready(data, theme),
            None => PageState::ThemePending(data),
        }
    }

    /// One `eventTypeByUsername` query per listed event type, so each event
    /// type page can be served from the prefetch cache.
    pub fn prefetch_queries(&self, username: &str) -> Vec<Query> {
        match self {
            PageState::Loading => Vec::new(),
            PageState::ThemePending(data) | PageState::Ready(data, _) => data
                .event_types
                .iter()
                .map(|event_type| Query::event_type_by_username(&event_type.slug, username))
                .collect(),
        }
    }
}

/// One query string parameter, decoded to bytes so values that aren't
/// UTF-8 survive being written back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: Vec<u8>,
    /// `None` for a bare `flag` without `=`
    pub value: Option<Vec<u8>>,
}

impl QueryParam {
    pub fn new(key: &str, value: Option<&str>) -> QueryParam {
        QueryParam {
            key: key.as_bytes().to_vec(),
            value: value.map(|it| it.as_bytes().to_vec()),
        }
    }
}

/// Renders `/{locale}/{username}` from a hydrated query client. `query` is
/// the current request's query string, carried over onto each event type
/// link.
pub fn render_user_page(
    client: &QueryClient,
    state: &PageState,
    i18n: &I18n,
    locale: Locale,
    username: &str,
    query: &[QueryParam],
) -> String {
    let data = match state {
        PageState::Loading => return document(locale, "", None, &super::loader(i18n, locale)),
        PageState::ThemePending(data) | PageState::Ready(data, _) => data,
    };

    let name_or_username = data.user.name_or_username();
    let head = Head {
        title: name_or_username,
        description: name_or_username,
        name: name_or_username,
        avatar: data.user.avatar.as_deref().unwrap_or(""),
    };

    let PageState::Ready(_, theme) = state else {
        return document(locale, "", Some(head), "");
    };

    let mut body = String::new();
    body.push_str(r#"<div class="h-screen bg-neutral-50 dark:bg-black"><main class="max-w-3xl px-4 py-24 mx-auto">"#);
    let _ = write!(
        body,
        concat!(
            r#"<div class="mb-8 text-center">"#,
            r#"<img class="avatar w-24 h-24 mx-auto mb-4 rounded-full" src="{avatar}" alt="{alt}">"#,
            r#"<h1 class="mb-1 text-3xl font-bold text-neutral-900 dark:text-white">{name}</h1>"#,
            r#"<p class="text-neutral-500 dark:text-white">{bio}</p>"#,
            "</div>",
        ),
        avatar = attr(data.user.avatar.as_deref().unwrap_or(DEFAULT_AVATAR)),
        alt = attr(name_or_username),
        name = text(name_or_username),
        bio = text(data.user.bio.as_deref().unwrap_or("")),
    );

    let link_username = data.user.username.as_deref().unwrap_or(username);

    if data.event_types.is_empty() {
        let _ = write!(
            body,
            concat!(
                r#"<div class="overflow-hidden rounded-sm shadow" data-testid="empty-event-types"><div class="p-8 text-center">"#,
                r#"<h2 class="text-3xl font-semibold">{uh_oh}</h2>"#,
                r#"<p class="max-w-md mx-auto">{message}</p>"#,
                "</div></div>",
            ),
            uh_oh = text(i18n.t(locale, "uh_oh")),
            message = text(i18n.t(locale, "no_event_types_have_been_setup")),
        );
    } else {
        body.push_str(r#"<div class="space-y-6" data-testid="event-types">"#);
        for event_type in &data.event_types {
            let _ = write!(
                body,
                concat!(
                    r#"<div class="relative bg-white border rounded-sm group" data-event-type-id="{id}">"#,
                    r#"<a class="block px-6 py-4" data-testid="event-type-link" href="{href}">"#,
                    r#"<h2 class="font-semibold">{title}</h2>{description}"#,
                    "</a></div>",
                ),
                id = event_type.id,
                href = attr(&event_type_href(link_username, &event_type.slug, query)),
                title = text(&event_type.title),
                description = event_type_description(i18n, locale, event_type),
            );
        }
        body.push_str("</div>");
    }

    body.push_str("</main></div>");
    let _ = write!(
        body,
        r#"<script id="query-state" type="application/json">{}</script>"#,
        super::script_json(&client.dehydrate())
    );

    document(locale, theme.root_class(), Some(head), &body)
}

/// `/{username}/{slug}` with the current query parameters, in order.
pub fn event_type_href(username: &str, slug: &str, query: &[QueryParam]) -> String {
    let mut href = format!(
        "/{}/{}",
        urlencoding::encode(username),
        urlencoding::encode(slug)
    );

    for (i, param) in query.iter().enumerate() {
        href.push(if i == 0 { '?' } else { '&' });
        href.push_str(&urlencoding::encode_binary(&param.key));
        if let Some(value) = &param.value {
            href.push('=');
            href.push_str(&urlencoding::encode_binary(value));
        }
    }

    href
}

/// Splits a raw query string into decoded parameters, keeping their order.
pub fn parse_query(raw: Option<&str>) -> Vec<QueryParam> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let decode = |it: &str| urlencoding::decode_binary(it.replace('+', " ").as_bytes()).into_owned();

    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => QueryParam {
                key: decode(key),
                value: Some(decode(value)),
            },
            None => QueryParam {
                key: decode(pair),
                value: None,
            },
        })
        .collect()
}
