use crate::booking::{EventType, SchedulingType};
use crate::i18n::{I18n, Locale};
use html_escape::encode_text as text;
use std::fmt::Write;

pub fn event_type_description(i18n: &I18n, locale: Locale, event_type: &EventType) -> String {
    let mut html = String::new();

    if let Some(description) = event_type
        .description
        .as_deref()
        .filter(|it| !it.trim().is_empty())
    {
        let _ = write!(
            html,
            r#"<div class="event-type-description">{}</div>"#,
            markdown(description)
        );
    }

    html.push_str(r#"<ul class="event-type-details">"#);
    let _ = write!(
        html,
        r#"<li class="duration">{}</li>"#,
        format_duration(event_type.length)
    );

    if let Some(scheduling_type) = event_type.scheduling_type {
        let key = match scheduling_type {
            SchedulingType::RoundRobin => "round_robin",
            SchedulingType::Collective => "collective",
        };
        let _ = write!(
            html,
            r#"<li class="scheduling-type">{}</li>"#,
            text(i18n.t(locale, key))
        );
    }

    if event_type.price > 0 {
        let _ = write!(
            html,
            r#"<li class="price">{}</li>"#,
            text(&format_price(event_type.price, &event_type.currency))
        );
    }

    html.push_str("</ul>");
    html
}

// raw html in descriptions is dropped by comrak's defaults
fn markdown(source: &str) -> String {
    comrak::markdown_to_html(source, &comrak::Options::default())
}

fn format_duration(minutes: u32) -> String {
    let (hours, minutes) = (minutes / 60, minutes % 60);
    match (hours, minutes) {
        (0, minutes) => format!("{minutes}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, minutes) => format!("{hours}h {minutes}m"),
    }
}

fn format_price(minor_units: u64, currency: &str) -> String {
    format!(
        "{}.{:02} {}",
        minor_units / 100,
        minor_units % 100,
        currency.to_uppercase()
    )
}
