use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
    De,
    Es,
    Pt,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Es => "es",
            Locale::Pt => "pt",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        enum_iterator::all::<Locale>().find(|locale| locale.code() == code)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Locale::from_code(code).ok_or_else(|| {
            let supported = enum_iterator::all::<Locale>()
                .map(Locale::code)
                .collect::<Vec<_>>()
                .join(", ");
            format!("unsupported locale {code:?} (expected one of {supported})")
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    pub default_locale: Locale,
}

impl I18n {
    pub fn new(default_locale: Locale) -> I18n {
        I18n { default_locale }
    }

    /// Falls back to the default locale's text, then to the key itself.
    pub fn t<'a>(&self, locale: Locale, key: &'a str) -> &'a str {
        let text: Option<&'a str> =
            translate(locale, key).or_else(|| translate(self.default_locale, key));
        text.unwrap_or(key)
    }
}

fn translate(locale: Locale, key: &str) -> Option<&'static str> {
    let text = match (locale, key) {
        (Locale::En, "uh_oh") => "Uh oh!",
        (Locale::En, "no_event_types_have_been_setup") => {
            "This user hasn't set up any event types yet."
        }
        (Locale::En, "loading") => "Loading...",
        (Locale::En, "round_robin") => "Round Robin",
        (Locale::En, "collective") => "Collective",

        (Locale::Fr, "uh_oh") => "Oh oh !",
        (Locale::Fr, "no_event_types_have_been_setup") => {
            "Cet utilisateur n'a pas encore configuré de types d'événements."
        }
        (Locale::Fr, "loading") => "Chargement...",
        (Locale::Fr, "round_robin") => "Round Robin",
        (Locale::Fr, "collective") => "Collectif",

        (Locale::De, "uh_oh") => "Oh nein!",
        (Locale::De, "no_event_types_have_been_setup") => {
            "Dieser Benutzer hat noch keine Ereignistypen eingerichtet."
        }
        (Locale::De, "loading") => "Wird geladen...",
        (Locale::De, "collective") => "Kollektiv",

        (Locale::Es, "uh_oh") => "¡Oh, no!",
        (Locale::Es, "no_event_types_have_been_setup") => {
            "Este usuario aún no ha configurado ningún tipo de evento."
        }
        (Locale::Es, "loading") => "Cargando...",
        (Locale::Es, "collective") => "Colectivo",

        (Locale::Pt, "uh_oh") => "Oh não!",
        (Locale::Pt, "no_event_types_have_been_setup") => {
            "Este usuário ainda não configurou nenhum tipo de evento."
        }
        (Locale::Pt, "loading") => "Carregando...",
        (Locale::Pt, "collective") => "Coletivo",

        _ => return None,
    };

    Some(text)
}
