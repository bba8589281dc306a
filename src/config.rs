use crate::error::{Error, Result};
use crate::i18n::Locale;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Public booking profile pages.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BOOKING_BIND", default_value = "0.0.0.0:8010")]
    pub bind: SocketAddr,

    /// Root of the JSON user and event type store
    #[arg(long, env = "BOOKING_STORE", default_value = crate::booking::DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Locale used for `/{user}` and for every pre-rendered profile
    #[arg(long, env = "BOOKING_DEFAULT_LOCALE", default_value = "en")]
    pub default_locale: Locale,

    /// Origin allowed to call the query API cross-site
    #[arg(long, env = "BOOKING_ALLOW_ORIGIN")]
    pub allow_origin: Option<String>,

    /// Don't generate PRO profiles before serving
    #[arg(long, env = "BOOKING_SKIP_PRERENDER")]
    pub skip_prerender: bool,
}

impl Config {
    pub fn allow_origin_header(&self) -> Result<Option<axum::http::HeaderValue>> {
        self.allow_origin
            .as_deref()
            .map(|origin| {
                axum::http::HeaderValue::from_str(origin)
                    .map_err(|err| Error::Config(format!("allow origin {origin:?}: {err}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["booking-pages"]).unwrap();
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.bind.port(), 8010);
        assert!(!config.skip_prerender);
    }

    #[test]
    fn rejects_unsupported_default_locale() {
        assert!(Config::try_parse_from(["booking-pages", "--default-locale", "xx"]).is_err());

        let config =
            Config::try_parse_from(["booking-pages", "--default-locale", "de"]).unwrap();
        assert_eq!(config.default_locale, Locale::De);
    }

    #[test]
    fn allow_origin_must_be_a_header_value() {
        let config =
            Config::try_parse_from(["booking-pages", "--allow-origin", "bad\nvalue"]).unwrap();
        assert!(matches!(config.allow_origin_header(), Err(Error::Config(_))));
    }
}
