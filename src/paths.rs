use crate::booking::Plan;
use crate::error::Result;
use crate::i18n::Locale;
use crate::store::Store;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StaticPath {
    pub user: String,
    pub locale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// paths that weren't generated up front are rendered on first request
    /// and cached afterwards
    Blocking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPaths {
    pub paths: Vec<StaticPath>,
    pub fallback: Fallback,
}

/// Profile paths generated ahead of time: everyone on the PRO plan, in the
/// default locale and in their own preferred locale.
pub async fn static_paths(store: &Store, default_locale: Locale) -> Result<StaticPaths> {
    let users = store.users_on_plan(Plan::Pro).await?;

    let paths = users
        .into_iter()
        .flat_map(|user| {
            let Some(username) = user.username.filter(|it| !it.is_empty()) else {
                return Vec::new();
            };

            let mut paths = vec![StaticPath {
                user: username.clone(),
                locale: default_locale.code().to_owned(),
            }];

            if let Some(locale) = user
                .locale
                .filter(|it| !it.is_empty() && it != default_locale.code())
            {
                paths.push(StaticPath {
                    user: username,
                    locale,
                });
            }

            paths
        })
        .collect();

    Ok(StaticPaths {
        paths,
        fallback: Fallback::Blocking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::*;

    fn path(user: &str, locale: &str) -> StaticPath {
        StaticPath {
            user: user.to_owned(),
            locale: locale.to_owned(),
        }
    }

    #[tokio::test]
    async fn default_locale_only_when_preferences_match() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        write_user(&store, &user(1, Some("alice"), Some("en"), Plan::Pro));

        let static_paths = static_paths(&store, Locale::En).await.unwrap();
        assert_eq!(static_paths.paths, [path("alice", "en")]);
        assert_eq!(static_paths.fallback, Fallback::Blocking);
    }

    #[tokio::test]
    async fn preferred_locale_adds_a_second_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        write_user(&store, &user(2, Some("bob"), Some("fr"), Plan::Pro));

        let static_paths = static_paths(&store, Locale::En).await.unwrap();
        assert_eq!(static_paths.paths, [path("bob", "en"), path("bob", "fr")]);
    }

    #[tokio::test]
    async fn skips_users_without_username_or_pro_plan() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        write_user(&store, &user(1, Some("alice"), None, Plan::Pro));
        write_user(&store, &user(2, None, Some("fr"), Plan::Pro));
        write_user(&store, &user(3, Some(""), Some("fr"), Plan::Pro));
        write_user(&store, &user(4, Some("dave"), Some("de"), Plan::Trial));

        let static_paths = static_paths(&store, Locale::En).await.unwrap();
        assert_eq!(static_paths.paths, [path("alice", "en")]);
    }

    #[tokio::test]
    async fn no_users_no_paths() {
        let dir = tempfile::tempdir().unwrap();
        let static_paths = static_paths(&Store::new(dir.path()), Locale::De)
            .await
            .unwrap();
        assert!(static_paths.paths.is_empty());
    }

    #[tokio::test]
    async fn unsupported_preferred_locale_is_still_listed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        write_user(&store, &user(5, Some("erin"), Some("xx"), Plan::Pro));

        let static_paths = static_paths(&store, Locale::En).await.unwrap();
        assert_eq!(static_paths.paths, [path("erin", "en"), path("erin", "xx")]);
    }
}
