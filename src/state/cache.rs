use crate::booking::Username;
use crate::error::Result;
use crate::i18n::Locale;
use crate::loader::{PageProps, StaticProps};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub type PageKey = (Locale, Username);

#[derive(Debug, Clone)]
pub struct CachedPage {
    pub props: PageProps,
    pub generated_at: Instant,
    pub revalidate: Duration,
}

#[derive(Debug, Default)]
pub struct PageCache {
    pub pages: HashMap<PageKey, CachedPage>,
    regenerating: HashSet<PageKey>,
}

impl CachedPage {
    pub fn is_stale(&self) -> bool {
        self.generated_at.elapsed() >= self.revalidate
    }
}

impl super::State {
    /// Props for a profile page, `None` if it doesn't exist.
    ///
    /// A cached page is served as is; once it is older than its revalidate
    /// interval it is still served, but regenerated in the background. A page
    /// not in the cache is generated before responding.
    pub async fn page_props(
        self: &Arc<Self>,
        locale: Locale,
        username: &str,
    ) -> Result<Option<PageProps>> {
        let cached = self
            .pages
            .read()
            .await
            .pages
            .get(&(locale, username.to_owned()))
            .cloned();

        match cached {
            Some(page) => {
                if page.is_stale() {
                    self.start_regeneration((locale, username.to_owned())).await;
                }
                Ok(Some(page.props))
            }
            None => self.generate_page(locale, username).await,
        }
    }

    pub async fn generate_page(
        &self,
        locale: Locale,
        username: &str,
    ) -> Result<Option<PageProps>> {
        let static_props = crate::loader::get_static_props(&self.store, locale, username).await?;
        let key = (locale, username.to_owned());

        match static_props {
            StaticProps::Found { props, revalidate } => {
                self.pages.write().await.pages.insert(
                    key,
                    CachedPage {
                        props: props.clone(),
                        generated_at: Instant::now(),
                        revalidate: Duration::from_secs(revalidate),
                    },
                );
                Ok(Some(props))
            }
            StaticProps::NotFound { .. } => {
                self.pages.write().await.pages.remove(&key);
                Ok(None)
            }
        }
    }

    async fn start_regeneration(self: &Arc<Self>, key: PageKey) {
        if !self.pages.write().await.regenerating.insert(key.clone()) {
            return;
        }

        let state = self.clone();
        tokio::spawn(async move {
            let (locale, username) = &key;
            match state.generate_page(*locale, username).await {
                Ok(Some(_)) => tracing::debug!(%locale, %username, "regenerated page"),
                Ok(None) => tracing::debug!(%locale, %username, "page no longer exists"),
                Err(err) => tracing::error!(%locale, %username, %err, "error regenerating page"),
            }
            state.pages.write().await.regenerating.remove(&key);
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::booking::Plan;
    use crate::i18n::{I18n, Locale};
    use crate::state::State;
    use crate::store::testing::*;
    use crate::store::Store;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn state(dir: &tempfile::TempDir) -> Arc<State> {
        Arc::new(State::new(Store::new(dir.path()), I18n::new(Locale::En)))
    }

    #[tokio::test]
    async fn miss_generates_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        write_user(&state.store, &user(1, Some("alice"), None, Plan::Free));

        let props = state.page_props(Locale::En, "alice").await.unwrap().unwrap();
        assert_eq!(props.username, "alice");
        assert!(state
            .pages
            .read()
            .await
            .pages
            .contains_key(&(Locale::En, String::from("alice"))));
    }

    #[tokio::test]
    async fn not_found_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);

        assert!(state.page_props(Locale::En, "ghost").await.unwrap().is_none());
        assert!(state.pages.read().await.pages.is_empty());
    }

    #[tokio::test]
    async fn stale_page_is_served_then_regenerated() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        write_user(&state.store, &user(1, Some("alice"), None, Plan::Free));
        state.generate_page(Locale::En, "alice").await.unwrap();

        let key = (Locale::En, String::from("alice"));
        let backdated = Instant::now()
            .checked_sub(Duration::from_secs(5))
            .unwrap();
        state.pages.write().await.pages.get_mut(&key).unwrap().generated_at = backdated;

        // the user disappears; the stale copy is still served once
        std::fs::remove_file(dir.path().join("user").join("alice.json")).unwrap();
        let props = state.page_props(Locale::En, "alice").await.unwrap();
        assert!(props.is_some());

        for _ in 0..100 {
            if !state.pages.read().await.pages.contains_key(&key) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!state.pages.read().await.pages.contains_key(&key));
        assert!(state.page_props(Locale::En, "alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn prerender_generates_static_paths() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        write_user(&state.store, &user(1, Some("alice"), Some("en"), Plan::Pro));
        write_user(&state.store, &user(2, Some("bob"), Some("fr"), Plan::Pro));
        write_user(&state.store, &user(3, Some("carol"), Some("fr"), Plan::Free));

        assert_eq!(state.prerender().await.unwrap(), 3);

        let pages = state.pages.read().await;
        assert!(pages.pages.contains_key(&(Locale::Fr, String::from("bob"))));
        assert!(!pages.pages.contains_key(&(Locale::En, String::from("carol"))));
    }

    #[tokio::test]
    async fn concurrent_stale_hits_regenerate_once() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        write_user(&state.store, &user(1, Some("alice"), None, Plan::Free));
        state.generate_page(Locale::En, "alice").await.unwrap();

        let key = (Locale::En, String::from("alice"));
        let backdated = Instant::now()
            .checked_sub(Duration::from_secs(5))
            .unwrap();
        state.pages.write().await.pages.get_mut(&key).unwrap().generated_at = backdated;

        // both hits land before the spawned regeneration gets to run
        assert!(state.page_props(Locale::En, "alice").await.unwrap().is_some());
        assert!(state.page_props(Locale::En, "alice").await.unwrap().is_some());

        let pages = state.pages.read().await;
        assert_eq!(pages.regenerating.len(), 1);
        assert!(pages.regenerating.contains(&key));
    }

    #[tokio::test]
    async fn prerender_skips_unsupported_locales() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        write_user(&state.store, &user(5, Some("erin"), Some("xx"), Plan::Pro));

        assert_eq!(state.prerender().await.unwrap(), 1);
        assert_eq!(state.pages.read().await.pages.len(), 1);
    }

    #[tokio::test]
    async fn prerender_survives_a_malformed_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        write_user(&state.store, &user(1, Some("alice"), Some("en"), Plan::Pro));
        std::fs::write(
            dir.path().join("user").join("zed.json"),
            r#"{"id":9,"plan":"PRO","username":42}"#,
        )
        .unwrap();

        assert_eq!(state.prerender().await.unwrap(), 1);
        assert!(state
            .pages
            .read()
            .await
            .pages
            .contains_key(&(Locale::En, String::from("alice"))));
    }
}
