use crate::i18n::I18n;
use crate::store::Store;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod cache;
pub mod prefetch;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

#[derive(Debug)]
pub struct State {
    pub store: Store,
    pub i18n: I18n,
    pub pages: RwLock<cache::PageCache>,
    pub prefetched: RwLock<prefetch::PrefetchCache>,
}

impl State {
    pub fn new(store: Store, i18n: I18n) -> State {
        State {
            store,
            i18n,
            pages: RwLock::new(cache::PageCache::default()),
            prefetched: RwLock::new(prefetch::PrefetchCache::default()),
        }
    }

    /// Generates every statically enumerated profile page into the cache.
    /// Returns how many pages were generated.
    pub async fn prerender(&self) -> crate::error::Result<usize> {
        let static_paths =
            crate::paths::static_paths(&self.store, self.i18n.default_locale).await?;

        let mut generated = 0;
        for path in static_paths.paths {
            let Some(locale) = crate::i18n::Locale::from_code(&path.locale) else {
                tracing::warn!(
                    user = %path.user,
                    locale = %path.locale,
                    "unsupported locale, skipping"
                );
                continue;
            };

            match self.generate_page(locale, &path.user).await {
                Ok(Some(_)) => generated += 1,
                Ok(None) => tracing::warn!(user = %path.user, %locale, "no data for static path"),
                Err(err) => {
                    tracing::error!(
                        user = %path.user,
                        %locale,
                        %err,
                        "error generating static path"
                    )
                }
            }
        }

        Ok(generated)
    }
}
