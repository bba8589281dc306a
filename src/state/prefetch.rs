use crate::booking::REVALIDATE_SECS;
use crate::error::Result;
use crate::query::{CachedQuery, Query, QueryKey};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Query results fetched ahead of navigation, shared by all requests.
#[derive(Debug, Default)]
pub struct PrefetchCache {
    pub entries: HashMap<QueryKey, CachedQuery>,
}

fn is_fresh(cached: &CachedQuery) -> bool {
    let age = chrono::Utc::now() - cached.data_updated_at;
    age < chrono::Duration::seconds(REVALIDATE_SECS as i64)
}

impl super::State {
    /// Fetches `queries` into the shared cache on a background task.
    pub fn prefetch(self: &Arc<Self>, queries: Vec<Query>) {
        if queries.is_empty() {
            return;
        }

        let state = self.clone();
        tokio::spawn(async move {
            for query in queries {
                state.prefetch_query(&query).await;
            }
        });
    }

    /// Refreshes one entry unless it is still fresh. A query that no longer
    /// resolves drops its entry; failures are logged and dropped.
    pub async fn prefetch_query(&self, query: &Query) {
        let key = query.key();
        if let Some(cached) = self.prefetched.read().await.entries.get(&key) {
            if is_fresh(cached) {
                return;
            }
        }

        match query.execute(&self.store).await {
            Ok(Some(data)) => {
                self.prefetched.write().await.entries.insert(
                    key,
                    CachedQuery {
                        data,
                        data_updated_at: chrono::Utc::now(),
                    },
                );
            }
            Ok(None) => {
                self.prefetched.write().await.entries.remove(&key);
            }
            Err(err) => tracing::warn!(query = query.path(), %err, "prefetch failed"),
        }
    }

    /// Data for `query`, from the shared cache when it has been prefetched.
    /// Stale entries are served and refreshed in the background; misses go
    /// to the store and are cached.
    pub async fn cached_query(self: &Arc<Self>, query: &Query) -> Result<Option<Value>> {
        let key = query.key();
        let cached = self.prefetched.read().await.entries.get(&key).cloned();

        if let Some(cached) = cached {
            if !is_fresh(&cached) {
                self.prefetch(vec![query.clone()]);
            }
            return Ok(Some(cached.data));
        }

        let Some(data) = query.execute(&self.store).await? else {
            return Ok(None);
        };
        self.prefetched.write().await.entries.insert(
            key,
            CachedQuery {
                data: data.clone(),
                data_updated_at: chrono::Utc::now(),
            },
        );

        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use crate::booking::Plan;
    use crate::i18n::{I18n, Locale};
    use crate::query::Query;
    use crate::state::State;
    use crate::store::testing::*;
    use crate::store::Store;
    use std::sync::Arc;

    fn state(dir: &tempfile::TempDir) -> Arc<State> {
        Arc::new(State::new(Store::new(dir.path()), I18n::new(Locale::En)))
    }

    #[tokio::test]
    async fn prefetched_entry_outlives_its_source() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        write_user(&state.store, &user(1, Some("alice"), None, Plan::Pro));
        write_event_types(&state.store, 1, &[event_type(1, "intro", "Intro")]);

        let query = Query::event_type_by_username("intro", "alice");
        state.prefetch_query(&query).await;
        std::fs::remove_file(dir.path().join("event-types").join("1.json")).unwrap();

        let data = state.cached_query(&query).await.unwrap().unwrap();
        assert_eq!(data["title"], "Intro");
    }

    #[tokio::test]
    async fn prefetching_a_vanished_query_drops_it() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        write_user(&state.store, &user(1, Some("alice"), None, Plan::Pro));
        write_event_types(&state.store, 1, &[event_type(1, "intro", "Intro")]);

        let query = Query::event_type_by_username("intro", "alice");
        state.prefetch_query(&query).await;
        assert_eq!(state.prefetched.read().await.entries.len(), 1);

        write_event_types(&state.store, 1, &[]);
        let key = query.key();
        state
            .prefetched
            .write()
            .await
            .entries
            .get_mut(&key)
            .unwrap()
            .data_updated_at = chrono::Utc::now() - chrono::Duration::seconds(5);
        state.prefetch_query(&query).await;
        assert!(state.prefetched.read().await.entries.is_empty());
    }

    #[tokio::test]
    async fn misses_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);

        let query = Query::event_type_by_username("intro", "ghost");
        assert!(state.cached_query(&query).await.unwrap().is_none());
        assert!(state.prefetched.read().await.entries.is_empty());
    }
}
