use crate::booking::{Username, REVALIDATE_SECS};
use crate::error::Result;
use crate::i18n::Locale;
use crate::query::{DehydratedState, Query, QueryClient};
use crate::store::Store;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    pub trpc_state: DehydratedState,
    pub username: Username,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StaticProps {
    Found {
        props: PageProps,
        /// seconds
        revalidate: u64,
    },
    NotFound {
        #[serde(rename = "notFound")]
        not_found: bool,
    },
}

impl StaticProps {
    fn not_found() -> StaticProps {
        StaticProps::NotFound { not_found: true }
    }

    #[cfg(test)]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StaticProps::NotFound { .. })
    }
}

/// Fresh query context for one page generation.
pub fn ssg_init(store: &Store, locale: Locale) -> QueryClient {
    tracing::trace!(%locale, "initialising query context");
    QueryClient::new(store.clone())
}

/// Data for `/{locale}/{username}`: the dehydrated query cache after
/// fetching the user's event types, or not-found when there is no such user.
pub async fn get_static_props(
    store: &Store,
    locale: Locale,
    username: &str,
) -> Result<StaticProps> {
    let mut ssg = ssg_init(store, locale);

    let data = ssg.fetch_query(&Query::user_event_types(username)).await?;
    if data.is_none() {
        tracing::debug!(%locale, username, "no profile data");
        return Ok(StaticProps::not_found());
    }

    Ok(StaticProps::Found {
        props: PageProps {
            trpc_state: ssg.dehydrate(),
            username: username.to_owned(),
        },
        revalidate: REVALIDATE_SECS,
    })
}
