//! Typed queries over the store, with a client-side cache that can be
//! dehydrated into page props and hydrated again when rendering.

use crate::booking::{Slug, UserEventTypes, Username};
use crate::error::{Error, Result};
use crate::store::Store;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEventTypesInput {
    pub username: Username,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeByUsernameInput {
    pub slug: Slug,
    pub username: Username,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    UserEventTypes(UserEventTypesInput),
    EventTypeByUsername(EventTypeByUsernameInput),
}

pub const USER_EVENT_TYPES: &str = "booking.userEventTypes";
pub const EVENT_TYPE_BY_USERNAME: &str = "booking.eventTypeByUsername";

/// `[path, input]`, serialized into a string so it can key a map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(String);

impl Query {
    pub fn user_event_types(username: impl Into<Username>) -> Query {
        Query::UserEventTypes(UserEventTypesInput {
            username: username.into(),
        })
    }

    pub fn event_type_by_username(slug: impl Into<Slug>, username: impl Into<Username>) -> Query {
        Query::EventTypeByUsername(EventTypeByUsernameInput {
            slug: slug.into(),
            username: username.into(),
        })
    }

    /// Parses a procedure path and its JSON input, as sent to the query endpoint.
    pub fn parse(path: &str, input: &str) -> Result<Query> {
        let bad_input = |err: serde_json::Error| Error::BadRequest(format!("{path}: {err}"));

        match path {
            USER_EVENT_TYPES => Ok(Query::UserEventTypes(
                serde_json::from_str(input).map_err(bad_input)?,
            )),
            EVENT_TYPE_BY_USERNAME => Ok(Query::EventTypeByUsername(
                serde_json::from_str(input).map_err(bad_input)?,
            )),
            _ => Err(Error::NoSuchQuery(format!("unknown procedure {path}"))),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Query::UserEventTypes(_) => USER_EVENT_TYPES,
            Query::EventTypeByUsername(_) => EVENT_TYPE_BY_USERNAME,
        }
    }

    fn input(&self) -> Value {
        let input = match self {
            Query::UserEventTypes(input) => serde_json::to_value(input),
            Query::EventTypeByUsername(input) => serde_json::to_value(input),
        };
        input.expect("query inputs should serialize")
    }

    pub fn key(&self) -> QueryKey {
        QueryKey(Value::Array(vec![Value::from(self.path()), self.input()]).to_string())
    }

    /// `Ok(None)` when the query resolves to no data.
    pub async fn execute(&self, store: &Store) -> Result<Option<Value>> {
        match self {
            Query::UserEventTypes(input) => {
                let Some(user) = store.user_by_username(&input.username).await? else {
                    return Ok(None);
                };
                let event_types = store.event_types_of(user.id).await?;

                Ok(Some(serde_json::to_value(UserEventTypes {
                    user: user.public(),
                    event_types,
                })?))
            }
            Query::EventTypeByUsername(input) => {
                let Some(user) = store.user_by_username(&input.username).await? else {
                    return Ok(None);
                };
                let event_type = store
                    .event_types_of(user.id)
                    .await?
                    .into_iter()
                    .find(|event_type| event_type.slug == input.slug);

                event_type
                    .map(serde_json::to_value)
                    .transpose()
                    .map_err(Error::from)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedQuery {
    pub data: Value,
    pub data_updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DehydratedQuery {
    pub query_key: QueryKey,
    pub state: CachedQuery,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DehydratedState {
    pub queries: Vec<DehydratedQuery>,
}

impl DehydratedState {
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Query cache bound to a store.
#[derive(Debug, Clone)]
pub struct QueryClient {
    store: Store,
    cache: BTreeMap<QueryKey, CachedQuery>,
}

impl QueryClient {
    pub fn new(store: Store) -> QueryClient {
        QueryClient {
            store,
            cache: BTreeMap::new(),
        }
    }

    pub fn hydrate(store: Store, state: DehydratedState) -> QueryClient {
        QueryClient {
            store,
            cache: state
                .queries
                .into_iter()
                .map(|query| (query.query_key, query.state))
                .collect(),
        }
    }

    pub fn dehydrate(&self) -> DehydratedState {
        DehydratedState {
            queries: self
                .cache
                .iter()
                .map(|(query_key, state)| DehydratedQuery {
                    query_key: query_key.clone(),
                    state: state.clone(),
                })
                .collect(),
        }
    }

    /// Runs the query and caches its data. Queries without data are not cached.
    pub async fn fetch_query(&mut self, query: &Query) -> Result<Option<Value>> {
        let data = query.execute(&self.store).await?;

        if let Some(data) = &data {
            self.cache.insert(
                query.key(),
                CachedQuery {
                    data: data.clone(),
                    data_updated_at: chrono::Utc::now(),
                },
            );
        }

        Ok(data)
    }

    pub fn get_query_data(&self, query: &Query) -> Option<&Value> {
        self.cache.get(&query.key()).map(|cached| &cached.data)
    }

    /// Typed read of cached data; `None` if absent or of the wrong shape.
    pub fn get_typed<T: serde::de::DeserializeOwned>(&self, query: &Query) -> Option<T> {
        let data = self.get_query_data(query)?;
        match serde_json::from_value(data.clone()) {
            Ok(it) => Some(it),
            Err(err) => {
                tracing::warn!(query = query.path(), %err, "cached query data has the wrong shape");
                None
            }
        }
    }

    pub fn user_event_types(&self, username: &str) -> Option<UserEventTypes> {
        self.get_typed(&Query::user_event_types(username))
    }
}
