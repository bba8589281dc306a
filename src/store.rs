use crate::booking::{is_valid_handle, EventType, Plan, User, UserID};
use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// JSON file store.
///
/// ```text
/// {root}/user/{username}.json        one `User`
/// {root}/user/_{id}.json             a `User` without a username
/// {root}/event-types/{user_id}.json  `[EventType]`
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

/// Projection of a user used for static path enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserPathInfo {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Deserialize)]
struct PlanOnly {
    #[serde(default)]
    plan: Plan,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Store {
        Store { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn users_dir(&self) -> PathBuf {
        self.root.join("user")
    }

    fn event_types_dir(&self) -> PathBuf {
        self.root.join("event-types")
    }

    /// `Ok(None)` if no user has that username.
    pub async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        if !is_valid_handle(username) {
            return Ok(None);
        }

        let file = match tokio::fs::read(self.users_dir().join(format!("{username}.json"))).await
        {
            Ok(it) => it,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_slice(&file)?))
    }

    /// Visible event types of a user, highest `position` first, then by id.
    pub async fn event_types_of(&self, user_id: UserID) -> Result<Vec<EventType>> {
        let file = match tokio::fs::read(self.event_types_dir().join(format!("{user_id}.json")))
            .await
        {
            Ok(it) => it,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut event_types = serde_json::from_slice::<Vec<EventType>>(&file)?;
        event_types.retain(|event_type| !event_type.hidden);
        event_types.sort_by(|a, b| b.position.cmp(&a.position).then(a.id.cmp(&b.id)));

        Ok(event_types)
    }

    /// `username` and `locale` of every user on `plan`, in file name order.
    pub async fn users_on_plan(&self, plan: Plan) -> Result<Vec<UserPathInfo>> {
        let mut users_files = match tokio::fs::read_dir(self.users_dir()).await {
            Ok(it) => it,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = users_files.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|it| it.to_str()) != Some("json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut users = Vec::new();
        for path in paths {
            let file = match tokio::fs::read(&path).await {
                Ok(it) => it,
                Err(err) => {
                    tracing::warn!(?path, %err, "skipping unreadable user file");
                    continue;
                }
            };

            let user_plan = match serde_json::from_slice::<PlanOnly>(&file) {
                Ok(it) => it.plan,
                Err(err) => {
                    tracing::warn!(?path, %err, "skipping unreadable user file");
                    continue;
                }
            };
            if user_plan != plan {
                continue;
            }

            match serde_json::from_slice::<UserPathInfo>(&file) {
                Ok(it) => users.push(it),
                Err(err) => tracing::warn!(?path, %err, "skipping malformed user file"),
            }
        }

        Ok(users)
    }
}
