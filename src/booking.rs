use serde::{Deserialize, Serialize};

pub type UserID = u64;
pub type EventTypeID = u64;
pub type Username = String;
pub type Slug = String;

pub const DEFAULT_STORE_PATH: &str = "/home/shared/booking-store";

/// Seconds after which a generated profile page may be regenerated.
pub const REVALIDATE_SECS: u64 = 1;

pub const DEFAULT_AVATAR: &str = "/avatar.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    #[default]
    Free,
    Trial,
    Pro,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserID,
    #[serde(default)]
    pub username: Option<Username>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub plan: Plan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulingType {
    RoundRobin,
    Collective,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: EventTypeID,
    pub slug: Slug,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// minutes
    pub length: u32,
    #[serde(default)]
    pub scheduling_type: Option<SchedulingType>,
    /// in the currency's minor unit
    #[serde(default)]
    pub price: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub position: i32,
}

fn default_currency() -> String {
    String::from("usd")
}

/// The subset of a user shown on their public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub username: Option<Username>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEventTypes {
    pub user: PublicUser,
    pub event_types: Vec<EventType>,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            username: self.username.clone(),
            name: self.name.clone(),
            bio: self.bio.clone(),
            avatar: self.avatar.clone(),
            theme: self.theme.clone(),
        }
    }
}

impl PublicUser {
    /// `name`, falling back to `username`, falling back to an empty string.
    pub fn name_or_username(&self) -> &str {
        [self.name.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .find(|it| !it.is_empty())
            .unwrap_or("")
    }
}

pub fn is_valid_handle(handle: &str) -> bool {
    static HANDLE_PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    let handle_pattern = HANDLE_PATTERN.get_or_init(|| {
        regex::Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._-]*$").expect("constant pattern should parse")
    });

    handle_pattern.is_match(handle)
}
