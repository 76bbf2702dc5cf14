use serde::{Deserialize, Serialize};

/// State string Bitbucket uses for open tasks.
pub const UNRESOLVED: &str = "UNRESOLVED";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub html: Link,
}

/// Profile links: the usual self/html pair plus an avatar, all in one object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarLinks {
    #[serde(flatten)]
    pub links: Links,
    pub avatar: Link,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskCreator {
    pub display_name: String,
    pub links: AvatarLinks,
    #[serde(rename = "type")]
    pub creator_type: String,
    pub uuid: String,
    pub account_id: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub raw: String,
    pub markup: String,
    pub html: String,
}

/// The pull request comment a task hangs off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: i64,
    pub links: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: i64,
    pub state: String,
    pub content: TaskContent,
    pub creator: TaskCreator,
    pub created_on: String,
    pub updated_on: String,
    pub links: Links,
    pub comment: Comment,
}

impl Task {
    pub fn is_unresolved(&self) -> bool {
        self.state == UNRESOLVED
    }
}

/// One page of the pull request task collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPage {
    pub values: Vec<Task>,
    pub pagelen: u32,
    pub size: u32,
    pub page: u32,
    #[serde(deserialize_with = "null_as_empty")]
    pub next: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub previous: String,
}

impl TaskPage {
    /// URL of the following page, or `None` on the last page.
    pub fn next_url(&self) -> Option<&str> {
        (!self.next.is_empty()).then_some(self.next.as_str())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
