//! Todo Domain Model
//!
//! Represents a todo entry as served by the mock REST backend.

use serde::{Deserialize, Serialize};

/// Newtype wrapper for Todo ID providing type safety
///
/// Ids are server-assigned positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Create a TodoId from a raw integer
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying integer
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The id following this one, if any
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(value.parse()?))
    }
}

/// Todo entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    #[serde(default)]
    pub todo_text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Build a todo from creation data and a freshly assigned id
    #[must_use]
    pub fn new(id: TodoId, data: NewTodo) -> Self {
        Self {
            id,
            todo_text: data.todo_text,
            completed: data.completed,
        }
    }

    /// Replace every field except the id (PUT semantics)
    ///
    /// Fields missing from the replacement fall back to their defaults.
    #[must_use]
    pub fn replaced_with(self, data: TodoReplacement) -> Self {
        Self {
            id: self.id,
            todo_text: data.todo_text.unwrap_or_default(),
            completed: data.completed.unwrap_or_default(),
        }
    }

    /// Apply only the provided fields (PATCH semantics)
    #[must_use]
    pub fn patched_with(self, data: TodoPatch) -> Self {
        Self {
            id: self.id,
            todo_text: data.todo_text.unwrap_or(self.todo_text),
            completed: data.completed.unwrap_or(self.completed),
        }
    }

    /// Check whether this todo satisfies every filter in the query
    #[must_use]
    pub fn matches(&self, query: &TodoQuery) -> bool {
        query.id.map_or(true, |id| id == self.id)
            && query
                .todo_text
                .as_deref()
                .map_or(true, |text| text == self.todo_text)
            && query.completed.map_or(true, |done| done == self.completed)
    }
}

/// Data required to create a new Todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub todo_text: String,
    pub completed: bool,
}

impl NewTodo {
    #[must_use]
    pub fn new(todo_text: impl Into<String>, completed: bool) -> Self {
        Self {
            todo_text: todo_text.into(),
            completed,
        }
    }
}

/// Full replacement body (PUT)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoReplacement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Partial update body (PATCH)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Equality filters for `GET /todos`; absent fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoQuery {
    #[must_use]
    pub fn by_id(id: TodoId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_text(todo_text: impl Into<String>) -> Self {
        Self {
            todo_text: Some(todo_text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// True when no filter is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.todo_text.is_none() && self.completed.is_none()
    }
}
