//! User entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{PollId, UserId, VoteId};

/// A profile field whose value is only visible to its owner unless public.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateField<T> {
    pub value: Option<T>,
    #[serde(default)]
    pub public: bool,
}

impl<T> Default for PrivateField<T> {
    fn default() -> Self {
        Self {
            value: None,
            public: false,
        }
    }
}

impl<T> PrivateField<T> {
    /// A field visible to everyone.
    pub const fn public(value: T) -> Self {
        Self {
            value: Some(value),
            public: true,
        }
    }

    /// A field visible only to its owner.
    pub const fn private(value: T) -> Self {
        Self {
            value: Some(value),
            public: false,
        }
    }
}

/// Registered user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,

    pub username: String,

    pub email: String,

    pub password: String,

    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,

    /// Profile description
    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub birth_date: PrivateField<NaiveDate>,

    /// Display name
    #[serde(default)]
    pub name: PrivateField<String>,

    /// Polls authored by this user, in creation order
    #[serde(default)]
    pub polls: Vec<PollId>,

    /// Votes cast by this user, in creation order
    #[serde(default)]
    pub votes: Vec<VoteId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
