//! Vote entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PollId, UserId, VoteId};

/// A user's vote on a poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: VoteId,

    /// Weak reference to the voting user
    pub user: UserId,

    /// Weak reference to the poll voted on
    pub poll: PollId,

    /// Selected option indices (0-based)
    pub options: Vec<i32>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
