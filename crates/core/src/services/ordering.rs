//! Poll ordering strategies.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use votely_common::AppError;
use votely_db::entities::Poll;
use votely_db::repositories::PollWithActivity;

/// How a poll listing is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum PollOrder {
    /// Polls with the most recent votes first.
    #[default]
    Trending = 1,
    /// Newest polls first.
    Recent = 2,
    /// Most voted polls first.
    Top = 3,
}

impl PollOrder {
    /// All orderings, in code order.
    pub const ALL: [Self; 3] = [Self::Trending, Self::Recent, Self::Top];

    /// Numeric code of this ordering.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a numeric code to an ordering. Unknown codes fall back to trending.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            2 => Self::Recent,
            3 => Self::Top,
            _ => Self::Trending,
        }
    }

    /// Order polls by this strategy.
    ///
    /// Sorting is stable and works on the given vector, never on stored
    /// collections; polls with equal keys keep their input order.
    #[must_use]
    pub fn apply(self, mut polls: Vec<PollWithActivity>) -> Vec<Poll> {
        match self {
            Self::Trending => polls.sort_by(by_latest_vote),
            Self::Recent => polls.sort_by(by_created_at),
            Self::Top => polls.sort_by(by_vote_count),
        }
        polls.into_iter().map(|entry| entry.poll).collect()
    }
}

impl fmt::Display for PollOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trending => "trending",
            Self::Recent => "recent",
            Self::Top => "top",
        })
    }
}

impl FromStr for PollOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trending" => Ok(Self::Trending),
            "recent" => Ok(Self::Recent),
            "top" => Ok(Self::Top),
            other => Err(AppError::BadRequest(format!("Unknown poll order: {other}"))),
        }
    }
}

/// Newest creation time first.
fn by_created_at(a: &PollWithActivity, b: &PollWithActivity) -> Ordering {
    b.poll.created_at.cmp(&a.poll.created_at)
}

/// Largest vote count first.
fn by_vote_count(a: &PollWithActivity, b: &PollWithActivity) -> Ordering {
    b.poll.vote_count().cmp(&a.poll.vote_count())
}

/// Most recent last vote first; polls without votes last.
///
/// `None < Some(_)` for `Option`, so comparing in reverse puts unvoted polls
/// after every voted one.
fn by_latest_vote(a: &PollWithActivity, b: &PollWithActivity) -> Ordering {
    b.last_voted_at.cmp(&a.last_voted_at)
}
