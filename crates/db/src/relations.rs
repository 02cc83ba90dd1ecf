//! Relationship resolution.
//!
//! Foreign ids (`poll.author`, `vote.user`, `vote.poll`) are weak references.
//! Everything that dereferences one goes through this module, which only
//! needs the source entity and the target collection.

use chrono::{DateTime, Utc};
use votely_common::{AppError, AppResult};

use crate::database::Table;
use crate::entities::{Poll, PollId, User, UserId, Vote, VoteId};

/// Resolve a poll's author.
pub fn poll_author<'a>(poll: &Poll, users: &'a Table<UserId, User>) -> AppResult<&'a User> {
    users.get(&poll.author).ok_or_else(|| {
        AppError::UserNotFound(format!("{} (author of poll {})", poll.author, poll.id))
    })
}

/// Resolve the user who cast a vote.
pub fn vote_user<'a>(vote: &Vote, users: &'a Table<UserId, User>) -> AppResult<&'a User> {
    users.get(&vote.user).ok_or_else(|| {
        AppError::UserNotFound(format!("{} (voter of vote {})", vote.user, vote.id))
    })
}

/// Resolve the poll a vote was cast on.
pub fn vote_poll<'a>(vote: &Vote, polls: &'a Table<PollId, Poll>) -> AppResult<&'a Poll> {
    polls.get(&vote.poll).ok_or_else(|| {
        AppError::PollNotFound(format!("{} (target of vote {})", vote.poll, vote.id))
    })
}

/// Polls authored by `author`, in id order. Unknown authors yield nothing.
pub fn polls_by_author(
    author: UserId,
    polls: &Table<PollId, Poll>,
) -> impl Iterator<Item = &Poll> {
    polls.values().filter(move |poll| poll.author == author)
}

/// Votes cast by `user`, in id order. Unknown users yield nothing.
pub fn votes_by_user(user: UserId, votes: &Table<VoteId, Vote>) -> impl Iterator<Item = &Vote> {
    votes.values().filter(move |vote| vote.user == user)
}

/// Votes cast on `poll`, in id order. Unknown polls yield nothing.
pub fn votes_by_poll(poll: PollId, votes: &Table<VoteId, Vote>) -> impl Iterator<Item = &Vote> {
    votes.values().filter(move |vote| vote.poll == poll)
}

/// Timestamp of the most recent vote on `poll`, or `None` when it has no votes.
///
/// The poll's vote ids are resolved and ordered by timestamp ascending; the
/// last one is the most recent.
pub fn latest_vote_at(poll: &Poll, votes: &Table<VoteId, Vote>) -> Option<DateTime<Utc>> {
    let mut cast: Vec<&Vote> = poll.votes.iter().filter_map(|id| votes.get(id)).collect();
    cast.sort_by_key(|vote| vote.created_at);
    cast.last().map(|vote| vote.created_at)
}
