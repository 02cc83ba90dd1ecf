//! Vote repository.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::database::Database;
use crate::entities::{Poll, PollId, User, UserId, Vote, VoteId};
use crate::relations;
use votely_common::{AppError, AppResult};

/// Fields of a vote about to be cast.
#[derive(Clone, Debug)]
pub struct NewVote {
    pub user: UserId,
    pub poll: PollId,
    pub options: Vec<i32>,
}

/// Vote repository for store operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<Database>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Find a vote by ID.
    pub async fn find_by_id(&self, id: VoteId) -> AppResult<Option<Vote>> {
        Ok(self.db.read().await.votes.get(&id).cloned())
    }

    /// Get a vote by ID, returning error if not found.
    pub async fn get_by_id(&self, id: VoteId) -> AppResult<Vote> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::VoteNotFound(id.to_string()))
    }

    /// All votes in id order.
    pub async fn find_all(&self) -> AppResult<Vec<Vote>> {
        Ok(self.db.read().await.votes.values().cloned().collect())
    }

    /// Votes cast by a user.
    pub async fn find_by_user(&self, user: UserId) -> AppResult<Vec<Vote>> {
        let tables = self.db.read().await;
        Ok(relations::votes_by_user(user, &tables.votes)
            .cloned()
            .collect())
    }

    /// Votes cast on a poll.
    pub async fn find_by_poll(&self, poll: PollId) -> AppResult<Vec<Vote>> {
        let tables = self.db.read().await;
        Ok(relations::votes_by_poll(poll, &tables.votes)
            .cloned()
            .collect())
    }

    /// Resolve the user who cast a vote.
    pub async fn find_user(&self, id: VoteId) -> AppResult<User> {
        let tables = self.db.read().await;
        let vote = tables
            .votes
            .get(&id)
            .ok_or_else(|| AppError::VoteNotFound(id.to_string()))?;
        relations::vote_user(vote, &tables.users).cloned()
    }

    /// Resolve the poll a vote was cast on.
    pub async fn find_poll(&self, id: VoteId) -> AppResult<Poll> {
        let tables = self.db.read().await;
        let vote = tables
            .votes
            .get(&id)
            .ok_or_else(|| AppError::VoteNotFound(id.to_string()))?;
        relations::vote_poll(vote, &tables.polls).cloned()
    }

    /// Number of votes.
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.db.read().await.votes.len() as u64)
    }

    /// Number of votes cast by a user.
    pub async fn count_by_user(&self, user: UserId) -> AppResult<u64> {
        let tables = self.db.read().await;
        Ok(relations::votes_by_user(user, &tables.votes).count() as u64)
    }

    /// Number of votes cast on a poll.
    pub async fn count_by_poll(&self, poll: PollId) -> AppResult<u64> {
        let tables = self.db.read().await;
        Ok(relations::votes_by_poll(poll, &tables.votes).count() as u64)
    }

    /// Number of votes cast on polls authored by `author`.
    pub async fn count_received_by_author(&self, author: UserId) -> AppResult<u64> {
        let tables = self.db.read().await;
        Ok(relations::polls_by_author(author, &tables.polls)
            .map(|poll| relations::votes_by_poll(poll.id, &tables.votes).count() as u64)
            .sum())
    }

    /// Cast a vote.
    ///
    /// References and the option selection are checked, the id is assigned and
    /// appended to both the voter's and the poll's vote lists under one write
    /// lock. On error nothing is written.
    pub async fn create(&self, new: NewVote) -> AppResult<Vote> {
        let mut tables = self.db.write().await;

        if !tables.users.contains_key(&new.user) {
            return Err(AppError::Validation(format!(
                "Voting user {} does not exist",
                new.user
            )));
        }
        let poll = tables.polls.get(&new.poll).ok_or_else(|| {
            AppError::Validation(format!("Poll {} does not exist", new.poll))
        })?;
        poll.check_selection(&new.options)?;

        let id = tables.next_vote_id();
        let now = Utc::now();
        let vote = Vote {
            id,
            user: new.user,
            poll: new.poll,
            options: new.options,
            created_at: now,
            updated_at: now,
        };

        tables.votes.insert(id, vote.clone());
        if let Some(user) = tables.users.get_mut(&vote.user) {
            user.votes.push(id);
        }
        if let Some(poll) = tables.polls.get_mut(&vote.poll) {
            poll.votes.push(id);
        }

        info!(vote_id = %id, poll_id = %vote.poll, user_id = %vote.user, "Cast vote");
        Ok(vote)
    }
}
