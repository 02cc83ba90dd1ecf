//! Poll repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::database::Database;
use crate::entities::{Poll, PollId, User, UserId};
use crate::relations;
use votely_common::{AppError, AppResult};

/// A poll together with the timestamp of its most recent vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollWithActivity {
    pub poll: Poll,
    pub last_voted_at: Option<DateTime<Utc>>,
}

/// Fields of a poll about to be created.
#[derive(Clone, Debug)]
pub struct NewPoll {
    pub title: String,
    pub options: Vec<String>,
    pub author: UserId,
    pub multi: bool,
}

/// Poll repository for store operations.
#[derive(Clone)]
pub struct PollRepository {
    db: Arc<Database>,
}

impl PollRepository {
    /// Create a new poll repository.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Find a poll by ID.
    pub async fn find_by_id(&self, id: PollId) -> AppResult<Option<Poll>> {
        Ok(self.db.read().await.polls.get(&id).cloned())
    }

    /// Get a poll by ID, returning error if not found.
    pub async fn get_by_id(&self, id: PollId) -> AppResult<Poll> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PollNotFound(id.to_string()))
    }

    /// Polls authored by a user, in id order.
    pub async fn find_by_author(&self, author: UserId) -> AppResult<Vec<Poll>> {
        let tables = self.db.read().await;
        Ok(relations::polls_by_author(author, &tables.polls)
            .cloned()
            .collect())
    }

    /// Polls matching `filter`, each paired with its latest vote timestamp.
    ///
    /// Polls and votes are read under one lock so the pairing is consistent.
    pub async fn find_with_activity<F>(&self, filter: F) -> AppResult<Vec<PollWithActivity>>
    where
        F: Fn(&Poll) -> bool,
    {
        let tables = self.db.read().await;
        Ok(tables
            .polls
            .values()
            .filter(|&poll| filter(poll))
            .map(|poll| PollWithActivity {
                last_voted_at: relations::latest_vote_at(poll, &tables.votes),
                poll: poll.clone(),
            })
            .collect())
    }

    /// Resolve the author of a poll.
    pub async fn find_author(&self, id: PollId) -> AppResult<User> {
        let tables = self.db.read().await;
        let poll = tables
            .polls
            .get(&id)
            .ok_or_else(|| AppError::PollNotFound(id.to_string()))?;
        relations::poll_author(poll, &tables.users).cloned()
    }

    /// Number of polls.
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.db.read().await.polls.len() as u64)
    }

    /// Number of polls authored by a user.
    pub async fn count_by_author(&self, author: UserId) -> AppResult<u64> {
        let tables = self.db.read().await;
        Ok(relations::polls_by_author(author, &tables.polls).count() as u64)
    }

    /// Create a new poll and append it to its author's poll list.
    ///
    /// The author check, id assignment and append happen under one write lock.
    pub async fn create(&self, new: NewPoll) -> AppResult<Poll> {
        let mut tables = self.db.write().await;

        if !tables.users.contains_key(&new.author) {
            return Err(AppError::Validation(format!(
                "Poll author {} does not exist",
                new.author
            )));
        }

        let id = tables.next_poll_id();
        let now = Utc::now();
        let poll = Poll {
            id,
            title: new.title,
            multi: new.multi,
            options: new.options,
            author: new.author,
            votes: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        tables.polls.insert(id, poll.clone());
        if let Some(author) = tables.users.get_mut(&new.author) {
            author.polls.push(id);
        }

        info!(poll_id = %id, author = %poll.author, options = poll.options.len(), "Created poll");
        Ok(poll)
    }
}
