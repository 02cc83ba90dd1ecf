//! Poll service.

use regex::RegexBuilder;
use serde::Deserialize;
use tracing::debug;
use validator::Validate;
use votely_common::{AppError, AppResult};
use votely_db::entities::{Poll, PollId, User, UserId, Vote};
use votely_db::repositories::{NewPoll, PollRepository, VoteRepository};

use super::ordering::PollOrder;

/// Input for creating a poll.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollInput {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub options: Vec<String>,
    pub author: UserId,
    #[serde(default)]
    pub multi: bool,
}

impl CreatePollInput {
    /// Convenience constructor mirroring `create_poll(title, options, author, multi)`.
    pub fn new(title: impl Into<String>, options: &[&str], author: UserId, multi: bool) -> Self {
        Self {
            title: title.into(),
            options: options.iter().map(ToString::to_string).collect(),
            author,
            multi,
        }
    }
}

/// Poll service for business logic.
#[derive(Clone)]
pub struct PollService {
    poll_repo: PollRepository,
    vote_repo: VoteRepository,
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub const fn new(poll_repo: PollRepository, vote_repo: VoteRepository) -> Self {
        Self {
            poll_repo,
            vote_repo,
        }
    }

    /// Create a poll.
    pub async fn create_poll(&self, input: CreatePollInput) -> AppResult<Poll> {
        input.validate()?;

        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Poll title cannot be empty".to_string()));
        }
        if input.options.iter().any(|option| option.trim().is_empty()) {
            return Err(AppError::Validation(
                "Poll options cannot be empty".to_string(),
            ));
        }

        self.poll_repo
            .create(NewPoll {
                title: title.to_string(),
                options: input.options,
                author: input.author,
                multi: input.multi,
            })
            .await
    }

    /// Get a poll by ID.
    pub async fn get_poll(&self, id: PollId) -> AppResult<Poll> {
        self.poll_repo.get_by_id(id).await
    }

    /// Get every poll in the requested order.
    pub async fn get_polls(&self, order: PollOrder) -> AppResult<Vec<Poll>> {
        let polls = self.poll_repo.find_with_activity(|_| true).await?;
        debug!(count = polls.len(), %order, "Ordering polls");
        Ok(order.apply(polls))
    }

    /// Polls whose title matches `query` (case-insensitive regex), in the requested order.
    ///
    /// An empty query matches every poll.
    pub async fn search_polls(&self, query: &str, order: PollOrder) -> AppResult<Vec<Poll>> {
        if query.is_empty() {
            return self.get_polls(order).await;
        }

        let pattern = RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::BadRequest(format!("Invalid search pattern: {e}")))?;

        let polls = self
            .poll_repo
            .find_with_activity(|poll| pattern.is_match(&poll.title))
            .await?;
        debug!(query, matches = polls.len(), "Searched polls");
        Ok(order.apply(polls))
    }

    /// Polls authored by a user, in the requested order. Unknown users have none.
    pub async fn get_user_polls(&self, author: UserId, order: PollOrder) -> AppResult<Vec<Poll>> {
        let polls = self
            .poll_repo
            .find_with_activity(|poll| poll.author == author)
            .await?;
        Ok(order.apply(polls))
    }

    /// The author of a poll.
    pub async fn get_poll_author(&self, id: PollId) -> AppResult<User> {
        self.poll_repo.find_author(id).await
    }

    /// Votes cast on a poll. Unknown polls have none.
    pub async fn get_poll_votes(&self, id: PollId) -> AppResult<Vec<Vote>> {
        self.vote_repo.find_by_poll(id).await
    }

    /// Number of polls.
    pub async fn count_polls(&self) -> AppResult<u64> {
        self.poll_repo.count().await
    }

    /// Number of votes cast on a poll.
    pub async fn count_poll_votes(&self, id: PollId) -> AppResult<u64> {
        self.vote_repo.count_by_poll(id).await
    }
}
