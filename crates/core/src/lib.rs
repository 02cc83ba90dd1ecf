//! Core business logic for votely.
//!
//! [`Services`] wires the repositories of a shared [`Database`] into the
//! user, poll, vote and node services the API layer calls.

pub mod services;

use std::sync::Arc;

pub use services::*;
use votely_common::config::StoreConfig;
use votely_common::AppResult;
use votely_db::Database;
use votely_db::entities::{Poll, Vote};
use votely_db::repositories::{PollRepository, UserRepository, VoteRepository};

/// All services over one store.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub polls: PollService,
    pub votes: VoteService,
    pub nodes: NodeService,
    max_page_size: usize,
}

impl Services {
    /// Build the services over a store.
    #[must_use]
    pub fn new(db: Arc<Database>, config: &StoreConfig) -> Self {
        let user_repo = UserRepository::new(Arc::clone(&db));
        let poll_repo = PollRepository::new(Arc::clone(&db));
        let vote_repo = VoteRepository::new(db);

        let users = UserService::new(user_repo, poll_repo.clone(), vote_repo.clone());
        let polls = PollService::new(poll_repo, vote_repo.clone());
        let votes = VoteService::new(vote_repo);
        let nodes = NodeService::new(users.clone(), polls.clone(), votes.clone());

        Self {
            users,
            polls,
            votes,
            nodes,
            max_page_size: config.max_page_size,
        }
    }

    /// Slice an ordered sequence into a connection page.
    pub fn paginate<T>(&self, items: Vec<T>, args: &ConnectionArgs) -> AppResult<Connection<T>> {
        Connection::from_vec(items, args, self.max_page_size)
    }

    /// Create a poll and wrap it in a mutation payload edge.
    pub async fn create_poll(&self, input: CreatePollInput) -> AppResult<Edge<Poll>> {
        self.polls.create_poll(input).await.map(Edge::detached)
    }

    /// Cast a vote and wrap it in a mutation payload edge.
    pub async fn create_vote(&self, input: CreateVoteInput) -> AppResult<Edge<Vote>> {
        self.votes.create_vote(input).await.map(Edge::detached)
    }
}
