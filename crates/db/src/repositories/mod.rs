//! Repositories over the in-memory store.

pub mod poll;
pub mod user;
pub mod vote;

pub use poll::{NewPoll, PollRepository, PollWithActivity};
pub use user::UserRepository;
pub use vote::{NewVote, VoteRepository};
