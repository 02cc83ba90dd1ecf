//! Business logic services.

pub mod connection;
pub mod node;
pub mod ordering;
pub mod poll;
pub mod user;
pub mod vote;

pub use connection::{Connection, ConnectionArgs, Edge, PageInfo};
pub use node::{Node, NodeService};
pub use ordering::PollOrder;
pub use poll::{CreatePollInput, PollService};
pub use user::{UserProfile, UserService, Viewer, VisibleField};
pub use vote::{CreateVoteInput, VoteService};
