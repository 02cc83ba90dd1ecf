//! Node lookup by global id.

use serde::Serialize;
use votely_common::{AppError, AppResult, GlobalId};
use votely_db::entities::{Poll, PollId, UserId, Vote, VoteId};

use super::{PollService, UserProfile, UserService, Viewer, VoteService};

/// Any entity addressable by a global id.
///
/// Users are carried as a [`UserProfile`] already resolved for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "__typename")]
pub enum Node {
    User(UserProfile),
    Poll(Poll),
    Vote(Vote),
}

impl Node {
    /// The global id of this node.
    #[must_use]
    pub fn global_id(&self) -> GlobalId {
        match self {
            Self::User(user) => user_global_id(user.id),
            Self::Poll(poll) => poll_global_id(poll.id),
            Self::Vote(vote) => vote_global_id(vote.id),
        }
    }
}

/// Global id of a user.
#[must_use]
pub fn user_global_id(id: UserId) -> GlobalId {
    GlobalId::new(UserId::TYPE_NAME, id)
}

/// Global id of a poll.
#[must_use]
pub fn poll_global_id(id: PollId) -> GlobalId {
    GlobalId::new(PollId::TYPE_NAME, id)
}

/// Global id of a vote.
#[must_use]
pub fn vote_global_id(id: VoteId) -> GlobalId {
    GlobalId::new(VoteId::TYPE_NAME, id)
}

/// Resolves global ids to entities.
#[derive(Clone)]
pub struct NodeService {
    users: UserService,
    polls: PollService,
    votes: VoteService,
}

impl NodeService {
    /// Create a new node service.
    #[must_use]
    pub const fn new(users: UserService, polls: PollService, votes: VoteService) -> Self {
        Self {
            users,
            polls,
            votes,
        }
    }

    /// Look up the entity behind an encoded global id, as seen by `viewer`.
    ///
    /// Only `User`, `Poll` and `Vote` resolve; any other type is a `BadRequest`.
    pub async fn node(&self, encoded: &str, viewer: &Viewer) -> AppResult<Node> {
        let global_id = GlobalId::decode(encoded)?;
        let id = global_id.numeric_id()?;

        match global_id.type_name.as_str() {
            UserId::TYPE_NAME => self
                .users
                .get_profile(UserId(id), viewer)
                .await
                .map(Node::User),
            PollId::TYPE_NAME => self.polls.get_poll(PollId(id)).await.map(Node::Poll),
            VoteId::TYPE_NAME => self.votes.get_vote(VoteId(id)).await.map(Node::Vote),
            other => Err(AppError::BadRequest(format!("Unknown node type: {other}"))),
        }
    }
}
