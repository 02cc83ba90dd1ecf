//! Vote service.

use serde::Deserialize;
use validator::Validate;
use votely_common::AppResult;
use votely_db::entities::{Poll, PollId, User, UserId, Vote, VoteId};
use votely_db::repositories::{NewVote, VoteRepository};

/// Input for casting a vote.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoteInput {
    pub user: UserId,
    pub poll: PollId,
    #[validate(length(min = 1))]
    pub options: Vec<i32>,
}

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(vote_repo: VoteRepository) -> Self {
        Self { vote_repo }
    }

    /// Cast a vote.
    ///
    /// The returned future resolves once the vote is committed. The store is
    /// left untouched when any check fails.
    pub async fn create_vote(&self, input: CreateVoteInput) -> AppResult<Vote> {
        input.validate()?;

        self.vote_repo
            .create(NewVote {
                user: input.user,
                poll: input.poll,
                options: input.options,
            })
            .await
    }

    /// Get a vote by ID.
    pub async fn get_vote(&self, id: VoteId) -> AppResult<Vote> {
        self.vote_repo.get_by_id(id).await
    }

    /// Get every vote.
    pub async fn get_votes(&self) -> AppResult<Vec<Vote>> {
        self.vote_repo.find_all().await
    }

    /// The user who cast a vote.
    pub async fn get_vote_user(&self, id: VoteId) -> AppResult<User> {
        self.vote_repo.find_user(id).await
    }

    /// The poll a vote was cast on.
    pub async fn get_vote_poll(&self, id: VoteId) -> AppResult<Poll> {
        self.vote_repo.find_poll(id).await
    }

    /// Number of votes.
    pub async fn count_votes(&self) -> AppResult<u64> {
        self.vote_repo.count().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use votely_common::AppError;
    use votely_db::test_utils::TestStore;

    struct Fixture {
        service: VoteService,
        voter: UserId,
        single: PollId,
        multi: PollId,
    }

    fn fixture() -> Fixture {
        let mut store = TestStore::new();
        let voter = store.user("voter");
        let single = store.poll(voter, "Single", &["a", "b", "c"], false, 0);
        let multi = store.poll(voter, "Multi", &["a", "b", "c"], true, 0);
        let db = store.build().unwrap();
        Fixture {
            service: VoteService::new(VoteRepository::new(db)),
            voter,
            single,
            multi,
        }
    }

    fn input(user: UserId, poll: PollId, options: &[i32]) -> CreateVoteInput {
        CreateVoteInput {
            user,
            poll,
            options: options.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_out_of_range_option_rejected() {
        let f = fixture();
        let result = f.service.create_vote(input(f.voter, f.single, &[5])).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(f.service.count_votes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_single_choice_rejects_two_options() {
        let f = fixture();
        let result = f.service.create_vote(input(f.voter, f.single, &[0, 1])).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_multi_choice_accepts_several() {
        let f = fixture();
        let vote = f
            .service
            .create_vote(input(f.voter, f.multi, &[0, 2]))
            .await
            .unwrap();
        assert_eq!(vote.options, vec![0, 2]);
        assert_eq!(f.service.get_vote_poll(vote.id).await.unwrap().id, f.multi);
        assert_eq!(f.service.get_vote_user(vote.id).await.unwrap().id, f.voter);
        assert_eq!(f.service.get_vote(vote.id).await.unwrap(), vote);
    }

    #[tokio::test]
    async fn test_empty_selection_and_unknown_references() {
        let f = fixture();
        for bad in [
            input(f.voter, f.single, &[]),
            input(UserId(99), f.single, &[0]),
            input(f.voter, PollId(99), &[0]),
        ] {
            let result = f.service.create_vote(bad).await;
            assert!(matches!(result, Err(AppError::Validation(_))), "{result:?}");
        }
        assert!(f.service.get_votes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_vote() {
        let f = fixture();
        assert!(matches!(
            f.service.get_vote(VoteId(1)).await,
            Err(AppError::VoteNotFound(_))
        ));
        assert!(f.service.get_vote_user(VoteId(1)).await.unwrap_err().is_not_found());
    }
}
