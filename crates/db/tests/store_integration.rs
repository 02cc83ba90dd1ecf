//! Store integration tests.
//!
//! Exercise the repositories against a hydrated in-memory store, including
//! concurrent mutations.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use votely_common::AppError;
use votely_db::entities::{PollId, UserId};
use votely_db::repositories::{NewPoll, NewVote, PollRepository, UserRepository, VoteRepository};
use votely_db::test_utils::TestStore;

fn fixture() -> (Arc<votely_db::Database>, UserId, UserId, PollId) {
    let mut store = TestStore::new();
    let ada = store.user("ada");
    let bob = store.user("bob");
    let poll = store.poll(ada, "Lunch?", &["Pizza", "Sushi", "Tacos"], false, 0);
    store.vote(bob, poll, &[1], 5);
    (store.build().unwrap(), ada, bob, poll)
}

#[tokio::test]
async fn test_create_poll_appends_to_author() {
    let (db, ada, _, _) = fixture();
    let polls = PollRepository::new(db.clone());
    let users = UserRepository::new(db);

    let poll = polls
        .create(NewPoll {
            title: "Best color?".to_string(),
            options: vec!["Red".to_string(), "Blue".to_string()],
            author: ada,
            multi: false,
        })
        .await
        .unwrap();

    assert_eq!(poll.id, PollId(2));
    assert!(poll.votes.is_empty());
    assert_eq!(poll.created_at, poll.updated_at);

    let author = users.get_by_id(ada).await.unwrap();
    assert_eq!(author.polls, vec![PollId(1), PollId(2)]);
    assert_eq!(polls.find_author(poll.id).await.unwrap().id, ada);
}

#[tokio::test]
async fn test_create_poll_with_unknown_author_writes_nothing() {
    let (db, _, _, _) = fixture();
    let polls = PollRepository::new(db);

    let result = polls
        .create(NewPoll {
            title: "Orphan".to_string(),
            options: vec!["a".to_string()],
            author: UserId(99),
            multi: false,
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(polls.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_out_of_range_vote_writes_nothing() {
    let (db, ada, _, poll) = fixture();
    let votes = VoteRepository::new(db.clone());
    let polls = PollRepository::new(db);

    let result = votes
        .create(NewVote {
            user: ada,
            poll,
            options: vec![5],
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(votes.count().await.unwrap(), 1);
    assert_eq!(polls.get_by_id(poll).await.unwrap().votes.len(), 1);
}

#[tokio::test]
async fn test_vote_appends_to_user_and_poll() {
    let (db, ada, _, poll) = fixture();
    let votes = VoteRepository::new(db.clone());
    let users = UserRepository::new(db.clone());
    let polls = PollRepository::new(db);

    let vote = votes
        .create(NewVote {
            user: ada,
            poll,
            options: vec![2],
        })
        .await
        .unwrap();

    assert_eq!(users.get_by_id(ada).await.unwrap().votes, vec![vote.id]);
    assert!(polls.get_by_id(poll).await.unwrap().votes.contains(&vote.id));
    assert_eq!(votes.find_user(vote.id).await.unwrap().id, ada);
    assert_eq!(votes.find_poll(vote.id).await.unwrap().id, poll);
    assert_eq!(votes.count_received_by_author(ada).await.unwrap(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_votes_are_not_lost() {
    const VOTERS: usize = 32;

    let mut store = TestStore::new();
    let author = store.user("author");
    let voters: Vec<UserId> = (0..VOTERS).map(|i| store.user(&format!("voter{i}"))).collect();
    let poll = store.poll(author, "Busy poll", &["yes", "no"], false, 0);
    store.vote(author, poll, &[0], 1);
    let db = store.build().unwrap();

    let tasks = voters.into_iter().enumerate().map(|(i, user)| {
        let votes = VoteRepository::new(db.clone());
        tokio::spawn(async move {
            votes
                .create(NewVote {
                    user,
                    poll,
                    options: vec![(i % 2) as i32],
                })
                .await
        })
    });

    let created: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().id)
        .collect();

    let distinct: HashSet<_> = created.iter().copied().collect();
    assert_eq!(distinct.len(), VOTERS);

    let stored = PollRepository::new(db).get_by_id(poll).await.unwrap();
    assert_eq!(stored.votes.len(), VOTERS + 1);
    let stored_ids: HashSet<_> = stored.votes.iter().copied().collect();
    assert!(distinct.is_subset(&stored_ids));
}

#[tokio::test]
async fn test_unknown_ids() {
    let (db, _, _, _) = fixture();
    let users = UserRepository::new(db.clone());
    let votes = VoteRepository::new(db.clone());
    let polls = PollRepository::new(db);

    assert!(matches!(
        users.get_by_id(UserId(42)).await,
        Err(AppError::UserNotFound(_))
    ));
    assert!(matches!(
        polls.find_author(PollId(42)).await,
        Err(AppError::PollNotFound(_))
    ));
    assert!(votes.find_by_user(UserId(42)).await.unwrap().is_empty());
    assert!(polls.find_by_author(UserId(42)).await.unwrap().is_empty());
    assert_eq!(votes.count_by_poll(PollId(42)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_bundled_seed_file_hydrates() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/seed.json");
    let db = Arc::new(votely_db::Database::from_seed_file(path).await.unwrap());

    let users = UserRepository::new(db.clone());
    let polls = PollRepository::new(db);
    let bob = users.get_by_id(UserId(2)).await.unwrap();
    assert_eq!(bob.polls, vec![PollId(2)]);
    assert_eq!(bob.votes.len(), 2);
    assert_eq!(polls.get_by_id(PollId(2)).await.unwrap().votes.len(), 2);
}

#[tokio::test]
async fn test_missing_seed_file() {
    let result = votely_db::Database::from_seed_file("/nonexistent/seed.json").await;
    assert!(matches!(result, Err(AppError::Internal(_))));
}
