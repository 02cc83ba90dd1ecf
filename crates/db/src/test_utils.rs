//! Test utilities for store operations.
//!
//! Provides a fixture builder that assembles seed records with explicit
//! timestamps and hydrates a fresh store from them.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::database::Database;
use crate::entities::{PollId, PrivateField, UserId, VoteId};
use crate::seed::{PollRecord, SeedData, UserRecord, VoteRecord};
use votely_common::AppResult;

/// Fixed reference instant that fixture timestamps are offset from.
#[must_use]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// `epoch()` plus the given number of minutes.
#[must_use]
pub fn minutes(offset: i64) -> DateTime<Utc> {
    epoch() + Duration::minutes(offset)
}

/// Builder for a seeded test store.
#[derive(Debug, Default)]
pub struct TestStore {
    seed: SeedData,
}

impl TestStore {
    /// Start an empty fixture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user whose private fields are hidden.
    pub fn user(&mut self, username: &str) -> UserId {
        let id = UserId(self.seed.users.len() as u64 + 1);
        self.seed.users.push(UserRecord {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "password".to_string(),
            avatar: None,
            bio: None,
            birth_date: PrivateField::default(),
            name: PrivateField::private(username.to_uppercase()),
            created_at: Some(epoch()),
            updated_at: None,
        });
        id
    }

    /// Add a poll created `created` minutes after the epoch.
    pub fn poll(
        &mut self,
        author: UserId,
        title: &str,
        options: &[&str],
        multi: bool,
        created: i64,
    ) -> PollId {
        let id = PollId(self.seed.polls.len() as u64 + 1);
        self.seed.polls.push(PollRecord {
            id,
            title: title.to_string(),
            multi,
            options: options.iter().map(ToString::to_string).collect(),
            author,
            created_at: Some(minutes(created)),
            updated_at: None,
        });
        id
    }

    /// Add a vote cast `cast` minutes after the epoch.
    pub fn vote(&mut self, user: UserId, poll: PollId, options: &[i32], cast: i64) -> VoteId {
        let id = VoteId(self.seed.votes.len() as u64 + 1);
        self.seed.votes.push(VoteRecord {
            id,
            user,
            poll,
            options: options.to_vec(),
            created_at: Some(minutes(cast)),
            updated_at: None,
        });
        id
    }

    /// Hydrate the store.
    pub fn build(self) -> AppResult<Arc<Database>> {
        Database::from_seed(self.seed).map(Arc::new)
    }
}
