//! Store hydration from imported records.
//!
//! Seed data is a JSON object with `users`, `polls` and `votes` arrays of
//! camelCase records. Relationship id lists carried by the records are
//! ignored and rebuilt from the foreign keys, so the hydrated store always
//! agrees with itself.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::database::{Database, Table, Tables};
use crate::entities::{Poll, PollId, PrivateField, User, UserId, Vote, VoteId};
use votely_common::{AppError, AppResult};

/// Raw seed payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub polls: Vec<PollRecord>,
    #[serde(default)]
    pub votes: Vec<VoteRecord>,
}

/// Imported user record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub birth_date: PrivateField<NaiveDate>,
    #[serde(default)]
    pub name: PrivateField<String>,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Imported poll record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollRecord {
    #[serde(alias = "_id")]
    pub id: PollId,
    pub title: String,
    #[serde(default)]
    pub multi: bool,
    pub options: Vec<String>,
    pub author: UserId,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Imported vote record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    #[serde(alias = "_id")]
    pub id: VoteId,
    pub user: UserId,
    pub poll: PollId,
    pub options: Vec<i32>,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SeedData {
    /// Parse seed data from a JSON string.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Internal(format!("Invalid seed data: {e}")))
    }

    /// Read and parse a JSON seed file.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("Failed to read seed file {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}

fn timestamps(
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let created_at = created_at.unwrap_or(now);
    (created_at, updated_at.unwrap_or(created_at))
}

fn insert_unique<K: Ord + Copy + std::fmt::Display, V>(
    table: &mut Table<K, V>,
    kind: &str,
    id: K,
    value: V,
) -> AppResult<()> {
    if table.insert(id, value).is_some() {
        return Err(AppError::Conflict(format!("Duplicate {kind} id {id} in seed data")));
    }
    Ok(())
}

impl Database {
    /// Build a store hydrated from seed data.
    ///
    /// Fails without producing a store when a record references a missing
    /// entity, a poll is malformed, a vote selection is invalid or an id
    /// repeats.
    pub fn from_seed(seed: SeedData) -> AppResult<Self> {
        let now = Utc::now();
        let mut tables = Tables::default();

        for record in seed.users {
            let (created_at, updated_at) = timestamps(record.created_at, record.updated_at, now);
            let user = User {
                id: record.id,
                username: record.username,
                email: record.email,
                password: record.password,
                avatar: record.avatar,
                bio: record.bio,
                birth_date: record.birth_date,
                name: record.name,
                polls: Vec::new(),
                votes: Vec::new(),
                created_at,
                updated_at,
            };
            insert_unique(&mut tables.users, "user", record.id, user)?;
        }

        for record in seed.polls {
            if record.title.trim().is_empty() {
                return Err(AppError::Validation(format!("Poll {} has an empty title", record.id)));
            }
            if record.options.is_empty() {
                return Err(AppError::Validation(format!("Poll {} has no options", record.id)));
            }
            if !tables.users.contains_key(&record.author) {
                return Err(AppError::Validation(format!(
                    "Poll {} references missing author {}",
                    record.id, record.author
                )));
            }
            let (created_at, updated_at) = timestamps(record.created_at, record.updated_at, now);
            let poll = Poll {
                id: record.id,
                title: record.title,
                multi: record.multi,
                options: record.options,
                author: record.author,
                votes: Vec::new(),
                created_at,
                updated_at,
            };
            insert_unique(&mut tables.polls, "poll", record.id, poll)?;
        }

        for record in seed.votes {
            if !tables.users.contains_key(&record.user) {
                return Err(AppError::Validation(format!(
                    "Vote {} references missing user {}",
                    record.id, record.user
                )));
            }
            let poll = tables.polls.get(&record.poll).ok_or_else(|| {
                AppError::Validation(format!(
                    "Vote {} references missing poll {}",
                    record.id, record.poll
                ))
            })?;
            poll.check_selection(&record.options)?;

            let (created_at, updated_at) = timestamps(record.created_at, record.updated_at, now);
            let vote = Vote {
                id: record.id,
                user: record.user,
                poll: record.poll,
                options: record.options,
                created_at,
                updated_at,
            };
            insert_unique(&mut tables.votes, "vote", record.id, vote)?;
        }

        rebuild_relationship_lists(&mut tables);

        info!(
            users = tables.users.len(),
            polls = tables.polls.len(),
            votes = tables.votes.len(),
            "Hydrated store from seed data"
        );
        Ok(Self::from_tables(tables))
    }

    /// Read a JSON seed file and build a store from it.
    pub async fn from_seed_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading seed file");
        Self::from_seed(SeedData::from_path(path).await?)
    }
}

fn rebuild_relationship_lists(tables: &mut Tables) {
    let Tables {
        users,
        polls,
        votes,
        ..
    } = tables;

    for poll in polls.values() {
        if let Some(author) = users.get_mut(&poll.author) {
            author.polls.push(poll.id);
        }
    }
    for vote in votes.values() {
        if let Some(user) = users.get_mut(&vote.user) {
            user.votes.push(vote.id);
        }
        if let Some(poll) = polls.get_mut(&vote.poll) {
            poll.votes.push(vote.id);
        }
    }
}
