//! In-memory entity store.
//!
//! All three collections live behind one [`RwLock`], so a mutation that
//! assigns an id and appends it to parent lists is applied as a single unit.
//! Readers share the lock and never observe a half-applied mutation.

use std::collections::BTreeMap;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use votely_common::IdGenerator;

use crate::entities::{Poll, PollId, User, UserId, Vote, VoteId};

/// A collection keyed by identifier, iterated in id order.
pub type Table<K, V> = BTreeMap<K, V>;

/// The entity collections plus the poll and vote id generators.
///
/// Users only enter the store through seed hydration.
#[derive(Debug, Default)]
pub struct Tables {
    pub users: Table<UserId, User>,
    pub polls: Table<PollId, Poll>,
    pub votes: Table<VoteId, Vote>,
    poll_ids: IdGenerator,
    vote_ids: IdGenerator,
}

impl Tables {
    /// Reserve the next poll id.
    pub fn next_poll_id(&mut self) -> PollId {
        PollId(self.poll_ids.next_id())
    }

    /// Reserve the next vote id.
    pub fn next_vote_id(&mut self) -> VoteId {
        VoteId(self.vote_ids.next_id())
    }

    /// Make the id generators skip every id already present.
    pub(crate) fn sync_id_generators(&mut self) {
        if let Some(id) = self.polls.keys().next_back() {
            self.poll_ids.observe(id.get());
        }
        if let Some(id) = self.votes.keys().next_back() {
            self.vote_ids.observe(id.get());
        }
    }
}

/// Shared handle to the entity store.
#[derive(Debug, Default)]
pub struct Database {
    tables: RwLock<Tables>,
}

impl Database {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tables(mut tables: Tables) -> Self {
        tables.sync_id_generators();
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Acquire shared read access to the collections.
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Acquire exclusive write access to the collections.
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
