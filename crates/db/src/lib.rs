//! Storage layer for votely.
//!
//! Users, polls and votes live in an in-memory [`Database`]. Repositories
//! expose the read accessors and the two atomic mutations; [`relations`] is
//! the only place foreign ids are dereferenced.

pub mod database;
pub mod entities;
pub mod relations;
pub mod repositories;
pub mod seed;
pub mod test_utils;

pub use database::{Database, Table, Tables};
pub use seed::SeedData;
