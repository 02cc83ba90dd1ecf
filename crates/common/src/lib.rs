//! Common utilities and shared types for votely.
//!
//! This crate provides foundational components used across all votely crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: Sequential per-collection identifiers via [`IdGenerator`]
//! - **Global IDs**: Opaque `Type:id` node identifiers via [`GlobalId`]
//!
//! # Example
//!
//! ```no_run
//! use votely_common::{AppResult, Config, IdGenerator};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let mut ids = IdGenerator::new();
//!     let id = ids.next_id();
//!     println!("Generated ID {id}, page limit {}", config.store.max_page_size);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod global_id;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use global_id::GlobalId;
pub use id::IdGenerator;
