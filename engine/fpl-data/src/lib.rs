//! FPL Data - passive player and fixture records
//!
//! This crate holds the plain records the squad selection pipeline consumes:
//! player snapshots with their gameweek history, per-team fixture lists, and
//! the JSON snapshot file produced by the external fetcher.

pub mod error;
pub mod fixtures;
pub mod snapshot;
pub mod types;

pub use error::{DataError, Result};
pub use fixtures::FixtureTable;
pub use snapshot::Snapshot;
pub use types::{FixtureRecord, GameweekPoints, PlayerId, PlayerRecord, Position, TeamId};
