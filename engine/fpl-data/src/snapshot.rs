use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{DataError, Result};
use crate::fixtures::FixtureTable;
use crate::types::{FixtureRecord, PlayerRecord};

/// Player and fixture data captured by the fetcher at one point in the season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Latest completed gameweek
    pub current_gameweek: u32,

    pub players: Vec<PlayerRecord>,

    #[serde(default)]
    pub fixtures: Vec<FixtureRecord>,
}

impl Snapshot {
    /// Load and validate a snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading snapshot from: {:?}", path.as_ref());
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a snapshot from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        snapshot.validate()?;

        info!(
            "Loaded snapshot for gameweek {}: {} players, {} fixtures",
            snapshot.current_gameweek,
            snapshot.players.len(),
            snapshot.fixtures.len()
        );
        Ok(snapshot)
    }

    /// Check id uniqueness and per-record value ranges
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.players.len());
        for player in &self.players {
            if !seen.insert(player.id) {
                return Err(DataError::DuplicatePlayer(player.id));
            }
            player.validate()?;
        }

        if let Some(bad) = self.fixtures.iter().find(|f| f.difficulty == 0) {
            return Err(DataError::invalid_record(format!(
                "fixture for team {} in gameweek {} has zero difficulty",
                bad.team_id, bad.gameweek
            )));
        }
        Ok(())
    }

    /// Build the per-team fixture table
    pub fn fixture_table(&self) -> FixtureTable {
        FixtureTable::from_records(self.fixtures.iter().copied())
    }

    /// Save the snapshot as pretty-printed JSON
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
