use std::collections::BTreeMap;

use crate::types::{FixtureRecord, TeamId};

/// Fixture lists grouped by club, each sorted by gameweek
#[derive(Debug, Clone, Default)]
pub struct FixtureTable {
    by_team: BTreeMap<TeamId, Vec<FixtureRecord>>,
}

impl FixtureTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self { by_team: BTreeMap::new() }
    }

    /// Group records by team; fixtures within a team keep their relative order on equal gameweeks
    pub fn from_records(records: impl IntoIterator<Item = FixtureRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            table.by_team.entry(record.team_id).or_default().push(record);
        }
        for fixtures in table.by_team.values_mut() {
            fixtures.sort_by_key(|f| f.gameweek);
        }
        table
    }

    /// Fixtures for a club, empty if the club has none
    pub fn for_team(&self, team_id: TeamId) -> &[FixtureRecord] {
        self.by_team.get(&team_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn team_count(&self) -> usize {
        self.by_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_team.is_empty()
    }
}
