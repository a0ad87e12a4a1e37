use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DataError, Result};

/// Upstream player identifier
pub type PlayerId = u32;

/// Upstream club identifier
pub type TeamId = u32;

/// Playing position of a squad member.
///
/// Serialized as its short code; deserialized from a code, a long name or the
/// upstream numeric element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PositionRepr")]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionRepr {
    ElementType(u8),
    Code(String),
}

impl TryFrom<PositionRepr> for Position {
    type Error = DataError;

    fn try_from(repr: PositionRepr) -> Result<Self> {
        match repr {
            PositionRepr::ElementType(element_type) => Position::from_element_type(element_type),
            PositionRepr::Code(code) => code.parse(),
        }
    }
}

impl FromStr for Position {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GK" | "GKP" | "Goalkeeper" => Ok(Position::Goalkeeper),
            "DEF" | "Defender" => Ok(Position::Defender),
            "MID" | "Midfielder" => Ok(Position::Midfielder),
            "FWD" | "Forward" => Ok(Position::Forward),
            other => Err(DataError::invalid_record(format!("unknown position code {other:?}"))),
        }
    }
}

impl Position {
    /// All positions in squad order (GK, DEF, MID, FWD)
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    /// Map the upstream numeric element type (1 = GK .. 4 = FWD)
    pub fn from_element_type(element_type: u8) -> Result<Self> {
        match element_type {
            1 => Ok(Position::Goalkeeper),
            2 => Ok(Position::Defender),
            3 => Ok(Position::Midfielder),
            4 => Ok(Position::Forward),
            other => Err(DataError::UnknownElementType(other)),
        }
    }

    /// Short code used in reports and constraint names
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Points scored in a single gameweek
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameweekPoints {
    pub gameweek: u32,
    pub points: f64,
}

impl GameweekPoints {
    pub fn new(gameweek: u32, points: f64) -> Self {
        Self { gameweek, points }
    }
}

/// A player snapshot as delivered by the data fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Unique player identifier
    pub id: PlayerId,

    /// Display name (e.g., "Salah")
    pub name: String,

    /// Club the player belongs to
    pub team_id: TeamId,

    /// Playing position
    pub position: Position,

    /// Price in tenths of a currency unit (e.g., 55 = 5.5)
    pub price_tenths: u32,

    /// Percentage of managers owning the player (0-100)
    pub ownership_pct: f64,

    /// Season total minutes played
    pub minutes: u32,

    /// Chance of playing this round; `None` when the source reports nothing
    #[serde(default)]
    pub availability_pct: Option<f64>,

    /// Per-gameweek scoring history
    #[serde(default)]
    pub history: Vec<GameweekPoints>,
}

impl PlayerRecord {
    /// Price in whole currency units
    pub fn price(&self) -> f64 {
        self.price_tenths as f64 / 10.0
    }

    /// Check the value ranges the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.ownership_pct) {
            return Err(DataError::invalid_record(format!(
                "player {} ownership {} outside 0-100",
                self.id, self.ownership_pct
            )));
        }
        if let Some(pct) = self.availability_pct {
            if !(0.0..=100.0).contains(&pct) {
                return Err(DataError::invalid_record(format!(
                    "player {} availability {} outside 0-100",
                    self.id, pct
                )));
            }
        }
        if self.history.iter().any(|gw| !gw.points.is_finite()) {
            return Err(DataError::invalid_record(format!(
                "player {} has non-finite history points",
                self.id
            )));
        }
        Ok(())
    }
}

/// A scheduled match for one club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub team_id: TeamId,
    pub gameweek: u32,
    /// Fixture difficulty rating, higher = harder
    pub difficulty: u8,
}

impl FixtureRecord {
    pub fn new(team_id: TeamId, gameweek: u32, difficulty: u8) -> Self {
        Self { team_id, gameweek, difficulty }
    }
}
