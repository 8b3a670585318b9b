use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

pub type PlayerId = i64;
pub type MatchId = i64;
pub type RatingValue = i64;

/// One side of a 2v2 match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }

    pub fn opponent(&self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = String;

    // Only the exact labels are accepted; "a" or " A" are malformed winners.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Team::A),
            "B" => Ok(Team::B),
            other => Err(format!("Winning team must be 'A' or 'B', got '{}'", other)),
        }
    }
}

impl ToSql for Team {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Team {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// Pre-match ratings of the four participants, in A1, A2, B1, B2 order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRatings {
    pub team_a: [RatingValue; 2],
    pub team_b: [RatingValue; 2],
}

impl MatchRatings {
    pub fn team(&self, team: Team) -> [RatingValue; 2] {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }
}
