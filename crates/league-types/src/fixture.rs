//! Match records and the match lifecycle.
//!
//! A match is created `Scheduled` and moves to `Completed` exactly once,
//! when its result is reported. There is no cancellation and no way back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MatchId, TeamId};

/// Lifecycle state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Created, waiting for a result.
    Scheduled,
    /// Result reported and prize paid. Terminal.
    Completed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Who won a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl MatchOutcome {
    #[must_use]
    pub fn from_scores(home_score: u32, away_score: u32) -> Self {
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => Self::HomeWin,
            std::cmp::Ordering::Less => Self::AwayWin,
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    /// Opaque timestamp supplied by the scheduler (seconds since UNIX epoch
    /// by convention).
    pub date: i64,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: MatchStatus,
}

impl Match {
    /// A newly scheduled match with no scores.
    #[must_use]
    pub fn scheduled(id: MatchId, home_team: TeamId, away_team: TeamId, date: i64) -> Self {
        Self {
            id,
            home_team,
            away_team,
            date,
            home_score: None,
            away_score: None,
            status: MatchStatus::Scheduled,
        }
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.status == MatchStatus::Scheduled
    }

    /// Record the final score. Callers check [`Match::is_scheduled`] first.
    pub fn complete(&mut self, home_score: u32, away_score: u32) {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.status = MatchStatus::Completed;
    }

    /// The match date as a UTC timestamp, if it is in chrono's range.
    #[must_use]
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }
}
