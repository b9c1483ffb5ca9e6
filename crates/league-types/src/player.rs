//! Player records.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Current team, or `None` for a free agent.
    pub team_id: Option<TeamId>,
    /// Reference price. Trades may settle at any price.
    pub value: u64,
}

impl Player {
    /// A new player enters the league as a free agent.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, value: u64) -> Self {
        Self {
            id,
            name: name.into(),
            team_id: None,
            value,
        }
    }

    #[must_use]
    pub fn is_free_agent(&self) -> bool {
        self.team_id.is_none()
    }

    #[must_use]
    pub fn plays_for(&self, team_id: TeamId) -> bool {
        self.team_id == Some(team_id)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Player {
    pub fn dummy(id: u64, team_id: Option<u64>) -> Self {
        Self {
            id: PlayerId(id),
            name: format!("Player {id}"),
            team_id: team_id.map(TeamId),
            value: 1_000_000,
        }
    }
}
