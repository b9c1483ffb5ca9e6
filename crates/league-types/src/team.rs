//! Team records.
//!
//! A team is owned by one principal, holds a balance in the smallest
//! currency unit, and lists the players currently on its roster.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, Principal, TeamId, constants};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub owner: Principal,
    pub balance: u64,
    /// Players on this team, in the order they joined.
    pub roster: Vec<PlayerId>,
}

impl Team {
    /// A freshly created team: zero balance, empty roster.
    #[must_use]
    pub fn new(id: TeamId, name: impl Into<String>, owner: Principal) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            balance: constants::INITIAL_TEAM_BALANCE,
            roster: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, caller: &Principal) -> bool {
        self.owner == *caller
    }

    #[must_use]
    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.roster.contains(&player_id)
    }

    /// Drop a player from the roster. Returns whether it was present.
    pub fn remove_player(&mut self, player_id: PlayerId) -> bool {
        let before = self.roster.len();
        self.roster.retain(|id| *id != player_id);
        self.roster.len() != before
    }

    /// Append a player to the end of the roster.
    pub fn push_player(&mut self, player_id: PlayerId) {
        self.roster.push(player_id);
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Team {
    pub fn dummy(id: u64, owner: &str, balance: u64) -> Self {
        Self {
            id: TeamId(id),
            name: format!("Team {id}"),
            owner: Principal::from(owner),
            balance,
            roster: Vec::new(),
        }
    }
}
