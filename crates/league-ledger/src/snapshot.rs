//! Persisted-state layout for the ledger.
//!
//! A [`LedgerSnapshot`] carries the three collections together with their
//! id counters and the supply totals, so a restored ledger can never hand
//! out an id it already issued. Restoring validates every cross-reference
//! before the ledger is rebuilt.

use std::collections::{BTreeMap, BTreeSet};

use league_types::{
    LeagueConfig, LeagueError, Match, MatchId, MatchStatus, Player, PlayerId, Result, Team,
    TeamId,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ledger::LeagueLedger;
use crate::supply_conservation::SupplyConservation;

/// Serializable image of a whole ledger. Collections are stored in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub config: LeagueConfig,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub last_team_id: TeamId,
    pub last_player_id: PlayerId,
    pub last_match_id: MatchId,
    pub supply: SupplyConservation,
}

impl LedgerSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot. Use [`LeagueLedger::restore`] to validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Hex SHA-256 over the canonical JSON encoding.
    ///
    /// Two ledgers with equal digests hold identical state.
    pub fn digest(&self) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(b"league:snapshot:v1:");
        hasher.update(serde_json::to_vec(self)?);
        Ok(hex::encode(hasher.finalize()))
    }
}

impl LeagueLedger {
    /// Export the full ledger state.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            config: self.config.clone(),
            teams: self.teams.values().cloned().collect(),
            players: self.players.values().cloned().collect(),
            matches: self.matches.values().cloned().collect(),
            last_team_id: self.last_team_id,
            last_player_id: self.last_player_id,
            last_match_id: self.last_match_id,
            supply: self.supply.clone(),
        }
    }

    /// Digest of the current state. See [`LedgerSnapshot::digest`].
    pub fn state_digest(&self) -> Result<String> {
        self.snapshot().digest()
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// # Errors
    /// - `CorruptSnapshot` if ids collide, exceed their counter, or rosters
    ///   disagree with players' team ids
    /// - `SupplyInvariantViolation` if balances do not add up
    pub fn restore(snapshot: LedgerSnapshot) -> Result<Self> {
        snapshot
            .config
            .validate()
            .map_err(|err| LeagueError::corrupt(format!("config: {err}")))?;

        let teams = index_by_id(snapshot.teams, |t| t.id, snapshot.last_team_id.0, "team")?;
        let players = index_by_id(
            snapshot.players,
            |p| p.id,
            snapshot.last_player_id.0,
            "player",
        )?;
        let matches = index_by_id(
            snapshot.matches,
            |m| m.id,
            snapshot.last_match_id.0,
            "match",
        )?;

        let ledger = Self {
            config: snapshot.config,
            teams,
            players,
            matches,
            last_team_id: snapshot.last_team_id,
            last_player_id: snapshot.last_player_id,
            last_match_id: snapshot.last_match_id,
            supply: snapshot.supply,
        };
        ledger.verify_integrity()?;

        tracing::info!(
            teams = ledger.teams.len(),
            players = ledger.players.len(),
            matches = ledger.matches.len(),
            "Ledger restored from snapshot"
        );
        Ok(ledger)
    }

    /// Check every structural invariant: roster/team-id agreement, match
    /// shape, and supply conservation.
    pub fn verify_integrity(&self) -> Result<()> {
        self.verify_rosters()?;
        self.verify_matches()?;
        self.verify_supply()
    }

    fn verify_rosters(&self) -> Result<()> {
        for team in self.teams.values() {
            let mut seen = BTreeSet::new();
            for player_id in &team.roster {
                if !seen.insert(*player_id) {
                    return Err(LeagueError::corrupt(format!(
                        "{player_id} listed twice on {}",
                        team.id
                    )));
                }
                let player = self.players.get(player_id).ok_or_else(|| {
                    LeagueError::corrupt(format!("{} lists unknown {player_id}", team.id))
                })?;
                if !player.plays_for(team.id) {
                    return Err(LeagueError::corrupt(format!(
                        "{} lists {player_id}, which does not play for it",
                        team.id
                    )));
                }
            }
        }

        for player in self.players.values() {
            let Some(team_id) = player.team_id else {
                continue;
            };
            let team = self.teams.get(&team_id).ok_or_else(|| {
                LeagueError::corrupt(format!("{} plays for unknown {team_id}", player.id))
            })?;
            if !team.has_player(player.id) {
                return Err(LeagueError::corrupt(format!(
                    "{} missing from the roster of {team_id}",
                    player.id
                )));
            }
        }
        Ok(())
    }

    fn verify_matches(&self) -> Result<()> {
        for fixture in self.matches.values() {
            if fixture.home_team == fixture.away_team {
                return Err(LeagueError::corrupt(format!(
                    "{} has the same home and away team",
                    fixture.id
                )));
            }
            let has_scores = fixture.home_score.is_some() && fixture.away_score.is_some();
            let no_scores = fixture.home_score.is_none() && fixture.away_score.is_none();
            let consistent = match fixture.status {
                MatchStatus::Scheduled => no_scores,
                MatchStatus::Completed => has_scores,
            };
            if !consistent {
                return Err(LeagueError::corrupt(format!(
                    "{} is {} but its scores disagree",
                    fixture.id, fixture.status
                )));
            }
        }
        Ok(())
    }
}

fn index_by_id<K, V>(
    records: Vec<V>,
    id_of: impl Fn(&V) -> K,
    last_issued: u64,
    what: &str,
) -> Result<BTreeMap<K, V>>
where
    K: Ord + Copy + std::fmt::Display + Into<u64>,
{
    let mut map = BTreeMap::new();
    for record in records {
        let id = id_of(&record);
        let raw: u64 = id.into();
        if raw == 0 || raw > last_issued {
            return Err(LeagueError::corrupt(format!(
                "{id} outside issued {what} ids 1..={last_issued}"
            )));
        }
        if map.insert(id, record).is_some() {
            return Err(LeagueError::corrupt(format!("duplicate {id}")));
        }
    }
    Ok(map)
}
