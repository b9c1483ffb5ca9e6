//! The league ledger state machine.
//!
//! Owns every team, player and match, plus the three id counters. Each
//! operation validates completely before touching state, so a failed call
//! leaves the ledger exactly as it was.

use std::collections::BTreeMap;

use league_types::{
    EntityRef, LeagueConfig, LeagueError, Match, MatchId, MatchOutcome, Player, PlayerId,
    Principal, Result, Team, TeamId,
};

use crate::prize::split_prize;
use crate::supply_conservation::SupplyConservation;

/// Authoritative store of teams, players and matches.
///
/// Writes take `&mut self`; wrap the ledger in [`crate::SharedLedger`] to
/// share it between threads.
#[derive(Debug, Clone)]
pub struct LeagueLedger {
    pub(crate) config: LeagueConfig,
    pub(crate) teams: BTreeMap<TeamId, Team>,
    pub(crate) players: BTreeMap<PlayerId, Player>,
    pub(crate) matches: BTreeMap<MatchId, Match>,
    /// Last issued ids. Never decrease, never reset.
    pub(crate) last_team_id: TeamId,
    pub(crate) last_player_id: PlayerId,
    pub(crate) last_match_id: MatchId,
    pub(crate) supply: SupplyConservation,
}

impl LeagueLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new(config: LeagueConfig) -> Self {
        Self {
            config,
            teams: BTreeMap::new(),
            players: BTreeMap::new(),
            matches: BTreeMap::new(),
            last_team_id: TeamId(0),
            last_player_id: PlayerId(0),
            last_match_id: MatchId(0),
            supply: SupplyConservation::new(),
        }
    }

    // =================================================================
    // Operations
    // =================================================================

    /// Register a new team owned by `caller`. Open to anyone.
    ///
    /// # Errors
    /// - `InvalidValue` if the team id counter is exhausted
    pub fn create_team(&mut self, caller: &Principal, name: impl Into<String>) -> Result<TeamId> {
        let id = self
            .last_team_id
            .next()
            .ok_or_else(|| counter_exhausted("team"))?;
        let team = Team::new(id, name, caller.clone());
        tracing::info!(team = %id, owner = %caller, name = %team.name, "Team created");
        self.teams.insert(id, team);
        self.last_team_id = id;
        Ok(id)
    }

    /// Add a free-agent player. Admin only.
    ///
    /// # Errors
    /// - `OwnerOnly` if `caller` is not the league admin
    /// - `InvalidValue` if the player id counter is exhausted
    pub fn add_player(
        &mut self,
        caller: &Principal,
        name: impl Into<String>,
        value: u64,
    ) -> Result<PlayerId> {
        self.ensure_admin(caller)?;

        let id = self
            .last_player_id
            .next()
            .ok_or_else(|| counter_exhausted("player"))?;
        let player = Player::new(id, name, value);
        tracing::info!(player = %id, name = %player.name, value, "Player added");
        self.players.insert(id, player);
        self.last_player_id = id;
        Ok(id)
    }

    /// Move a player from `from` to `to`, paying `price` from the buying
    /// team to the selling team.
    ///
    /// Only the selling team's owner has to sign off. `from == to` is
    /// allowed: the player goes to the back of the roster and no money
    /// changes hands.
    ///
    /// # Errors
    /// - `NotFound` if the player or either team is unknown
    /// - `Unauthorized` if the player is not on `from`, or `caller` does
    ///   not own `from`
    /// - `InsufficientFunds` if `to` cannot pay `price`
    pub fn trade_player(
        &mut self,
        caller: &Principal,
        player_id: PlayerId,
        from: TeamId,
        to: TeamId,
        price: u64,
    ) -> Result<()> {
        let player = self.require_player(player_id)?;
        let from_team = self.require_team(from)?;
        let to_team = self.require_team(to)?;

        if !player.plays_for(from) || !from_team.is_owned_by(caller) {
            tracing::warn!(
                caller = %caller,
                player = %player_id,
                from = %from,
                "Trade rejected: caller does not control the player"
            );
            return Err(LeagueError::Unauthorized {
                caller: caller.clone(),
            });
        }

        if to_team.balance < price {
            return Err(LeagueError::InsufficientFunds {
                needed: price,
                available: to_team.balance,
            });
        }

        if from != to && from_team.balance.checked_add(price).is_none() {
            return Err(LeagueError::invalid(format!(
                "trade price {price} overflows the balance of {from}"
            )));
        }

        // ── all checks passed; apply ─────────────────────────────────
        self.require_player_mut(player_id)?.team_id = Some(to);

        if from == to {
            let team = self.require_team_mut(from)?;
            team.remove_player(player_id);
            team.push_player(player_id);
        } else {
            let seller = self.require_team_mut(from)?;
            seller.balance += price;
            seller.remove_player(player_id);

            let buyer = self.require_team_mut(to)?;
            buyer.balance -= price;
            buyer.push_player(player_id);
        }

        tracing::info!(player = %player_id, from = %from, to = %to, price, "Player traded");
        Ok(())
    }

    /// Schedule a match between two different teams. Admin only.
    ///
    /// The team ids are not checked for existence here; a match may be
    /// scheduled before its teams are registered. Payout requires them.
    ///
    /// # Errors
    /// - `OwnerOnly` if `caller` is not the league admin
    /// - `InvalidValue` if `home == away`, or the match id counter is
    ///   exhausted
    pub fn schedule_match(
        &mut self,
        caller: &Principal,
        home: TeamId,
        away: TeamId,
        date: i64,
    ) -> Result<MatchId> {
        self.ensure_admin(caller)?;

        if home == away {
            return Err(LeagueError::invalid(format!(
                "home and away team are both {home}"
            )));
        }

        let id = self
            .last_match_id
            .next()
            .ok_or_else(|| counter_exhausted("match"))?;
        self.matches.insert(id, Match::scheduled(id, home, away, date));
        self.last_match_id = id;
        tracing::info!(fixture = %id, home = %home, away = %away, date, "Match scheduled");
        Ok(id)
    }

    /// Record the final score of a scheduled match and pay out the prize
    /// pool. Admin only, once per match.
    ///
    /// # Errors
    /// - `OwnerOnly` if `caller` is not the league admin
    /// - `NotFound` if the match is unknown, or one of its teams does not
    ///   exist (the match then stays scheduled)
    /// - `InvalidValue` if the match is already completed, or a prize
    ///   credit would overflow a balance
    pub fn report_match_result(
        &mut self,
        caller: &Principal,
        match_id: MatchId,
        home_score: u32,
        away_score: u32,
    ) -> Result<()> {
        self.ensure_admin(caller)?;

        let fixture = self
            .matches
            .get(&match_id)
            .ok_or(LeagueError::NotFound(EntityRef::Match(match_id)))?;

        if !fixture.is_scheduled() {
            return Err(LeagueError::invalid(format!(
                "{match_id} is already {}",
                fixture.status
            )));
        }

        let (home, away) = (fixture.home_team, fixture.away_team);
        let outcome = MatchOutcome::from_scores(home_score, away_score);
        let split = split_prize(self.config.prize_pool, outcome);

        let home_team = self.require_team(home)?;
        let away_team = self.require_team(away)?;
        if home_team.balance.checked_add(split.home).is_none()
            || away_team.balance.checked_add(split.away).is_none()
        {
            return Err(LeagueError::invalid(format!(
                "prize for {match_id} overflows a team balance"
            )));
        }

        // ── all checks passed; apply ─────────────────────────────────
        let fixture = self
            .matches
            .get_mut(&match_id)
            .ok_or(LeagueError::NotFound(EntityRef::Match(match_id)))?;
        self.supply.record_prize(split.total())?;
        fixture.complete(home_score, away_score);
        self.require_team_mut(home)?.balance += split.home;
        self.require_team_mut(away)?.balance += split.away;

        tracing::debug!(
            fixture = %match_id,
            ?outcome,
            home = %home,
            home_prize = split.home,
            away = %away,
            away_prize = split.away,
            "Prize distributed"
        );
        tracing::info!(
            fixture = %match_id,
            home_score,
            away_score,
            "Match result reported"
        );
        Ok(())
    }

    /// Take `amount` out of a team's balance. The money leaves the ledger.
    ///
    /// # Errors
    /// - `NotFound` if the team is unknown
    /// - `Unauthorized` if `caller` does not own the team
    /// - `InsufficientFunds` if the balance is below `amount`
    pub fn withdraw_balance(
        &mut self,
        caller: &Principal,
        team_id: TeamId,
        amount: u64,
    ) -> Result<()> {
        let team = self.require_team(team_id)?;

        if !team.is_owned_by(caller) {
            tracing::warn!(caller = %caller, team = %team_id, "Withdrawal rejected: not the owner");
            return Err(LeagueError::Unauthorized {
                caller: caller.clone(),
            });
        }

        if team.balance < amount {
            return Err(LeagueError::InsufficientFunds {
                needed: amount,
                available: team.balance,
            });
        }

        self.supply.record_withdrawal(amount)?;
        self.require_team_mut(team_id)?.balance -= amount;
        tracing::info!(team = %team_id, amount, "Balance withdrawn");
        Ok(())
    }

    // =================================================================
    // Reads
    // =================================================================

    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    #[must_use]
    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(&id)
    }

    /// All teams in id order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// All players in id order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// All matches in id order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    /// Players on a team, in roster order.
    ///
    /// # Errors
    /// - `NotFound` if the team is unknown
    pub fn roster(&self, team_id: TeamId) -> Result<Vec<&Player>> {
        let team = self.require_team(team_id)?;
        team.roster
            .iter()
            .map(|id| self.require_player(*id))
            .collect()
    }

    /// Sum of every team's balance.
    #[must_use]
    pub fn total_balance(&self) -> u128 {
        self.teams.values().map(|t| u128::from(t.balance)).sum()
    }

    #[must_use]
    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    #[must_use]
    pub fn admin(&self) -> &Principal {
        &self.config.admin
    }

    #[must_use]
    pub fn prize_pool(&self) -> u64 {
        self.config.prize_pool
    }

    #[must_use]
    pub fn supply(&self) -> &SupplyConservation {
        &self.supply
    }

    /// Check Σ balances == prizes paid - withdrawals.
    pub fn verify_supply(&self) -> Result<()> {
        let result = self.supply.verify(self.total_balance());
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Supply invariant check failed");
        }
        result
    }

    // =================================================================
    // Internal helpers
    // =================================================================

    fn ensure_admin(&self, caller: &Principal) -> Result<()> {
        if *caller == self.config.admin {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "Admin-only operation rejected");
            Err(LeagueError::OwnerOnly {
                caller: caller.clone(),
            })
        }
    }

    fn require_team(&self, id: TeamId) -> Result<&Team> {
        self.teams
            .get(&id)
            .ok_or(LeagueError::NotFound(EntityRef::Team(id)))
    }

    fn require_team_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        self.teams
            .get_mut(&id)
            .ok_or(LeagueError::NotFound(EntityRef::Team(id)))
    }

    fn require_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .get(&id)
            .ok_or(LeagueError::NotFound(EntityRef::Player(id)))
    }

    fn require_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .get_mut(&id)
            .ok_or(LeagueError::NotFound(EntityRef::Player(id)))
    }
}

fn counter_exhausted(what: &str) -> LeagueError {
    LeagueError::invalid(format!("{what} id counter exhausted"))
}

impl Default for LeagueLedger {
    fn default() -> Self {
        Self::new(LeagueConfig::default())
    }
}
