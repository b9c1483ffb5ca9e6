//! Thread-safe handle around a [`LeagueLedger`].
//!
//! Each write operation holds the exclusive lock for its whole duration,
//! so no thread ever sees a half-applied trade or payout. Reads share the
//! lock with each other but never overlap a write.

use std::sync::Arc;

use league_types::{MatchId, PlayerId, Principal, Result, TeamId};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ledger::LeagueLedger;
use crate::snapshot::LedgerSnapshot;

/// Cloneable, serialised access to one ledger.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<LeagueLedger>>,
}

impl SharedLedger {
    #[must_use]
    pub fn new(ledger: LeagueLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn create_team(&self, caller: &Principal, name: impl Into<String>) -> Result<TeamId> {
        self.write().create_team(caller, name)
    }

    pub fn add_player(
        &self,
        caller: &Principal,
        name: impl Into<String>,
        value: u64,
    ) -> Result<PlayerId> {
        self.write().add_player(caller, name, value)
    }

    pub fn trade_player(
        &self,
        caller: &Principal,
        player_id: PlayerId,
        from: TeamId,
        to: TeamId,
        price: u64,
    ) -> Result<()> {
        self.write().trade_player(caller, player_id, from, to, price)
    }

    pub fn schedule_match(
        &self,
        caller: &Principal,
        home: TeamId,
        away: TeamId,
        date: i64,
    ) -> Result<MatchId> {
        self.write().schedule_match(caller, home, away, date)
    }

    pub fn report_match_result(
        &self,
        caller: &Principal,
        match_id: MatchId,
        home_score: u32,
        away_score: u32,
    ) -> Result<()> {
        self.write()
            .report_match_result(caller, match_id, home_score, away_score)
    }

    pub fn withdraw_balance(
        &self,
        caller: &Principal,
        team_id: TeamId,
        amount: u64,
    ) -> Result<()> {
        self.write().withdraw_balance(caller, team_id, amount)
    }

    /// Run `f` against a consistent view of the ledger.
    pub fn read<R>(&self, f: impl FnOnce(&LeagueLedger) -> R) -> R {
        f(&self.read_guard())
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.read_guard().snapshot()
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, LeagueLedger> {
        self.inner.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, LeagueLedger> {
        self.inner.write()
    }
}

impl From<LeagueLedger> for SharedLedger {
    fn from(ledger: LeagueLedger) -> Self {
        Self::new(ledger)
    }
}
