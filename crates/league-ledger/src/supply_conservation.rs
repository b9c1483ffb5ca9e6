//! Supply conservation invariant checker.
//!
//! Money enters the league only as match prizes and leaves only through
//! withdrawals. Trades move it between teams. So at all times:
//! ```text
//! Σ team.balance == Σ(prizes paid) - Σ(withdrawals)
//! ```

use league_types::{LeagueError, Result};
use serde::{Deserialize, Serialize};

/// Running totals of money minted into and withdrawn from the ledger.
///
/// Totals are `u128`, the same width as the summed team balances they are
/// checked against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyConservation {
    /// Total prize money credited since genesis.
    minted: u128,
    /// Total withdrawn since genesis.
    withdrawn: u128,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record prize money credited to teams.
    ///
    /// # Errors
    /// Returns `InvalidValue` if the minted total would overflow; nothing
    /// is recorded then.
    pub fn record_prize(&mut self, amount: u64) -> Result<()> {
        self.minted = self
            .minted
            .checked_add(u128::from(amount))
            .ok_or_else(|| LeagueError::invalid("minted total overflow"))?;
        Ok(())
    }

    /// Record money leaving the ledger.
    ///
    /// # Errors
    /// Returns `InvalidValue` if the withdrawn total would overflow.
    pub fn record_withdrawal(&mut self, amount: u64) -> Result<()> {
        self.withdrawn = self
            .withdrawn
            .checked_add(u128::from(amount))
            .ok_or_else(|| LeagueError::invalid("withdrawn total overflow"))?;
        Ok(())
    }

    /// Expected total of all team balances, or `None` if more has been
    /// withdrawn than was ever minted.
    #[must_use]
    pub fn expected_supply(&self) -> Option<u128> {
        self.minted.checked_sub(self.withdrawn)
    }

    /// Verify the sum of all team balances against minted - withdrawn.
    ///
    /// # Errors
    /// Returns [`LeagueError::SupplyInvariantViolation`] if they differ.
    pub fn verify(&self, actual_supply: u128) -> Result<()> {
        if self.expected_supply() != Some(actual_supply) {
            return Err(LeagueError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != minted {} - withdrawn {}",
                    self.minted, self.withdrawn
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn total_minted(&self) -> u128 {
        self.minted
    }

    #[must_use]
    pub fn total_withdrawn(&self) -> u128 {
        self.withdrawn
    }
}
