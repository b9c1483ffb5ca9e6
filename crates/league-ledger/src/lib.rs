//! # league-ledger
//!
//! The authoritative state machine of a sports league: teams own players
//! and balances, matches pay out a fixed prize pool, and players change
//! hands for a price drawn from the buying team's balance.
//!
//! ## Architecture
//!
//! 1. **LeagueLedger**: teams, players, matches and id counters; the six
//!    state-changing operations
//! 2. **Prize**: winner-takes-all / split-on-draw payout policy
//! 3. **SupplyConservation**: Σ balances == prizes paid - withdrawals
//! 4. **LedgerSnapshot**: validated export / restore of the whole state
//! 5. **SharedLedger**: lock-guarded handle for multi-threaded callers
//!
//! ## Money Flow
//!
//! ```text
//! report_match_result → prize credited → trade_player (team ↔ team)
//!     → withdraw_balance → leaves the ledger
//! ```
//!
//! Every operation either applies completely or returns an error with the
//! ledger untouched.

pub mod ledger;
pub mod prize;
pub mod shared;
pub mod snapshot;
pub mod supply_conservation;

pub use ledger::LeagueLedger;
pub use prize::{PrizeSplit, split_prize};
pub use shared::SharedLedger;
pub use snapshot::LedgerSnapshot;
pub use supply_conservation::SupplyConservation;
