//! System-wide constants for the league ledger.

/// Principal that administers the league when no config overrides it.
pub const DEFAULT_ADMIN: &str = "contract-owner";

/// Prize paid out per completed match, in the smallest currency unit
/// (one whole coin at six decimal places).
pub const DEFAULT_PRIZE_POOL: u64 = 1_000_000;

/// Value of a freshly created team's balance.
pub const INITIAL_TEAM_BALANCE: u64 = 0;
