//! Prize distribution for completed matches.
//!
//! The winner takes the whole pool. On a draw the pool is split in half
//! with integer division; when the pool is odd the leftover unit goes to
//! the home team, so the two shares always add back up to the pool.

use league_types::MatchOutcome;

/// How much each side of a match is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeSplit {
    pub home: u64,
    pub away: u64,
}

impl PrizeSplit {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.home + self.away
    }
}

/// Split `pool` according to the match outcome.
#[must_use]
pub fn split_prize(pool: u64, outcome: MatchOutcome) -> PrizeSplit {
    match outcome {
        MatchOutcome::HomeWin => PrizeSplit { home: pool, away: 0 },
        MatchOutcome::AwayWin => PrizeSplit { home: 0, away: pool },
        MatchOutcome::Draw => {
            let away = pool / 2;
            PrizeSplit {
                home: pool - away,
                away,
            }
        }
    }
}
