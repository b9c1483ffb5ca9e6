//! League configuration.

use serde::{Deserialize, Serialize};

use crate::{LeagueError, Principal, Result, constants};

/// Configuration for a single league ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// The only principal allowed to add players, schedule matches and
    /// report results.
    pub admin: Principal,
    /// Amount credited per completed match.
    pub prize_pool: u64,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            admin: Principal::from(constants::DEFAULT_ADMIN),
            prize_pool: constants::DEFAULT_PRIZE_POOL,
        }
    }
}

impl LeagueConfig {
    /// Default config with a different admin.
    #[must_use]
    pub fn with_admin(admin: impl Into<Principal>) -> Self {
        Self {
            admin: admin.into(),
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configs that would make the ledger meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.prize_pool == 0 {
            return Err(LeagueError::invalid("prize pool must be positive"));
        }
        if self.admin.as_str().is_empty() {
            return Err(LeagueError::invalid("admin principal must not be empty"));
        }
        Ok(())
    }
}
