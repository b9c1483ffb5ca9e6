//! Error types for the league ledger.
//!
//! All errors use the `LG_ERR_` prefix convention for easy grepping in logs.
//! Operation errors keep the numeric codes of the league contract:
//! - 100: admin-only operation
//! - 101: entity not found
//! - 102: caller not authorized for this entity
//! - 104: invalid value
//! - 105: insufficient funds
//!
//! Codes 8xx/9xx are internal and never produced by the six ledger
//! operations themselves.

use thiserror::Error;

use crate::{EntityRef, Principal};

/// Stable tag for each error, independent of the payload it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OwnerOnly,
    NotFound,
    Unauthorized,
    InvalidValue,
    InsufficientFunds,
    SupplyInvariantViolation,
    CorruptSnapshot,
    Serialization,
}

/// Central error enum for all ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    // =================================================================
    // Operation errors
    // =================================================================
    /// The operation is reserved for the league admin.
    #[error("LG_ERR_100: Operation restricted to the league admin (caller: {caller})")]
    OwnerOnly { caller: Principal },

    /// A referenced team, player or match does not exist.
    #[error("LG_ERR_101: Not found: {0}")]
    NotFound(EntityRef),

    /// The caller does not own the entity it is acting on.
    #[error("LG_ERR_102: Unauthorized caller: {caller}")]
    Unauthorized { caller: Principal },

    /// Structurally invalid argument or state transition.
    #[error("LG_ERR_104: Invalid value: {reason}")]
    InvalidValue { reason: String },

    /// The paying team cannot cover the amount.
    #[error("LG_ERR_105: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    // =================================================================
    // Internal
    // =================================================================
    /// Σ balances no longer equals minted - withdrawn.
    #[error("LG_ERR_801: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    /// A restored snapshot failed validation.
    #[error("LG_ERR_900: Corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },

    /// Serialization / deserialization error.
    #[error("LG_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

impl LeagueError {
    /// Shorthand for [`LeagueError::InvalidValue`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`LeagueError::CorruptSnapshot`].
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptSnapshot {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OwnerOnly { .. } => ErrorKind::OwnerOnly,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::SupplyInvariantViolation { .. } => ErrorKind::SupplyInvariantViolation,
            Self::CorruptSnapshot { .. } => ErrorKind::CorruptSnapshot,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Numeric error code, matching the `LG_ERR_` prefix.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self.kind() {
            ErrorKind::OwnerOnly => 100,
            ErrorKind::NotFound => 101,
            ErrorKind::Unauthorized => 102,
            ErrorKind::InvalidValue => 104,
            ErrorKind::InsufficientFunds => 105,
            ErrorKind::SupplyInvariantViolation => 801,
            ErrorKind::CorruptSnapshot => 900,
            ErrorKind::Serialization => 901,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LeagueError>;

impl From<serde_json::Error> for LeagueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
