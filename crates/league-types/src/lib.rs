//! # league-types
//!
//! Shared types, errors, and configuration for the league ledger.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`TeamId`], [`PlayerId`], [`MatchId`], [`Principal`], [`EntityRef`]
//! - **Team model**: [`Team`]
//! - **Player model**: [`Player`]
//! - **Match model**: [`Match`], [`MatchStatus`], [`MatchOutcome`]
//! - **Configuration**: [`LeagueConfig`]
//! - **Errors**: [`LeagueError`] with `LG_ERR_` prefix codes, [`ErrorKind`]
//! - **Constants**: admin and prize defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod ids;
pub mod player;
pub mod team;

// Re-export all primary types at crate root for ergonomic imports:
//   use league_types::{Team, Player, Match, LeagueError, ...};

pub use config::*;
pub use error::*;
pub use fixture::*;
pub use ids::*;
pub use player::*;
pub use team::*;

// Constants are accessed via `league_types::constants::FOO`
// (not re-exported to avoid name collisions).
