//! BPM Core - Box Plus/Minus rating engine for college basketball.
//!
//! Turns season totals and single-game box scores into per-100-possession
//! Box Plus/Minus ratings: combined BPM, the offense-only OBPM, the derived
//! DBPM, and a minutes-and-pace-weighted NET contribution, all reconciled
//! against the team's game-level rating.

pub mod bpm;
pub mod constants;
pub mod error;
pub mod player;
pub mod rates;
pub mod roles;
pub mod team;

pub use bpm::{lead_bonus, BpmBreakdown, BpmCalculator, BpmVariant, RatingResult, TeamAdjustment};
pub use constants::{LEAGUE_AVG_RATING, PT_THRESHOLD, ROLE_MAX, ROLE_MIN};
pub use error::BpmError;
pub use player::{BoxLine, PlayerGameRecord, PlayerSeasonRecord, PositionLabel};
pub use rates::Per100Rates;
pub use roles::{estimate_roles, RoleScore};
pub use team::{GameContext, GameTeamMetrics, SeasonTeamMetrics};
