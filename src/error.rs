use thiserror::Error;

/// Failures surfaced by the rating engine.
///
/// Degenerate arithmetic the model defines a policy for (zero true-shot
/// attempts, unknown position labels) is handled in place and never reaches
/// this enum.
#[derive(Debug, Error, PartialEq)]
pub enum BpmError {
    /// A game row references a player with no season role scores.
    #[error("player {0:?} is not in the season role cache")]
    UnknownPlayer(String),

    /// Non-positive minutes or pace, so neither per-100 rates nor
    /// minutes-normalized team shares are defined for this row.
    #[error("no possessions for player {0:?} (non-positive minutes or pace)")]
    NoPossessions(String),

    /// Season metrics contain a non-positive denominator.
    #[error("invalid season metrics: {0}")]
    InvalidMetrics(&'static str),
}
