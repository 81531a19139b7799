use serde::{Deserialize, Serialize};

/// Nominal position label from the roster listing.
///
/// Only used as a weak prior for the estimated position score; unknown or
/// missing labels fall back to the league-neutral 3.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionLabel {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "G")]
    Guard,
    #[serde(rename = "F")]
    Forward,
    #[serde(rename = "G-F")]
    GuardForward,
    #[serde(rename = "F-G")]
    ForwardGuard,
    #[default]
    #[serde(other, rename = "?")]
    Unknown,
}

impl PositionLabel {
    /// Numeric prior on the 1 (point guard) to 5 (center) axis.
    pub fn prior(&self) -> f64 {
        match self {
            PositionLabel::PointGuard => 1.0,
            PositionLabel::ShootingGuard => 2.0,
            PositionLabel::SmallForward => 3.0,
            PositionLabel::PowerForward => 4.0,
            PositionLabel::Center => 5.0,
            PositionLabel::Guard => 1.5,
            PositionLabel::Forward => 3.5,
            PositionLabel::GuardForward | PositionLabel::ForwardGuard => 2.5,
            PositionLabel::Unknown => 3.0,
        }
    }
}

/// One row of counting stats, either season totals or a single game.
///
/// `tsa` is true shot attempts (`FGA + 0.44 * FTA` upstream); it is carried
/// as a column rather than derived so the ingestion layer controls the
/// weighting convention.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxLine {
    pub mp: f64,
    pub pts: f64,
    pub fga: f64,
    pub fta: f64,
    pub threes: f64,
    pub tsa: f64,
    pub orb: f64,
    pub drb: f64,
    pub trb: f64,
    pub ast: f64,
    pub tov: f64,
    pub stl: f64,
    pub blk: f64,
    pub pf: f64,
}

/// Season-total row for one roster player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonRecord {
    pub name: String,
    pub position: PositionLabel,
    #[serde(flatten)]
    pub line: BoxLine,
}

/// Single-game row for one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerGameRecord {
    pub name: String,
    #[serde(flatten)]
    pub line: BoxLine,
}
