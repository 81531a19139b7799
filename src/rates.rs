//! Conversion of raw counting stats to a per-100-possession basis.

use crate::constants::PT_THRESHOLD;
use crate::player::BoxLine;
use crate::team::RateBasis;

/// Possessions a player was on the floor for, from minutes and team pace.
pub fn possessions(line: &BoxLine, basis: &RateBasis) -> f64 {
    line.mp * basis.pace / 40.0
}

/// Points per true-shot attempt, defined as 0 when the player has no
/// true-shot attempts. Zero volume means zero efficiency, not an error.
pub fn points_per_tsa(line: &BoxLine) -> f64 {
    if line.tsa == 0.0 {
        return 0.0;
    }
    line.pts / line.tsa
}

/// Points rescaled so shooting efficiency is measured against the team's
/// own conversion rate, re-centered on the league baseline.
pub fn adjusted_points(line: &BoxLine, basis: &RateBasis) -> f64 {
    ((points_per_tsa(line) - basis.team_pts_per_tsa) + basis.baseline_pts_per_tsa) * line.tsa
}

/// Points above the role-model efficiency threshold, used only as an input
/// to offensive-role estimation. Negative for low-efficiency volume.
pub fn threshold_points(line: &BoxLine, basis: &RateBasis) -> f64 {
    line.tsa * (points_per_tsa(line) - (basis.team_pts_per_tsa + PT_THRESHOLD))
}

/// A box line rescaled to 100 possessions, with points replaced by
/// efficiency-adjusted points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Per100Rates {
    pub adj_pts: f64,
    pub fga: f64,
    pub fta: f64,
    pub threes: f64,
    pub ast: f64,
    pub tov: f64,
    pub orb: f64,
    pub drb: f64,
    pub trb: f64,
    pub stl: f64,
    pub blk: f64,
    pub pf: f64,
}

impl Per100Rates {
    /// Rescale a box line to the 100-possession basis.
    ///
    /// Returns `None` when the line has no possessions (zero minutes or a
    /// zero pace); the caller decides how to surface that.
    pub fn compute(line: &BoxLine, basis: &RateBasis) -> Option<Per100Rates> {
        let poss = possessions(line, basis);
        if poss <= 0.0 {
            return None;
        }
        let per100 = |stat: f64| stat / poss * 100.0;
        Some(Per100Rates {
            adj_pts: per100(adjusted_points(line, basis)),
            fga: per100(line.fga),
            fta: per100(line.fta),
            threes: per100(line.threes),
            ast: per100(line.ast),
            tov: per100(line.tov),
            orb: per100(line.orb),
            drb: per100(line.drb),
            trb: per100(line.trb),
            stl: per100(line.stl),
            blk: per100(line.blk),
            pf: per100(line.pf),
        })
    }
}
