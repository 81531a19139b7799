//! Fixed regression coefficients and league constants.
//!
//! Every table here was calibrated offline; the engine only applies them.
//! The pos-1/pos-5 pairs are archetype endpoints: a player's continuous
//! position (or offensive role, for shot-volume stats) linearly interpolates
//! between them.

/// League-average team rating (points per 100 possessions baseline).
pub const LEAGUE_AVG_RATING: f64 = 103.3;

/// Efficiency threshold relative to team points per true-shot attempt,
/// used when computing threshold points for role estimation.
pub const PT_THRESHOLD: f64 = -0.330;

/// Anchor for the minutes-weighted team average of both role scores.
pub const ROLE_ANCHOR: f64 = 3.0;

/// Number of trim passes in the role-score anchoring procedure. The
/// calibration assumes exactly three; this is not a convergence loop.
pub const ANCHOR_PASSES: usize = 3;

/// Valid range for position and offensive-role scores.
pub const ROLE_MIN: f64 = 1.0;
pub const ROLE_MAX: f64 = 5.0;

/// Regression coefficient endpoints for one rate-stat category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoefficientPair {
    pub pos1: f64,
    pub pos5: f64,
}

impl CoefficientPair {
    /// Linearly interpolate between the archetype endpoints.
    ///
    /// `w` is the player's position (or offensive role) in [1, 5]; `w = 1`
    /// returns `pos1` exactly, `w = 5` returns `pos5` exactly.
    pub fn interpolate(&self, w: f64) -> f64 {
        (5.0 - w) / 4.0 * self.pos1 + (w - 1.0) / 4.0 * self.pos5
    }
}

/// Per-category coefficient table for one BPM variant.
#[derive(Clone, Copy, Debug)]
pub struct RateCoefficients {
    pub adj_pts: CoefficientPair,
    pub fga: CoefficientPair,
    pub fta: CoefficientPair,
    pub three_bonus: CoefficientPair,
    pub ast: CoefficientPair,
    pub tov: CoefficientPair,
    pub orb: CoefficientPair,
    pub drb: CoefficientPair,
    pub trb: CoefficientPair,
    pub stl: CoefficientPair,
    pub blk: CoefficientPair,
    pub pf: CoefficientPair,
}

pub const BPM_COEFFICIENTS: RateCoefficients = RateCoefficients {
    adj_pts: CoefficientPair { pos1: 0.860, pos5: 0.860 },
    fga: CoefficientPair { pos1: -0.560, pos5: -0.780 },
    fta: CoefficientPair { pos1: -0.266, pos5: -0.371 },
    three_bonus: CoefficientPair { pos1: 0.389, pos5: 0.389 },
    ast: CoefficientPair { pos1: 0.580, pos5: 1.034 },
    tov: CoefficientPair { pos1: -0.964, pos5: -0.964 },
    orb: CoefficientPair { pos1: 0.613, pos5: 0.181 },
    drb: CoefficientPair { pos1: 0.116, pos5: 0.181 },
    trb: CoefficientPair { pos1: 0.000, pos5: 0.000 },
    stl: CoefficientPair { pos1: 1.369, pos5: 1.008 },
    blk: CoefficientPair { pos1: 1.327, pos5: 0.703 },
    pf: CoefficientPair { pos1: -0.367, pos5: -0.367 },
};

pub const OBPM_COEFFICIENTS: RateCoefficients = RateCoefficients {
    adj_pts: CoefficientPair { pos1: 0.605, pos5: 0.605 },
    fga: CoefficientPair { pos1: -0.330, pos5: -0.472 },
    fta: CoefficientPair { pos1: -0.157, pos5: -0.224 },
    three_bonus: CoefficientPair { pos1: 0.477, pos5: 0.477 },
    ast: CoefficientPair { pos1: 0.476, pos5: 0.476 },
    tov: CoefficientPair { pos1: -0.579, pos5: -0.882 },
    orb: CoefficientPair { pos1: 0.606, pos5: 0.422 },
    drb: CoefficientPair { pos1: -0.112, pos5: 0.103 },
    trb: CoefficientPair { pos1: 0.000, pos5: 0.000 },
    stl: CoefficientPair { pos1: 0.177, pos5: 0.294 },
    blk: CoefficientPair { pos1: 0.725, pos5: 0.097 },
    pf: CoefficientPair { pos1: -0.439, pos5: -0.439 },
};

/// Additive position adjustment anchors at positions 1, 3 and 5, plus the
/// slope applied to `offensive_role - 3`.
#[derive(Clone, Copy, Debug)]
pub struct PositionConstants {
    pub pos1: f64,
    pub pos3: f64,
    pub pos5: f64,
    pub offensive_role_slope: f64,
}

pub const BPM_POSITION_CONSTANTS: PositionConstants = PositionConstants {
    pos1: -0.818,
    pos3: 0.0,
    pos5: 0.0,
    offensive_role_slope: 1.387,
};

pub const OBPM_POSITION_CONSTANTS: PositionConstants = PositionConstants {
    pos1: -1.698,
    pos3: 0.0,
    pos5: 0.0,
    offensive_role_slope: 0.43,
};

/// Linear model estimating position from minutes-normalized team shares.
#[derive(Clone, Copy, Debug)]
pub struct PositionModel {
    pub intercept: f64,
    pub pct_trb: f64,
    pub pct_stl: f64,
    pub pct_pf: f64,
    pub pct_ast: f64,
    pub pct_blk: f64,
    pub minutes_weight: f64,
}

pub const POSITION_MODEL: PositionModel = PositionModel {
    intercept: 2.130,
    pct_trb: 8.668,
    pct_stl: -2.486,
    pct_pf: 0.992,
    pct_ast: -3.536,
    pct_blk: 1.667,
    minutes_weight: 50.0,
};

/// Linear model estimating offensive role from assist and threshold-point
/// shares.
#[derive(Clone, Copy, Debug)]
pub struct OffensiveRoleModel {
    pub intercept: f64,
    pub pct_ast: f64,
    pub pct_thresh_pts: f64,
    pub default_role: f64,
    pub minutes_weight: f64,
}

pub const OFFENSIVE_ROLE_MODEL: OffensiveRoleModel = OffensiveRoleModel {
    intercept: 6.0,
    pct_ast: -6.642,
    pct_thresh_pts: -8.544,
    default_role: 4.0,
    minutes_weight: 50.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_hits_endpoints_exactly() {
        let pair = CoefficientPair { pos1: -0.560, pos5: -0.780 };
        assert_eq!(pair.interpolate(1.0), -0.560);
        assert_eq!(pair.interpolate(5.0), -0.780);
    }

    #[test]
    fn interpolation_midpoint() {
        let pair = CoefficientPair { pos1: 1.369, pos5: 1.008 };
        let mid = pair.interpolate(3.0);
        assert!((mid - (1.369 + 1.008) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn interpolation_is_linear() {
        let pair = CoefficientPair { pos1: 0.613, pos5: 0.181 };
        let a = pair.interpolate(2.0);
        let b = pair.interpolate(4.0);
        // equidistant endpoints average to the midpoint
        assert!(((a + b) / 2.0 - pair.interpolate(3.0)).abs() < 1e-12);
    }
}
