use serde::{Deserialize, Serialize};

/// Season-level team context for rate conversion and role estimation.
///
/// `pace` is possessions per 40 minutes. The stat totals are the
/// denominators for the minutes-normalized team shares in the role models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonTeamMetrics {
    pub pace: f64,
    /// Team points per true-shot attempt.
    pub team_pts_per_tsa: f64,
    /// League baseline points per true-shot attempt.
    pub baseline_pts_per_tsa: f64,
    /// Total player-minutes for the season (5 x game minutes, summed).
    pub total_minutes: f64,
    pub team_trb: f64,
    pub team_stl: f64,
    pub team_pf: f64,
    pub team_ast: f64,
    pub team_blk: f64,
}

/// Game-level team context. Pace and shooting efficiency differ from the
/// season figures, so the two are never interchangeable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameTeamMetrics {
    pub pace: f64,
    /// Total player-minutes for the game (200 for regulation).
    pub minutes: f64,
    pub team_pts_per_tsa: f64,
    pub baseline_pts_per_tsa: f64,
}

/// The pieces of team context the rate converter actually needs.
#[derive(Clone, Copy, Debug)]
pub struct RateBasis {
    pub pace: f64,
    pub team_pts_per_tsa: f64,
    pub baseline_pts_per_tsa: f64,
}

impl SeasonTeamMetrics {
    pub fn rate_basis(&self) -> RateBasis {
        RateBasis {
            pace: self.pace,
            team_pts_per_tsa: self.team_pts_per_tsa,
            baseline_pts_per_tsa: self.baseline_pts_per_tsa,
        }
    }
}

impl GameTeamMetrics {
    pub fn rate_basis(&self) -> RateBasis {
        RateBasis {
            pace: self.pace,
            team_pts_per_tsa: self.team_pts_per_tsa,
            baseline_pts_per_tsa: self.baseline_pts_per_tsa,
        }
    }
}

/// Two-team game outcome and precomputed efficiency ratings.
///
/// Team A is always the team being scored; team B is the opponent. The
/// adjusted efficiencies (`adj_oe`/`adj_de`) come from the upstream ratings
/// pipeline and are consumed as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    pub team_a_score: f64,
    pub team_b_score: f64,
    pub team_a_oe: f64,
    pub team_b_oe: f64,
    pub team_a_adj_oe: f64,
    pub team_a_adj_de: f64,
    pub team_b_adj_oe: f64,
    pub team_b_adj_de: f64,
}

impl GameContext {
    /// Final-score margin from team A's perspective.
    pub fn margin(&self) -> f64 {
        self.team_a_score - self.team_b_score
    }
}
