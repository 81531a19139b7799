//! The Box Plus/Minus calculator: category assembly, team reconciliation
//! and the per-game net-rating composer.

use std::collections::HashMap;

use serde::Serialize;

use crate::constants::{
    PositionConstants, RateCoefficients, BPM_COEFFICIENTS, BPM_POSITION_CONSTANTS,
    LEAGUE_AVG_RATING, OBPM_COEFFICIENTS, OBPM_POSITION_CONSTANTS,
};
use crate::error::BpmError;
use crate::player::{PlayerGameRecord, PlayerSeasonRecord};
use crate::rates::Per100Rates;
use crate::roles::{estimate_roles, RoleScore};
use crate::team::{GameContext, GameTeamMetrics, SeasonTeamMetrics};

/// Which coefficient set the pipeline runs with.
///
/// `Combined` is full BPM; `Offense` is the offense-only variant whose
/// output is OBPM. DBPM has no table of its own, it is always the
/// difference of the two runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BpmVariant {
    #[default]
    Combined,
    Offense,
}

impl BpmVariant {
    fn coefficients(self) -> &'static RateCoefficients {
        match self {
            BpmVariant::Combined => &BPM_COEFFICIENTS,
            BpmVariant::Offense => &OBPM_COEFFICIENTS,
        }
    }

    fn position_constants(self) -> &'static PositionConstants {
        match self {
            BpmVariant::Combined => &BPM_POSITION_CONSTANTS,
            BpmVariant::Offense => &OBPM_POSITION_CONSTANTS,
        }
    }
}

/// Final ratings for one player in one game.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RatingResult {
    pub bpm: f64,
    pub obpm: f64,
    pub dbpm: f64,
    pub net: f64,
}

/// The team-level reconciliation: the uniform per-player correction plus
/// the rating splits it was derived from (all relative to the 103.3 league
/// baseline).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TeamAdjustment {
    /// Additive correction applied to every player's raw value.
    pub team_adjustment: f64,
    pub ortg_a: f64,
    pub drtg_a: f64,
    pub ortg_b: f64,
    pub drtg_b: f64,
    pub rating_total_a: f64,
    pub rating_total_b: f64,
    /// Team A's symmetrized single-game offensive rating.
    pub game_ortg_a: f64,
    /// Team A's symmetrized single-game defensive rating.
    pub game_drtg_a: f64,
}

/// Output of one pipeline run over a game table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BpmBreakdown {
    /// Player name to reconciled rating (raw + team adjustment).
    pub box_scores: HashMap<String, f64>,
    pub adjustment: TeamAdjustment,
    /// Player name to share of a single floor spot's minutes.
    pub percent_minutes: HashMap<String, f64>,
}

/// Score-margin bonus credited to the winner's offensive rating
/// (0.175 points per point of half-margin).
pub fn lead_bonus(context: &GameContext) -> f64 {
    (0.35 / 2.0) * (context.margin() / 2.0)
}

fn scoring(coefs: &RateCoefficients, score: RoleScore, rates: &Per100Rates) -> f64 {
    coefs.adj_pts.interpolate(score.position) * rates.adj_pts
        + coefs.fga.interpolate(score.offensive_role) * rates.fga
        + coefs.fta.interpolate(score.offensive_role) * rates.fta
        + coefs.three_bonus.interpolate(score.position) * rates.threes
}

fn ballhandling(coefs: &RateCoefficients, score: RoleScore, rates: &Per100Rates) -> f64 {
    coefs.ast.interpolate(score.position) * rates.ast
        + coefs.tov.interpolate(score.position) * rates.tov
}

fn rebounding(coefs: &RateCoefficients, score: RoleScore, rates: &Per100Rates) -> f64 {
    coefs.orb.interpolate(score.position) * rates.orb
        + coefs.drb.interpolate(score.position) * rates.drb
        + coefs.trb.interpolate(score.position) * rates.trb
}

fn defense(coefs: &RateCoefficients, score: RoleScore, rates: &Per100Rates) -> f64 {
    coefs.stl.interpolate(score.position) * rates.stl
        + coefs.blk.interpolate(score.position) * rates.blk
        + coefs.pf.interpolate(score.position) * rates.pf
}

/// Additive adjustment from where the player sits on the position and
/// offensive-role axes, interpolated on whichever side of 3 the position
/// falls.
fn position_adjustment(constants: &PositionConstants, score: RoleScore) -> f64 {
    let pos = score.position;
    let pre_slope = if pos < 3.0 {
        (pos - 1.0) / 2.0 * constants.pos3 + (3.0 - pos) / 2.0 * constants.pos1
    } else {
        (pos - 3.0) / 2.0 * constants.pos5 + (5.0 - pos) / 2.0 * constants.pos3
    };
    pre_slope + constants.offensive_role_slope * (score.offensive_role - 3.0)
}

/// Rating calculator for one team's season.
///
/// Construction estimates every roster player's position and offensive role
/// from season totals; those scores are cached and reused unchanged by every
/// game scored afterwards, so one instance can score a whole schedule.
pub struct BpmCalculator {
    roles: HashMap<String, RoleScore>,
}

impl BpmCalculator {
    /// Build a calculator from a season table and its team metrics.
    pub fn new(
        season: &[PlayerSeasonRecord],
        metrics: &SeasonTeamMetrics,
    ) -> Result<BpmCalculator, BpmError> {
        Ok(BpmCalculator { roles: estimate_roles(season, metrics)? })
    }

    /// Season role scores, keyed by player name.
    pub fn role_scores(&self) -> &HashMap<String, RoleScore> {
        &self.roles
    }

    fn role_for(&self, name: &str) -> Result<RoleScore, BpmError> {
        self.roles
            .get(name)
            .copied()
            .ok_or_else(|| BpmError::UnknownPlayer(name.to_string()))
    }

    /// Unadjusted per-100-possession rating for one game row.
    pub fn calculate_raw_bpm(
        &self,
        record: &PlayerGameRecord,
        game_metrics: &GameTeamMetrics,
        variant: BpmVariant,
    ) -> Result<f64, BpmError> {
        let score = self.role_for(&record.name)?;
        let rates = Per100Rates::compute(&record.line, &game_metrics.rate_basis())
            .ok_or_else(|| BpmError::NoPossessions(record.name.clone()))?;
        let coefs = variant.coefficients();
        Ok(scoring(coefs, score, &rates)
            + ballhandling(coefs, score, &rates)
            + rebounding(coefs, score, &rates)
            + defense(coefs, score, &rates)
            + position_adjustment(variant.position_constants(), score))
    }

    /// Team-level correction reconciling a given minute-weighted
    /// contribution sum against the team's game rating.
    pub fn team_adjustment(
        &self,
        context: &GameContext,
        contribution_sum: f64,
        variant: BpmVariant,
    ) -> TeamAdjustment {
        let bonus = lead_bonus(context);
        let adj_ortg_a = context.team_a_oe + bonus;
        let adj_ortg_b = context.team_b_oe - bonus;

        let base = LEAGUE_AVG_RATING;
        let ortg_a = context.team_a_adj_oe - base;
        let drtg_a = base - context.team_a_adj_de;
        let ortg_b = context.team_b_adj_oe - base;
        let drtg_b = base - context.team_b_adj_de;

        // Split each side of the game rating evenly between this game's
        // lead-adjusted scoring and the two teams' season-strength ratings.
        let game_ortg_a = (adj_ortg_a - base) / 2.0 + (ortg_a + drtg_b) / 2.0;
        let game_drtg_a = (base - adj_ortg_b) / 2.0 + (drtg_a + ortg_b) / 2.0;

        let team_adjustment = match variant {
            BpmVariant::Offense => (game_ortg_a - contribution_sum) / 5.0,
            BpmVariant::Combined => {
                ((game_ortg_a + game_drtg_a) - contribution_sum) / 5.0
            }
        };

        TeamAdjustment {
            team_adjustment,
            ortg_a,
            drtg_a,
            ortg_b,
            drtg_b,
            rating_total_a: ortg_a + drtg_a,
            rating_total_b: ortg_b + drtg_b,
            game_ortg_a,
            game_drtg_a,
        }
    }

    /// Run one pipeline pass over a game table.
    ///
    /// Every player's raw rating is computed from game-level per-100 rates
    /// and the cached season role scores, then the uniform team adjustment
    /// is added so minute-weighted contributions reconcile to the team's
    /// game rating.
    pub fn calculate_bpm(
        &self,
        game: &[PlayerGameRecord],
        game_metrics: &GameTeamMetrics,
        context: &GameContext,
        variant: BpmVariant,
    ) -> Result<BpmBreakdown, BpmError> {
        let mut raw = Vec::with_capacity(game.len());
        let mut percent_minutes = HashMap::with_capacity(game.len());
        let mut contribution_sum = 0.0;
        for record in game {
            let value = self.calculate_raw_bpm(record, game_metrics, variant)?;
            let percent_min = record.line.mp / (game_metrics.minutes / 5.0);
            contribution_sum += percent_min * value;
            raw.push((record.name.clone(), value));
            percent_minutes.insert(record.name.clone(), percent_min);
        }

        let adjustment = self.team_adjustment(context, contribution_sum, variant);
        log::debug!(
            "{:?} reconciliation: contribution {:.3}, team adjustment {:+.3}",
            variant,
            contribution_sum,
            adjustment.team_adjustment
        );

        let box_scores = raw
            .into_iter()
            .map(|(name, value)| (name, value + adjustment.team_adjustment))
            .collect();
        Ok(BpmBreakdown { box_scores, adjustment, percent_minutes })
    }

    /// Full rating set for every player in the game table: combined BPM,
    /// the offense-only OBPM, their difference DBPM, and the
    /// minutes-and-pace-weighted NET contribution.
    pub fn calculate_all_stats(
        &self,
        game: &[PlayerGameRecord],
        game_metrics: &GameTeamMetrics,
        context: &GameContext,
    ) -> Result<HashMap<String, RatingResult>, BpmError> {
        let combined = self.calculate_bpm(game, game_metrics, context, BpmVariant::Combined)?;
        let offense = self.calculate_bpm(game, game_metrics, context, BpmVariant::Offense)?;
        let bonus = lead_bonus(context);
        let avg_rating_total = (combined.adjustment.rating_total_a
            + combined.adjustment.rating_total_b)
            / 2.0;

        let mut results = HashMap::with_capacity(game.len());
        for record in game {
            let bpm = combined.box_scores[&record.name];
            let obpm = offense.box_scores[&record.name];
            let net = (bpm - bonus / 5.0 - avg_rating_total / 5.0)
                * combined.percent_minutes[&record.name]
                * (game_metrics.pace / 100.0)
                * (game_metrics.minutes / 5.0 / 40.0);
            results.insert(
                record.name.clone(),
                RatingResult { bpm, obpm, dbpm: bpm - obpm, net },
            );
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::BoxLine;

    fn context() -> GameContext {
        GameContext {
            team_a_score: 75.0,
            team_b_score: 69.0,
            team_a_oe: 105.17,
            team_b_oe: 96.757,
            team_a_adj_oe: 115.9,
            team_a_adj_de: 86.4,
            team_b_adj_oe: 124.4,
            team_b_adj_de: 91.0,
        }
    }

    fn calculator_with(roles: Vec<(&str, f64, f64)>) -> BpmCalculator {
        BpmCalculator {
            roles: roles
                .into_iter()
                .map(|(name, position, offensive_role)| {
                    (name.to_string(), RoleScore { position, offensive_role })
                })
                .collect(),
        }
    }

    #[test]
    fn lead_bonus_is_scaled_half_margin() {
        assert!((lead_bonus(&context()) - 0.525).abs() < 1e-12);
    }

    #[test]
    fn team_adjustment_reconciles_known_contribution() {
        let calc = calculator_with(vec![]);
        let adj = calc.team_adjustment(&context(), 41.88, BpmVariant::Combined);
        assert!((adj.team_adjustment - (-1.1397)).abs() < 1e-9);
        assert!((adj.rating_total_a - 29.5).abs() < 1e-9);
        assert!((adj.rating_total_b - 33.4).abs() < 1e-9);
        assert!((adj.game_ortg_a - 13.6475).abs() < 1e-9);
        assert!((adj.game_drtg_a - 22.534).abs() < 1e-9);
    }

    #[test]
    fn offense_adjustment_uses_only_the_offensive_gap() {
        let calc = calculator_with(vec![]);
        let adj = calc.team_adjustment(&context(), 10.0, BpmVariant::Offense);
        assert!((adj.team_adjustment - (13.6475 - 10.0) / 5.0).abs() < 1e-9);
    }

    #[test]
    fn position_adjustment_is_piecewise_around_three() {
        let guardish = RoleScore { position: 2.8, offensive_role: 1.5 };
        let value = position_adjustment(&BPM_POSITION_CONSTANTS, guardish);
        assert!((value - (-2.1623)).abs() < 1e-9);

        // above 3 both BPM anchors are zero, only the role slope remains
        let biggish = RoleScore { position: 4.2, offensive_role: 3.5 };
        let value = position_adjustment(&BPM_POSITION_CONSTANTS, biggish);
        assert!((value - 1.387 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn unknown_game_player_is_an_error() {
        let calc = calculator_with(vec![("rostered", 3.0, 3.0)]);
        let record = PlayerGameRecord {
            name: "call-up".to_string(),
            line: BoxLine { mp: 10.0, ..Default::default() },
        };
        let metrics = GameTeamMetrics {
            pace: 70.0,
            minutes: 200.0,
            team_pts_per_tsa: 1.1,
            baseline_pts_per_tsa: 1.0,
        };
        let err = calc
            .calculate_raw_bpm(&record, &metrics, BpmVariant::Combined)
            .unwrap_err();
        assert_eq!(err, BpmError::UnknownPlayer("call-up".to_string()));
    }

    #[test]
    fn zero_minute_game_row_is_an_error() {
        let calc = calculator_with(vec![("bench", 3.0, 3.0)]);
        let record = PlayerGameRecord { name: "bench".to_string(), line: BoxLine::default() };
        let metrics = GameTeamMetrics {
            pace: 70.0,
            minutes: 200.0,
            team_pts_per_tsa: 1.1,
            baseline_pts_per_tsa: 1.0,
        };
        let err = calc
            .calculate_raw_bpm(&record, &metrics, BpmVariant::Combined)
            .unwrap_err();
        assert_eq!(err, BpmError::NoPossessions("bench".to_string()));
    }
}
