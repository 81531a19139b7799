//! Season-level estimation of each player's position and offensive role.
//!
//! Both scores are continuous values on a 1-5 archetype axis: position runs
//! from point guard to center, offensive role from primary option to
//! play-finisher. They come from fixed linear models over minutes-normalized
//! team shares, then a three-pass trim that re-centers the minutes-weighted
//! team average on 3.0 while preserving relative spread.

use std::collections::HashMap;

use crate::constants::{
    ANCHOR_PASSES, OFFENSIVE_ROLE_MODEL, POSITION_MODEL, ROLE_ANCHOR, ROLE_MAX, ROLE_MIN,
};
use crate::error::BpmError;
use crate::player::PlayerSeasonRecord;
use crate::rates::threshold_points;
use crate::team::SeasonTeamMetrics;

/// A player's estimated position and offensive role, both in [1, 5].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleScore {
    pub position: f64,
    pub offensive_role: f64,
}

fn clamp(value: f64) -> f64 {
    value.clamp(ROLE_MIN, ROLE_MAX)
}

/// Re-center clamped estimates so the minutes-weighted team average lands on
/// the 3.0 anchor.
///
/// Exactly three passes, each recomputing the weighted average of the
/// pass-one estimates under the accumulated shift and clamping again. The
/// calibrated model uses this fixed-pass trim, not an
/// iterate-until-converged loop; adding passes would change output.
fn anchor_to_team_average(estimates: &[f64], minutes: &[f64], total_minutes: f64) -> Vec<f64> {
    let mut shift = 0.0;
    for _ in 0..ANCHOR_PASSES {
        let weighted: f64 = estimates
            .iter()
            .zip(minutes)
            .map(|(est, mp)| clamp(est - shift) * mp)
            .sum();
        shift += weighted / total_minutes - ROLE_ANCHOR;
    }
    estimates.iter().map(|est| clamp(est - shift)).collect()
}

fn validate(metrics: &SeasonTeamMetrics) -> Result<(), BpmError> {
    if metrics.total_minutes <= 0.0 {
        return Err(BpmError::InvalidMetrics("total minutes must be positive"));
    }
    for (total, what) in [
        (metrics.team_trb, "team TRB must be positive"),
        (metrics.team_stl, "team STL must be positive"),
        (metrics.team_pf, "team PF must be positive"),
        (metrics.team_ast, "team AST must be positive"),
        (metrics.team_blk, "team BLK must be positive"),
    ] {
        if total <= 0.0 {
            return Err(BpmError::InvalidMetrics(what));
        }
    }
    Ok(())
}

/// Clamped pass-one position estimates: linear model over team shares,
/// blended with the positional-label prior by player minutes.
fn position_estimates(
    season: &[PlayerSeasonRecord],
    metrics: &SeasonTeamMetrics,
) -> Result<Vec<f64>, BpmError> {
    let model = POSITION_MODEL;
    let mut estimates = Vec::with_capacity(season.len());
    for rec in season {
        let line = &rec.line;
        if line.mp <= 0.0 {
            return Err(BpmError::NoPossessions(rec.name.clone()));
        }
        let pct_min = line.mp / (metrics.total_minutes / 5.0);
        let est = model.intercept
            + model.pct_trb * (line.trb / metrics.team_trb) / pct_min
            + model.pct_stl * (line.stl / metrics.team_stl) / pct_min
            + model.pct_pf * (line.pf / metrics.team_pf) / pct_min
            + model.pct_ast * (line.ast / metrics.team_ast) / pct_min
            + model.pct_blk * (line.blk / metrics.team_blk) / pct_min;
        let prior = rec.position.prior();
        let blended = (est * line.mp + prior * model.minutes_weight)
            / (line.mp + model.minutes_weight);
        estimates.push(clamp(blended));
    }
    Ok(estimates)
}

/// Clamped pass-one offensive-role estimates from assist and
/// threshold-point shares.
fn offensive_role_estimates(
    season: &[PlayerSeasonRecord],
    metrics: &SeasonTeamMetrics,
) -> Result<Vec<f64>, BpmError> {
    let model = OFFENSIVE_ROLE_MODEL;
    let basis = metrics.rate_basis();
    let thresh: Vec<f64> = season
        .iter()
        .map(|rec| threshold_points(&rec.line, &basis))
        .collect();
    let total_thresh: f64 = thresh.iter().sum();
    if total_thresh == 0.0 {
        return Err(BpmError::InvalidMetrics(
            "season threshold points sum to zero",
        ));
    }

    let mut estimates = Vec::with_capacity(season.len());
    for (rec, tp) in season.iter().zip(&thresh) {
        let line = &rec.line;
        if line.mp <= 0.0 {
            return Err(BpmError::NoPossessions(rec.name.clone()));
        }
        let pct_min = line.mp / (metrics.total_minutes / 5.0);
        let est = model.intercept
            + model.pct_ast * (line.ast / metrics.team_ast) / pct_min
            + model.pct_thresh_pts * (tp / total_thresh) / pct_min;
        // The default-role prior weighs in against team minutes, not player
        // minutes; the calibrated coefficients assume this blend.
        let blended = (est * metrics.total_minutes + model.default_role * model.minutes_weight)
            / (metrics.total_minutes + model.minutes_weight);
        estimates.push(clamp(blended));
    }
    Ok(estimates)
}

/// Estimate position and offensive role for every roster player.
///
/// Runs once per season; the result is cached by the calculator and reused
/// unchanged for every game it scores.
pub fn estimate_roles(
    season: &[PlayerSeasonRecord],
    metrics: &SeasonTeamMetrics,
) -> Result<HashMap<String, RoleScore>, BpmError> {
    validate(metrics)?;

    let minutes: Vec<f64> = season.iter().map(|rec| rec.line.mp).collect();
    let positions = anchor_to_team_average(
        &position_estimates(season, metrics)?,
        &minutes,
        metrics.total_minutes,
    );
    let roles = anchor_to_team_average(
        &offensive_role_estimates(season, metrics)?,
        &minutes,
        metrics.total_minutes,
    );

    let scores: HashMap<String, RoleScore> = season
        .iter()
        .zip(positions.iter().zip(&roles))
        .map(|(rec, (&position, &offensive_role))| {
            (rec.name.clone(), RoleScore { position, offensive_role })
        })
        .collect();

    log::debug!(
        "estimated role scores for {} players over {} team minutes",
        scores.len(),
        metrics.total_minutes
    );
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{BoxLine, PositionLabel};
    use proptest::prelude::*;

    fn metrics(total_minutes: f64) -> SeasonTeamMetrics {
        SeasonTeamMetrics {
            pace: 66.0,
            team_pts_per_tsa: 1.13,
            baseline_pts_per_tsa: 1.0,
            total_minutes,
            team_trb: 1209.0,
            team_stl: 278.0,
            team_pf: 663.0,
            team_ast: 518.0,
            team_blk: 186.0,
        }
    }

    fn record(name: &str, position: PositionLabel, line: BoxLine) -> PlayerSeasonRecord {
        PlayerSeasonRecord { name: name.to_string(), position, line }
    }

    fn guard_line(mp: f64) -> BoxLine {
        BoxLine {
            mp,
            pts: 400.0,
            tsa: 330.0,
            trb: 80.0,
            ast: 120.0,
            stl: 40.0,
            blk: 2.0,
            pf: 60.0,
            ..Default::default()
        }
    }

    fn center_line(mp: f64) -> BoxLine {
        BoxLine {
            mp,
            pts: 200.0,
            tsa: 150.0,
            trb: 250.0,
            ast: 10.0,
            stl: 10.0,
            blk: 60.0,
            pf: 90.0,
            ..Default::default()
        }
    }

    #[test]
    fn guards_rate_below_centers() {
        let season = vec![
            record("guard", PositionLabel::PointGuard, guard_line(1100.0)),
            record("center", PositionLabel::Center, center_line(900.0)),
        ];
        let scores = estimate_roles(&season, &metrics(2000.0)).unwrap();
        assert!(scores["guard"].position < scores["center"].position);
        for score in scores.values() {
            assert!(score.position >= 1.0 && score.position <= 5.0);
            assert!(score.offensive_role >= 1.0 && score.offensive_role <= 5.0);
        }
    }

    #[test]
    fn anchoring_recentres_weighted_average() {
        let estimates = vec![4.2, 4.8, 3.9];
        let minutes = vec![900.0, 700.0, 400.0];
        let anchored = anchor_to_team_average(&estimates, &minutes, 2000.0);
        let avg: f64 = anchored
            .iter()
            .zip(&minutes)
            .map(|(value, mp)| value * mp)
            .sum::<f64>()
            / 2000.0;
        assert!((avg - 3.0).abs() < 1e-9);
        // spread between players survives the shift
        assert!(anchored[1] > anchored[0] && anchored[0] > anchored[2]);
    }

    #[test]
    fn anchoring_stops_after_three_passes_when_clamped() {
        // the low player pins to the floor, so every pass undershoots the
        // anchor; after the third the residual is kept as-is
        let estimates = vec![5.0, 2.0];
        let minutes = vec![1500.0, 500.0];
        let anchored = anchor_to_team_average(&estimates, &minutes, 2000.0);
        assert_eq!(anchored[1], 1.0);
        assert!((anchored[0] - 3.671875).abs() < 1e-12);
        let avg: f64 =
            anchored.iter().zip(&minutes).map(|(v, mp)| v * mp).sum::<f64>() / 2000.0;
        assert!((avg - 3.00390625).abs() < 1e-12);
    }

    #[test]
    fn zero_minute_roster_row_is_rejected() {
        let season = vec![record("dnp", PositionLabel::Guard, BoxLine::default())];
        let err = estimate_roles(&season, &metrics(2000.0)).unwrap_err();
        assert_eq!(err, BpmError::NoPossessions("dnp".to_string()));
    }

    #[test]
    fn non_positive_metrics_are_rejected() {
        let season = vec![record("a", PositionLabel::Guard, guard_line(1000.0))];
        let mut bad = metrics(2000.0);
        bad.team_ast = 0.0;
        assert!(matches!(
            estimate_roles(&season, &bad),
            Err(BpmError::InvalidMetrics(_))
        ));
    }

    proptest! {
        #[test]
        fn role_scores_stay_in_range(
            rows in prop::collection::vec(
                (200.0..1400.0f64, 50.0..500.0f64, 10.0..300.0f64, 2.0..150.0f64,
                 2.0..80.0f64, 1.0..80.0f64, 10.0..120.0f64),
                2..10,
            )
        ) {
            let season: Vec<PlayerSeasonRecord> = rows
                .iter()
                .enumerate()
                .map(|(i, &(mp, tsa, trb, ast, stl, blk, pf))| {
                    record(
                        &format!("p{i}"),
                        PositionLabel::Unknown,
                        BoxLine {
                            mp,
                            // efficient enough that threshold points stay positive
                            pts: tsa * 1.2,
                            tsa,
                            trb,
                            ast,
                            stl,
                            blk,
                            pf,
                            ..Default::default()
                        },
                    )
                })
                .collect();
            let total: f64 = season.iter().map(|r| r.line.mp).sum();
            let scores = estimate_roles(&season, &metrics(total)).unwrap();
            for score in scores.values() {
                prop_assert!((1.0..=5.0).contains(&score.position));
                prop_assert!((1.0..=5.0).contains(&score.offensive_role));
            }
        }
    }
}
