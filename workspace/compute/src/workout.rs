//! Workout pipeline: weekly series and intensity per muscle, volume load,
//! heart-rate recovery and key lift ranks over the last four rolling weeks.

pub mod hrr;
pub mod rank;
pub mod series;
pub mod volume;

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use common::DateRange;
use model::Muscle;
use model::records::{ExerciseDefinition, WorkoutSet};
use store::RecordSource;
use tracing::{info, instrument, warn};

use crate::error::{ComputeError, Result};
use crate::window;
use rank::{KeyLift, LiftRank};
use series::Intensity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuscleThresholds {
    /// Weekly series up to this value are weak.
    pub weak_ceiling: f64,
    /// Weekly series above this value are high.
    pub medium_ceiling: f64,
}

impl Default for MuscleThresholds {
    fn default() -> Self {
        Self {
            weak_ceiling: 4.0,
            medium_ceiling: 9.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutConfig {
    pub body_weight_kg: f64,
    /// Exercise whose sets are heart-rate-recovery measurements.
    pub hrr_exercise_id: Option<i32>,
    /// Heaviest added load that still counts as a bodyweight set.
    pub bodyweight_max_added_weight: f64,
    pub default_thresholds: MuscleThresholds,
    pub thresholds: BTreeMap<Muscle, MuscleThresholds>,
    pub lifts: Vec<KeyLift>,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            body_weight_kg: 80.0,
            hrr_exercise_id: None,
            bodyweight_max_added_weight: 2.5,
            default_thresholds: MuscleThresholds::default(),
            thresholds: BTreeMap::new(),
            lifts: Vec::new(),
        }
    }
}

impl WorkoutConfig {
    pub fn thresholds_for(&self, muscle: Muscle) -> MuscleThresholds {
        self.thresholds
            .get(&muscle)
            .copied()
            .unwrap_or(self.default_thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.body_weight_kg.is_finite() && self.body_weight_kg > 0.0) {
            return Err(ComputeError::InvalidConfiguration(format!(
                "body weight must be positive, got {}",
                self.body_weight_kg
            )));
        }
        let all = std::iter::once((None, &self.default_thresholds))
            .chain(self.thresholds.iter().map(|(muscle, t)| (Some(muscle), t)));
        for (muscle, thresholds) in all {
            if thresholds.weak_ceiling < 0.0 || thresholds.medium_ceiling < thresholds.weak_ceiling {
                let target = muscle.map_or("default", |m| m.key());
                return Err(ComputeError::InvalidConfiguration(format!(
                    "thresholds for {target} must satisfy 0 <= weak <= medium"
                )));
            }
        }
        Ok(())
    }
}

/// Exercise definitions by id.
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    exercises: HashMap<i32, ExerciseDefinition>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<ExerciseDefinition>) -> Self {
        Self {
            exercises: exercises.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    pub fn get(&self, id: i32) -> Option<&ExerciseDefinition> {
        self.exercises.get(&id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub range: DateRange,
    pub series: BTreeMap<Muscle, f64>,
    pub intensity: BTreeMap<Muscle, Intensity>,
    pub volume: BTreeMap<Muscle, f64>,
    pub hrr_average: f64,
}

/// Everything the workout page shows. Weeks are ordered oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutReport {
    pub weeks: Vec<WeekSummary>,
    pub monthly_volume: BTreeMap<Muscle, f64>,
    pub ranks: Vec<LiftRank>,
}

pub fn summarize(
    catalog: &ExerciseCatalog,
    sets: &[WorkoutSet],
    config: &WorkoutConfig,
    today: NaiveDate,
) -> WorkoutReport {
    let windows = window::rolling_weeks(today);
    let buckets = window::bucket(&windows, sets, WorkoutSet::date);

    let weeks: Vec<WeekSummary> = windows
        .iter()
        .zip(&buckets)
        .map(|(range, week)| {
            let series = series::weekly_series(week, catalog, config.hrr_exercise_id);
            WeekSummary {
                range: *range,
                intensity: series::intensities(&series, config),
                volume: volume::weekly_volume(week, catalog, config.hrr_exercise_id),
                hrr_average: config
                    .hrr_exercise_id
                    .map_or(0.0, |id| hrr::weekly_average(week, id)),
                series,
            }
        })
        .collect();

    let weekly_volumes: Vec<BTreeMap<Muscle, f64>> = weeks.iter().map(|w| w.volume.clone()).collect();
    let month: Vec<&WorkoutSet> = buckets.iter().flatten().copied().collect();
    let ranks = config
        .lifts
        .iter()
        .map(|lift| {
            rank::evaluate(
                lift,
                &month,
                config.body_weight_kg,
                config.bodyweight_max_added_weight,
            )
        })
        .collect();

    WorkoutReport {
        weeks,
        monthly_volume: volume::consolidate(&weekly_volumes),
        ranks,
    }
}

#[instrument(skip(source, config))]
pub async fn build_report(
    source: &dyn RecordSource,
    config: &WorkoutConfig,
    today: NaiveDate,
) -> Result<WorkoutReport> {
    config.validate()?;

    let windows = window::rolling_weeks(today);
    let Some(range) = window::span(&windows) else {
        return Err(ComputeError::InvalidConfiguration("no workout windows".to_string()));
    };

    let catalog = ExerciseCatalog::new(source.exercises().await?);
    if catalog.is_empty() {
        return Err(ComputeError::MissingReference("no exercises defined".to_string()));
    }
    let sets = source.workout_sets(range).await?;
    let unknown = sets.iter().filter(|s| catalog.get(s.exercise_id).is_none()).count();
    if unknown > 0 {
        warn!(unknown, "Workout sets reference unknown exercises");
    }

    let report = summarize(&catalog, &sets, config, today);
    info!(
        range = %range,
        exercises = catalog.len(),
        sets = sets.len(),
        ranks = report.ranks.len(),
        "Workout report computed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rank::{LiftMode, RankLadder, RankTier};

    #[tokio::test]
    async fn test_build_report_without_exercises_is_missing_reference() {
        let source = setup_source().await.unwrap();
        let result = build_report(&source, &WorkoutConfig::default(), date(2025, 10, 18)).await;
        assert!(matches!(result, Err(ComputeError::MissingReference(_))));
    }

    #[tokio::test]
    async fn test_build_report_rejects_invalid_thresholds() {
        let source = setup_source().await.unwrap();
        let mut config = WorkoutConfig::default();
        config.default_thresholds = MuscleThresholds {
            weak_ceiling: 5.0,
            medium_ceiling: 2.0,
        };
        let result = build_report(&source, &config, date(2025, 10, 18)).await;
        assert!(matches!(result, Err(ComputeError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_build_report() {
        let source = setup_source().await.unwrap();
        let bench = new_exercise(&source, "Supino", "Peito", Some("Tríceps, Ombros"))
            .await
            .unwrap();
        let hrr = new_exercise(&source, "HRR", "HRR", None).await.unwrap();
        let today = date(2025, 10, 18);

        new_workout_set(&source, &bench, date(2025, 10, 18), "60", "10").await.unwrap();
        new_workout_set(&source, &bench, date(2025, 10, 14), "70", "8").await.unwrap();
        new_workout_set(&source, &bench, date(2025, 10, 1), "50", "12").await.unwrap();
        // Outside the four weeks.
        new_workout_set(&source, &bench, date(2025, 9, 1), "200", "1").await.unwrap();
        new_workout_set(&source, &hrr, date(2025, 10, 17), "0", "30").await.unwrap();

        let config = WorkoutConfig {
            hrr_exercise_id: Some(hrr.id),
            lifts: vec![KeyLift {
                name: "Supino".to_string(),
                exercise_id: bench.id,
                mode: LiftMode::Weight,
                ladder: RankLadder::new(vec![RankTier::new("F", 0.0), RankTier::new("E", 0.8)]).unwrap(),
            }],
            ..Default::default()
        };

        let report = build_report(&source, &config, today).await.unwrap();

        assert_eq!(report.weeks.len(), 4);
        let last = &report.weeks[3];
        assert_eq!(last.series[&Muscle::Chest], 2.0);
        assert_eq!(last.series[&Muscle::Triceps], 1.0);
        assert_eq!(last.series[&Muscle::Shoulders], 1.0);
        assert_eq!(last.intensity[&Muscle::Chest], Intensity::Weak);
        assert_eq!(last.volume[&Muscle::Chest], 1160.0);
        assert_eq!(last.hrr_average, 30.0);

        assert_eq!(report.weeks[1].series[&Muscle::Chest], 1.0);
        assert!(report.weeks[0].series.is_empty());
        assert_eq!(report.weeks[0].hrr_average, 0.0);

        assert_eq!(report.monthly_volume[&Muscle::Chest], 1760.0);
        assert_eq!(report.ranks[0].best, Some(70.0));
        assert_eq!(report.ranks[0].rank.as_deref(), Some("E"));
    }
}
