//! Weekly training series per muscle group.

use std::collections::BTreeMap;

use model::records::WorkoutSet;
use model::{Muscle, MuscleLabel};
use tracing::debug;

use super::{ExerciseCatalog, MuscleThresholds, WorkoutConfig};

/// Credit a set gives its exercise's primary muscle.
pub const PRIMARY_CREDIT: f64 = 1.0;
/// Credit a set gives each secondary muscle.
pub const SECONDARY_CREDIT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intensity {
    Weak,
    Medium,
    High,
}

impl Intensity {
    /// Key used in overlay file names.
    pub fn key(&self) -> &'static str {
        match self {
            Intensity::Weak => "weak",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Intensity::Weak => "Fraco",
            Intensity::Medium => "Médio",
            Intensity::High => "Alto",
        }
    }
}

/// `> medium_ceiling` is high, `> weak_ceiling` medium, anything above zero weak.
pub fn classify(total: f64, thresholds: MuscleThresholds) -> Option<Intensity> {
    if total > thresholds.medium_ceiling {
        Some(Intensity::High)
    } else if total > thresholds.weak_ceiling {
        Some(Intensity::Medium)
    } else if total > 0.0 {
        Some(Intensity::Weak)
    } else {
        None
    }
}

/// Series per muscle for one window. Sets are counted per exercise first,
/// then credited to the exercise's muscles. HRR measurements and sets of
/// exercises missing from the catalog are not training sets.
pub fn weekly_series(
    sets: &[&WorkoutSet],
    catalog: &ExerciseCatalog,
    hrr_exercise_id: Option<i32>,
) -> BTreeMap<Muscle, f64> {
    let mut per_exercise: BTreeMap<i32, usize> = BTreeMap::new();
    for set in sets {
        if Some(set.exercise_id) == hrr_exercise_id || catalog.get(set.exercise_id).is_none() {
            continue;
        }
        *per_exercise.entry(set.exercise_id).or_insert(0) += 1;
    }

    let mut series: BTreeMap<Muscle, f64> = BTreeMap::new();
    for (exercise_id, count) in per_exercise {
        let Some(exercise) = catalog.get(exercise_id) else {
            continue;
        };
        let count = count as f64;

        match exercise.primary() {
            MuscleLabel::Muscle(muscle) => *series.entry(muscle).or_insert(0.0) += count * PRIMARY_CREDIT,
            MuscleLabel::NoCredit => {}
            MuscleLabel::Unknown => {
                debug!(exercise = %exercise.name, label = %exercise.primary_muscle, "Unknown primary muscle label")
            }
        }
        for label in exercise.secondaries() {
            if let Some(muscle) = label.muscle() {
                *series.entry(muscle).or_insert(0.0) += count * SECONDARY_CREDIT;
            }
        }
    }
    series
}

/// Classified muscles only; unclassified ones get no marker.
pub fn intensities(series: &BTreeMap<Muscle, f64>, config: &WorkoutConfig) -> BTreeMap<Muscle, Intensity> {
    series
        .iter()
        .filter_map(|(muscle, total)| {
            classify(*total, config.thresholds_for(*muscle)).map(|intensity| (*muscle, intensity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;
    use model::records::ExerciseDefinition;

    fn exercise(id: i32, primary: &str, secondary: &[&str]) -> ExerciseDefinition {
        ExerciseDefinition {
            id,
            name: format!("exercise {id}"),
            primary_muscle: primary.to_string(),
            secondary_muscles: secondary.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn set(exercise_id: i32) -> WorkoutSet {
        WorkoutSet {
            exercise_id,
            weight: 20.0,
            reps: 10.0,
            duration: 0.0,
            performed_at: date(2025, 10, 14).and_hms_opt(18, 0, 0).unwrap(),
        }
    }

    fn catalog() -> ExerciseCatalog {
        ExerciseCatalog::new(vec![
            exercise(1, "Peito", &["Tríceps"]),
            exercise(2, "Costas", &["Bíceps"]),
            exercise(3, "Quadríceps", &["Glúteos", "Posterior"]),
            exercise(4, "Cardio", &[]),
            exercise(5, "HRR", &[]),
        ])
    }

    #[test]
    fn test_secondary_credit_is_half_of_primary() {
        let sets: Vec<WorkoutSet> = [1, 1, 1, 2, 2, 1].into_iter().map(set).collect();
        let refs: Vec<&WorkoutSet> = sets.iter().collect();

        let series = weekly_series(&refs, &catalog(), Some(5));

        let primary = series[&Muscle::Chest] + series[&Muscle::Back];
        let secondary = series[&Muscle::Triceps] + series[&Muscle::Biceps];
        assert_eq!(primary, 6.0);
        assert_eq!(secondary, 0.5 * primary);
    }

    #[test]
    fn test_hrr_unknown_and_no_credit_sets_add_nothing() {
        let sets: Vec<WorkoutSet> = [3, 3, 4, 5, 42].into_iter().map(set).collect();
        let refs: Vec<&WorkoutSet> = sets.iter().collect();

        let series = weekly_series(&refs, &catalog(), Some(5));

        assert_eq!(series.len(), 3);
        assert_eq!(series[&Muscle::Quadriceps], 2.0);
        assert_eq!(series[&Muscle::Glutes], 1.0);
        assert_eq!(series[&Muscle::Hamstrings], 1.0);
    }

    #[test]
    fn test_classification_thresholds() {
        let thresholds = MuscleThresholds {
            weak_ceiling: 4.0,
            medium_ceiling: 9.0,
        };
        assert_eq!(classify(0.0, thresholds), None);
        assert_eq!(classify(0.5, thresholds), Some(Intensity::Weak));
        assert_eq!(classify(4.0, thresholds), Some(Intensity::Weak));
        assert_eq!(classify(4.5, thresholds), Some(Intensity::Medium));
        assert_eq!(classify(9.0, thresholds), Some(Intensity::Medium));
        assert_eq!(classify(9.5, thresholds), Some(Intensity::High));
    }

    #[test]
    fn test_thresholds_are_muscle_specific() {
        let mut config = WorkoutConfig::default();
        config.thresholds.insert(
            Muscle::Calves,
            MuscleThresholds {
                weak_ceiling: 1.0,
                medium_ceiling: 2.0,
            },
        );
        let series = BTreeMap::from([(Muscle::Calves, 3.0), (Muscle::Chest, 3.0), (Muscle::Abs, 0.0)]);

        let marked = intensities(&series, &config);
        assert_eq!(marked[&Muscle::Calves], Intensity::High);
        assert_eq!(marked[&Muscle::Chest], Intensity::Weak);
        assert!(!marked.contains_key(&Muscle::Abs));
    }
}
