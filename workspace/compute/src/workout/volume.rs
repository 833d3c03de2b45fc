//! Volume load per muscle group. Volume goes to the primary muscle only,
//! unlike series which also credit secondary muscles.

use std::collections::BTreeMap;

use model::Muscle;
use model::records::WorkoutSet;

use super::ExerciseCatalog;

/// `reps * weight`, or `duration * weight` for timed sets without reps.
pub fn set_volume(set: &WorkoutSet) -> f64 {
    if set.reps > 0.0 {
        set.reps * set.weight
    } else {
        set.duration * set.weight
    }
}

pub fn weekly_volume(
    sets: &[&WorkoutSet],
    catalog: &ExerciseCatalog,
    hrr_exercise_id: Option<i32>,
) -> BTreeMap<Muscle, f64> {
    let mut volume: BTreeMap<Muscle, f64> = BTreeMap::new();
    for set in sets.iter().filter(|set| Some(set.exercise_id) != hrr_exercise_id) {
        let Some(muscle) = catalog
            .get(set.exercise_id)
            .and_then(|exercise| exercise.primary().muscle())
        else {
            continue;
        };
        *volume.entry(muscle).or_insert(0.0) += set_volume(set);
    }
    volume
}

/// Sums per-window volumes into one total per muscle.
pub fn consolidate(windows: &[BTreeMap<Muscle, f64>]) -> BTreeMap<Muscle, f64> {
    let mut total: BTreeMap<Muscle, f64> = BTreeMap::new();
    for window in windows {
        for (muscle, value) in window {
            *total.entry(*muscle).or_insert(0.0) += value;
        }
    }
    total
}
