use model::records::WorkoutSet;

/// Mean heart-rate-recovery measurement of one window. The measurement is
/// logged as a set of the HRR exercise with the value in the reps field.
/// Non-positive values are invalid and excluded; a window without valid
/// values averages 0 rather than NaN.
pub fn weekly_average(sets: &[&WorkoutSet], hrr_exercise_id: i32) -> f64 {
    let values: Vec<f64> = sets
        .iter()
        .filter(|set| set.exercise_id == hrr_exercise_id)
        .map(|set| set.reps)
        .filter(|value| value.is_finite() && *value > 0.0)
        .collect();

    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
