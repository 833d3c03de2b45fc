//! Strength ranks for key lifts.

use model::records::WorkoutSet;

use crate::error::{ComputeError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RankTier {
    pub label: String,
    pub floor: f64,
}

impl RankTier {
    pub fn new(label: impl Into<String>, floor: f64) -> Self {
        Self {
            label: label.into(),
            floor,
        }
    }
}

/// Rank tiers with strictly increasing finite floors.
#[derive(Debug, Clone, PartialEq)]
pub struct RankLadder {
    tiers: Vec<RankTier>,
}

impl RankLadder {
    pub fn new(tiers: Vec<RankTier>) -> Result<Self> {
        if let Some(tier) = tiers.iter().find(|tier| !tier.floor.is_finite()) {
            return Err(ComputeError::InvalidConfiguration(format!(
                "rank '{}' has a non-finite floor",
                tier.label
            )));
        }
        if let Some(pair) = tiers.windows(2).find(|pair| pair[1].floor <= pair[0].floor) {
            return Err(ComputeError::InvalidConfiguration(format!(
                "rank floors must increase strictly: '{}' ({}) is not above '{}' ({})",
                pair[1].label, pair[1].floor, pair[0].label, pair[0].floor
            )));
        }
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    /// Highest tier whose floor is at most `value`.
    pub fn lookup(&self, value: f64) -> Option<&str> {
        let mut achieved = None;
        for tier in &self.tiers {
            if tier.floor > value {
                break;
            }
            achieved = Some(tier.label.as_str());
        }
        achieved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftMode {
    /// Best weight divided by body weight.
    Weight,
    /// Best reps among sets with little or no added weight.
    BodyweightReps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyLift {
    pub name: String,
    pub exercise_id: i32,
    pub mode: LiftMode,
    pub ladder: RankLadder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiftRank {
    pub name: String,
    pub best: Option<f64>,
    pub normalized: Option<f64>,
    pub rank: Option<String>,
}

pub fn evaluate(
    lift: &KeyLift,
    sets: &[&WorkoutSet],
    body_weight_kg: f64,
    max_added_weight: f64,
) -> LiftRank {
    let sets = sets.iter().filter(|set| set.exercise_id == lift.exercise_id);
    let best = match lift.mode {
        LiftMode::Weight => sets.map(|set| set.weight).fold(None, max_of),
        LiftMode::BodyweightReps => sets
            .filter(|set| set.weight <= max_added_weight)
            .map(|set| set.reps)
            .fold(None, max_of),
    };
    let normalized = best.map(|best| match lift.mode {
        LiftMode::Weight => best / body_weight_kg,
        LiftMode::BodyweightReps => best,
    });

    LiftRank {
        name: lift.name.clone(),
        best,
        normalized,
        rank: normalized
            .and_then(|value| lift.ladder.lookup(value))
            .map(str::to_string),
    }
}

fn max_of(acc: Option<f64>, value: f64) -> Option<f64> {
    if !value.is_finite() {
        return acc;
    }
    Some(acc.map_or(value, |acc| acc.max(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;

    fn ladder() -> RankLadder {
        RankLadder::new(vec![
            RankTier::new("F", 0.0),
            RankTier::new("E", 0.5),
            RankTier::new("C", 1.0),
        ])
        .unwrap()
    }

    fn set(exercise_id: i32, weight: f64, reps: f64) -> WorkoutSet {
        WorkoutSet {
            exercise_id,
            weight,
            reps,
            duration: 0.0,
            performed_at: date(2025, 10, 2).and_hms_opt(18, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_lookup_picks_highest_reached_floor() {
        let ladder = ladder();
        assert_eq!(ladder.lookup(0.7), Some("E"));
        assert_eq!(ladder.lookup(1.0), Some("C"));
        assert_eq!(ladder.lookup(0.0), Some("F"));
        assert_eq!(ladder.lookup(-0.1), None);
    }

    #[test]
    fn test_ladder_rejects_unordered_or_non_finite_floors() {
        let unordered = RankLadder::new(vec![RankTier::new("F", 0.5), RankTier::new("E", 0.5)]);
        assert!(matches!(unordered, Err(ComputeError::InvalidConfiguration(_))));

        let infinite = RankLadder::new(vec![RankTier::new("F", f64::INFINITY)]);
        assert!(matches!(infinite, Err(ComputeError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_weight_lift_is_normalized_by_body_weight() {
        let lift = KeyLift {
            name: "Agachamento".to_string(),
            exercise_id: 1,
            mode: LiftMode::Weight,
            ladder: ladder(),
        };
        let sets = [set(1, 60.0, 5.0), set(1, 70.0, 3.0), set(2, 200.0, 1.0)];
        let refs: Vec<&WorkoutSet> = sets.iter().collect();

        let rank = evaluate(&lift, &refs, 100.0, 2.5);
        assert_eq!(rank.best, Some(70.0));
        assert_eq!(rank.normalized, Some(0.7));
        assert_eq!(rank.rank.as_deref(), Some("E"));
    }

    #[test]
    fn test_bodyweight_lift_ignores_loaded_sets() {
        let lift = KeyLift {
            name: "Barra fixa".to_string(),
            exercise_id: 3,
            mode: LiftMode::BodyweightReps,
            ladder: RankLadder::new(vec![RankTier::new("F", 1.0), RankTier::new("B", 10.0)]).unwrap(),
        };
        let sets = [set(3, 0.0, 8.0), set(3, 2.5, 9.0), set(3, 10.0, 15.0)];
        let refs: Vec<&WorkoutSet> = sets.iter().collect();

        let rank = evaluate(&lift, &refs, 80.0, 2.5);
        assert_eq!(rank.best, Some(9.0));
        assert_eq!(rank.rank.as_deref(), Some("F"));
    }

    #[test]
    fn test_lift_without_sets_has_no_rank() {
        let lift = KeyLift {
            name: "Terra".to_string(),
            exercise_id: 4,
            mode: LiftMode::Weight,
            ladder: ladder(),
        };
        let rank = evaluate(&lift, &[], 80.0, 2.5);
        assert_eq!(rank.best, None);
        assert_eq!(rank.rank, None);
    }
}
