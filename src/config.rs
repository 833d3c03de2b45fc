//! Settings loaded from an optional TOML file layered under `LIFELEDGER_*`
//! environment variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use compute::workout::rank::{KeyLift, LiftMode, RankLadder, RankTier};
use compute::workout::MuscleThresholds;
use compute::{ComputeError, FinanceConfig, WorkoutConfig};
use model::Muscle;
use render::DirectoryOverlays;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use validator::Validate;

const DEFAULT_CONFIG_FILE: &str = "lifeledger.toml";
const ENV_PREFIX: &str = "LIFELEDGER";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Rejected(#[from] ComputeError),
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub source: SourceSettings,
    #[serde(default)]
    #[validate(nested)]
    pub finance: FinanceSettings,
    #[serde(default)]
    #[validate(nested)]
    pub workout: WorkoutSettings,
    #[serde(default)]
    pub assets: AssetSettings,
    #[serde(default)]
    #[validate(nested)]
    pub output: OutputSettings,
}

/// Backend access. An `http(s)` URL selects the hosted REST API, anything
/// else is treated as a database URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SourceSettings {
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct FinanceSettings {
    #[validate(length(min = 1))]
    pub income_category: String,
    pub debt_payment_category_id: i32,
    #[validate(length(min = 1))]
    pub reserve_label: String,
    pub reserve_goals: Vec<f64>,
}

impl Default for FinanceSettings {
    fn default() -> Self {
        let defaults = FinanceConfig::default();
        Self {
            income_category: defaults.income_category,
            debt_payment_category_id: defaults.debt_payment_category_id,
            reserve_label: defaults.reserve_label,
            reserve_goals: vec![12_000.0, 24_000.0, 50_000.0],
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ThresholdSettings {
    #[validate(range(min = 0.0))]
    pub weak: f64,
    #[validate(range(min = 0.0))]
    pub medium: f64,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        let defaults = MuscleThresholds::default();
        Self {
            weak: defaults.weak_ceiling,
            medium: defaults.medium_ceiling,
        }
    }
}

impl From<ThresholdSettings> for MuscleThresholds {
    fn from(settings: ThresholdSettings) -> Self {
        Self {
            weak_ceiling: settings.weak,
            medium_ceiling: settings.medium,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LiftModeSetting {
    #[default]
    Weight,
    BodyweightReps,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankSetting {
    pub label: String,
    pub floor: f64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LiftSettings {
    #[validate(length(min = 1))]
    pub name: String,
    pub exercise_id: i32,
    #[serde(default)]
    pub mode: LiftModeSetting,
    #[validate(length(min = 1))]
    pub ranks: Vec<RankSetting>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct WorkoutSettings {
    #[validate(range(exclusive_min = 0.0))]
    pub body_weight_kg: f64,
    pub hrr_exercise_id: Option<i32>,
    #[validate(range(min = 0.0))]
    pub bodyweight_max_added_weight: f64,
    #[validate(nested)]
    pub default_thresholds: ThresholdSettings,
    /// Per-muscle overrides of `default_thresholds`.
    pub thresholds: BTreeMap<Muscle, ThresholdSettings>,
    #[validate(nested)]
    pub lifts: Vec<LiftSettings>,
}

impl Default for WorkoutSettings {
    fn default() -> Self {
        let defaults = WorkoutConfig::default();
        Self {
            body_weight_kg: defaults.body_weight_kg,
            hrr_exercise_id: defaults.hrr_exercise_id,
            bodyweight_max_added_weight: defaults.bodyweight_max_added_weight,
            default_thresholds: ThresholdSettings::default(),
            thresholds: BTreeMap::new(),
            lifts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory holding `{muscle}-{intensity}.{overlay_extension}` images.
    pub overlay_dir: PathBuf,
    pub overlay_extension: String,
    pub body_image: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            overlay_dir: PathBuf::from("assets/overlays"),
            overlay_extension: "png".to_string(),
            body_image: PathBuf::from("assets/body.png"),
        }
    }
}

impl AssetSettings {
    pub fn overlays(&self) -> DirectoryOverlays {
        DirectoryOverlays::new(&self.overlay_dir, self.overlay_extension.clone(), &self.body_image)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct OutputSettings {
    pub path: PathBuf,
    #[validate(length(min = 1))]
    pub title: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("relatorio.pdf"),
            title: "Relatório Pessoal".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings, later sources overriding earlier ones:
    /// 1. `path`, or `lifeledger.toml` in the working directory if it exists
    /// 2. `LIFELEDGER_<SECTION>__<KEY>` environment variables
    ///
    /// The result is validated, including the rank ladders.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        use ::config::{Config, Environment, File, FileFormat};

        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.check()?;
        debug!(source = %settings.source.url, lifts = settings.workout.lifts.len(), "Settings loaded");
        Ok(settings)
    }

    /// Field validation plus everything the pipelines would reject later.
    pub fn check(&self) -> Result<(), SettingsError> {
        self.validate()?;
        self.finance_config()?;
        self.workout_config()?.validate()?;
        Ok(())
    }

    pub fn finance_config(&self) -> Result<FinanceConfig, ComputeError> {
        let reserve_goals = self
            .finance
            .reserve_goals
            .iter()
            .map(|goal| {
                Decimal::try_from(*goal).map_err(|_| {
                    ComputeError::InvalidConfiguration(format!("reserve goal {goal} is not a number"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if reserve_goals.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(ComputeError::InvalidConfiguration(
                "reserve goals must increase strictly".to_string(),
            ));
        }

        Ok(FinanceConfig {
            income_category: self.finance.income_category.clone(),
            debt_payment_category_id: self.finance.debt_payment_category_id,
            reserve_label: self.finance.reserve_label.clone(),
            reserve_goals,
        })
    }

    pub fn workout_config(&self) -> Result<WorkoutConfig, ComputeError> {
        let workout = &self.workout;
        let lifts = workout
            .lifts
            .iter()
            .map(|lift| {
                let tiers = lift
                    .ranks
                    .iter()
                    .map(|rank| RankTier::new(rank.label.clone(), rank.floor))
                    .collect();
                let ladder = RankLadder::new(tiers).map_err(|err| {
                    ComputeError::InvalidConfiguration(format!("lift '{}': {err}", lift.name))
                })?;
                Ok(KeyLift {
                    name: lift.name.clone(),
                    exercise_id: lift.exercise_id,
                    mode: match lift.mode {
                        LiftModeSetting::Weight => LiftMode::Weight,
                        LiftModeSetting::BodyweightReps => LiftMode::BodyweightReps,
                    },
                    ladder,
                })
            })
            .collect::<Result<Vec<_>, ComputeError>>()?;

        Ok(WorkoutConfig {
            body_weight_kg: workout.body_weight_kg,
            hrr_exercise_id: workout.hrr_exercise_id,
            bodyweight_max_added_weight: workout.bodyweight_max_added_weight,
            default_thresholds: workout.default_thresholds.into(),
            thresholds: workout
                .thresholds
                .iter()
                .map(|(muscle, thresholds)| (*muscle, (*thresholds).into()))
                .collect(),
            lifts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const FULL: &str = r#"
[source]
url = "https://backend.example"
api_key = "anon-key"

[finance]
income_category = "Receitas"
reserve_goals = [1000, 5000]

[workout]
body_weight_kg = 72.5
hrr_exercise_id = 99

[workout.thresholds.calves]
weak = 2
medium = 6

[[workout.lifts]]
name = "Supino"
exercise_id = 1
ranks = [{ label = "F", floor = 0 }, { label = "E", floor = 0.5 }, { label = "C", floor = 1.0 }]

[[workout.lifts]]
name = "Barra fixa"
exercise_id = 2
mode = "bodyweight_reps"
ranks = [{ label = "F", floor = 1 }, { label = "B", floor = 12 }]

[output]
path = "out/relatorio.pdf"
"#;

    #[test]
    fn test_load_full_file() {
        let file = write_config(FULL);
        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.source.timeout(), Duration::from_secs(30));
        assert_eq!(settings.output.path, PathBuf::from("out/relatorio.pdf"));
        assert_eq!(settings.assets.overlay_extension, "png");

        let finance = settings.finance_config().unwrap();
        assert_eq!(finance.income_category, "Receitas");
        assert_eq!(finance.debt_payment_category_id, 7);
        assert_eq!(finance.reserve_goals, vec![Decimal::new(1000, 0), Decimal::new(5000, 0)]);

        let workout = settings.workout_config().unwrap();
        assert_eq!(workout.body_weight_kg, 72.5);
        assert_eq!(workout.hrr_exercise_id, Some(99));
        assert_eq!(workout.thresholds_for(Muscle::Calves).medium_ceiling, 6.0);
        assert_eq!(workout.thresholds_for(Muscle::Chest).medium_ceiling, 9.0);
        assert_eq!(workout.lifts.len(), 2);
        assert_eq!(workout.lifts[1].mode, LiftMode::BodyweightReps);
        assert_eq!(workout.lifts[0].ladder.lookup(0.7), Some("E"));
    }

    #[test]
    fn test_unordered_rank_ladder_is_rejected_at_load() {
        let file = write_config(
            r#"
[source]
url = "sqlite::memory:"

[[workout.lifts]]
name = "Terra"
exercise_id = 3
ranks = [{ label = "F", floor = 1.0 }, { label = "E", floor = 0.5 }]
"#,
        );
        let result = Settings::load(Some(file.path()));
        assert!(matches!(result, Err(SettingsError::Rejected(ComputeError::InvalidConfiguration(_)))));
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let file = write_config(
            r#"
[source]
url = ""

[workout]
body_weight_kg = 0
"#,
        );
        assert!(matches!(Settings::load(Some(file.path())), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_lift_without_ranks_is_invalid() {
        let file = write_config(
            r#"
[source]
url = "sqlite::memory:"

[[workout.lifts]]
name = "Agachamento"
exercise_id = 4
ranks = []
"#,
        );
        assert!(matches!(Settings::load(Some(file.path())), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = Settings::load(Some(Path::new("/nonexistent/lifeledger.toml")));
        assert!(matches!(result, Err(SettingsError::Load(_))));
    }

    #[test]
    fn test_unordered_thresholds_are_rejected() {
        let file = write_config(
            r#"
[source]
url = "sqlite::memory:"

[workout.default_thresholds]
weak = 8
medium = 3
"#,
        );
        assert!(matches!(Settings::load(Some(file.path())), Err(SettingsError::Rejected(_))));
    }
}
