//! Plain values handed to the pipelines.
//!
//! Every record deserializes from the backend's JSON rows (column names as
//! serde renames) and converts from the matching sea-orm model, so the same
//! pipelines run against either source.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::de;
use crate::entities;
use crate::muscle::{MuscleLabel, classify_label};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "nome_tipo")]
    pub name: String,
}

impl Category {
    /// Case-insensitive name comparison, ignoring surrounding blanks.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinancialEntry {
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "tipo_id")]
    pub category_id: i32,
    #[serde(rename = "data_registro", deserialize_with = "de::flexible_datetime")]
    pub recorded_at: NaiveDateTime,
    #[serde(rename = "nome", default)]
    pub label: Option<String>,
}

impl FinancialEntry {
    pub fn date(&self) -> NaiveDate {
        self.recorded_at.date()
    }

    pub fn label_contains(&self, needle: &str) -> bool {
        self.label
            .as_deref()
            .is_some_and(|label| label.to_lowercase().contains(&needle.to_lowercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSnapshot {
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "data_registro", deserialize_with = "de::flexible_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveEntry {
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "data_registro", deserialize_with = "de::flexible_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreditPurchase {
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "data_registro", deserialize_with = "de::flexible_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstallmentCharge {
    #[serde(rename = "valor_parcela")]
    pub amount: Decimal,
    #[serde(rename = "data_vencimento", deserialize_with = "de::flexible_date")]
    pub due_date: NaiveDate,
    #[serde(rename = "pago", default, deserialize_with = "de::null_as_default")]
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HabitDefinition {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HabitRecord {
    #[serde(rename = "habito_id")]
    pub habit_id: i32,
    #[serde(rename = "data_registro", deserialize_with = "de::flexible_date")]
    pub date: NaiveDate,
    #[serde(rename = "nivel", default, deserialize_with = "de::lenient_i32")]
    pub level: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExerciseDefinition {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "musculo_primario", default, deserialize_with = "de::null_as_default")]
    pub primary_muscle: String,
    #[serde(rename = "musculos_secundarios", default, deserialize_with = "de::label_list")]
    pub secondary_muscles: Vec<String>,
}

impl ExerciseDefinition {
    pub fn primary(&self) -> MuscleLabel {
        classify_label(&self.primary_muscle)
    }

    pub fn secondaries(&self) -> Vec<MuscleLabel> {
        self.secondary_muscles
            .iter()
            .map(|label| classify_label(label))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkoutSet {
    #[serde(rename = "exercicio_id")]
    pub exercise_id: i32,
    #[serde(rename = "peso", default, deserialize_with = "de::lenient_f64")]
    pub weight: f64,
    #[serde(rename = "repeticoes", default, deserialize_with = "de::lenient_f64")]
    pub reps: f64,
    #[serde(rename = "duracao", default, deserialize_with = "de::lenient_f64")]
    pub duration: f64,
    #[serde(rename = "data_registro", deserialize_with = "de::flexible_datetime")]
    pub performed_at: NaiveDateTime,
}

impl WorkoutSet {
    pub fn date(&self) -> NaiveDate {
        self.performed_at.date()
    }
}

fn lenient(raw: Option<String>) -> f64 {
    raw.as_deref().map(de::parse_lenient).unwrap_or(0.0)
}

impl From<entities::category::Model> for Category {
    fn from(model: entities::category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<entities::financial_entry::Model> for FinancialEntry {
    fn from(model: entities::financial_entry::Model) -> Self {
        Self {
            amount: model.amount,
            category_id: model.category_id,
            recorded_at: model.recorded_at,
            label: model.label,
        }
    }
}

impl From<entities::debt_snapshot::Model> for DebtSnapshot {
    fn from(model: entities::debt_snapshot::Model) -> Self {
        Self {
            amount: model.amount,
            date: model.date,
        }
    }
}

impl From<entities::reserve_entry::Model> for ReserveEntry {
    fn from(model: entities::reserve_entry::Model) -> Self {
        Self {
            amount: model.amount,
            date: model.date,
        }
    }
}

impl From<entities::credit_purchase::Model> for CreditPurchase {
    fn from(model: entities::credit_purchase::Model) -> Self {
        Self {
            amount: model.amount,
            date: model.date,
        }
    }
}

impl From<entities::installment::Model> for InstallmentCharge {
    fn from(model: entities::installment::Model) -> Self {
        Self {
            amount: model.amount,
            due_date: model.due_date,
            paid: model.paid,
        }
    }
}

impl From<entities::habit::Model> for HabitDefinition {
    fn from(model: entities::habit::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            active: model.active,
        }
    }
}

impl From<entities::habit_record::Model> for HabitRecord {
    fn from(model: entities::habit_record::Model) -> Self {
        Self {
            habit_id: model.habit_id,
            date: model.date,
            level: model.level,
        }
    }
}

impl From<entities::exercise::Model> for ExerciseDefinition {
    fn from(model: entities::exercise::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            primary_muscle: model.primary_muscle,
            secondary_muscles: model
                .secondary_muscles
                .as_deref()
                .map(de::split_labels)
                .unwrap_or_default(),
        }
    }
}

impl From<entities::workout_set::Model> for WorkoutSet {
    fn from(model: entities::workout_set::Model) -> Self {
        Self {
            exercise_id: model.exercise_id,
            weight: lenient(model.weight),
            reps: lenient(model.reps),
            duration: lenient(model.duration),
            performed_at: model.performed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::muscle::Muscle;
    use serde_json::json;

    #[test]
    fn test_workout_set_from_json_is_lenient() {
        let set: WorkoutSet = serde_json::from_value(json!({
            "id": 7,
            "exercicio_id": 3,
            "peso": "22,5",
            "repeticoes": 10,
            "duracao": null,
            "data_registro": "2025-10-05T18:20:00"
        }))
        .unwrap();

        assert_eq!(set.weight, 22.5);
        assert_eq!(set.reps, 10.0);
        assert_eq!(set.duration, 0.0);
        assert_eq!(set.date(), NaiveDate::from_ymd_opt(2025, 10, 5).unwrap());

        let junk: WorkoutSet = serde_json::from_value(json!({
            "exercicio_id": 3,
            "peso": "pesado",
            "data_registro": "2025-10-05"
        }))
        .unwrap();
        assert_eq!(junk.weight, 0.0);
        assert_eq!(junk.reps, 0.0);
    }

    #[test]
    fn test_exercise_secondary_muscles_accept_both_shapes() {
        let listed: ExerciseDefinition = serde_json::from_value(json!({
            "id": 1,
            "nome": "Supino",
            "musculo_primario": "Peito",
            "musculos_secundarios": ["Tríceps", "Ombros"]
        }))
        .unwrap();
        let joined: ExerciseDefinition = serde_json::from_value(json!({
            "id": 1,
            "nome": "Supino",
            "musculo_primario": "Peito",
            "musculos_secundarios": "Tríceps, Ombros"
        }))
        .unwrap();

        assert_eq!(listed, joined);
        assert_eq!(listed.primary(), MuscleLabel::Muscle(Muscle::Chest));
        assert_eq!(
            listed.secondaries(),
            vec![
                MuscleLabel::Muscle(Muscle::Triceps),
                MuscleLabel::Muscle(Muscle::Shoulders)
            ]
        );
    }

    #[test]
    fn test_null_columns_read_as_defaults() {
        let record: HabitRecord = serde_json::from_value(json!({
            "habito_id": 1,
            "data_registro": "2025-10-01",
            "nivel": null
        }))
        .unwrap();
        assert_eq!(record.level, 0);

        let typed: HabitRecord = serde_json::from_value(json!({
            "habito_id": 1,
            "data_registro": "2025-10-01",
            "nivel": "3"
        }))
        .unwrap();
        assert_eq!(typed.level, 3);

        let exercise: ExerciseDefinition = serde_json::from_value(json!({
            "id": 4,
            "nome": "Prancha",
            "musculo_primario": null,
            "musculos_secundarios": null
        }))
        .unwrap();
        assert_eq!(exercise.primary_muscle, "");
        assert!(exercise.secondary_muscles.is_empty());

        let charge: InstallmentCharge = serde_json::from_value(json!({
            "valor_parcela": "50.00",
            "data_vencimento": "2025-11-10",
            "pago": null
        }))
        .unwrap();
        assert!(!charge.paid);
    }

    #[test]
    fn test_financial_entry_label_match() {
        let entry: FinancialEntry = serde_json::from_value(json!({
            "valor": "-300.00",
            "tipo_id": 4,
            "data_registro": "2025-10-02T12:00:00+00:00",
            "nome": "Aporte RESERVA outubro"
        }))
        .unwrap();

        assert!(entry.label_contains("reserva"));
        assert!(!entry.label_contains("mercado"));
        assert_eq!(entry.amount, Decimal::new(-300, 0));
    }

    #[test]
    fn test_category_name_is_case_insensitive() {
        let category = Category {
            id: 1,
            name: " entradas".to_string(),
        };
        assert!(category.is_named("Entradas"));
        assert!(!category.is_named("Saidas"));
    }
}
