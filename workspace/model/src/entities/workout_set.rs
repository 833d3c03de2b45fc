use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

use super::exercise;

/// A logged set (`treino_series`). The numeric columns are free text in the
/// backend and are parsed leniently when converted to records.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "treino_series")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "exercicio_id")]
    pub exercise_id: i32,
    #[sea_orm(column_name = "peso")]
    pub weight: Option<String>,
    #[sea_orm(column_name = "repeticoes")]
    pub reps: Option<String>,
    #[sea_orm(column_name = "duracao")]
    pub duration: Option<String>,
    #[sea_orm(column_name = "data_registro")]
    pub performed_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "exercise::Entity",
        from = "Column::ExerciseId",
        to = "exercise::Column::Id",
        on_delete = "Cascade"
    )]
    Exercise,
}

impl Related<exercise::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exercise.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
