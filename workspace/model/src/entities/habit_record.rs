use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use super::habit;

/// A habit marked on a day (`habitos_registros`), with an intensity level.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "habitos_registros")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "habito_id")]
    pub habit_id: i32,
    #[sea_orm(column_name = "data_registro")]
    pub date: NaiveDate,
    #[sea_orm(column_name = "nivel")]
    pub level: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "habit::Entity",
        from = "Column::HabitId",
        to = "habit::Column::Id",
        on_delete = "Cascade"
    )]
    Habit,
}

impl Related<habit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
