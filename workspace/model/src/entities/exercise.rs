use sea_orm::entity::prelude::*;

/// An exercise (`exercicios`). Muscle columns hold the free-text labels
/// typed by the user; secondary muscles are comma-separated.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exercicios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "musculo_primario")]
    pub primary_muscle: String,
    #[sea_orm(column_name = "musculos_secundarios")]
    pub secondary_muscles: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::workout_set::Entity")]
    WorkoutSet,
}

impl Related<super::workout_set::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkoutSet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
