use sea_orm::entity::prelude::*;

/// A tracked habit (`habitos`).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "habitos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "ativo", default_value = "true")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::habit_record::Entity")]
    HabitRecord,
}

impl Related<super::habit_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HabitRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
