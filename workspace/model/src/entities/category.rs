use sea_orm::entity::prelude::*;

/// A category of financial entries (`tipo`). One of them marks income.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tipo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "nome_tipo")]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::financial_entry::Entity")]
    FinancialEntry,
}

impl Related<super::financial_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
