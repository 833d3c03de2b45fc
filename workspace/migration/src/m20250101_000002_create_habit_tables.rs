use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Habitos::Table)
                    .if_not_exists()
                    .col(pk_auto(Habitos::Id))
                    .col(string(Habitos::Nome))
                    .col(boolean(Habitos::Ativo).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HabitosRegistros::Table)
                    .if_not_exists()
                    .col(pk_auto(HabitosRegistros::Id))
                    .col(integer(HabitosRegistros::HabitoId))
                    .col(date(HabitosRegistros::DataRegistro))
                    .col(integer(HabitosRegistros::Nivel).default(1))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_habitos_registros_habito")
                            .from(HabitosRegistros::Table, HabitosRegistros::HabitoId)
                            .to(Habitos::Table, Habitos::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HabitosRegistros::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Habitos::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Habitos {
    Table,
    Id,
    Nome,
    Ativo,
}

#[derive(DeriveIden)]
enum HabitosRegistros {
    Table,
    Id,
    HabitoId,
    DataRegistro,
    Nivel,
}
