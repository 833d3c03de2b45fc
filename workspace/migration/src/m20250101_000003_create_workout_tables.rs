use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exercicios::Table)
                    .if_not_exists()
                    .col(pk_auto(Exercicios::Id))
                    .col(string(Exercicios::Nome))
                    .col(string(Exercicios::MusculoPrimario))
                    .col(string_null(Exercicios::MusculosSecundarios))
                    .to_owned(),
            )
            .await?;

        // Weight, reps and duration are free text in the hosted schema
        manager
            .create_table(
                Table::create()
                    .table(TreinoSeries::Table)
                    .if_not_exists()
                    .col(pk_auto(TreinoSeries::Id))
                    .col(integer(TreinoSeries::ExercicioId))
                    .col(string_null(TreinoSeries::Peso))
                    .col(string_null(TreinoSeries::Repeticoes))
                    .col(string_null(TreinoSeries::Duracao))
                    .col(date_time(TreinoSeries::DataRegistro))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_treino_series_exercicio")
                            .from(TreinoSeries::Table, TreinoSeries::ExercicioId)
                            .to(Exercicios::Table, Exercicios::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_treino_series_data_registro")
                    .table(TreinoSeries::Table)
                    .col(TreinoSeries::DataRegistro)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TreinoSeries::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Exercicios::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Exercicios {
    Table,
    Id,
    Nome,
    MusculoPrimario,
    MusculosSecundarios,
}

#[derive(DeriveIden)]
enum TreinoSeries {
    Table,
    Id,
    ExercicioId,
    Peso,
    Repeticoes,
    Duracao,
    DataRegistro,
}
