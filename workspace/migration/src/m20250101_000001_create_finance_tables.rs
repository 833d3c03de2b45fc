use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Entry categories
        manager
            .create_table(
                Table::create()
                    .table(Tipo::Table)
                    .if_not_exists()
                    .col(pk_auto(Tipo::Id))
                    .col(string(Tipo::NomeTipo))
                    .to_owned(),
            )
            .await?;

        // Money movements
        manager
            .create_table(
                Table::create()
                    .table(FinancRegis::Table)
                    .if_not_exists()
                    .col(pk_auto(FinancRegis::Id))
                    .col(decimal(FinancRegis::Valor).decimal_len(16, 4))
                    .col(integer(FinancRegis::TipoId))
                    .col(date_time(FinancRegis::DataRegistro))
                    .col(string_null(FinancRegis::Nome))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financ_regis_tipo")
                            .from(FinancRegis::Table, FinancRegis::TipoId)
                            .to(Tipo::Table, Tipo::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_financ_regis_data_registro")
                    .table(FinancRegis::Table)
                    .col(FinancRegis::DataRegistro)
                    .to_owned(),
            )
            .await?;

        // Debt snapshots, reserve entries and credit purchases share one shape
        for table in [
            SnapshotTable::CcEDividas,
            SnapshotTable::Reserva,
            SnapshotTable::ComprasAPrazo,
        ] {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(pk_auto(Snapshot::Id))
                        .col(decimal(Snapshot::Valor).decimal_len(16, 4))
                        .col(date(Snapshot::DataRegistro))
                        .to_owned(),
                )
                .await?;
        }

        // Installments
        manager
            .create_table(
                Table::create()
                    .table(ComprasPrazoParcelas::Table)
                    .if_not_exists()
                    .col(pk_auto(ComprasPrazoParcelas::Id))
                    .col(decimal(ComprasPrazoParcelas::ValorParcela).decimal_len(16, 4))
                    .col(date(ComprasPrazoParcelas::DataVencimento))
                    .col(boolean(ComprasPrazoParcelas::Pago).default(false))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComprasPrazoParcelas::Table).to_owned())
            .await?;

        for table in [
            SnapshotTable::ComprasAPrazo,
            SnapshotTable::Reserva,
            SnapshotTable::CcEDividas,
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(FinancRegis::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tipo::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tipo {
    Table,
    Id,
    NomeTipo,
}

#[derive(DeriveIden)]
enum FinancRegis {
    Table,
    Id,
    Valor,
    TipoId,
    DataRegistro,
    Nome,
}

#[derive(DeriveIden, Clone, Copy)]
enum SnapshotTable {
    CcEDividas,
    Reserva,
    ComprasAPrazo,
}

#[derive(DeriveIden)]
enum Snapshot {
    Id,
    Valor,
    DataRegistro,
}

#[derive(DeriveIden)]
enum ComprasPrazoParcelas {
    Table,
    Id,
    ValorParcela,
    DataVencimento,
    Pago,
}
