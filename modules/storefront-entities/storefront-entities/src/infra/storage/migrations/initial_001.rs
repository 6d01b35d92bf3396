use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactSubmissions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactSubmissions::Name).string().not_null())
                    .col(ColumnDef::new(ContactSubmissions::Email).string().not_null())
                    .col(ColumnDef::new(ContactSubmissions::Phone).string())
                    .col(ColumnDef::new(ContactSubmissions::Message).text().not_null())
                    .col(ColumnDef::new(ContactSubmissions::Status).string())
                    .col(ColumnDef::new(ContactSubmissions::CreatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentSettings::UserId).string().not_null())
                    .col(ColumnDef::new(PaymentSettings::Provider).string().not_null())
                    .col(ColumnDef::new(PaymentSettings::PublicKey).string())
                    .col(ColumnDef::new(PaymentSettings::SecretKey).string())
                    .col(ColumnDef::new(PaymentSettings::IsActive).boolean())
                    .col(ColumnDef::new(PaymentSettings::Environment).string())
                    .col(ColumnDef::new(PaymentSettings::CreatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(PaymentSettings::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_settings_user_id")
                    .table(PaymentSettings::Table)
                    .col(PaymentSettings::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(ColumnDef::new(Transactions::Amount).double().not_null())
                    .col(ColumnDef::new(Transactions::Currency).string().not_null())
                    .col(ColumnDef::new(Transactions::Status).string().not_null())
                    .col(ColumnDef::new(Transactions::PaymentMethod).string())
                    .col(ColumnDef::new(Transactions::ExternalId).string())
                    .col(ColumnDef::new(Transactions::Description).text())
                    .col(ColumnDef::new(Transactions::CreatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_user_id")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContactSubmissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContactSubmissions {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Message,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PaymentSettings {
    Table,
    Id,
    UserId,
    Provider,
    PublicKey,
    SecretKey,
    IsActive,
    Environment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Amount,
    Currency,
    Status,
    PaymentMethod,
    ExternalId,
    Description,
    CreatedAt,
}
