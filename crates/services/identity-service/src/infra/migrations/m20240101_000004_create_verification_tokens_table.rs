//! Migration: Create verification_tokens table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationTokens::VerificationTokenId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VerificationTokens::Token).string().null())
                    .col(ColumnDef::new(VerificationTokens::ExpireDate).date().null())
                    .col(ColumnDef::new(VerificationTokens::CredentialId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_verification_tokens_credential_id")
                            .from(VerificationTokens::Table, VerificationTokens::CredentialId)
                            .to(Credentials::Table, Credentials::CredentialId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerificationTokens::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VerificationTokens {
    Table,
    VerificationTokenId,
    Token,
    ExpireDate,
    CredentialId,
}

#[derive(Iden)]
enum Credentials {
    Table,
    CredentialId,
}
