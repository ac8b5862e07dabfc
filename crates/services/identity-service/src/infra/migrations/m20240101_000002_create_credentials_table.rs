//! Migration: Create credentials table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Credentials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Credentials::CredentialId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Credentials::Username).string().null().unique_key())
                    .col(ColumnDef::new(Credentials::Password).string().null())
                    .col(ColumnDef::new(Credentials::Role).string().null())
                    .col(ColumnDef::new(Credentials::IsEnabled).boolean().null())
                    .col(ColumnDef::new(Credentials::IsAccountNonExpired).boolean().null())
                    .col(ColumnDef::new(Credentials::IsAccountNonLocked).boolean().null())
                    .col(ColumnDef::new(Credentials::IsCredentialsNonExpired).boolean().null())
                    .col(ColumnDef::new(Credentials::UserId).integer().null())
                    // The credential outlives its user row until the service removes it
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credentials_user_id")
                            .from(Credentials::Table, Credentials::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager.create_index(owner_index()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Credentials::Table).to_owned())
            .await
    }
}

/// A user owns at most one credential
fn owner_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_credentials_user_id")
        .table(Credentials::Table)
        .col(Credentials::UserId)
        .unique()
        .to_owned()
}

#[derive(Iden)]
enum Credentials {
    Table,
    CredentialId,
    Username,
    Password,
    Role,
    IsEnabled,
    IsAccountNonExpired,
    IsAccountNonLocked,
    IsCredentialsNonExpired,
    UserId,
}

#[derive(Iden)]
enum Users {
    Table,
    UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_owner_index_is_unique() {
        let sql = owner_index().to_string(PostgresQueryBuilder);
        assert!(sql.starts_with(r#"CREATE UNIQUE INDEX "idx_credentials_user_id""#));
        assert!(sql.contains(r#""credentials" ("user_id")"#));
    }
}
