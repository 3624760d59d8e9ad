use entity::{ArtistEntity, ShowEntity, VenueEntity};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);
        manager
            .exec_stmt(
                schema
                    .create_table_from_entity(VenueEntity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(
                schema
                    .create_table_from_entity(ArtistEntity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        // show references both tables above
        manager
            .exec_stmt(
                schema
                    .create_table_from_entity(ShowEntity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShowEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ArtistEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VenueEntity).to_owned())
            .await
    }
}
