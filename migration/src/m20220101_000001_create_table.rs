use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20220101_000001_create_table"
    }
}

#[derive(Iden)]
pub enum Pelada {
    Table,
    Uuid,
    Name,
}

#[derive(Iden)]
pub enum Player {
    Table,
    Uuid,
    PeladaId,
    Name,
    Rating,
    Position,
    IsActive,
    IsWaitingList,
}

#[derive(Iden)]
pub enum Draw {
    Table,
    Uuid,
    PeladaId,
    CreatedBy,
    Method,
    NumberOfTeams,
    PlayersPerTeam,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
pub enum Team {
    Table,
    Uuid,
    DrawId,
    Index,
    Name,
    Color,
    AverageRating,
}

#[derive(Iden)]
pub enum TeamPlayer {
    Table,
    Uuid,
    TeamId,
    PlayerId,
    Index,
    Position,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
        .create_table(
            sea_query::Table::create()
                .table(Pelada::Table)
                .if_not_exists()
                .col(ColumnDef::new(Pelada::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Pelada::Name).string().not_null())
                .to_owned()
        ).await?;

        manager
        .create_table(
            sea_query::Table::create()
                .table(Player::Table)
                .if_not_exists()
                .col(ColumnDef::new(Player::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Player::PeladaId).uuid().not_null())
                .col(ColumnDef::new(Player::Name).string().not_null())
                .col(ColumnDef::new(Player::Rating).double().not_null())
                .col(ColumnDef::new(Player::Position).string())
                .col(ColumnDef::new(Player::IsActive).boolean().not_null())
                .col(ColumnDef::new(Player::IsWaitingList).boolean().not_null())
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-player-pelada")
                        .from_tbl(Player::Table)
                        .from_col(Player::PeladaId)
                        .to_tbl(Pelada::Table)
                        .to_col(Pelada::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-player-pelada-id")
            .table(Player::Table)
            .col(Player::PeladaId)
            .to_owned()
        ).await?;

        manager
        .create_table(
            sea_query::Table::create()
                .table(Draw::Table)
                .if_not_exists()
                .col(ColumnDef::new(Draw::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Draw::PeladaId).uuid().not_null())
                .col(ColumnDef::new(Draw::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(Draw::Method).string().not_null())
                .col(ColumnDef::new(Draw::NumberOfTeams).integer().not_null())
                .col(ColumnDef::new(Draw::PlayersPerTeam).integer().not_null())
                .col(ColumnDef::new(Draw::IsActive).boolean().not_null())
                .col(ColumnDef::new(Draw::CreatedAt).date_time().not_null())
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-draw-pelada")
                        .from_tbl(Draw::Table)
                        .from_col(Draw::PeladaId)
                        .to_tbl(Pelada::Table)
                        .to_col(Pelada::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-draw-pelada-id")
            .table(Draw::Table)
            .col(Draw::PeladaId)
            .to_owned()
        ).await?;

        manager
        .create_table(
            sea_query::Table::create()
                .table(Team::Table)
                .if_not_exists()
                .col(ColumnDef::new(Team::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(Team::DrawId).uuid().not_null())
                .col(ColumnDef::new(Team::Index).integer().not_null())
                .col(ColumnDef::new(Team::Name).string().not_null())
                .col(ColumnDef::new(Team::Color).string().not_null())
                .col(ColumnDef::new(Team::AverageRating).double().not_null())
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-team-draw")
                        .from_tbl(Team::Table)
                        .from_col(Team::DrawId)
                        .to_tbl(Draw::Table)
                        .to_col(Draw::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-team-draw-id")
            .table(Team::Table)
            .col(Team::DrawId)
            .to_owned()
        ).await?;

        manager
        .create_table(
            sea_query::Table::create()
                .table(TeamPlayer::Table)
                .if_not_exists()
                .col(ColumnDef::new(TeamPlayer::Uuid).uuid().not_null().primary_key())
                .col(ColumnDef::new(TeamPlayer::TeamId).uuid().not_null())
                .col(ColumnDef::new(TeamPlayer::PlayerId).uuid().not_null())
                .col(ColumnDef::new(TeamPlayer::Index).integer().not_null())
                .col(ColumnDef::new(TeamPlayer::Position).string())
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-team_player-team")
                        .from_tbl(TeamPlayer::Table)
                        .from_col(TeamPlayer::TeamId)
                        .to_tbl(Team::Table)
                        .to_col(Team::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKeyCreateStatement::new()
                        .name("fk-team_player-player")
                        .from_tbl(TeamPlayer::Table)
                        .from_col(TeamPlayer::PlayerId)
                        .to_tbl(Player::Table)
                        .to_col(Player::Uuid)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-team_player-team-id")
            .table(TeamPlayer::Table)
            .col(TeamPlayer::TeamId)
            .to_owned()
        ).await?;
        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-team_player-player-id")
            .table(TeamPlayer::Table)
            .col(TeamPlayer::PlayerId)
            .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(sea_query::Table::drop().table(TeamPlayer::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(Team::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(Draw::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(Player::Table).to_owned()).await?;
        manager.drop_table(sea_query::Table::drop().table(Pelada::Table).to_owned()).await?;
        Ok(())
    }
}
