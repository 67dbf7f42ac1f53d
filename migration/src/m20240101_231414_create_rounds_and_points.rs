use sea_orm_migration::prelude::*;

use crate::enums::*;
use crate::macros::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Round::Table)
                    .col(
                        ColumnDef::new(Round::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Round::TournamentId).integer().not_null())
                    .col(ColumnDef::new(Round::UserId).integer().not_null())
                    .col(ColumnDef::new(Round::TotalStrokes).integer().not_null())
                    .col(ColumnDef::new(Round::TotalPutts).integer().not_null())
                    .col(ColumnDef::new(Round::ScoreDifferential).double())
                    .col(ColumnDef::new(Round::PlayerIndex).double().not_null())
                    .col(ColumnDef::new(Round::CourseHandicap).integer().not_null())
                    .col(ColumnDef::new(Round::NetStrokes).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Round::Table, Round::TournamentId)
                            .to(Tournament::Table, Tournament::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Round::Table, Round::UserId)
                            .to(User::Table, User::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("unique_user_tournament_round")
                    .table(Round::Table)
                    .col(Round::UserId)
                    .col(Round::TournamentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HoleScore::Table)
                    .col(ColumnDef::new(HoleScore::RoundId).integer().not_null())
                    .col(ColumnDef::new(HoleScore::HoleNumber).integer().not_null())
                    .col(ColumnDef::new(HoleScore::Strokes).integer())
                    .col(ColumnDef::new(HoleScore::Putts).integer())
                    .primary_key(
                        Index::create()
                            .col(HoleScore::RoundId)
                            .col(HoleScore::HoleNumber),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(HoleScore::Table, HoleScore::RoundId)
                            .to(Round::Table, Round::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Greenie::Table)
                    .col(
                        ColumnDef::new(Greenie::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Greenie::RoundId).integer().not_null())
                    .col(ColumnDef::new(Greenie::HoleNumber).integer().not_null())
                    .col(ColumnDef::new(Greenie::Feet).integer().not_null())
                    .col(ColumnDef::new(Greenie::Inches).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Greenie::Table, Greenie::RoundId)
                            .to(Round::Table, Round::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("unique_round_hole_greenie")
                    .table(Greenie::Table)
                    .col(Greenie::RoundId)
                    .col(Greenie::HoleNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Points::Table)
                    .col(
                        ColumnDef::new(Points::RoundId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(points_column!(Points::Participation))
                    .col(points_column!(Points::Strokes))
                    .col(points_column!(Points::Putts))
                    .col(points_column!(Points::Pars))
                    .col(points_column!(Points::Birdies))
                    .col(points_column!(Points::Eagles))
                    .col(points_column!(Points::Aces))
                    .col(points_column!(Points::Greenies))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Points::Table, Points::RoundId)
                            .to(Round::Table, Round::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(Points, manager);
        drop_table!(Greenie, manager);
        drop_table!(HoleScore, manager);
        drop_table!(Round, manager);
        Ok(())
    }
}
