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
                    .table(Course::Table)
                    .col(
                        ColumnDef::new(Course::Handle)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Name).string().not_null())
                    .col(ColumnDef::new(Course::Rating).double().not_null())
                    .col(ColumnDef::new(Course::Slope).integer().not_null())
                    .col(ColumnDef::new(Course::ParTotal).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseHole::Table)
                    .col(ColumnDef::new(CourseHole::CourseHandle).string().not_null())
                    .col(ColumnDef::new(CourseHole::HoleNumber).integer().not_null())
                    .col(ColumnDef::new(CourseHole::Par).integer().not_null())
                    .col(ColumnDef::new(CourseHole::Handicap).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CourseHole::CourseHandle)
                            .col(CourseHole::HoleNumber),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseHole::Table, CourseHole::CourseHandle)
                            .to(Course::Table, Course::Handle)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tournament::Table)
                    .col(
                        ColumnDef::new(Tournament::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tournament::Date)
                            .date()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Tournament::CourseHandle).string().not_null())
                    .col(ColumnDef::new(Tournament::TourYears).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tournament::Table, Tournament::CourseHandle)
                            .to(Course::Table, Course::Handle)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(Tournament, manager);
        drop_table!(CourseHole, manager);
        drop_table!(Course, manager);
        Ok(())
    }
}
