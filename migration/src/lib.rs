pub use sea_orm_migration::prelude::*;
mod enums;
mod m20240101_000001_create_users;
mod m20240101_164644_create_courses_and_tournaments;
mod m20240101_231414_create_rounds_and_points;
mod macros;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_164644_create_courses_and_tournaments::Migration),
            Box::new(m20240101_231414_create_rounds_and_points::Migration),
        ]
    }
}
