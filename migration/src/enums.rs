use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum User {
    Table,
    Id,
    Username,
    FirstName,
    LastName,
    Email,
    IsAdmin,
}

#[derive(DeriveIden)]
pub(crate) enum UserAuthentication {
    Table,
    UserId,
    HashedPassword,
}

#[derive(DeriveIden)]
pub(crate) enum UserCookies {
    Table,
    Cookie,
    UserId,
}

#[derive(DeriveIden)]
pub(crate) enum Course {
    Table,
    Handle,
    Name,
    Rating,
    Slope,
    ParTotal,
}

#[derive(DeriveIden)]
pub(crate) enum CourseHole {
    Table,
    CourseHandle,
    HoleNumber,
    Par,
    Handicap,
}

#[derive(DeriveIden)]
pub(crate) enum Tournament {
    Table,
    Id,
    Date,
    CourseHandle,
    TourYears,
}

#[derive(DeriveIden)]
pub(crate) enum Round {
    Table,
    Id,
    TournamentId,
    UserId,
    TotalStrokes,
    TotalPutts,
    ScoreDifferential,
    PlayerIndex,
    CourseHandicap,
    NetStrokes,
}

#[derive(DeriveIden)]
pub(crate) enum HoleScore {
    Table,
    RoundId,
    HoleNumber,
    Strokes,
    Putts,
}

#[derive(DeriveIden)]
pub(crate) enum Greenie {
    Table,
    Id,
    RoundId,
    HoleNumber,
    Feet,
    Inches,
}

#[derive(DeriveIden)]
pub(crate) enum Points {
    Table,
    RoundId,
    Participation,
    Strokes,
    Putts,
    Pars,
    Birdies,
    Eagles,
    Aces,
    Greenies,
}
