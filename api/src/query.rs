use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto;
use service::error::GenericError;
use service::points;

use crate::utils::{parse_date, parse_optional_date};

#[openapi(tag = "User")]
#[get("/users")]
pub(crate) async fn get_users(db: &State<DatabaseConnection>) -> Result<Json<Vec<dto::User>>, GenericError> {
    Ok(Json(service::find_all_users(db.inner()).await?))
}

#[openapi(tag = "User")]
#[get("/users/<username>")]
pub(crate) async fn get_user(
    username: String,
    db: &State<DatabaseConnection>,
) -> Result<Json<dto::User>, GenericError> {
    Ok(Json(service::get_user(db.inner(), &username).await?))
}

#[openapi(tag = "Course")]
#[get("/courses")]
pub(crate) async fn get_courses(db: &State<DatabaseConnection>) -> Result<Json<Vec<dto::Course>>, GenericError> {
    Ok(Json(service::find_all_courses(db.inner()).await?))
}

#[openapi(tag = "Course")]
#[get("/courses/<handle>")]
pub(crate) async fn get_course(
    handle: String,
    db: &State<DatabaseConnection>,
) -> Result<Json<dto::Course>, GenericError> {
    Ok(Json(service::get_course(db.inner(), &handle).await?))
}

/// # List tournaments
///
/// Most recent first, optionally limited to one tour season.
#[openapi(tag = "Tournament")]
#[get("/tournaments?<tour_years>")]
pub(crate) async fn get_tournaments(
    tour_years: Option<String>,
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<dto::Tournament>>, GenericError> {
    Ok(Json(
        service::find_all_tournaments(db.inner(), tour_years.as_deref()).await?,
    ))
}

#[openapi(tag = "Tournament")]
#[get("/tournaments/<date>")]
pub(crate) async fn get_tournament(
    date: String,
    db: &State<DatabaseConnection>,
) -> Result<Json<dto::Tournament>, GenericError> {
    Ok(Json(service::get_tournament(db.inner(), parse_date(&date)?).await?))
}

#[openapi(tag = "Round")]
#[get("/rounds?<date>&<username>")]
pub(crate) async fn get_rounds(
    date: Option<String>,
    username: Option<String>,
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<dto::Round>>, GenericError> {
    let date = parse_optional_date(date)?;
    Ok(Json(
        service::find_all_rounds(db.inner(), date, username.as_deref()).await?,
    ))
}

#[openapi(tag = "Round")]
#[get("/rounds/<id>")]
pub(crate) async fn get_round(id: i32, db: &State<DatabaseConnection>) -> Result<Json<dto::Round>, GenericError> {
    Ok(Json(service::get_round(db.inner(), id).await?))
}

#[openapi(tag = "Greenie")]
#[get("/greenies?<date>")]
pub(crate) async fn get_greenies(
    date: Option<String>,
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<dto::Greenie>>, GenericError> {
    let date = parse_optional_date(date)?;
    Ok(Json(service::find_all_greenies(db.inner(), date).await?))
}

#[openapi(tag = "Greenie")]
#[get("/greenies/<id>")]
pub(crate) async fn get_greenie(id: i32, db: &State<DatabaseConnection>) -> Result<Json<dto::Greenie>, GenericError> {
    Ok(Json(service::get_greenie(db.inner(), id).await?))
}

/// # Season standings
///
/// Every points column summed per player over the tournaments of one tour
/// season, highest total first.
#[openapi(tag = "Points")]
#[get("/points/standings?<tour_years>")]
pub(crate) async fn get_standings(
    tour_years: String,
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<dto::PlayerStanding>>, GenericError> {
    Ok(Json(points::get_yearly_standings(db.inner(), &tour_years).await?))
}

#[openapi(tag = "Points")]
#[get("/points/tournament/<date>")]
pub(crate) async fn get_tournament_points(
    date: String,
    db: &State<DatabaseConnection>,
) -> Result<Json<Vec<dto::RoundStanding>>, GenericError> {
    Ok(Json(
        points::get_tournament_standings(db.inner(), parse_date(&date)?).await?,
    ))
}
