use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use sea_orm::DatabaseConnection;

use service::dto;
use service::error::GenericError;
use service::{authentication, points};

use crate::authenticate::{AdminUser, UserAuthentication};
use crate::utils::parse_date;

/// # Create a user
///
/// The first user ever created becomes an admin. A session cookie is set on
/// success.
#[openapi(tag = "User")]
#[post("/create-user", format = "json", data = "<user>")]
pub(crate) async fn create_user(
    user: Json<dto::CreateUser>,
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
) -> Result<Json<dto::User>, GenericError> {
    Ok(Json(
        authentication::create_user(db.inner(), user.into_inner(), cookies).await?,
    ))
}

#[openapi(tag = "User")]
#[patch("/users/<username>/admin", format = "json", data = "<form>")]
pub(crate) async fn set_admin(
    username: String,
    form: Json<dto::SetAdmin>,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<dto::User>, GenericError> {
    Ok(Json(
        authentication::set_admin(db.inner(), &username, form.is_admin).await?,
    ))
}

#[openapi(tag = "Course")]
#[post("/courses", format = "json", data = "<course>")]
pub(crate) async fn create_course(
    course: Json<dto::CreateCourse>,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<dto::Course>, GenericError> {
    Ok(Json(service::create_course(db.inner(), course.into_inner()).await?))
}

#[openapi(tag = "Course")]
#[patch("/courses/<handle>", format = "json", data = "<course>")]
pub(crate) async fn update_course(
    handle: String,
    course: Json<dto::UpdateCourse>,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<dto::Course>, GenericError> {
    Ok(Json(
        service::update_course(db.inner(), &handle, course.into_inner()).await?,
    ))
}

#[openapi(tag = "Course")]
#[delete("/courses/<handle>")]
pub(crate) async fn remove_course(
    handle: String,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<&'static str, GenericError> {
    service::remove_course(db.inner(), &handle).await?;
    Ok("Course removed")
}

#[openapi(tag = "Tournament")]
#[post("/tournaments", format = "json", data = "<tournament>")]
pub(crate) async fn create_tournament(
    tournament: Json<dto::CreateTournament>,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<dto::Tournament>, GenericError> {
    Ok(Json(
        service::create_tournament(db.inner(), tournament.into_inner()).await?,
    ))
}

#[openapi(tag = "Tournament")]
#[patch("/tournaments/<date>", format = "json", data = "<tournament>")]
pub(crate) async fn update_tournament(
    date: String,
    tournament: Json<dto::UpdateTournament>,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<dto::Tournament>, GenericError> {
    let date = parse_date(&date)?;
    Ok(Json(
        service::update_tournament(db.inner(), date, tournament.into_inner()).await?,
    ))
}

#[openapi(tag = "Tournament")]
#[delete("/tournaments/<date>")]
pub(crate) async fn remove_tournament(
    date: String,
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<&'static str, GenericError> {
    service::remove_tournament(db.inner(), parse_date(&date)?).await?;
    Ok("Tournament removed")
}

/// # Submit a round
///
/// Stores the scorecard, derives the handicap statistics and updates the
/// points of every round in the tournament.
#[openapi(tag = "Round")]
#[post("/rounds", format = "json", data = "<round>")]
pub(crate) async fn create_round(
    round: Json<dto::CreateRound>,
    db: &State<DatabaseConnection>,
    user: UserAuthentication,
) -> Result<Json<dto::Round>, GenericError> {
    Ok(Json(
        service::create_round(db.inner(), round.into_inner(), user.user()).await?,
    ))
}

#[openapi(tag = "Round")]
#[patch("/rounds/<id>", format = "json", data = "<round>")]
pub(crate) async fn update_round(
    id: i32,
    round: Json<dto::UpdateRound>,
    db: &State<DatabaseConnection>,
    user: UserAuthentication,
) -> Result<Json<dto::Round>, GenericError> {
    Ok(Json(
        service::update_round(db.inner(), id, round.into_inner(), user.user()).await?,
    ))
}

#[openapi(tag = "Round")]
#[delete("/rounds/<id>")]
pub(crate) async fn remove_round(
    id: i32,
    db: &State<DatabaseConnection>,
    user: UserAuthentication,
) -> Result<&'static str, GenericError> {
    service::remove_round(db.inner(), id, user.user()).await?;
    Ok("Round removed")
}

#[openapi(tag = "Greenie")]
#[post("/greenies", format = "json", data = "<greenie>")]
pub(crate) async fn create_greenie(
    greenie: Json<dto::CreateGreenie>,
    db: &State<DatabaseConnection>,
    user: UserAuthentication,
) -> Result<Json<dto::Greenie>, GenericError> {
    Ok(Json(
        service::create_greenie(db.inner(), greenie.into_inner(), user.user()).await?,
    ))
}

#[openapi(tag = "Greenie")]
#[patch("/greenies/<id>", format = "json", data = "<greenie>")]
pub(crate) async fn update_greenie(
    id: i32,
    greenie: Json<dto::UpdateGreenie>,
    db: &State<DatabaseConnection>,
    user: UserAuthentication,
) -> Result<Json<dto::Greenie>, GenericError> {
    Ok(Json(
        service::update_greenie(db.inner(), id, greenie.into_inner(), user.user()).await?,
    ))
}

#[openapi(tag = "Greenie")]
#[delete("/greenies/<id>")]
pub(crate) async fn remove_greenie(
    id: i32,
    db: &State<DatabaseConnection>,
    user: UserAuthentication,
) -> Result<&'static str, GenericError> {
    service::remove_greenie(db.inner(), id, user.user()).await?;
    Ok("Greenie removed")
}

/// # Recompute all points
///
/// Re-derives every points row from the stored scorecards and greenies.
#[openapi(tag = "Points")]
#[post("/points/recompute")]
pub(crate) async fn recompute_points(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<&'static str, GenericError> {
    points::recompute_all(db.inner()).await?;
    Ok("Points recomputed")
}
