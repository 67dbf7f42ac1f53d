use chrono::NaiveDate;
use entity::prelude::*;
use entity::*;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};

use crate::dto;
use crate::error::GenericError;
use crate::scoring::handicap::HISTORY_WINDOW;
use crate::scoring::{Scorecard, HOLE_COUNT};

pub async fn get_user_by_name(
    db: &impl ConnectionTrait,
    username: &str,
) -> Result<Option<user::Model>, DbErr> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
}

pub(crate) async fn user_by_name(
    db: &impl ConnectionTrait,
    username: &str,
) -> Result<user::Model, GenericError> {
    get_user_by_name(db, username)
        .await?
        .ok_or(GenericError::NotFound("Player not found"))
}

pub async fn find_all_users(db: &impl ConnectionTrait) -> Result<Vec<dto::User>, GenericError> {
    Ok(User::find()
        .order_by_asc(user::Column::Username)
        .all(db)
        .await?
        .into_iter()
        .map(dto::User::from)
        .collect())
}

pub async fn get_user(db: &impl ConnectionTrait, username: &str) -> Result<dto::User, GenericError> {
    user_by_name(db, username).await.map(dto::User::from)
}

pub(crate) async fn course_model(
    db: &impl ConnectionTrait,
    handle: &str,
) -> Result<course::Model, GenericError> {
    Course::find_by_id(handle.to_string())
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Course not found"))
}

pub(crate) async fn course_holes(
    db: &impl ConnectionTrait,
    handle: &str,
) -> Result<Vec<course_hole::Model>, DbErr> {
    CourseHole::find()
        .filter(course_hole::Column::CourseHandle.eq(handle))
        .order_by_asc(course_hole::Column::HoleNumber)
        .all(db)
        .await
}

/// Pars of a course, hole 1 first.
pub async fn course_pars(db: &impl ConnectionTrait, handle: &str) -> Result<Vec<i32>, GenericError> {
    let pars = course_holes(db, handle)
        .await?
        .iter()
        .map(|h| h.par)
        .collect::<Vec<_>>();
    if pars.len() != HOLE_COUNT {
        return Err(GenericError::NotFound("Course pars not found"));
    }
    Ok(pars)
}

pub async fn find_all_courses(db: &impl ConnectionTrait) -> Result<Vec<dto::Course>, GenericError> {
    let courses = Course::find()
        .order_by_asc(course::Column::Handle)
        .all(db)
        .await?;
    let mut out = Vec::new();
    for course in courses {
        let holes = course_holes(db, &course.handle).await?;
        out.push(dto::Course::from_models(course, &holes));
    }
    Ok(out)
}

pub async fn get_course(db: &impl ConnectionTrait, handle: &str) -> Result<dto::Course, GenericError> {
    let course = course_model(db, handle).await?;
    let holes = course_holes(db, handle).await?;
    Ok(dto::Course::from_models(course, &holes))
}

pub async fn tournament_by_date(
    db: &impl ConnectionTrait,
    date: NaiveDate,
) -> Result<tournament::Model, GenericError> {
    Tournament::find()
        .filter(tournament::Column::Date.eq(date))
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("No tournament on that date"))
}

pub(crate) async fn tournament_model(
    db: &impl ConnectionTrait,
    id: i32,
) -> Result<tournament::Model, GenericError> {
    Tournament::find_by_id(id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Tournament not found"))
}

pub async fn course_for_tournament(
    db: &impl ConnectionTrait,
    tournament: &tournament::Model,
) -> Result<course::Model, GenericError> {
    course_model(db, &tournament.course_handle).await
}

/// Most recent first.
pub async fn find_all_tournaments(
    db: &impl ConnectionTrait,
    tour_years: Option<&str>,
) -> Result<Vec<dto::Tournament>, GenericError> {
    let mut select = Tournament::find();
    if let Some(tour_years) = tour_years {
        select = select.filter(tournament::Column::TourYears.eq(tour_years));
    }
    Ok(select
        .order_by_desc(tournament::Column::Date)
        .all(db)
        .await?
        .into_iter()
        .map(dto::Tournament::from)
        .collect())
}

pub async fn get_tournament(
    db: &impl ConnectionTrait,
    date: NaiveDate,
) -> Result<dto::Tournament, GenericError> {
    tournament_by_date(db, date).await.map(dto::Tournament::from)
}

pub(crate) async fn round_model(db: &impl ConnectionTrait, id: i32) -> Result<round::Model, GenericError> {
    Round::find_by_id(id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Round not found"))
}

pub(crate) async fn round_for_player(
    db: &impl ConnectionTrait,
    user_id: i32,
    tournament_id: i32,
) -> Result<Option<round::Model>, DbErr> {
    Round::find()
        .filter(
            round::Column::UserId
                .eq(user_id)
                .and(round::Column::TournamentId.eq(tournament_id)),
        )
        .one(db)
        .await
}

pub(crate) async fn rounds_in_tournament(
    db: &impl ConnectionTrait,
    tournament_id: i32,
) -> Result<Vec<round::Model>, DbErr> {
    Round::find()
        .filter(round::Column::TournamentId.eq(tournament_id))
        .order_by_asc(round::Column::Id)
        .all(db)
        .await
}

/// Rebuilds the scorecard from the stored hole rows. Missing rows read as
/// unscored holes.
pub async fn round_scorecard(db: &impl ConnectionTrait, round_id: i32) -> Result<Scorecard, GenericError> {
    let holes = HoleScore::find()
        .filter(hole_score::Column::RoundId.eq(round_id))
        .all(db)
        .await?;
    let mut strokes = vec![None; HOLE_COUNT];
    let mut putts = vec![None; HOLE_COUNT];
    for hole in holes {
        match usize::try_from(hole.hole_number - 1) {
            Ok(i) if i < HOLE_COUNT => {
                strokes[i] = hole.strokes;
                putts[i] = hole.putts;
            }
            _ => log::warn!(
                "Ignoring hole {} stored for round {}",
                hole.hole_number,
                round_id
            ),
        }
    }
    Scorecard::from_columns(&strokes, &putts).ok_or(GenericError::UnknownError("Invalid stored scorecard"))
}

/// Score differentials of the player's rounds played before `date`, most
/// recent first, at most one history window long. `exclude` leaves out the
/// round being edited.
pub async fn prior_differentials(
    db: &impl ConnectionTrait,
    user_id: i32,
    date: NaiveDate,
    exclude: Option<i32>,
) -> Result<Vec<f64>, DbErr> {
    let mut select = Round::find()
        .inner_join(Tournament)
        .filter(round::Column::UserId.eq(user_id))
        .filter(round::Column::ScoreDifferential.is_not_null())
        .filter(tournament::Column::Date.lt(date));
    if let Some(round_id) = exclude {
        select = select.filter(round::Column::Id.ne(round_id));
    }
    Ok(select
        .order_by_desc(tournament::Column::Date)
        .limit(HISTORY_WINDOW)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|r| r.score_differential)
        .collect())
}

async fn round_detail(db: &impl ConnectionTrait, round: round::Model) -> Result<dto::Round, GenericError> {
    let tournament = tournament_model(db, round.tournament_id).await?;
    let player = User::find_by_id(round.user_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Player not found"))?;
    let card = round_scorecard(db, round.id).await?;
    let points = Points::find_by_id(round.id).one(db).await?;
    let greenies = Greenie::find()
        .filter(greenie::Column::RoundId.eq(round.id))
        .order_by_asc(greenie::Column::HoleNumber)
        .all(db)
        .await?;

    Ok(dto::Round {
        id: round.id,
        date: tournament.date,
        username: player.username,
        strokes: card.strokes(),
        putts: card.putts(),
        total_strokes: round.total_strokes,
        total_putts: round.total_putts,
        score_differential: round.score_differential,
        player_index: round.player_index,
        course_handicap: round.course_handicap,
        net_strokes: round.net_strokes,
        points: points.as_ref().map(dto::PointsBreakdown::from),
        greenies: greenies.into_iter().map(dto::Greenie::from).collect(),
    })
}

pub async fn find_all_rounds(
    db: &impl ConnectionTrait,
    date: Option<NaiveDate>,
    username: Option<&str>,
) -> Result<Vec<dto::Round>, GenericError> {
    let mut select = Round::find().inner_join(Tournament).inner_join(User);
    if let Some(date) = date {
        select = select.filter(tournament::Column::Date.eq(date));
    }
    if let Some(username) = username {
        select = select.filter(user::Column::Username.eq(username));
    }
    let rounds = select
        .order_by_desc(tournament::Column::Date)
        .order_by_asc(round::Column::Id)
        .all(db)
        .await?;

    let mut out = Vec::new();
    for round in rounds {
        out.push(round_detail(db, round).await?);
    }
    Ok(out)
}

pub async fn get_round(db: &impl ConnectionTrait, id: i32) -> Result<dto::Round, GenericError> {
    let round = round_model(db, id).await?;
    round_detail(db, round).await
}

pub(crate) async fn greenie_model(db: &impl ConnectionTrait, id: i32) -> Result<greenie::Model, GenericError> {
    Greenie::find_by_id(id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Greenie not found"))
}

pub async fn find_all_greenies(
    db: &impl ConnectionTrait,
    date: Option<NaiveDate>,
) -> Result<Vec<dto::Greenie>, GenericError> {
    let greenies = match date {
        Some(date) => {
            let tournament = tournament_by_date(db, date).await?;
            let round_ids = rounds_in_tournament(db, tournament.id)
                .await?
                .into_iter()
                .map(|r| r.id)
                .collect::<Vec<_>>();
            if round_ids.is_empty() {
                return Ok(Vec::new());
            }
            Greenie::find()
                .filter(greenie::Column::RoundId.is_in(round_ids))
                .order_by_asc(greenie::Column::RoundId)
                .order_by_asc(greenie::Column::HoleNumber)
                .all(db)
                .await?
        }
        None => {
            Greenie::find()
                .order_by_asc(greenie::Column::Id)
                .all(db)
                .await?
        }
    };
    Ok(greenies.into_iter().map(dto::Greenie::from).collect())
}

pub async fn get_greenie(db: &impl ConnectionTrait, id: i32) -> Result<dto::Greenie, GenericError> {
    greenie_model(db, id).await.map(dto::Greenie::from)
}
