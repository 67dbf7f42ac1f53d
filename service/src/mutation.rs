use entity::prelude::*;
use entity::*;
use log::{debug, info};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{IntoActiveModel, NotSet, PaginatorTrait, TransactionTrait};

use crate::dto;
use crate::error::GenericError;
use crate::points;
use crate::query;
use crate::scoring::handicap::{self, CourseDifficulty, RoundStats};
use crate::scoring::Scorecard;

/// Rounds and greenies belong to a player; only that player or an admin may
/// touch them.
fn ensure_can_edit(actor: &user::Model, owner_id: i32) -> Result<(), GenericError> {
    if actor.is_admin || actor.id == owner_id {
        Ok(())
    } else {
        Err(GenericError::Forbidden("You can only edit your own scores"))
    }
}

pub async fn create_course(db: &DatabaseConnection, form: dto::CreateCourse) -> Result<dto::Course, GenericError> {
    form.validate()?;
    let txn = db.begin().await?;
    if Course::find_by_id(form.handle.trim().to_string())
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(GenericError::BadRequest("A course with that handle already exists"));
    }
    let course = form.active_course().insert(&txn).await?;
    for hole in form.active_holes() {
        hole.insert(&txn).await?;
    }
    let out = query::get_course(&txn, &course.handle).await?;
    txn.commit().await?;
    info!("Created course {}", out.handle);
    Ok(out)
}

/// Stored round statistics are kept as computed when the round was written.
/// Changing the pars re-derives the scoring bonus of every round played on
/// the course.
pub async fn update_course(
    db: &DatabaseConnection,
    handle: &str,
    form: dto::UpdateCourse,
) -> Result<dto::Course, GenericError> {
    form.validate()?;
    let txn = db.begin().await?;
    let course = query::course_model(&txn, handle).await?;
    let holes = query::course_holes(&txn, handle).await?;

    let pars = form
        .pars
        .clone()
        .unwrap_or_else(|| holes.iter().map(|h| h.par).collect());
    let handicaps = form
        .handicaps
        .clone()
        .unwrap_or_else(|| holes.iter().map(|h| h.handicap).collect());
    let pars_changed = form.pars.is_some();

    let mut active = course.into_active_model();
    if let Some(name) = form.name {
        active.name = Set(name);
    }
    if let Some(rating) = form.rating {
        active.rating = Set(rating);
    }
    if let Some(slope) = form.slope {
        active.slope = Set(slope);
    }
    active.par_total = Set(pars.iter().sum());
    active.update(&txn).await?;

    if form.pars.is_some() || form.handicaps.is_some() {
        CourseHole::delete_many()
            .filter(course_hole::Column::CourseHandle.eq(handle))
            .exec(&txn)
            .await?;
        for hole in dto::hole_models(handle, &pars, &handicaps) {
            hole.insert(&txn).await?;
        }
    }

    if pars_changed {
        let tournaments = Tournament::find()
            .filter(tournament::Column::CourseHandle.eq(handle))
            .all(&txn)
            .await?;
        for tournament in &tournaments {
            for round in query::rounds_in_tournament(&txn, tournament.id).await? {
                points::update_scores(&txn, &round).await?;
            }
        }
    }

    let out = query::get_course(&txn, handle).await?;
    txn.commit().await?;
    Ok(out)
}

pub async fn remove_course(db: &DatabaseConnection, handle: &str) -> Result<(), GenericError> {
    let txn = db.begin().await?;
    let course = query::course_model(&txn, handle).await?;
    let in_use = Tournament::find()
        .filter(tournament::Column::CourseHandle.eq(handle))
        .count(&txn)
        .await?;
    if in_use > 0 {
        return Err(GenericError::BadRequest("Course is used by a tournament"));
    }
    CourseHole::delete_many()
        .filter(course_hole::Column::CourseHandle.eq(handle))
        .exec(&txn)
        .await?;
    course.delete(&txn).await?;
    txn.commit().await?;
    info!("Removed course {}", handle);
    Ok(())
}

pub async fn create_tournament(
    db: &DatabaseConnection,
    form: dto::CreateTournament,
) -> Result<dto::Tournament, GenericError> {
    let txn = db.begin().await?;
    if Tournament::find()
        .filter(tournament::Column::Date.eq(form.date))
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(GenericError::BadRequest("A tournament is already scheduled on that date"));
    }
    query::course_model(&txn, &form.course_handle).await?;
    let tournament = form.active_model().insert(&txn).await?;
    txn.commit().await?;
    info!("Created tournament on {}", tournament.date);
    Ok(tournament.into())
}

pub async fn update_tournament(
    db: &DatabaseConnection,
    date: chrono::NaiveDate,
    form: dto::UpdateTournament,
) -> Result<dto::Tournament, GenericError> {
    if form.is_empty() {
        return Err(GenericError::BadRequest("Nothing to update"));
    }
    let txn = db.begin().await?;
    let tournament = query::tournament_by_date(&txn, date).await?;
    let mut active = tournament.clone().into_active_model();

    if let Some(course_handle) = form.course_handle {
        if course_handle != tournament.course_handle {
            if !query::rounds_in_tournament(&txn, tournament.id).await?.is_empty() {
                return Err(GenericError::BadRequest(
                    "Cannot change the course of a tournament that has rounds",
                ));
            }
            query::course_model(&txn, &course_handle).await?;
        }
        active.course_handle = Set(course_handle);
    }
    if let Some(tour_years) = form.tour_years {
        active.tour_years = Set(tour_years);
    }
    let tournament = active.update(&txn).await?;
    txn.commit().await?;
    Ok(tournament.into())
}

pub async fn remove_tournament(db: &DatabaseConnection, date: chrono::NaiveDate) -> Result<(), GenericError> {
    let txn = db.begin().await?;
    let tournament = query::tournament_by_date(&txn, date).await?;
    if !query::rounds_in_tournament(&txn, tournament.id).await?.is_empty() {
        return Err(GenericError::BadRequest("Tournament still has rounds"));
    }
    tournament.delete(&txn).await?;
    txn.commit().await?;
    info!("Removed tournament on {}", date);
    Ok(())
}

fn round_active_model(stats: &RoundStats) -> round::ActiveModel {
    round::ActiveModel {
        id: NotSet,
        tournament_id: NotSet,
        user_id: NotSet,
        total_strokes: Set(stats.total_strokes),
        total_putts: Set(stats.total_putts),
        score_differential: Set(stats.score_differential),
        player_index: Set(stats.player_index),
        course_handicap: Set(stats.course_handicap),
        net_strokes: Set(stats.net_strokes),
    }
}

async fn write_holes(db: &impl ConnectionTrait, round_id: i32, card: &Scorecard) -> Result<(), DbErr> {
    HoleScore::delete_many()
        .filter(hole_score::Column::RoundId.eq(round_id))
        .exec(db)
        .await?;
    let holes = card
        .holes()
        .iter()
        .enumerate()
        .map(|(i, hole)| hole_score::ActiveModel {
            round_id: Set(round_id),
            hole_number: Set(i as i32 + 1),
            strokes: Set(hole.strokes),
            putts: Set(hole.putts),
        });
    HoleScore::insert_many(holes).exec_without_returning(db).await?;
    Ok(())
}

/// Stores a round with its derived statistics, seeds its points row and
/// re-ranks the tournament.
pub async fn create_round(
    db: &DatabaseConnection,
    form: dto::CreateRound,
    actor: &user::Model,
) -> Result<dto::Round, GenericError> {
    let card = form.scorecard()?;
    let txn = db.begin().await?;
    let tournament = query::tournament_by_date(&txn, form.date).await?;
    let player = query::user_by_name(&txn, &form.username).await?;
    ensure_can_edit(actor, player.id)?;
    if query::round_for_player(&txn, player.id, tournament.id)
        .await?
        .is_some()
    {
        return Err(GenericError::BadRequest("Player already has a round in this tournament"));
    }
    let course = query::course_for_tournament(&txn, &tournament).await?;
    let history = query::prior_differentials(&txn, player.id, tournament.date, None).await?;
    let stats = handicap::compute(&card, &history, CourseDifficulty::from(&course));
    debug!(
        "Round for {} on {}: history {:?}, stats {:?}",
        player.username, tournament.date, history, stats
    );

    let mut active = round_active_model(&stats);
    active.tournament_id = Set(tournament.id);
    active.user_id = Set(player.id);
    let round = active.insert(&txn).await?;
    write_holes(&txn, round.id, &card).await?;

    points::create(&txn, &round).await?;
    points::update_positions(&txn, &tournament).await?;

    let out = query::get_round(&txn, round.id).await?;
    txn.commit().await?;
    Ok(out)
}

/// Applies new strokes and/or putts. The edited round is left out of its own
/// history when the index is recomputed.
pub async fn update_round(
    db: &DatabaseConnection,
    id: i32,
    form: dto::UpdateRound,
    actor: &user::Model,
) -> Result<dto::Round, GenericError> {
    let txn = db.begin().await?;
    let round = query::round_model(&txn, id).await?;
    ensure_can_edit(actor, round.user_id)?;
    let current = query::round_scorecard(&txn, id).await?;
    let card = form.merge(&current)?;

    let tournament = query::tournament_model(&txn, round.tournament_id).await?;
    let course = query::course_for_tournament(&txn, &tournament).await?;
    let history = query::prior_differentials(&txn, round.user_id, tournament.date, Some(id)).await?;
    let stats = handicap::compute(&card, &history, CourseDifficulty::from(&course));

    let mut active = round_active_model(&stats);
    active.id = Set(round.id);
    active.tournament_id = Set(round.tournament_id);
    active.user_id = Set(round.user_id);
    let round = active.update(&txn).await?;
    write_holes(&txn, round.id, &card).await?;

    points::update_scores(&txn, &round).await?;
    points::update_positions(&txn, &tournament).await?;

    let out = query::get_round(&txn, round.id).await?;
    txn.commit().await?;
    Ok(out)
}

pub async fn remove_round(db: &DatabaseConnection, id: i32, actor: &user::Model) -> Result<(), GenericError> {
    let txn = db.begin().await?;
    let round = query::round_model(&txn, id).await?;
    ensure_can_edit(actor, round.user_id)?;
    let tournament = query::tournament_model(&txn, round.tournament_id).await?;

    Greenie::delete_many()
        .filter(greenie::Column::RoundId.eq(id))
        .exec(&txn)
        .await?;
    HoleScore::delete_many()
        .filter(hole_score::Column::RoundId.eq(id))
        .exec(&txn)
        .await?;
    Points::delete_by_id(id).exec(&txn).await?;
    round.delete(&txn).await?;

    points::update_positions(&txn, &tournament).await?;
    txn.commit().await?;
    info!("Removed round {}", id);
    Ok(())
}

pub async fn create_greenie(
    db: &DatabaseConnection,
    form: dto::CreateGreenie,
    actor: &user::Model,
) -> Result<dto::Greenie, GenericError> {
    form.validate()?;
    let txn = db.begin().await?;
    let round = query::round_model(&txn, form.round_id).await?;
    ensure_can_edit(actor, round.user_id)?;
    let duplicate = Greenie::find()
        .filter(greenie::Column::RoundId.eq(form.round_id))
        .filter(greenie::Column::HoleNumber.eq(form.hole_number))
        .one(&txn)
        .await?;
    if duplicate.is_some() {
        return Err(GenericError::BadRequest("Greenie already recorded for this hole"));
    }
    let greenie = form.active_model().insert(&txn).await?;
    points::update_greenies(&txn, round.id).await?;
    txn.commit().await?;
    Ok(greenie.into())
}

pub async fn update_greenie(
    db: &DatabaseConnection,
    id: i32,
    form: dto::UpdateGreenie,
    actor: &user::Model,
) -> Result<dto::Greenie, GenericError> {
    form.validate()?;
    let txn = db.begin().await?;
    let greenie = query::greenie_model(&txn, id).await?;
    let round = query::round_model(&txn, greenie.round_id).await?;
    ensure_can_edit(actor, round.user_id)?;

    let mut active = greenie.into_active_model();
    if let Some(feet) = form.feet {
        active.feet = Set(feet);
    }
    if let Some(inches) = form.inches {
        active.inches = Set(inches);
    }
    let greenie = active.update(&txn).await?;
    points::update_greenies(&txn, round.id).await?;
    txn.commit().await?;
    Ok(greenie.into())
}

pub async fn remove_greenie(db: &DatabaseConnection, id: i32, actor: &user::Model) -> Result<(), GenericError> {
    let txn = db.begin().await?;
    let greenie = query::greenie_model(&txn, id).await?;
    let round = query::round_model(&txn, greenie.round_id).await?;
    ensure_can_edit(actor, round.user_id)?;
    points::remove_greenie(&txn, id).await?;
    txn.commit().await?;
    Ok(())
}
