//! The points ledger. Every round owns exactly one points row, created when
//! the round is stored and then kept current column by column:
//!
//! * `pars`/`birdies`/`eagles`/`aces` follow the scorecard ([`update_scores`]),
//! * `greenies` follows the round's greenies ([`update_greenies`]),
//! * `strokes`/`putts` are placement bonuses that depend on every round of
//!   the tournament ([`update_strokes_positions`], [`update_putts_positions`]).
//!
//! Callers run these inside the same transaction as the write that
//! triggered them.

use std::collections::HashMap;

use chrono::NaiveDate;
use entity::prelude::*;
use entity::*;
use itertools::Itertools;
use log::{info, warn};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{IntoActiveModel, QueryOrder, TransactionTrait};

use crate::dto::{PlayerStanding, RoundStanding};
use crate::error::GenericError;
use crate::query;
use crate::scoring::classifier::{self, ScoringBonus};
use crate::scoring::proximity;
use crate::standings;

pub const PARTICIPATION_POINTS: i32 = 3;
pub const STROKES_PLACEMENT_POINTS: [i32; 5] = [25, 20, 15, 10, 5];
pub const PUTTS_PLACEMENT_POINTS: [i32; 3] = [6, 4, 2];

async fn scoring_bonus(db: &impl ConnectionTrait, round: &round::Model) -> Result<ScoringBonus, GenericError> {
    let tournament = query::tournament_model(db, round.tournament_id).await?;
    let pars = query::course_pars(db, &tournament.course_handle).await?;
    let card = query::round_scorecard(db, round.id).await?;
    Ok(classifier::classify(&card.strokes(), &pars).bonus())
}

async fn points_row(db: &impl ConnectionTrait, round_id: i32) -> Result<points::Model, GenericError> {
    Points::find_by_id(round_id)
        .one(db)
        .await?
        .ok_or(GenericError::NotFound("Points not found for round"))
}

/// Seeds the points row of a freshly stored round. Placement and greenie
/// columns start at zero and are filled in by their own triggers.
pub async fn create(db: &impl ConnectionTrait, round: &round::Model) -> Result<points::Model, GenericError> {
    if Points::find_by_id(round.id).one(db).await?.is_some() {
        return Err(GenericError::BadRequest("Points already exist for this round"));
    }
    let bonus = scoring_bonus(db, round).await?;

    Ok(points::ActiveModel {
        round_id: Set(round.id),
        participation: Set(PARTICIPATION_POINTS),
        strokes: Set(0),
        putts: Set(0),
        pars: Set(bonus.pars),
        birdies: Set(bonus.birdies),
        eagles: Set(bonus.eagles),
        aces: Set(bonus.aces),
        greenies: Set(0),
    }
    .insert(db)
    .await?)
}

/// Recomputes the scoring bonus columns from the stored scorecard.
pub async fn update_scores(db: &impl ConnectionTrait, round: &round::Model) -> Result<points::Model, GenericError> {
    let bonus = scoring_bonus(db, round).await?;
    let mut row = points_row(db, round.id).await?.into_active_model();
    row.pars = Set(bonus.pars);
    row.birdies = Set(bonus.birdies);
    row.eagles = Set(bonus.eagles);
    row.aces = Set(bonus.aces);
    Ok(row.update(db).await?)
}

/// Overwrites the greenie column with the sum of tier points over every
/// greenie currently stored for the round.
pub async fn update_greenies(db: &impl ConnectionTrait, round_id: i32) -> Result<points::Model, GenericError> {
    let total = proximity::total_points(
        Greenie::find()
            .filter(greenie::Column::RoundId.eq(round_id))
            .all(db)
            .await?
            .iter()
            .map(|g| g.feet),
    );
    let mut row = points_row(db, round_id).await?.into_active_model();
    row.greenies = Set(total);
    Ok(row.update(db).await?)
}

/// Deletes a greenie and recomputes its round's aggregate from what is left.
pub async fn remove_greenie(db: &impl ConnectionTrait, greenie_id: i32) -> Result<points::Model, GenericError> {
    let greenie = query::greenie_model(db, greenie_id).await?;
    let round_id = greenie.round_id;
    greenie.delete(db).await?;
    update_greenies(db, round_id).await
}

fn award(ranked: impl IntoIterator<Item = i32>, table: &[i32]) -> Vec<(i32, i32)> {
    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, round_id)| (round_id, table.get(rank).copied().unwrap_or(0)))
        .collect()
}

/// `(round id, points)` for the stroke placement bonus. Every round of the
/// tournament is ranked by net strokes, then gross strokes, then id, with
/// rounds that have no net score after all the others. Points go strictly by
/// position.
pub fn strokes_placements(rounds: &[round::Model]) -> Vec<(i32, i32)> {
    let ranked = rounds
        .iter()
        .sorted_by_key(|r| (r.net_strokes.is_none(), r.net_strokes, r.total_strokes, r.id))
        .map(|r| r.id);
    award(ranked, &STROKES_PLACEMENT_POINTS)
}

/// `(round id, points)` for the putting bonus. Every round is ranked by total
/// putts, then id.
pub fn putts_placements(rounds: &[round::Model]) -> Vec<(i32, i32)> {
    let ranked = rounds
        .iter()
        .sorted_by_key(|r| (r.total_putts, r.id))
        .map(|r| r.id);
    award(ranked, &PUTTS_PLACEMENT_POINTS)
}

async fn write_column(
    db: &impl ConnectionTrait,
    column: points::Column,
    placements: Vec<(i32, i32)>,
) -> Result<(), GenericError> {
    for (round_id, value) in placements {
        let res = Points::update_many()
            .col_expr(column, Expr::value(value))
            .filter(points::Column::RoundId.eq(round_id))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            warn!("Round {} has no points row, skipping placement", round_id);
        }
    }
    Ok(())
}

pub(crate) async fn update_positions(
    db: &impl ConnectionTrait,
    tournament: &tournament::Model,
) -> Result<(), GenericError> {
    let rounds = query::rounds_in_tournament(db, tournament.id).await?;
    write_column(db, points::Column::Strokes, strokes_placements(&rounds)).await?;
    write_column(db, points::Column::Putts, putts_placements(&rounds)).await
}

/// Full overwrite of the strokes column for every round of the tournament.
pub async fn update_strokes_positions(db: &impl ConnectionTrait, date: NaiveDate) -> Result<(), GenericError> {
    let tournament = query::tournament_by_date(db, date).await?;
    let rounds = query::rounds_in_tournament(db, tournament.id).await?;
    write_column(db, points::Column::Strokes, strokes_placements(&rounds)).await
}

/// Full overwrite of the putts column for every round of the tournament.
pub async fn update_putts_positions(db: &impl ConnectionTrait, date: NaiveDate) -> Result<(), GenericError> {
    let tournament = query::tournament_by_date(db, date).await?;
    let rounds = query::rounds_in_tournament(db, tournament.id).await?;
    write_column(db, points::Column::Putts, putts_placements(&rounds)).await
}

pub async fn update_all_greenies(db: &impl ConnectionTrait) -> Result<(), GenericError> {
    let rounds = Round::find().order_by_asc(round::Column::Id).all(db).await?;
    for round in &rounds {
        update_greenies(db, round.id).await?;
    }
    info!("Recomputed greenie points for {} rounds", rounds.len());
    Ok(())
}

/// Re-derives bonus and placement columns for every tournament from the
/// stored hole data. A round that lost its points row gets a fresh one.
pub async fn update_all_scores(db: &impl ConnectionTrait) -> Result<(), GenericError> {
    let tournaments = Tournament::find()
        .order_by_asc(tournament::Column::Date)
        .all(db)
        .await?;
    for tournament in &tournaments {
        for round in query::rounds_in_tournament(db, tournament.id).await? {
            if Points::find_by_id(round.id).one(db).await?.is_none() {
                warn!("Round {} had no points row, creating it", round.id);
                create(db, &round).await?;
            } else {
                update_scores(db, &round).await?;
            }
        }
        update_positions(db, tournament).await?;
    }
    info!("Recomputed scores for {} tournaments", tournaments.len());
    Ok(())
}

/// The administrative "recompute all", in one transaction.
pub async fn recompute_all(db: &DatabaseConnection) -> Result<(), GenericError> {
    let txn = db.begin().await?;
    update_all_scores(&txn).await?;
    update_all_greenies(&txn).await?;
    txn.commit().await?;
    Ok(())
}

async fn player_lookup(db: &impl ConnectionTrait) -> Result<HashMap<i32, user::Model>, DbErr> {
    Ok(User::find()
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect())
}

fn attach_players(
    rows: Vec<(round::Model, Option<points::Model>)>,
    players: &HashMap<i32, user::Model>,
) -> Vec<(i32, user::Model, points::Model)> {
    rows.into_iter()
        .filter_map(|(round, points)| match (points, players.get(&round.user_id)) {
            (Some(points), Some(player)) => Some((round.id, player.clone(), points)),
            _ => {
                warn!("Round {} is missing its points row or player", round.id);
                None
            }
        })
        .collect()
}

pub async fn get_yearly_standings(
    db: &impl ConnectionTrait,
    tour_years: &str,
) -> Result<Vec<PlayerStanding>, GenericError> {
    let tournament_ids = Tournament::find()
        .filter(tournament::Column::TourYears.eq(tour_years))
        .all(db)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect::<Vec<_>>();
    if tournament_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = Round::find()
        .filter(round::Column::TournamentId.is_in(tournament_ids))
        .find_also_related(Points)
        .all(db)
        .await?;
    let players = player_lookup(db).await?;

    Ok(standings::yearly(
        attach_players(rows, &players)
            .into_iter()
            .map(|(_, player, points)| (player, points)),
    ))
}

pub async fn get_tournament_standings(
    db: &impl ConnectionTrait,
    date: NaiveDate,
) -> Result<Vec<RoundStanding>, GenericError> {
    let tournament = query::tournament_by_date(db, date).await?;
    let rows = Round::find()
        .filter(round::Column::TournamentId.eq(tournament.id))
        .find_also_related(Points)
        .all(db)
        .await?;
    let players = player_lookup(db).await?;

    Ok(standings::tournament(attach_players(rows, &players)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(id: i32, total_strokes: i32, total_putts: i32, net_strokes: Option<i32>) -> round::Model {
        round::Model {
            id,
            tournament_id: 1,
            user_id: id,
            total_strokes,
            total_putts,
            score_differential: net_strokes.map(|_| 0.0),
            player_index: 0.0,
            course_handicap: 0,
            net_strokes,
        }
    }

    fn points_for(placements: Vec<(i32, i32)>, id: i32) -> i32 {
        placements
            .into_iter()
            .find(|(round_id, _)| *round_id == id)
            .map(|(_, p)| p)
            .unwrap()
    }

    #[test]
    fn three_round_tournament() {
        let rounds = vec![
            round(1, 75, 30, Some(75)),
            round(2, 81, 30, Some(81)),
            round(3, 69, 30, Some(69)),
        ];
        let placements = strokes_placements(&rounds);
        assert_eq!(points_for(placements.clone(), 3), 25);
        assert_eq!(points_for(placements.clone(), 1), 20);
        assert_eq!(points_for(placements, 2), 15);
    }

    #[test]
    fn net_ties_are_broken_by_gross() {
        let rounds = vec![round(1, 80, 30, Some(70)), round(2, 76, 30, Some(70))];
        let placements = strokes_placements(&rounds);
        assert_eq!(points_for(placements.clone(), 2), 25);
        assert_eq!(points_for(placements, 1), 20);
    }

    #[test]
    fn only_top_five_score() {
        let mut rounds = (1..=7)
            .map(|i| round(i, 70 + i, 30, Some(70 + i)))
            .collect::<Vec<_>>();
        rounds.push(round(8, 40, 10, None));
        let placements = strokes_placements(&rounds);
        assert_eq!(placements.len(), 8);
        let awarded = (1..=8)
            .map(|id| points_for(placements.clone(), id))
            .collect::<Vec<_>>();
        assert_eq!(awarded, vec![25, 20, 15, 10, 5, 0, 0, 0]);
    }

    #[test]
    fn putting_placements() {
        let rounds = vec![
            round(1, 80, 31, Some(80)),
            round(2, 80, 28, Some(80)),
            round(3, 80, 35, Some(80)),
            round(4, 80, 29, Some(80)),
            round(5, 60, 12, None),
        ];
        let placements = putts_placements(&rounds);
        let awarded = (1..=5)
            .map(|id| points_for(placements.clone(), id))
            .collect::<Vec<_>>();
        assert_eq!(awarded, vec![0, 4, 0, 2, 6]);
    }

    #[test]
    fn incomplete_rounds_rank_after_net_scores_but_still_place() {
        let rounds = vec![
            round(1, 90, 36, Some(78)),
            round(2, 45, 17, None),
            round(3, 84, 33, Some(80)),
        ];
        let strokes = strokes_placements(&rounds);
        assert_eq!(points_for(strokes.clone(), 1), 25);
        assert_eq!(points_for(strokes.clone(), 3), 20);
        assert_eq!(points_for(strokes, 2), 15);

        let putts = putts_placements(&rounds);
        assert_eq!(points_for(putts.clone(), 2), 6);
        assert_eq!(points_for(putts.clone(), 3), 4);
        assert_eq!(points_for(putts, 1), 2);
    }

    #[test]
    fn placements_are_stable_across_runs() {
        let rounds = vec![
            round(4, 72, 30, Some(70)),
            round(2, 72, 30, Some(70)),
            round(9, 75, 29, Some(71)),
        ];
        assert_eq!(strokes_placements(&rounds), strokes_placements(&rounds));
        assert_eq!(points_for(strokes_placements(&rounds), 2), 25);
        assert_eq!(points_for(strokes_placements(&rounds), 4), 20);
    }
}
