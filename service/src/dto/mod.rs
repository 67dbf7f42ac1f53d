mod forms;

pub use forms::*;

use chrono::NaiveDate;
use entity::{course, greenie, points, tournament, user};
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::scoring::proximity;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Course {
    pub handle: String,
    pub name: String,
    pub rating: f64,
    pub slope: i32,
    pub par_total: i32,
    pub pars: Vec<i32>,
    pub handicaps: Vec<i32>,
}

impl Course {
    /// `holes` must already be sorted by hole number.
    pub(crate) fn from_models(course: course::Model, holes: &[entity::course_hole::Model]) -> Self {
        Self {
            handle: course.handle,
            name: course.name,
            rating: course.rating,
            slope: course.slope,
            par_total: course.par_total,
            pars: holes.iter().map(|h| h.par).collect(),
            handicaps: holes.iter().map(|h| h.handicap).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Tournament {
    pub id: i32,
    pub date: NaiveDate,
    pub course_handle: String,
    pub tour_years: String,
}

impl From<tournament::Model> for Tournament {
    fn from(model: tournament::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            course_handle: model.course_handle,
            tour_years: model.tour_years,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            is_admin: model.is_admin,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct Greenie {
    pub id: i32,
    pub round_id: i32,
    pub hole_number: i32,
    pub feet: i32,
    pub inches: i32,
    pub points: i32,
}

impl From<greenie::Model> for Greenie {
    fn from(model: greenie::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            hole_number: model.hole_number,
            feet: model.feet,
            inches: model.inches,
            points: proximity::tier_points(f64::from(model.feet)),
        }
    }
}

/// One points row, or the sum of several.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub participation: i32,
    pub strokes: i32,
    pub putts: i32,
    pub pars: i32,
    pub birdies: i32,
    pub eagles: i32,
    pub aces: i32,
    pub greenies: i32,
    pub total: i32,
}

impl From<&points::Model> for PointsBreakdown {
    fn from(model: &points::Model) -> Self {
        Self {
            participation: model.participation,
            strokes: model.strokes,
            putts: model.putts,
            pars: model.pars,
            birdies: model.birdies,
            eagles: model.eagles,
            aces: model.aces,
            greenies: model.greenies,
            total: model.total(),
        }
    }
}

impl std::ops::AddAssign for PointsBreakdown {
    fn add_assign(&mut self, other: Self) {
        self.participation += other.participation;
        self.strokes += other.strokes;
        self.putts += other.putts;
        self.pars += other.pars;
        self.birdies += other.birdies;
        self.eagles += other.eagles;
        self.aces += other.aces;
        self.greenies += other.greenies;
        self.total += other.total;
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Round {
    pub id: i32,
    pub date: NaiveDate,
    pub username: String,
    pub strokes: Vec<Option<i32>>,
    pub putts: Vec<Option<i32>>,
    pub total_strokes: i32,
    pub total_putts: i32,
    pub score_differential: Option<f64>,
    pub player_index: f64,
    pub course_handicap: i32,
    pub net_strokes: Option<i32>,
    pub points: Option<PointsBreakdown>,
    pub greenies: Vec<Greenie>,
}

/// A player's season line in the yearly standings.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct PlayerStanding {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub rounds: i32,
    pub points: PointsBreakdown,
}

/// One round's line in a tournament leaderboard.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct RoundStanding {
    pub round_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub points: PointsBreakdown,
}
