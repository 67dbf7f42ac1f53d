use std::collections::HashSet;

use chrono::NaiveDate;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use sea_orm::ActiveValue::Set;
use sea_orm::NotSet;
use serde::{Deserialize, Serialize};

use crate::error::GenericError;
use crate::scoring::{Scorecard, HOLE_COUNT};
use entity::{course, course_hole, greenie, tournament, user};

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl CreateUser {
    pub(crate) fn active_user(&self, is_admin: bool) -> user::ActiveModel {
        user::ActiveModel {
            id: NotSet,
            username: Set(self.username.trim().to_string()),
            first_name: Set(self.first_name.clone()),
            last_name: Set(self.last_name.clone()),
            email: Set(self.email.clone()),
            is_admin: Set(is_admin),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), GenericError> {
        if self.username.trim().is_empty() {
            return Err(GenericError::BadRequest("Username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(GenericError::BadRequest("Password cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct SetAdmin {
    pub is_admin: bool,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct CreateCourse {
    pub handle: String,
    pub name: String,
    pub rating: f64,
    pub slope: i32,
    pub pars: Vec<i32>,
    pub handicaps: Vec<i32>,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Default)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub slope: Option<i32>,
    pub pars: Option<Vec<i32>>,
    pub handicaps: Option<Vec<i32>>,
}

fn validate_pars(pars: &[i32]) -> Result<(), GenericError> {
    if pars.len() != HOLE_COUNT {
        return Err(GenericError::BadRequest("A course needs a par for each of the 18 holes"));
    }
    if pars.iter().any(|p| *p < 1) {
        return Err(GenericError::BadRequest("Par must be at least 1"));
    }
    Ok(())
}

/// Stroke allocation has to be a permutation of 1..=18.
fn validate_handicaps(handicaps: &[i32]) -> Result<(), GenericError> {
    let unique: HashSet<i32> = handicaps.iter().copied().collect();
    if handicaps.len() != HOLE_COUNT
        || unique.len() != HOLE_COUNT
        || !unique.iter().all(|h| (1..=HOLE_COUNT as i32).contains(h))
    {
        return Err(GenericError::BadRequest(
            "Hole handicaps must use each of 1 to 18 exactly once",
        ));
    }
    Ok(())
}

fn validate_difficulty(rating: Option<f64>, slope: Option<i32>) -> Result<(), GenericError> {
    if rating.is_some_and(|r| !r.is_finite() || r <= 0.0) {
        return Err(GenericError::BadRequest("Course rating must be positive"));
    }
    if slope.is_some_and(|s| s <= 0) {
        return Err(GenericError::BadRequest("Course slope must be positive"));
    }
    Ok(())
}

pub(crate) fn hole_models(
    handle: &str,
    pars: &[i32],
    handicaps: &[i32],
) -> Vec<course_hole::ActiveModel> {
    pars.iter()
        .zip(handicaps)
        .enumerate()
        .map(|(i, (par, handicap))| course_hole::ActiveModel {
            course_handle: Set(handle.to_string()),
            hole_number: Set(i as i32 + 1),
            par: Set(*par),
            handicap: Set(*handicap),
        })
        .collect()
}

impl CreateCourse {
    pub(crate) fn validate(&self) -> Result<(), GenericError> {
        if self.handle.trim().is_empty() {
            return Err(GenericError::BadRequest("Course handle cannot be empty"));
        }
        validate_difficulty(Some(self.rating), Some(self.slope))?;
        validate_pars(&self.pars)?;
        validate_handicaps(&self.handicaps)
    }

    pub(crate) fn active_course(&self) -> course::ActiveModel {
        course::ActiveModel {
            handle: Set(self.handle.trim().to_string()),
            name: Set(self.name.clone()),
            rating: Set(self.rating),
            slope: Set(self.slope),
            par_total: Set(self.pars.iter().sum()),
        }
    }

    pub(crate) fn active_holes(&self) -> Vec<course_hole::ActiveModel> {
        hole_models(self.handle.trim(), &self.pars, &self.handicaps)
    }
}

impl UpdateCourse {
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.rating.is_none()
            && self.slope.is_none()
            && self.pars.is_none()
            && self.handicaps.is_none()
    }

    pub(crate) fn validate(&self) -> Result<(), GenericError> {
        if self.is_empty() {
            return Err(GenericError::BadRequest("Nothing to update"));
        }
        validate_difficulty(self.rating, self.slope)?;
        if let Some(pars) = &self.pars {
            validate_pars(pars)?;
        }
        if let Some(handicaps) = &self.handicaps {
            validate_handicaps(handicaps)?;
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct CreateTournament {
    pub date: NaiveDate,
    pub course_handle: String,
    pub tour_years: String,
}

impl CreateTournament {
    pub(crate) fn active_model(&self) -> tournament::ActiveModel {
        tournament::ActiveModel {
            id: NotSet,
            date: Set(self.date),
            course_handle: Set(self.course_handle.clone()),
            tour_years: Set(self.tour_years.clone()),
        }
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Default)]
pub struct UpdateTournament {
    pub course_handle: Option<String>,
    pub tour_years: Option<String>,
}

impl UpdateTournament {
    pub(crate) fn is_empty(&self) -> bool {
        self.course_handle.is_none() && self.tour_years.is_none()
    }
}

/// `strokes` and `putts` hold one entry per hole, hole 1 first. `null`
/// marks a hole that has not been scored.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct CreateRound {
    pub date: NaiveDate,
    pub username: String,
    pub strokes: Vec<Option<i32>>,
    pub putts: Vec<Option<i32>>,
}

/// Largest strokes or putts value accepted for a single hole.
pub const MAX_HOLE_VALUE: i32 = 99;

fn validate_column(values: &[Option<i32>], what: &'static str) -> Result<(), GenericError> {
    if values.len() != HOLE_COUNT {
        return Err(GenericError::BadRequest(what));
    }
    if values.iter().flatten().any(|v| !(0..=MAX_HOLE_VALUE).contains(v)) {
        return Err(GenericError::BadRequest("Hole values must be between 0 and 99"));
    }
    Ok(())
}

impl CreateRound {
    pub(crate) fn scorecard(&self) -> Result<Scorecard, GenericError> {
        validate_column(&self.strokes, "Strokes must have one entry per hole")?;
        validate_column(&self.putts, "Putts must have one entry per hole")?;
        Scorecard::from_columns(&self.strokes, &self.putts)
            .ok_or(GenericError::BadRequest("Invalid scorecard"))
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Default)]
pub struct UpdateRound {
    pub strokes: Option<Vec<Option<i32>>>,
    pub putts: Option<Vec<Option<i32>>>,
}

impl UpdateRound {
    /// Replaces whichever columns were sent and keeps the rest of `current`.
    pub(crate) fn merge(&self, current: &Scorecard) -> Result<Scorecard, GenericError> {
        if self.strokes.is_none() && self.putts.is_none() {
            return Err(GenericError::BadRequest("Nothing to update"));
        }
        let strokes = match &self.strokes {
            Some(strokes) => {
                validate_column(strokes, "Strokes must have one entry per hole")?;
                strokes.clone()
            }
            None => current.strokes(),
        };
        let putts = match &self.putts {
            Some(putts) => {
                validate_column(putts, "Putts must have one entry per hole")?;
                putts.clone()
            }
            None => current.putts(),
        };
        Scorecard::from_columns(&strokes, &putts).ok_or(GenericError::BadRequest("Invalid scorecard"))
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct CreateGreenie {
    pub round_id: i32,
    pub hole_number: i32,
    pub feet: i32,
    pub inches: i32,
}

fn validate_distance(feet: Option<i32>, inches: Option<i32>) -> Result<(), GenericError> {
    if feet.is_some_and(|f| f < 0) {
        return Err(GenericError::BadRequest("Feet cannot be negative"));
    }
    if inches.is_some_and(|i| !(0..12).contains(&i)) {
        return Err(GenericError::BadRequest("Inches must be between 0 and 11"));
    }
    Ok(())
}

impl CreateGreenie {
    pub(crate) fn validate(&self) -> Result<(), GenericError> {
        if !(1..=HOLE_COUNT as i32).contains(&self.hole_number) {
            return Err(GenericError::BadRequest("Hole number must be between 1 and 18"));
        }
        validate_distance(Some(self.feet), Some(self.inches))
    }

    pub(crate) fn active_model(&self) -> greenie::ActiveModel {
        greenie::ActiveModel {
            id: NotSet,
            round_id: Set(self.round_id),
            hole_number: Set(self.hole_number),
            feet: Set(self.feet),
            inches: Set(self.inches),
        }
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Default)]
pub struct UpdateGreenie {
    pub feet: Option<i32>,
    pub inches: Option<i32>,
}

impl UpdateGreenie {
    pub(crate) fn validate(&self) -> Result<(), GenericError> {
        if self.feet.is_none() && self.inches.is_none() {
            return Err(GenericError::BadRequest("Nothing to update"));
        }
        validate_distance(self.feet, self.inches)
    }
}
