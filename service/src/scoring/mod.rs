//! Pure scoring computations. Nothing in here touches the database; callers
//! fetch the history, pars and greenies they need and pass them in.

pub mod classifier;
pub mod handicap;
pub mod proximity;

use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const HOLE_COUNT: usize = 18;

/// Strokes and putts recorded for a single hole. `None` means the hole was
/// not played or not scored yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HoleEntry {
    pub strokes: Option<i32>,
    pub putts: Option<i32>,
}

impl HoleEntry {
    pub fn is_scored(&self) -> bool {
        self.strokes.is_some() && self.putts.is_some()
    }
}

/// A full scorecard, hole 1 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard([HoleEntry; HOLE_COUNT]);

impl Scorecard {
    pub fn new(holes: [HoleEntry; HOLE_COUNT]) -> Self {
        Self(holes)
    }

    /// Builds a card from separate strokes and putts columns. Both must hold
    /// exactly one value per hole.
    pub fn from_columns(strokes: &[Option<i32>], putts: &[Option<i32>]) -> Option<Self> {
        if strokes.len() != HOLE_COUNT || putts.len() != HOLE_COUNT {
            return None;
        }
        let mut holes = [HoleEntry::default(); HOLE_COUNT];
        for (i, hole) in holes.iter_mut().enumerate() {
            hole.strokes = strokes[i];
            hole.putts = putts[i];
        }
        Some(Self(holes))
    }

    pub fn holes(&self) -> &[HoleEntry; HOLE_COUNT] {
        &self.0
    }

    pub fn strokes(&self) -> Vec<Option<i32>> {
        self.0.iter().map(|h| h.strokes).collect()
    }

    pub fn putts(&self) -> Vec<Option<i32>> {
        self.0.iter().map(|h| h.putts).collect()
    }

    pub fn total_strokes(&self) -> i32 {
        saturating_total(self.0.iter().filter_map(|h| h.strokes))
    }

    pub fn total_putts(&self) -> i32 {
        saturating_total(self.0.iter().filter_map(|h| h.putts))
    }

    /// A round is complete once every hole has both strokes and putts.
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(HoleEntry::is_scored)
    }
}

fn saturating_total(values: impl Iterator<Item = i32>) -> i32 {
    values.fold(0, i32::saturating_add)
}

/// Divides and rounds half up, toward positive infinity, without leaving
/// integer arithmetic. `5 / 2` gives `3` and `-5 / 2` gives `-2`.
pub fn div_half_up(numerator: i64, denominator: i64) -> i64 {
    let (numerator, denominator) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

/// Scales a value to a whole number of `10^-decimals` units.
pub fn to_units(value: f64, decimals: u32) -> i64 {
    (value * 10f64.powi(decimals as i32)).round() as i64
}

pub fn from_units(units: i64, decimals: u32) -> f64 {
    units as f64 / 10f64.powi(decimals as i32)
}
