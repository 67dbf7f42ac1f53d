//! Score differential, rolling player index and course handicap.
//!
//! The player index is a simplified handicap: the mean of the two lowest
//! differentials among the player's most recent rounds. It is always
//! computed from an explicitly fetched, date-ordered history so that there is
//! no per-player state to go stale.

use super::{div_half_up, from_units, to_units, Scorecard};

/// Slope of a course of standard difficulty.
pub const STANDARD_SLOPE: i64 = 113;
/// How many prior differentials feed the player index.
pub const HISTORY_WINDOW: u64 = 4;
const LOWEST_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseDifficulty {
    pub rating: f64,
    pub slope: i32,
}

impl From<&entity::course::Model> for CourseDifficulty {
    fn from(course: &entity::course::Model) -> Self {
        Self {
            rating: course.rating,
            slope: course.slope,
        }
    }
}

/// Everything derived from a scorecard when a round is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStats {
    pub total_strokes: i32,
    pub total_putts: i32,
    pub score_differential: Option<f64>,
    pub player_index: f64,
    pub course_handicap: i32,
    pub net_strokes: Option<i32>,
}

/// `(113 / slope) * (strokes - rating)` to one decimal. Ratings are read to
/// two decimals and the rest is exact integer arithmetic, so ties round half
/// up like every other rounded statistic.
pub fn score_differential(total_strokes: i32, course: CourseDifficulty) -> f64 {
    let over_rating = i64::from(total_strokes) * 100 - to_units(course.rating, 2);
    let tenths = div_half_up(STANDARD_SLOPE * over_rating, 10 * i64::from(course.slope));
    from_units(tenths, 1)
}

/// `history` holds the player's prior differentials, most recent first. Only
/// the first [`HISTORY_WINDOW`] entries are considered.
///
/// With no history at all the index is seeded with a single zero, so a
/// player's first index is always 0 whatever they shot. With one to three
/// prior rounds the current differential joins the pool; with a full window
/// it does not.
pub fn player_index(history: &[f64], current: Option<f64>) -> f64 {
    let mut pool: Vec<f64> = history
        .iter()
        .copied()
        .take(HISTORY_WINDOW as usize)
        .collect();
    if pool.is_empty() {
        pool.push(0.0);
    } else if pool.len() < HISTORY_WINDOW as usize {
        pool.extend(current);
    }
    // stored differentials carry one decimal, so tenths are exact
    let mut tenths: Vec<i64> = pool.into_iter().map(|d| to_units(d, 1)).collect();
    tenths.sort_unstable();
    let lowest = &tenths[..tenths.len().min(LOWEST_COUNT)];
    let mean = div_half_up(lowest.iter().sum(), lowest.len() as i64);
    from_units(mean, 1)
}

pub fn course_handicap(player_index: f64, course: CourseDifficulty) -> i32 {
    let scaled = to_units(player_index, 1) * i64::from(course.slope);
    div_half_up(scaled, 10 * STANDARD_SLOPE) as i32
}

/// Derives the stored statistics of a round. Incomplete cards get no
/// differential and no net score, but still carry an index and a course
/// handicap computed from history alone.
pub fn compute(card: &Scorecard, history: &[f64], course: CourseDifficulty) -> RoundStats {
    let total_strokes = card.total_strokes();
    let total_putts = card.total_putts();
    let differential = card
        .is_complete()
        .then(|| score_differential(total_strokes, course));
    let index = player_index(history, differential);
    let handicap = course_handicap(index, course);

    RoundStats {
        total_strokes,
        total_putts,
        score_differential: differential,
        player_index: index,
        course_handicap: handicap,
        net_strokes: differential.map(|_| total_strokes - handicap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{HoleEntry, HOLE_COUNT};

    const OAKS: CourseDifficulty = CourseDifficulty {
        rating: 77.7,
        slope: 111,
    };
    const NEUTRAL: CourseDifficulty = CourseDifficulty {
        rating: 72.0,
        slope: 113,
    };

    fn even_card(strokes: i32, putts: i32) -> Scorecard {
        Scorecard::new(
            [HoleEntry {
                strokes: Some(strokes),
                putts: Some(putts),
            }; HOLE_COUNT],
        )
    }

    #[test]
    fn first_round_scenario() {
        let stats = compute(&even_card(4, 1), &[], OAKS);
        assert_eq!(stats.total_strokes, 72);
        assert_eq!(stats.total_putts, 18);
        assert_eq!(stats.score_differential, Some(-5.8));
        assert_eq!(stats.player_index, 0.0);
        assert_eq!(stats.course_handicap, 0);
        assert_eq!(stats.net_strokes, Some(72));
    }

    #[test]
    fn differential_is_slope_adjusted() {
        assert_eq!(score_differential(90, NEUTRAL), 18.0);
        // (113 / 130) * (85 - 70.5) = 12.603...
        let hilly = CourseDifficulty {
            rating: 70.5,
            slope: 130,
        };
        assert_eq!(score_differential(85, hilly), 12.6);
    }

    #[test]
    fn short_history_includes_current_round() {
        // pool is [10.0, 20.0, 4.0] -> lowest two are 4 and 10
        assert_eq!(player_index(&[10.0, 20.0], Some(4.0)), 7.0);
        assert_eq!(player_index(&[10.0], Some(20.0)), 15.0);
    }

    #[test]
    fn full_history_ignores_current_round() {
        assert_eq!(player_index(&[10.0, 12.0, 14.0, 16.0], Some(-3.0)), 11.0);
    }

    #[test]
    fn only_window_of_history_counts() {
        assert_eq!(player_index(&[10.0, 12.0, 14.0, 16.0, 1.0, 1.0], None), 11.0);
    }

    #[test]
    fn empty_history_seeds_zero_even_with_current_round() {
        assert_eq!(player_index(&[], Some(25.0)), 0.0);
        assert_eq!(player_index(&[], None), 0.0);
    }

    #[test]
    fn index_means_round_half_up_in_tenths() {
        // 0.1 + 4.6 is not 4.7 in binary floating point
        assert_eq!(player_index(&[0.1, 4.6], None), 2.4);
        assert_eq!(player_index(&[4.6, 0.1, 9.9, 12.0], Some(-1.0)), 2.4);
        assert_eq!(player_index(&[-0.1, -0.2], None), -0.1);
        assert_eq!(player_index(&[-3.1, -0.2], None), -1.6);
        assert_eq!(player_index(&[1.2, 1.3], None), 1.3);
    }

    #[test]
    fn differential_ties_round_half_up() {
        // (113 / 113) * (72 - 71.95) = 0.05
        let tight = CourseDifficulty {
            rating: 71.95,
            slope: 113,
        };
        assert_eq!(score_differential(72, tight), 0.1);
        // (113 / 113) * (72 - 72.05) = -0.05
        let loose = CourseDifficulty {
            rating: 72.05,
            slope: 113,
        };
        assert_eq!(score_differential(72, loose), 0.0);
        assert_eq!(score_differential(73, NEUTRAL), 1.0);
    }

    #[test]
    fn single_value_is_its_own_index() {
        assert_eq!(player_index(&[8.3], None), 8.3);
    }

    #[test]
    fn incomplete_round_uses_history_only() {
        let mut holes = [HoleEntry {
            strokes: Some(5),
            putts: Some(2),
        }; HOLE_COUNT];
        holes[17].putts = None;
        let card = Scorecard::new(holes);

        let stats = compute(&card, &[10.0, 20.0], NEUTRAL);
        assert_eq!(stats.total_strokes, 90);
        assert_eq!(stats.total_putts, 34);
        assert_eq!(stats.score_differential, None);
        assert_eq!(stats.net_strokes, None);
        assert_eq!(stats.player_index, 15.0);
        assert_eq!(stats.course_handicap, 15);
    }

    #[test]
    fn course_handicap_rounds_half_up() {
        assert_eq!(course_handicap(2.5, NEUTRAL), 3);
        assert_eq!(course_handicap(-2.5, NEUTRAL), -2);
        assert_eq!(course_handicap(2.4, NEUTRAL), 2);
        assert_eq!(course_handicap(0.5, NEUTRAL), 1);
        assert_eq!(course_handicap(-0.5, NEUTRAL), 0);
        // 11.3 * 130 / 113 = 13.0
        let steep = CourseDifficulty {
            rating: 70.0,
            slope: 130,
        };
        assert_eq!(course_handicap(11.3, steep), 13);
        // 10.0 * 130 / 113 = 11.50...
        let hilly = CourseDifficulty {
            rating: 70.0,
            slope: 130,
        };
        assert_eq!(course_handicap(10.0, hilly), 12);
    }

    #[test]
    fn net_strokes_subtract_course_handicap() {
        let stats = compute(&even_card(5, 2), &[18.0, 16.0, 30.0], NEUTRAL);
        assert_eq!(stats.score_differential, Some(18.0));
        // pool [18, 16, 30, 18] -> 16 and 18
        assert_eq!(stats.player_index, 17.0);
        assert_eq!(stats.course_handicap, 17);
        assert_eq!(stats.net_strokes, Some(73));
    }
}
