//! Read side reducers over the points ledger. Both boards order by total
//! points, highest first, and break ties by username so repeated reads come
//! back in the same order.

use std::cmp::Ordering;

use entity::{points, user};
use itertools::Itertools;

use crate::dto::{PlayerStanding, PointsBreakdown, RoundStanding};

fn by_total_then_name(a_total: i32, a_name: &str, b_total: i32, b_name: &str) -> Ordering {
    b_total.cmp(&a_total).then_with(|| a_name.cmp(b_name))
}

/// Sums every points column per player.
pub fn yearly(rows: impl IntoIterator<Item = (user::Model, points::Model)>) -> Vec<PlayerStanding> {
    rows.into_iter()
        .into_group_map_by(|(player, _)| player.id)
        .into_values()
        .filter_map(|rows| {
            let player = rows.first()?.0.clone();
            let mut total = PointsBreakdown::default();
            for (_, points) in &rows {
                total += PointsBreakdown::from(points);
            }
            Some(PlayerStanding {
                username: player.username,
                first_name: player.first_name,
                last_name: player.last_name,
                rounds: rows.len() as i32,
                points: total,
            })
        })
        .sorted_by(|a, b| by_total_then_name(a.points.total, &a.username, b.points.total, &b.username))
        .collect()
}

/// One line per round.
pub fn tournament(rows: impl IntoIterator<Item = (i32, user::Model, points::Model)>) -> Vec<RoundStanding> {
    rows.into_iter()
        .map(|(round_id, player, points)| RoundStanding {
            round_id,
            username: player.username,
            first_name: player.first_name,
            last_name: player.last_name,
            points: PointsBreakdown::from(&points),
        })
        .sorted_by(|a, b| by_total_then_name(a.points.total, &a.username, b.points.total, &b.username))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i32, username: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            first_name: username.to_uppercase(),
            last_name: "Tester".to_string(),
            email: format!("{username}@example.com"),
            is_admin: false,
        }
    }

    fn row(round_id: i32, strokes: i32, greenies: i32) -> points::Model {
        points::Model {
            round_id,
            participation: 3,
            strokes,
            putts: 0,
            pars: 10,
            birdies: 2,
            eagles: 0,
            aces: 0,
            greenies,
        }
    }

    #[test]
    fn yearly_sums_every_column_per_player() {
        let standings = yearly(vec![
            (player(1, "ann"), row(1, 25, 0)),
            (player(2, "bob"), row(2, 20, 3)),
            (player(1, "ann"), row(3, 0, 4)),
        ]);
        assert_eq!(standings.len(), 2);
        let ann = &standings[0];
        assert_eq!(ann.username, "ann");
        assert_eq!(ann.rounds, 2);
        assert_eq!(ann.points.participation, 6);
        assert_eq!(ann.points.strokes, 25);
        assert_eq!(ann.points.greenies, 4);
        assert_eq!(ann.points.total, 6 + 25 + 20 + 4 + 4);
        assert_eq!(standings[1].points.total, 3 + 20 + 10 + 2 + 3);
    }

    #[test]
    fn ties_fall_back_to_username() {
        let standings = tournament(vec![
            (7, player(3, "zed"), row(7, 10, 0)),
            (8, player(4, "amy"), row(8, 10, 0)),
            (9, player(5, "kim"), row(9, 25, 0)),
        ]);
        let order = standings
            .iter()
            .map(|s| s.username.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["kim", "amy", "zed"]);
        assert_eq!(standings[0].points.total, 3 + 25 + 10 + 2);
    }

    #[test]
    fn empty_ledger() {
        assert!(yearly(Vec::new()).is_empty());
        assert!(tournament(Vec::new()).is_empty());
    }
}
