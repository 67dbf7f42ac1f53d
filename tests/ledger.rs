#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use entity::user;
    use migration::MigratorTrait;
    use sea_orm::ActiveValue::Set;
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, NotSet};
    use service::dto::{self, PointsBreakdown};
    use service::error::GenericError;
    use service::{authentication, points};

    async fn make_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.expect("Database must exist");
        migration::Migrator::fresh(&db).await.expect("Migration success");
        db
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    async fn add_player(db: &DatabaseConnection, username: &str, is_admin: bool) -> user::Model {
        user::ActiveModel {
            id: NotSet,
            username: Set(username.to_string()),
            first_name: Set(username.to_uppercase()),
            last_name: Set("Player".to_string()),
            email: Set(format!("{username}@example.com")),
            is_admin: Set(is_admin),
        }
        .insert(db)
        .await
        .unwrap()
    }

    async fn add_course(db: &DatabaseConnection, handle: &str, rating: f64, slope: i32) {
        service::create_course(
            db,
            dto::CreateCourse {
                handle: handle.to_string(),
                name: handle.to_uppercase(),
                rating,
                slope,
                pars: vec![4; 18],
                handicaps: (1..=18).collect(),
            },
        )
        .await
        .unwrap();
    }

    async fn add_tournament(db: &DatabaseConnection, day: u32, course: &str, tour_years: &str) {
        service::create_tournament(
            db,
            dto::CreateTournament {
                date: date(day),
                course_handle: course.to_string(),
                tour_years: tour_years.to_string(),
            },
        )
        .await
        .unwrap();
    }

    /// Eighteen holes adding up to `total`, starting from all fours.
    fn strokes_totalling(total: i32) -> Vec<Option<i32>> {
        let mut strokes = vec![4; 18];
        let mut diff = total - 72;
        let mut hole = 0;
        while diff != 0 {
            let step = diff.signum();
            strokes[hole % 18] += step;
            diff -= step;
            hole += 1;
        }
        strokes.into_iter().map(Some).collect()
    }

    async fn submit(
        db: &DatabaseConnection,
        day: u32,
        username: &str,
        strokes: Vec<Option<i32>>,
        putts: Vec<Option<i32>>,
        actor: &user::Model,
    ) -> Result<dto::Round, GenericError> {
        service::create_round(
            db,
            dto::CreateRound {
                date: date(day),
                username: username.to_string(),
                strokes,
                putts,
            },
            actor,
        )
        .await
    }

    async fn round_points(db: &DatabaseConnection, id: i32) -> PointsBreakdown {
        service::get_round(db, id).await.unwrap().points.unwrap()
    }

    #[tokio::test]
    async fn first_round_on_a_hard_course() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_course(&db, "oaks", 77.7, 111).await;
        add_tournament(&db, 4, "oaks", "2024").await;

        let round = submit(&db, 4, "admin", vec![Some(4); 18], vec![Some(1); 18], &admin)
            .await
            .unwrap();
        assert_eq!(round.total_strokes, 72);
        assert_eq!(round.total_putts, 18);
        assert_eq!(round.score_differential, Some(-5.8));
        assert_eq!(round.player_index, 0.0);
        assert_eq!(round.course_handicap, 0);
        assert_eq!(round.net_strokes, Some(72));

        let points = round.points.unwrap();
        assert_eq!(points.participation, 3);
        assert_eq!(points.pars, 18);
        assert_eq!(points.birdies, 0);
        assert_eq!(points.eagles, 0);
        assert_eq!(points.aces, 0);
        assert_eq!(points.greenies, 0);
    }

    #[tokio::test]
    async fn incomplete_rounds_have_no_differential_but_still_place() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_player(&db, "bob", false).await;
        add_course(&db, "flat", 72.0, 113).await;
        add_tournament(&db, 4, "flat", "2024").await;

        let mut strokes = vec![Some(3); 18];
        strokes[17] = None;
        let partial = submit(&db, 4, "bob", strokes, vec![Some(1); 18], &admin)
            .await
            .unwrap();
        assert_eq!(partial.total_strokes, 51);
        assert_eq!(partial.score_differential, None);
        assert_eq!(partial.net_strokes, None);
        assert_eq!(partial.player_index, 0.0);

        let full = submit(&db, 4, "admin", strokes_totalling(90), vec![Some(3); 18], &admin)
            .await
            .unwrap();
        let points = round_points(&db, partial.id).await;
        assert_eq!(points.strokes, 20);
        assert_eq!(points.putts, 6);
        assert_eq!(points.birdies, 17 * 2);

        let points = round_points(&db, full.id).await;
        assert_eq!(points.strokes, 25);
        assert_eq!(points.putts, 4);
    }

    #[tokio::test]
    async fn duplicate_and_missing_references() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_course(&db, "flat", 72.0, 113).await;
        add_tournament(&db, 4, "flat", "2024").await;

        submit(&db, 4, "admin", vec![Some(4); 18], vec![Some(2); 18], &admin)
            .await
            .unwrap();
        let again = submit(&db, 4, "admin", vec![Some(4); 18], vec![Some(2); 18], &admin).await;
        assert!(again.unwrap_err().is_bad_request());

        let no_tournament = submit(&db, 5, "admin", vec![Some(4); 18], vec![Some(2); 18], &admin).await;
        assert!(no_tournament.unwrap_err().is_not_found());

        let no_player = submit(&db, 4, "ghost", vec![Some(4); 18], vec![Some(2); 18], &admin).await;
        assert!(no_player.unwrap_err().is_not_found());

        let short_card = submit(&db, 4, "admin", vec![Some(4); 17], vec![Some(2); 18], &admin).await;
        assert!(short_card.unwrap_err().is_bad_request());
    }

    #[tokio::test]
    async fn players_only_edit_their_own_rounds() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        let bob = add_player(&db, "bob", false).await;
        add_course(&db, "flat", 72.0, 113).await;
        add_tournament(&db, 4, "flat", "2024").await;

        let res = submit(&db, 4, "admin", vec![Some(4); 18], vec![Some(2); 18], &bob).await;
        assert!(matches!(res, Err(GenericError::Forbidden(_))));

        let own = submit(&db, 4, "bob", vec![Some(4); 18], vec![Some(2); 18], &bob)
            .await
            .unwrap();
        let edit = service::update_round(
            &db,
            own.id,
            dto::UpdateRound {
                strokes: None,
                putts: Some(vec![Some(1); 18]),
            },
            &admin,
        )
        .await
        .unwrap();
        assert_eq!(edit.total_putts, 18);

        let theirs = submit(&db, 4, "admin", vec![Some(4); 18], vec![Some(2); 18], &admin)
            .await
            .unwrap();
        let greenie = dto::CreateGreenie {
            round_id: theirs.id,
            hole_number: 3,
            feet: 2,
            inches: 0,
        };
        let res = service::create_greenie(&db, greenie, &bob).await;
        assert_eq!(
            res.unwrap_err(),
            GenericError::Forbidden("You can only edit your own scores")
        );
    }

    #[tokio::test]
    async fn password_checks_fail_without_a_stored_hash() {
        let db = make_db().await;
        add_player(&db, "admin", true).await;

        let unknown = authentication::authenticate(&db, "ghost", "secret").await.unwrap();
        assert!(!unknown);
        let no_hash = authentication::authenticate(&db, "admin", "secret").await.unwrap();
        assert!(!no_hash);
    }

    #[tokio::test]
    async fn three_round_tournament_placements() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        for name in ["ann", "bea", "cal"] {
            add_player(&db, name, false).await;
        }
        add_course(&db, "flat", 72.0, 113).await;
        add_tournament(&db, 4, "flat", "2024").await;

        let ann = submit(&db, 4, "ann", strokes_totalling(75), vec![Some(2); 18], &admin)
            .await
            .unwrap();
        let bea = submit(&db, 4, "bea", strokes_totalling(81), vec![Some(1); 18], &admin)
            .await
            .unwrap();
        let cal = submit(&db, 4, "cal", strokes_totalling(69), vec![Some(3); 18], &admin)
            .await
            .unwrap();
        assert_eq!(cal.net_strokes, Some(69));

        assert_eq!(round_points(&db, cal.id).await.strokes, 25);
        assert_eq!(round_points(&db, ann.id).await.strokes, 20);
        assert_eq!(round_points(&db, bea.id).await.strokes, 15);

        assert_eq!(round_points(&db, bea.id).await.putts, 6);
        assert_eq!(round_points(&db, ann.id).await.putts, 4);
        assert_eq!(round_points(&db, cal.id).await.putts, 2);

        let before = points::get_tournament_standings(&db, date(4)).await.unwrap();
        points::update_strokes_positions(&db, date(4)).await.unwrap();
        points::update_strokes_positions(&db, date(4)).await.unwrap();
        points::update_putts_positions(&db, date(4)).await.unwrap();
        let after = points::get_tournament_standings(&db, date(4)).await.unwrap();
        assert_eq!(before, after);
        assert_eq!(after[0].username, "cal");

        service::remove_round(&db, cal.id, &admin).await.unwrap();
        assert_eq!(round_points(&db, ann.id).await.strokes, 25);
        assert_eq!(round_points(&db, bea.id).await.strokes, 20);
    }

    #[tokio::test]
    async fn index_follows_prior_rounds_by_date() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_course(&db, "flat", 72.0, 113).await;
        for day in [4, 11, 18] {
            add_tournament(&db, day, "flat", "2024").await;
        }

        let first = submit(&db, 4, "admin", strokes_totalling(80), vec![Some(2); 18], &admin)
            .await
            .unwrap();
        assert_eq!(first.score_differential, Some(8.0));
        assert_eq!(first.player_index, 0.0);

        let second = submit(&db, 11, "admin", strokes_totalling(76), vec![Some(2); 18], &admin)
            .await
            .unwrap();
        assert_eq!(second.player_index, 6.0);
        assert_eq!(second.course_handicap, 6);
        assert_eq!(second.net_strokes, Some(70));

        // A round entered late for an earlier date only sees what came before it.
        let edited = service::update_round(
            &db,
            first.id,
            dto::UpdateRound {
                strokes: Some(strokes_totalling(78)),
                putts: None,
            },
            &admin,
        )
        .await
        .unwrap();
        assert_eq!(edited.score_differential, Some(6.0));
        assert_eq!(edited.player_index, 0.0);

        let edited = service::update_round(
            &db,
            second.id,
            dto::UpdateRound {
                strokes: Some(strokes_totalling(74)),
                putts: None,
            },
            &admin,
        )
        .await
        .unwrap();
        assert_eq!(edited.score_differential, Some(2.0));
        assert_eq!(edited.player_index, 4.0);

        let third = submit(&db, 18, "admin", strokes_totalling(90), vec![Some(2); 18], &admin)
            .await
            .unwrap();
        assert_eq!(third.player_index, 4.0);
        assert_eq!(third.net_strokes, Some(86));
    }

    #[tokio::test]
    async fn index_uses_the_four_most_recent_earlier_rounds() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_course(&db, "flat", 72.0, 113).await;
        let season = [(1, 102), (4, 74), (8, 90), (11, 67), (15, 84), (18, 88)];
        for (day, _) in season {
            add_tournament(&db, day, "flat", "2024").await;
        }
        add_tournament(&db, 22, "flat", "2024").await;

        let mut ids = Vec::new();
        for (day, total) in season {
            let round = submit(&db, day, "admin", strokes_totalling(total), vec![Some(2); 18], &admin)
                .await
                .unwrap();
            assert_eq!(round.score_differential, Some(f64::from(total - 72)));
            ids.push(round.id);
        }

        // window is days 18, 15, 11 and 8: -5.0 and 12.0 are the lowest two
        let latest = submit(&db, 22, "admin", strokes_totalling(72), vec![Some(2); 18], &admin)
            .await
            .unwrap();
        assert_eq!(latest.player_index, 3.5);
        assert_eq!(latest.course_handicap, 4);
        assert_eq!(latest.net_strokes, Some(68));

        // the day 11 round sees days 8, 4 and 1 plus its new score, never its
        // old -5.0 or anything later
        let edited = service::update_round(
            &db,
            ids[3],
            dto::UpdateRound {
                strokes: Some(strokes_totalling(73)),
                putts: None,
            },
            &admin,
        )
        .await
        .unwrap();
        assert_eq!(edited.score_differential, Some(1.0));
        assert_eq!(edited.player_index, 1.5);
        assert_eq!(edited.course_handicap, 2);
        assert_eq!(edited.net_strokes, Some(71));
    }

    #[tokio::test]
    async fn greenie_aggregate_is_recomputed_on_every_change() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_course(&db, "flat", 72.0, 113).await;
        add_tournament(&db, 4, "flat", "2024").await;
        let round = submit(&db, 4, "admin", vec![Some(4); 18], vec![Some(2); 18], &admin)
            .await
            .unwrap();

        let greenie = |hole_number: i32, feet: i32| dto::CreateGreenie {
            round_id: round.id,
            hole_number,
            feet,
            inches: 6,
        };
        let closest = service::create_greenie(&db, greenie(3, 1), &admin).await.unwrap();
        assert_eq!(closest.points, 4);
        let far = service::create_greenie(&db, greenie(7, 11), &admin).await.unwrap();
        assert_eq!(far.points, 2);
        assert_eq!(round_points(&db, round.id).await.greenies, 6);

        let duplicate = service::create_greenie(&db, greenie(3, 30), &admin).await;
        assert!(duplicate.unwrap_err().is_bad_request());

        service::remove_greenie(&db, closest.id, &admin).await.unwrap();
        assert_eq!(round_points(&db, round.id).await.greenies, 2);

        let moved = service::update_greenie(
            &db,
            far.id,
            dto::UpdateGreenie {
                feet: Some(21),
                inches: None,
            },
            &admin,
        )
        .await
        .unwrap();
        assert_eq!(moved.points, 1);
        assert_eq!(round_points(&db, round.id).await.greenies, 1);

        let missing = service::remove_greenie(&db, closest.id, &admin).await;
        assert!(missing.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn recompute_all_restores_and_is_idempotent() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_player(&db, "bob", false).await;
        add_course(&db, "flat", 72.0, 113).await;
        add_tournament(&db, 4, "flat", "2024").await;
        add_tournament(&db, 11, "flat", "2024").await;

        let round = submit(&db, 4, "admin", strokes_totalling(70), vec![Some(2); 18], &admin)
            .await
            .unwrap();
        submit(&db, 4, "bob", strokes_totalling(77), vec![Some(2); 18], &admin)
            .await
            .unwrap();
        submit(&db, 11, "bob", strokes_totalling(73), vec![Some(1); 18], &admin)
            .await
            .unwrap();
        service::create_greenie(
            &db,
            dto::CreateGreenie {
                round_id: round.id,
                hole_number: 5,
                feet: 9,
                inches: 0,
            },
            &admin,
        )
        .await
        .unwrap();

        let expected = points::get_yearly_standings(&db, "2024").await.unwrap();
        assert_eq!(expected.len(), 2);
        assert_eq!(expected.iter().find(|s| s.username == "bob").unwrap().rounds, 2);

        let mut broken = entity::points::ActiveModel {
            round_id: Set(round.id),
            ..Default::default()
        };
        broken.pars = Set(0);
        broken.greenies = Set(0);
        broken.strokes = Set(0);
        broken.update(&db).await.unwrap();
        assert_ne!(points::get_yearly_standings(&db, "2024").await.unwrap(), expected);

        points::recompute_all(&db).await.unwrap();
        assert_eq!(points::get_yearly_standings(&db, "2024").await.unwrap(), expected);
        points::recompute_all(&db).await.unwrap();
        assert_eq!(points::get_yearly_standings(&db, "2024").await.unwrap(), expected);

        assert!(points::get_yearly_standings(&db, "1999").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tournaments_with_rounds_cannot_be_removed() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_course(&db, "flat", 72.0, 113).await;
        add_tournament(&db, 4, "flat", "2024").await;
        let round = submit(&db, 4, "admin", vec![Some(4); 18], vec![Some(2); 18], &admin)
            .await
            .unwrap();

        let res = service::remove_tournament(&db, date(4)).await;
        assert!(res.unwrap_err().is_bad_request());
        let res = service::remove_course(&db, "flat").await;
        assert!(res.unwrap_err().is_bad_request());

        service::remove_round(&db, round.id, &admin).await.unwrap();
        service::remove_tournament(&db, date(4)).await.unwrap();
        service::remove_course(&db, "flat").await.unwrap();
        assert!(service::find_all_courses(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn changing_pars_rescores_rounds() {
        let db = make_db().await;
        let admin = add_player(&db, "admin", true).await;
        add_course(&db, "flat", 72.0, 113).await;
        add_tournament(&db, 4, "flat", "2024").await;
        let round = submit(&db, 4, "admin", vec![Some(4); 18], vec![Some(2); 18], &admin)
            .await
            .unwrap();
        assert_eq!(round_points(&db, round.id).await.pars, 18);

        let mut pars = vec![4; 18];
        pars[0] = 5;
        let course = service::update_course(
            &db,
            "flat",
            dto::UpdateCourse {
                pars: Some(pars),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(course.par_total, 73);

        let points = round_points(&db, round.id).await;
        assert_eq!(points.pars, 17);
        assert_eq!(points.birdies, 2);
    }
}
