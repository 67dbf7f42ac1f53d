mod authenticate;
mod mutation;
mod query;
mod utils;

#[macro_use]
extern crate rocket;

use authenticate::*;
use dotenvy::dotenv;
use mutation::*;
use query::*;
use rocket::fs::FileServer;
use rocket::{Build, Rocket, Route};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::rapidoc::{make_rapidoc, GeneralConfig, HideShowConfig, RapiDocConfig};
use rocket_okapi::settings::UrlObject;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

#[catch(404)]
fn general_not_found() -> &'static str {
    "Api endpoint not found"
}

pub fn routes() -> Vec<Route> {
    openapi_get_routes![
        create_user,
        login,
        logout,
        check_cookie,
        get_users,
        get_user,
        set_admin,
        get_courses,
        get_course,
        create_course,
        update_course,
        remove_course,
        get_tournaments,
        get_tournament,
        create_tournament,
        update_tournament,
        remove_tournament,
        get_rounds,
        get_round,
        create_round,
        update_round,
        remove_round,
        get_greenies,
        get_greenie,
        create_greenie,
        update_greenie,
        remove_greenie,
        get_standings,
        get_tournament_points,
        recompute_points,
    ]
}

/// Mounts the api, its documentation and, when `FRONTEND_PATH` is set, the
/// static frontend.
pub fn build(db: DatabaseConnection) -> Rocket<Build> {
    let rocket = rocket::build()
        .manage(db)
        .mount("/api", routes())
        .mount(
            "/api/swagger",
            make_swagger_ui(&SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .mount(
            "/api/",
            make_rapidoc(&RapiDocConfig {
                general: GeneralConfig {
                    spec_urls: vec![UrlObject::new("General", "./openapi.json")],
                    ..Default::default()
                },
                hide_show: HideShowConfig {
                    allow_spec_url_load: false,
                    allow_spec_file_load: false,
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
        .register("/api", catchers![general_not_found]);

    match std::env::var("FRONTEND_PATH") {
        Ok(path) => rocket.mount("/", FileServer::from(path)),
        Err(_) => rocket,
    }
}

pub async fn launch() -> Result<Rocket<Build>, DbErr> {
    dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")
        .map_err(|_| DbErr::Custom("DATABASE_URL not set".to_string()))?;
    let mut opt = ConnectOptions::new(db_url);
    opt.sqlx_logging_level(log::LevelFilter::Debug);
    let db = Database::connect(opt).await?;
    log::info!("Connected to database");

    Ok(build(db))
}
