use bcrypt::{hash, verify, DEFAULT_COST};
use entity::prelude::*;
use entity::*;
use log::{error, info};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rocket::http::{Cookie, CookieJar};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{IntoActiveModel, PaginatorTrait, TransactionTrait};

use crate::dto::{self, CreateUser, UserLogin};
use crate::error::{AuthError, GenericError};
use crate::query::get_user_by_name;

pub const AUTH_COOKIE: &str = "auth";
const TOKEN_LENGTH: usize = 48;

/// bcrypt cost, overridable through `BCRYPT_COST`.
fn password_cost() -> u32 {
    std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(DEFAULT_COST)
}

/// Checks a password against the stored bcrypt hash. Unknown users and
/// malformed hashes simply fail.
pub async fn authenticate(db: &impl ConnectionTrait, username: &str, password: &str) -> Result<bool, DbErr> {
    let user = match get_user_by_name(db, username).await? {
        Some(user) => user,
        None => return Ok(false),
    };
    match UserAuthentication::find_by_id(user.id).one(db).await? {
        Some(user_auth) => Ok(verify(password, &user_auth.hashed_password).unwrap_or(false)),
        None => Ok(false),
    }
}

pub async fn generate_cookie(
    db: &impl ConnectionTrait,
    user_id: i32,
    cookies: &CookieJar<'_>,
) -> Result<(), DbErr> {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    user_cookies::ActiveModel {
        cookie: Set(token.clone()),
        user_id: Set(user_id),
    }
    .insert(db)
    .await?;
    cookies.add_private(Cookie::new(AUTH_COOKIE, token));
    Ok(())
}

pub async fn user_from_cookie(db: &impl ConnectionTrait, cookie: &str) -> Result<Option<user::Model>, DbErr> {
    match UserCookies::find_by_id(cookie.to_string()).one(db).await? {
        Some(cookie) => User::find_by_id(cookie.user_id).one(db).await,
        None => Ok(None),
    }
}

pub async fn remove_cookie(db: &impl ConnectionTrait, cookie: &str, cookies: &CookieJar<'_>) -> Result<(), DbErr> {
    UserCookies::delete_by_id(cookie.to_string()).exec(db).await?;
    cookies.remove_private(Cookie::from(AUTH_COOKIE));
    Ok(())
}

/// Registers a player. The very first account of a fresh install is made an
/// admin so that someone can manage courses and tournaments.
pub async fn create_user(
    db: &DatabaseConnection,
    form: CreateUser,
    cookies: &CookieJar<'_>,
) -> Result<dto::User, GenericError> {
    form.validate()?;
    let txn = db.begin().await?;
    if get_user_by_name(&txn, form.username.trim()).await?.is_some() {
        return Err(GenericError::BadRequest("Username already taken"));
    }
    let first_user = User::find().count(&txn).await? == 0;
    let user = form.active_user(first_user).insert(&txn).await?;

    let hashed_password = hash(&form.password, password_cost()).map_err(|e| {
        error!("Unable to hash password: {:#?}", e);
        GenericError::UnknownError("Unable to hash password")
    })?;
    user_authentication::ActiveModel {
        user_id: Set(user.id),
        hashed_password: Set(hashed_password),
    }
    .insert(&txn)
    .await?;
    generate_cookie(&txn, user.id, cookies).await?;
    txn.commit().await?;

    if first_user {
        info!("Created {} as the first admin", user.username);
    }
    Ok(user.into())
}

pub async fn login(
    db: &DatabaseConnection,
    login_data: UserLogin,
    cookies: &CookieJar<'_>,
) -> Result<(), GenericError> {
    let generic_error_response = "Wrong username or password";
    let authenticated = authenticate(db, &login_data.username, &login_data.password).await?;
    if !authenticated {
        return Err(AuthError::WrongPassword(generic_error_response).into());
    }
    match get_user_by_name(db, &login_data.username).await? {
        Some(user) => Ok(generate_cookie(db, user.id, cookies).await?),
        None => Err(AuthError::WrongPassword(generic_error_response).into()),
    }
}

pub async fn set_admin(
    db: &impl ConnectionTrait,
    username: &str,
    is_admin: bool,
) -> Result<dto::User, GenericError> {
    let user = get_user_by_name(db, username)
        .await?
        .ok_or(GenericError::NotFound("Player not found"))?;
    let mut user = user.into_active_model();
    user.is_admin = Set(is_admin);
    Ok(user.update(db).await?.into())
}
