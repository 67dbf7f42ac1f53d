use entity::user;
use rocket::http::{CookieJar, Status};
use rocket::outcome::Outcome;
use rocket::serde::json::Json;
use rocket::{
    get, post,
    request::{self, FromRequest},
    Request, State,
};
use rocket_okapi::{openapi, request::OpenApiFromRequest};
use sea_orm::DatabaseConnection;

use service::authentication::{self, AUTH_COOKIE};
use service::dto;
use service::error::{AuthError, GenericError};

/// A request carrying a valid session cookie.
#[derive(OpenApiFromRequest, Debug)]
pub struct UserAuthentication {
    user: user::Model,
    token: String,
}

/// A logged in user with the admin flag set.
#[derive(OpenApiFromRequest, Debug)]
pub struct AdminUser(pub user::Model);

impl UserAuthentication {
    pub fn user(&self) -> &user::Model {
        &self.user
    }

    pub async fn remove_cookie(
        self,
        db: &DatabaseConnection,
        cookies: &CookieJar<'_>,
    ) -> Result<(), GenericError> {
        Ok(authentication::remove_cookie(db, &self.token, cookies).await?)
    }
}

#[rocket::async_trait]
impl<'a> FromRequest<'a> for UserAuthentication {
    type Error = GenericError;

    async fn from_request(request: &'a Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(db) = request.rocket().state::<DatabaseConnection>() else {
            return Outcome::Error((
                Status::InternalServerError,
                GenericError::UnknownError("Database not found"),
            ));
        };
        let Some(cookie) = request.cookies().get_private(AUTH_COOKIE) else {
            return Outcome::Error((Status::Unauthorized, AuthError::Missing("No cookie found").into()));
        };

        let token = cookie.value().to_string();
        match authentication::user_from_cookie(db, &token).await {
            Ok(Some(user)) => Outcome::Success(UserAuthentication { user, token }),
            Ok(None) => Outcome::Error((Status::Unauthorized, AuthError::Invalid("Cookie is invalid").into())),
            Err(e) => Outcome::Error((Status::InternalServerError, e.into())),
        }
    }
}

#[rocket::async_trait]
impl<'a> FromRequest<'a> for AdminUser {
    type Error = GenericError;

    async fn from_request(request: &'a Request<'_>) -> request::Outcome<Self, Self::Error> {
        match request.guard::<UserAuthentication>().await {
            Outcome::Success(auth) if auth.user.is_admin => Outcome::Success(AdminUser(auth.user)),
            Outcome::Success(_) => Outcome::Error((
                Status::Forbidden,
                AuthError::NotAdmin("Only admins can do this").into(),
            )),
            Outcome::Error(e) => Outcome::Error(e),
            Outcome::Forward(s) => Outcome::Forward(s),
        }
    }
}

#[openapi(tag = "User")]
#[get("/check-cookie")]
pub(crate) async fn check_cookie(user: UserAuthentication) -> Json<dto::User> {
    Json(user.user.into())
}

/// # Login
///
/// # Parameters
///
/// - `username` - The username of the user
///
/// - `password` - The password of the user
///
/// # Returns
///
/// A cookie indicating success
#[openapi(tag = "User")]
#[post("/login", format = "json", data = "<login_data>")]
pub(crate) async fn login(
    login_data: Json<dto::UserLogin>,
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
) -> Result<&'static str, GenericError> {
    authentication::login(db.inner(), login_data.into_inner(), cookies).await?;
    Ok("Successfully logged in")
}

#[openapi(tag = "User")]
#[post("/logout")]
pub(crate) async fn logout(
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
    user: UserAuthentication,
) -> Result<&'static str, GenericError> {
    user.remove_cookie(db.inner(), cookies).await?;
    Ok("Successfully logged out")
}
