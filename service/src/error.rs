use log::error;
use rocket::response::Responder;
use rocket::serde::Serialize;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::{JsonSchema, Map};
use rocket_okapi::response::OpenApiResponderInner;
use sea_orm::DbErr;
use std::fmt::Debug;

#[derive(Serialize, JsonSchema, Debug, Responder, PartialEq)]
pub enum GenericError {
    #[response(status = 400)]
    BadRequest(&'static str),
    #[response(status = 404)]
    NotFound(&'static str),
    #[response(status = 403)]
    Forbidden(&'static str),
    #[response(status = 500)]
    UnknownError(&'static str),
    AuthError(AuthError),
}

#[derive(Serialize, JsonSchema, Debug, Responder, PartialEq)]
pub enum AuthError {
    #[response(status = 401)]
    Missing(&'static str),
    #[response(status = 401)]
    Invalid(&'static str),
    #[response(status = 401)]
    WrongPassword(&'static str),
    #[response(status = 403)]
    NotAdmin(&'static str),
}

impl From<AuthError> for GenericError {
    fn from(e: AuthError) -> Self {
        Self::AuthError(e)
    }
}

impl From<DbErr> for GenericError {
    fn from(e: DbErr) -> Self {
        error!("Database error: {:#?}", e);
        Self::UnknownError("Unknown database error")
    }
}

impl GenericError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}

impl OpenApiResponderInner for GenericError {
    fn responses(_: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};

        let mut responses = Map::new();
        responses.insert(
            "400".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [400 Bad Request](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400)\n\
                The request is malformed, empty, or would create a duplicate. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "401".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [401 Unauthorized](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/401)\n\
                No valid `auth` cookie was sent with the request. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "403".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [403 Forbidden](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/403)\n\
                The logged in user is not allowed to do this. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "404".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [404 Not Found](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404)\n\
                The course, tournament, round, greenie or player does not exist.\
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "500".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [500 Internal Server Error](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/500)\n\
                This response is given when something went wrong on the server. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        Ok(Responses {
            responses,
            ..Default::default()
        })
    }
}
