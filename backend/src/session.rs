//! Cookie-backed stand-in for the identity provider.
//!
//! The cookie carries the signed-in email verbatim. Nothing here proves who
//! the caller is; it only gives the lottery page a session to read.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use cookie::{Cookie, SameSite};
use serde::Deserialize;
use shared::constants::SESSION_COOKIE;
use shared::validation::validate_email;
use shared::Session;
use tracing::info;

use crate::error::Error;
use crate::AppState;

/// The email of the caller's session.
#[derive(Debug, Clone)]
pub struct SignedInUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SignedInUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_email(&parts.headers)
            .map(SignedInUser)
            .ok_or(Error::Unauthorized)
    }
}

fn session_email(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|email| validate_email(email).is_ok())
}

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

async fn get_session(user: Option<SignedInUser>) -> Json<Session> {
    Json(match user {
        Some(SignedInUser(email)) => Session::for_email(email),
        None => Session::default(),
    })
}

async fn sign_in(Json(payload): Json<SignInRequest>) -> Result<impl IntoResponse, Error> {
    let email = payload.email.trim().to_lowercase();
    if validate_email(&email).is_err() {
        return Err(Error::InvalidQuery(shared::constants::INVALID_EMAIL_ERROR));
    }

    let cookie = Cookie::build((SESSION_COOKIE, email.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    info!("Session opened for {}", email);
    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(Session::for_email(email)),
    ))
}

async fn sign_out() -> impl IntoResponse {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    ([(header::SET_COOKIE, cookie.to_string())], Json(Session::default()))
}

pub fn create_router() -> Router<AppState> {
    Router::new().route(
        shared::constants::SESSION_ENDPOINT,
        get(get_session).post(sign_in).delete(sign_out),
    )
}
