//! Browser sessions
//!
//! Each browser gets a random session id in a cookie. The id keys an
//! in-memory [`UserSession`] holding that browser's lists and pending flash
//! messages. Nothing is persisted: restarting the server or losing the cookie
//! starts over with an empty session.

mod middleware;
mod store;

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

pub use middleware::SessionMiddleware;
pub use store::{Session, SessionStore, UserSession};

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Session>()
                .cloned()
                .ok_or(AppError::SessionMissing),
        )
    }
}
