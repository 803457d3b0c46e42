pub mod asset_controller;
pub mod list_controller;
pub mod todo_controller;

use actix_web::{
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use list_store::{StoreError, Subject};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::session::UserSession;

pub const LISTS_PATH: &str = "/lists";

/// Header set by the delete script on background submissions.
pub const XHR_HEADER: &str = "x-requested-with";

pub fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

pub fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(header::ContentType::html())
        .body(body)
}

pub fn is_xhr(req: &HttpRequest) -> bool {
    req.headers()
        .get(XHR_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

/// Path segments that are not indices name nothing, same as out-of-range ones.
pub fn parse_index(raw: &str, subject: Subject) -> Result<usize, StoreError> {
    raw.parse().map_err(|_| StoreError::NotFound(subject))
}

/// Turn a failed lookup into a redirect to the overview carrying the error.
///
/// Anything other than a missing list or todo is passed through unchanged.
pub fn recover_not_found(
    req: &HttpRequest,
    state: &mut UserSession,
    err: AppError,
) -> Result<HttpResponse> {
    match err {
        AppError::Store(store_err @ StoreError::NotFound(_)) => {
            warn!(path = %req.path(), "{}", store_err);
            if is_xhr(req) {
                return Ok(HttpResponse::NotFound()
                    .content_type(header::ContentType::plaintext())
                    .body(store_err.to_string()));
            }
            state.flash.error(store_err.to_string());
            Ok(redirect(LISTS_PATH))
        }
        other => Err(other),
    }
}

pub fn list_path(index: usize) -> String {
    format!("{LISTS_PATH}/{index}")
}
