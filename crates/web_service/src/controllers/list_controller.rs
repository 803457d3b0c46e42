use actix_web::{
    http::{header, StatusCode},
    web::{self, Data, Form, Path},
    HttpRequest, HttpResponse,
};
use list_store::Subject;
use tracing::info;

use super::{html, is_xhr, list_path, parse_index, recover_not_found, redirect, LISTS_PATH};
use crate::dto::ListForm;
use crate::error::Result;
use crate::server::AppState;
use crate::session::{Session, UserSession};

/// GET /
async fn home() -> HttpResponse {
    redirect(LISTS_PATH)
}

/// GET /lists
async fn all_lists(app: Data<AppState>, session: Session) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    let flash = state.flash.take();
    let body = app.views.lists_page(&state.lists, flash)?;
    Ok(html(StatusCode::OK, body))
}

/// GET /lists/new
async fn new_list(app: Data<AppState>, session: Session) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    let flash = state.flash.take();
    let body = app.views.new_list_page(flash, "")?;
    Ok(html(StatusCode::OK, body))
}

/// POST /lists
async fn create_list(
    app: Data<AppState>,
    session: Session,
    form: Form<ListForm>,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;

    match state.lists.create_list(&form.list_name) {
        Ok(index) => {
            let message = format!(
                "The '{}' list has been created.",
                state.lists.list(index)?.name
            );
            info!(session_id = %session.id(), list = index, "list created");
            state.flash.success(message);
            Ok(redirect(LISTS_PATH))
        }
        Err(err) => {
            state.flash.error(err.to_string());
            let flash = state.flash.take();
            let body = app.views.new_list_page(flash, form.list_name.trim())?;
            Ok(html(StatusCode::UNPROCESSABLE_ENTITY, body))
        }
    }
}

fn render_list(app: &AppState, state: &mut UserSession, raw_index: &str) -> Result<String> {
    let index = parse_index(raw_index, Subject::List)?;
    state.lists.list(index)?;
    let flash = state.flash.take();
    app.views.list_page(&state.lists, index, flash, "")
}

/// GET /lists/{id}
async fn show_list(
    req: HttpRequest,
    app: Data<AppState>,
    session: Session,
    path: Path<String>,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    match render_list(&app, &mut state, &path) {
        Ok(body) => Ok(html(StatusCode::OK, body)),
        Err(err) => recover_not_found(&req, &mut state, err),
    }
}

fn render_edit(app: &AppState, state: &mut UserSession, raw_index: &str) -> Result<String> {
    let index = parse_index(raw_index, Subject::List)?;
    let current = state.lists.list(index)?.name.clone();
    let flash = state.flash.take();
    app.views.edit_list_page(&state.lists, index, flash, &current)
}

/// GET /lists/{id}/edit
async fn edit_list(
    req: HttpRequest,
    app: Data<AppState>,
    session: Session,
    path: Path<String>,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    match render_edit(&app, &mut state, &path) {
        Ok(body) => Ok(html(StatusCode::OK, body)),
        Err(err) => recover_not_found(&req, &mut state, err),
    }
}

/// POST /lists/{id}
async fn update_list(
    req: HttpRequest,
    app: Data<AppState>,
    session: Session,
    path: Path<String>,
    form: Form<ListForm>,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    let index = match parse_index(&path, Subject::List) {
        Ok(index) => index,
        Err(err) => return recover_not_found(&req, &mut state, err.into()),
    };

    match state.lists.rename_list(index, &form.list_name) {
        Ok(()) => {
            info!(session_id = %session.id(), list = index, "list renamed");
            state.flash.success("The list has been updated.");
            Ok(redirect(list_path(index)))
        }
        Err(err) if err.is_validation() => {
            state.flash.error(err.to_string());
            let flash = state.flash.take();
            let body = app
                .views
                .edit_list_page(&state.lists, index, flash, form.list_name.trim())?;
            Ok(html(StatusCode::UNPROCESSABLE_ENTITY, body))
        }
        Err(err) => recover_not_found(&req, &mut state, err.into()),
    }
}

/// POST /lists/{id}/destroy
///
/// Background requests get the overview path back instead of a redirect.
async fn destroy_list(
    req: HttpRequest,
    session: Session,
    path: Path<String>,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    let deleted =
        parse_index(&path, Subject::List).and_then(|index| state.lists.delete_list(index));

    match deleted {
        Ok(list) => {
            info!(session_id = %session.id(), "list deleted");
            state
                .flash
                .success(format!("The '{}' list has been deleted.", list.name));
            if is_xhr(&req) {
                return Ok(HttpResponse::Ok()
                    .content_type(header::ContentType::plaintext())
                    .body(LISTS_PATH));
            }
            Ok(redirect(LISTS_PATH))
        }
        Err(err) => recover_not_found(&req, &mut state, err.into()),
    }
}

async fn set_all_todos(
    req: HttpRequest,
    session: Session,
    path: Path<String>,
    completed: bool,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    let updated = parse_index(&path, Subject::List).and_then(|index| {
        if completed {
            state.lists.complete_all(index)?;
        } else {
            state.lists.uncomplete_all(index)?;
        }
        Ok(index)
    });

    match updated {
        Ok(index) => {
            info!(session_id = %session.id(), list = index, completed, "todos updated");
            state.flash.success(if completed {
                "All todos have been completed."
            } else {
                "All todos have been marked incomplete."
            });
            Ok(redirect(list_path(index)))
        }
        Err(err) => recover_not_found(&req, &mut state, err.into()),
    }
}

/// POST /lists/{id}/complete_all
async fn complete_all(
    req: HttpRequest,
    session: Session,
    path: Path<String>,
) -> Result<HttpResponse> {
    set_all_todos(req, session, path, true).await
}

/// POST /lists/{id}/uncomplete_all
async fn uncomplete_all(
    req: HttpRequest,
    session: Session,
    path: Path<String>,
) -> Result<HttpResponse> {
    set_all_todos(req, session, path, false).await
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/lists", web::get().to(all_lists))
        .route("/lists", web::post().to(create_list))
        .route("/lists/new", web::get().to(new_list))
        .route("/lists/{id}", web::get().to(show_list))
        .route("/lists/{id}", web::post().to(update_list))
        .route("/lists/{id}/edit", web::get().to(edit_list))
        .route("/lists/{id}/destroy", web::post().to(destroy_list))
        .route("/lists/{id}/complete_all", web::post().to(complete_all))
        .route("/lists/{id}/uncomplete_all", web::post().to(uncomplete_all));
}
