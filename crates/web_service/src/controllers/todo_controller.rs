use actix_web::{
    http::StatusCode,
    web::{self, Data, Form, Path},
    HttpRequest, HttpResponse,
};
use list_store::{StoreError, Subject};
use tracing::info;

use super::{html, is_xhr, list_path, parse_index, recover_not_found, redirect};
use crate::dto::TodoForm;
use crate::error::Result;
use crate::server::AppState;
use crate::session::Session;

fn todo_indices(list: &str, todo: &str) -> Result<(usize, usize), StoreError> {
    Ok((
        parse_index(list, Subject::List)?,
        parse_index(todo, Subject::Todo)?,
    ))
}

/// POST /lists/{list_id}/todos
async fn create_todo(
    req: HttpRequest,
    app: Data<AppState>,
    session: Session,
    path: Path<String>,
    form: Form<TodoForm>,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    let list_index = match parse_index(&path, Subject::List) {
        Ok(index) => index,
        Err(err) => return recover_not_found(&req, &mut state, err.into()),
    };

    match state.lists.create_todo(list_index, &form.todo) {
        Ok(todo_index) => {
            info!(session_id = %session.id(), list = list_index, todo = todo_index, "todo created");
            state.flash.success("The todo was added.");
            Ok(redirect(list_path(list_index)))
        }
        Err(err) if err.is_validation() => {
            state.flash.error(err.to_string());
            let flash = state.flash.take();
            let body = app
                .views
                .list_page(&state.lists, list_index, flash, form.todo.trim())?;
            Ok(html(StatusCode::UNPROCESSABLE_ENTITY, body))
        }
        Err(err) => recover_not_found(&req, &mut state, err.into()),
    }
}

/// POST /lists/{list_id}/todos/{todo_id}/destroy
///
/// Background requests get an empty 204 and no flash message.
async fn destroy_todo(
    req: HttpRequest,
    session: Session,
    path: Path<(String, String)>,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    let (list_raw, todo_raw) = path.into_inner();
    let deleted = todo_indices(&list_raw, &todo_raw).and_then(|(list_index, todo_index)| {
        let todo = state.lists.delete_todo(list_index, todo_index)?;
        Ok((list_index, todo))
    });

    match deleted {
        Ok((list_index, todo)) => {
            info!(session_id = %session.id(), list = list_index, "todo deleted");
            if is_xhr(&req) {
                return Ok(HttpResponse::NoContent().finish());
            }
            state
                .flash
                .success(format!("The todo '{}' has been deleted.", todo.name));
            Ok(redirect(list_path(list_index)))
        }
        Err(err) => recover_not_found(&req, &mut state, err.into()),
    }
}

/// POST /lists/{list_id}/todos/{todo_id}/toggle
async fn toggle_todo(
    req: HttpRequest,
    session: Session,
    path: Path<(String, String)>,
) -> Result<HttpResponse> {
    let mut state = session.lock().await;
    let (list_raw, todo_raw) = path.into_inner();
    let toggled = todo_indices(&list_raw, &todo_raw).and_then(|(list_index, todo_index)| {
        let todo = state.lists.toggle_todo(list_index, todo_index)?;
        Ok((list_index, todo))
    });

    match toggled {
        Ok((list_index, todo)) => {
            info!(
                session_id = %session.id(),
                list = list_index,
                completed = todo.completed,
                "todo toggled"
            );
            state.flash.success("The todo has been updated.");
            Ok(redirect(list_path(list_index)))
        }
        Err(err) => recover_not_found(&req, &mut state, err.into()),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/lists/{list_id}/todos", web::post().to(create_todo))
        .route(
            "/lists/{list_id}/todos/{todo_id}/destroy",
            web::post().to(destroy_todo),
        )
        .route(
            "/lists/{list_id}/todos/{todo_id}/toggle",
            web::post().to(toggle_todo),
        );
}
