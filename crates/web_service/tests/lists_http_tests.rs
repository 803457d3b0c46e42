//! HTTP integration tests for the list and todo routes
//!
//! These drive the full app (session middleware included) through
//! `actix_web::test`, carrying the session cookie between requests the way a
//! browser would.
use actix_http::Request;
use actix_web::{
    cookie::Cookie,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, web, App, Error,
};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use web_service::middleware::{TracingMiddleware, TRACE_ID_HEADER};
use web_service::server::{app_config, AppState};
use web_service::session::SessionStore;

const COOKIE_NAME: &str = "todo_session";

fn session_store(capacity: usize) -> Arc<SessionStore> {
    Arc::new(SessionStore::new(
        NonZeroUsize::new(capacity).unwrap(),
        Duration::from_secs(3600),
    ))
}

async fn setup_app_with(
    sessions: Arc<SessionStore>,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new().unwrap()))
            .configure(|cfg| app_config(cfg, sessions, COOKIE_NAME)),
    )
    .await
}

async fn setup_test_app() -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    setup_app_with(session_store(100)).await
}

fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == COOKIE_NAME)
        .map(|c| c.into_owned())
}

fn location(resp: &ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn body_text(resp: ServiceResponse) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

async fn start_session(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
) -> Cookie<'static> {
    let resp = test::call_service(app, test::TestRequest::get().uri("/lists").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    session_cookie(&resp).expect("new session should set a cookie")
}

async fn get(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    cookie: &Cookie<'static>,
    uri: &str,
) -> ServiceResponse {
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    test::call_service(app, req).await
}

async fn post(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    cookie: &Cookie<'static>,
    uri: &str,
    form: Vec<(&str, &str)>,
) -> ServiceResponse {
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_form(form)
        .to_request();
    test::call_service(app, req).await
}

async fn post_xhr(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    cookie: &Cookie<'static>,
    uri: &str,
) -> ServiceResponse {
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .insert_header(("X-Requested-With", "XMLHttpRequest"))
        .to_request();
    test::call_service(app, req).await
}

#[actix_web::test]
async fn test_root_redirects_to_overview() {
    let app = setup_test_app().await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists");
}

#[actix_web::test]
async fn test_create_list_flashes_once() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;

    let resp = post(&app, &cookie, "/lists", vec![("list_name", "  Groceries ")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists");
    assert!(session_cookie(&resp).is_none());

    let body = body_text(get(&app, &cookie, "/lists").await).await;
    assert!(body.contains("Groceries"));
    assert!(body.contains("list has been created."));

    let body = body_text(get(&app, &cookie, "/lists").await).await;
    assert!(body.contains("Groceries"));
    assert!(!body.contains("list has been created."));
}

#[actix_web::test]
async fn test_invalid_list_names_rerender_form() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;

    let resp = post(&app, &cookie, "/lists", vec![("list_name", "     ")]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(resp).await;
    assert!(body.contains("The list name must be between 1 and 100 characters."));

    post(&app, &cookie, "/lists", vec![("list_name", "Groceries")]).await;
    let resp = post(&app, &cookie, "/lists", vec![("list_name", "Groceries")]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(resp).await;
    assert!(body.contains("The list name must be unique."));
    assert!(body.contains("value=\"Groceries\""));

    // The error was shown on the form and is not repeated.
    let body = body_text(get(&app, &cookie, "/lists").await).await;
    assert!(!body.contains("must be unique"));
}

#[actix_web::test]
async fn test_sessions_are_isolated() {
    let app = setup_test_app().await;
    let alice = start_session(&app).await;
    let bob = start_session(&app).await;
    assert_ne!(alice.value(), bob.value());

    post(&app, &alice, "/lists", vec![("list_name", "Alice's plans")]).await;

    let body = body_text(get(&app, &bob, "/lists").await).await;
    assert!(!body.contains("plans"));
    assert!(body.contains("You have no lists yet."));
}

#[actix_web::test]
async fn test_unknown_cookie_gets_a_new_session() {
    let app = setup_test_app().await;
    let forged = Cookie::new(COOKIE_NAME, "not-a-session");
    let resp = get(&app, &forged, "/lists").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let issued = session_cookie(&resp).unwrap();
    assert_ne!(issued.value(), "not-a-session");
    assert_eq!(issued.http_only(), Some(true));
    assert_eq!(issued.path(), Some("/"));
}

#[actix_web::test]
async fn test_stale_index_redirects_to_overview() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;

    for uri in ["/lists/3", "/lists/abc", "/lists/0/edit"] {
        let resp = get(&app, &cookie, uri).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/lists");
    }

    let body = body_text(get(&app, &cookie, "/lists").await).await;
    assert!(body.contains("The specified list was not found."));

    let resp = post(&app, &cookie, "/lists/0/todos", vec![("todo", "milk")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists");

    post(&app, &cookie, "/lists", vec![("list_name", "Errands")]).await;
    get(&app, &cookie, "/lists").await;
    for uri in ["/lists/0/todos/5/destroy", "/lists/0/todos/5/toggle"] {
        let resp = post(&app, &cookie, uri, vec![]).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/lists");

        let body = body_text(get(&app, &cookie, "/lists").await).await;
        assert!(body.contains("The specified todo was not found."), "{uri}");
    }
}

#[actix_web::test]
async fn test_rename_list() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;
    post(&app, &cookie, "/lists", vec![("list_name", "Work")]).await;
    post(&app, &cookie, "/lists", vec![("list_name", "Home")]).await;

    let resp = post(&app, &cookie, "/lists/1", vec![("list_name", "Home")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists/1");

    let resp = post(&app, &cookie, "/lists/1", vec![("list_name", "Work")]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(resp).await;
    assert!(body.contains("The list name must be unique."));
    assert!(body.contains("value=\"Work\""));

    post(&app, &cookie, "/lists/1", vec![("list_name", "Garden")]).await;
    let body = body_text(get(&app, &cookie, "/lists/1").await).await;
    assert!(body.contains("Garden"));
    assert!(body.contains("The list has been updated."));
}

#[actix_web::test]
async fn test_todos_display_pending_first() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;
    post(&app, &cookie, "/lists", vec![("list_name", "Errands")]).await;

    for name in ["A", "B", "C"] {
        let resp = post(&app, &cookie, "/lists/0/todos", vec![("todo", name)]).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/lists/0");
    }
    for index in [0, 2] {
        let uri = format!("/lists/0/todos/{index}/toggle");
        let resp = post(&app, &cookie, &uri, vec![]).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    let body = body_text(get(&app, &cookie, "/lists/0").await).await;
    let b = body.find("/lists/0/todos/1/toggle").unwrap();
    let a = body.find("/lists/0/todos/0/toggle").unwrap();
    let c = body.find("/lists/0/todos/2/toggle").unwrap();
    assert!(b < a && a < c);
    assert!(body.contains("2 / 3"));
}

#[actix_web::test]
async fn test_duplicate_todo_rerenders_list() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;
    post(&app, &cookie, "/lists", vec![("list_name", "Errands")]).await;
    post(&app, &cookie, "/lists/0/todos", vec![("todo", "milk")]).await;

    let resp = post(&app, &cookie, "/lists/0/todos", vec![("todo", "milk")]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(resp).await;
    assert!(body.contains("The todo name must be unique."));
    assert!(body.contains("Errands"));
}

#[actix_web::test]
async fn test_delete_todo_with_and_without_xhr() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;
    post(&app, &cookie, "/lists", vec![("list_name", "Errands")]).await;
    post(&app, &cookie, "/lists/0/todos", vec![("todo", "milk")]).await;
    post(&app, &cookie, "/lists/0/todos", vec![("todo", "eggs")]).await;
    get(&app, &cookie, "/lists/0").await;

    let resp = post_xhr(&app, &cookie, "/lists/0/todos/0/destroy").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let body = body_text(get(&app, &cookie, "/lists/0").await).await;
    assert!(!body.contains("milk"));
    assert!(body.contains("eggs"));
    assert!(!body.contains("has been deleted"));

    let resp = post(&app, &cookie, "/lists/0/todos/0/destroy", vec![]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists/0");
    let body = body_text(get(&app, &cookie, "/lists/0").await).await;
    assert!(body.contains("has been deleted."));

    let resp = post_xhr(&app, &cookie, "/lists/0/todos/0/destroy").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "The specified todo was not found.");
}

#[actix_web::test]
async fn test_delete_list_shifts_indices() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;
    post(&app, &cookie, "/lists", vec![("list_name", "First")]).await;
    post(&app, &cookie, "/lists", vec![("list_name", "Second")]).await;

    let resp = post_xhr(&app, &cookie, "/lists/0/destroy").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "/lists");

    let body = body_text(get(&app, &cookie, "/lists/0").await).await;
    assert!(body.contains("Second"));

    let resp = post(&app, &cookie, "/lists/0/destroy", vec![]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists");
    let body = body_text(get(&app, &cookie, "/lists").await).await;
    assert!(body.contains("You have no lists yet."));
}

#[actix_web::test]
async fn test_complete_and_uncomplete_all() {
    let app = setup_test_app().await;
    let cookie = start_session(&app).await;
    post(&app, &cookie, "/lists", vec![("list_name", "Errands")]).await;
    post(&app, &cookie, "/lists/0/todos", vec![("todo", "milk")]).await;
    post(&app, &cookie, "/lists/0/todos", vec![("todo", "eggs")]).await;

    let resp = post(&app, &cookie, "/lists/0/complete_all", vec![]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let body = body_text(get(&app, &cookie, "/lists/0").await).await;
    assert!(body.contains("All todos have been completed."));
    assert!(body.contains("2 / 2"));
    assert!(body.contains("/lists/0/uncomplete_all"));

    post(&app, &cookie, "/lists/0/uncomplete_all", vec![]).await;
    let body = body_text(get(&app, &cookie, "/lists/0").await).await;
    assert!(body.contains("0 / 2"));
    assert!(body.contains("/lists/0/complete_all"));
}

#[actix_web::test]
async fn test_script_is_served() {
    let app = setup_test_app().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/javascripts/application.js")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("application/javascript"));
    assert!(session_cookie(&resp).is_none());
    let script = body_text(resp).await;
    assert!(script.contains("form.delete"));
    assert!(script.contains("#todos .progress"));
}

#[actix_web::test]
async fn test_script_does_not_start_a_session() {
    let sessions = session_store(4);
    let app = setup_app_with(Arc::clone(&sessions)).await;

    for _ in 0..3 {
        let req = test::TestRequest::get()
            .uri("/javascripts/application.js")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(session_cookie(&resp).is_none());
    }
    assert_eq!(sessions.len().await, 0);
}

#[actix_web::test]
async fn test_session_count_is_capped() {
    const CAPACITY: usize = 3;
    let sessions = session_store(CAPACITY);
    let app = setup_app_with(Arc::clone(&sessions)).await;

    let mut cookies = Vec::new();
    for _ in 0..=CAPACITY {
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/lists").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        cookies.push(session_cookie(&resp).unwrap());
    }
    assert_eq!(sessions.len().await, CAPACITY);

    // The oldest session made room for the last one.
    let resp = get(&app, &cookies[0], "/lists").await;
    let reissued = session_cookie(&resp).unwrap();
    assert_ne!(reissued.value(), cookies[0].value());

    let resp = get(&app, &cookies[CAPACITY], "/lists").await;
    assert!(session_cookie(&resp).is_none());
    assert_eq!(sessions.len().await, CAPACITY);
}

#[actix_web::test]
async fn test_trace_id_is_echoed() {
    let sessions = session_store(100);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new().unwrap()))
            .wrap(TracingMiddleware)
            .configure(|cfg| app_config(cfg, sessions, COOKIE_NAME)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/lists")
        .insert_header((TRACE_ID_HEADER, "trace-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(TRACE_ID_HEADER).unwrap(), "trace-123");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.headers().contains_key(TRACE_ID_HEADER));
}
