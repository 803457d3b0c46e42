use actix_web::{http::header, web, HttpResponse};

const APPLICATION_JS: &str = include_str!("../../assets/application.js");

/// GET /javascripts/application.js
async fn application_js() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/javascript; charset=utf-8"))
        .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
        .body(APPLICATION_JS)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/javascripts/application.js", web::get().to(application_js));
}
