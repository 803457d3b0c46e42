use actix_web::{
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

use super::store::SessionStore;

/// Attaches a [`super::Session`] to every request, issuing a cookie for new
/// sessions.
///
/// The cookie has no expiry, so it lasts as long as the browser session.
pub struct SessionMiddleware {
    store: Arc<SessionStore>,
    cookie_name: Rc<str>,
}

impl SessionMiddleware {
    pub fn new(store: Arc<SessionStore>, cookie_name: impl AsRef<str>) -> Self {
        Self {
            store,
            cookie_name: Rc::from(cookie_name.as_ref()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            store: Arc::clone(&self.store),
            cookie_name: Rc::clone(&self.cookie_name),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    store: Arc<SessionStore>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let requested = req
            .cookie(&self.cookie_name)
            .and_then(|c| Uuid::parse_str(c.value()).ok());

        let service = Rc::clone(&self.service);
        let store = Arc::clone(&self.store);
        let cookie_name = Rc::clone(&self.cookie_name);

        Box::pin(async move {
            let (session, created) = store.resolve(requested).await;
            let session_id = session.id();
            req.extensions_mut().insert(session);

            let mut res = service.call(req).await?;

            if created {
                let cookie = Cookie::build(cookie_name.to_string(), session_id.to_string())
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish();
                res.response_mut().add_cookie(&cookie)?;
                tracing::debug!(session_id = %session_id, "issued session cookie");
            }

            Ok(res)
        })
    }
}
