//! Admin identity carried in the cookie session.
//!
//! The encrypted cookie holds a single entry, the signed-in admin's numeric
//! id. Handlers go through [`SessionContext`] and never touch the raw
//! `actix_session::Session`.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AdminId, Error};

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "session";
pub(crate) const ADMIN_ID_KEY: &str = "admin_id";

/// Typed view over the admin session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `admin_id` as signed in.
    ///
    /// The session key is renewed first so an identifier issued before login
    /// cannot be replayed afterwards.
    pub fn persist_admin(&self, admin_id: AdminId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ADMIN_ID_KEY, admin_id.get())
            .map_err(|err| Error::internal(format!("failed to write admin session: {err}")))
    }

    /// The signed-in admin, if any.
    ///
    /// Entries that do not decode to a positive id count as signed out.
    pub fn admin_id(&self) -> Result<Option<AdminId>, Error> {
        let stored = self.0.get::<i32>(ADMIN_ID_KEY).unwrap_or_else(|err| {
            warn!(error = %err, "undecodable admin id in session cookie");
            None
        });
        Ok(stored.filter(|raw| *raw > 0).map(AdminId::new))
    }

    /// The signed-in admin or `401 Unauthorized`.
    pub fn require_admin_id(&self) -> Result<AdminId, Error> {
        self.admin_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { Ok(Self::new(session.await?)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;
    use serde_json::json;

    use crate::inbound::http::test_utils::test_session_middleware;

    macro_rules! session_app {
        () => {
            actix_test::init_service(
                App::new()
                    .wrap(test_session_middleware())
                    .route(
                        "/sign-in/{id}",
                        web::post().to(|session: SessionContext, id: web::Path<i32>| async move {
                            session.persist_admin(AdminId::new(id.into_inner()))?;
                            Ok::<_, Error>(HttpResponse::NoContent())
                        }),
                    )
                    .route(
                        "/forge",
                        web::post().to(|session: Session, raw: web::Json<serde_json::Value>| async move {
                            session
                                .insert(ADMIN_ID_KEY, raw.into_inner())
                                .map_err(|err| Error::internal(err.to_string()))?;
                            Ok::<_, Error>(HttpResponse::NoContent())
                        }),
                    )
                    .route(
                        "/whoami",
                        web::get().to(|session: SessionContext| async move {
                            let id = session.require_admin_id()?;
                            Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                        }),
                    )
                    .route(
                        "/sign-out",
                        web::post().to(|session: SessionContext| async move {
                            session.clear();
                            HttpResponse::NoContent()
                        }),
                    ),
            )
            .await
        };
    }

    fn cookie_from<B>(response: &actix_web::dev::ServiceResponse<B>) -> Cookie<'static> {
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(Cookie::into_owned)
            .expect("session cookie set")
    }

    #[actix_web::test]
    async fn signed_in_admin_is_read_back_until_cleared() {
        let app = session_app!();

        let signed_in = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/sign-in/7").to_request(),
        )
        .await;
        let cookie = cookie_from(&signed_in);

        let whoami = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(whoami.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(whoami).await, "7");

        let signed_out = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/sign-out")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let expired = cookie_from(&signed_out);
        let after = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(expired)
                .to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn anonymous_request_is_unauthorised() {
        let app = session_app!();

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/whoami").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case(json!("not-a-number"))]
    #[case(json!(0))]
    #[case(json!(-4))]
    #[actix_web::test]
    async fn unusable_stored_id_counts_as_signed_out(#[case] raw: serde_json::Value) {
        let app = session_app!();
        let forged = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/forge")
                .set_json(raw)
                .to_request(),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie_from(&forged))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
