//! Opening-hours endpoints.
//!
//! ```text
//! GET /api/v1/opening-hours
//! GET /api/v1/admin/opening-hours
//! PUT /api/v1/admin/opening-hours {"mode":"partial","days":{"tuesday":{"openTime":"11:30","closeTime":"14:30"}}}
//! ```

use std::collections::BTreeMap;

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{DaySubmission, Error, OpeningHoursSubmission, SubmissionMode, Weekday};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedAdmin;
use crate::inbound::http::schemas::{FormattedHoursBody, OpeningHoursBody};
use crate::inbound::http::state::HttpState;

/// Batch of per-day edits submitted by the admin form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursRequest {
    /// `partial` keeps days that are not listed; `full_replacement` requires
    /// all seven.
    #[serde(default)]
    pub mode: SubmissionMode,
    /// Submissions keyed by lowercase English weekday name.
    pub days: BTreeMap<Weekday, DaySubmission>,
}

impl From<OpeningHoursRequest> for OpeningHoursSubmission {
    fn from(value: OpeningHoursRequest) -> Self {
        Self::new(value.mode, value.days)
    }
}

/// Opening hours formatted for display, Monday first.
#[utoipa::path(
    get,
    path = "/api/v1/opening-hours",
    responses(
        (status = 200, description = "Formatted opening hours", body = [FormattedHoursBody]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["opening-hours"],
    operation_id = "getOpeningHours",
    security([])
)]
#[get("/opening-hours")]
pub async fn get_opening_hours(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<FormattedHoursBody>>> {
    let lines = state.opening_hours_query.formatted(state.locale).await?;
    Ok(web::Json(lines.iter().map(FormattedHoursBody::from).collect()))
}

/// Stored records for the admin form, Monday first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/opening-hours",
    responses(
        (status = 200, description = "Stored opening hours", body = [OpeningHoursBody]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["opening-hours"],
    operation_id = "getAdminOpeningHours"
)]
#[get("/admin/opening-hours")]
pub async fn get_admin_opening_hours(
    state: web::Data<HttpState>,
    _admin: AuthenticatedAdmin,
) -> ApiResult<web::Json<Vec<OpeningHoursBody>>> {
    let records = state.opening_hours_query.list().await?;
    Ok(web::Json(records.iter().map(OpeningHoursBody::from).collect()))
}

/// Validate and store a batch of opening-hours edits.
///
/// The batch is all-or-nothing: a single invalid day rejects the request and
/// `details.violations` lists every failing day with its rule.
#[utoipa::path(
    put,
    path = "/api/v1/admin/opening-hours",
    request_body = OpeningHoursRequest,
    responses(
        (status = 200, description = "Updated opening hours", body = [OpeningHoursBody]),
        (status = 400, description = "Rejected submission", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["opening-hours"],
    operation_id = "updateOpeningHours"
)]
#[put("/admin/opening-hours")]
pub async fn update_opening_hours(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    payload: web::Json<OpeningHoursRequest>,
) -> ApiResult<web::Json<Vec<OpeningHoursBody>>> {
    let submission = OpeningHoursSubmission::from(payload.into_inner());
    let records = state.opening_hours.update(submission).await?;
    debug!(
        admin = %admin.account().id,
        action = "update_opening_hours",
        "admin action applied"
    );
    Ok(web::Json(records.iter().map(OpeningHoursBody::from).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use crate::domain::ports::OpeningHoursRepository;
    use crate::domain::{OpeningHours, default_schedule};
    use crate::inbound::http::auth::login;
    use crate::inbound::http::test_utils::{login_cookie, memory_state, test_session_middleware};
    use crate::outbound::memory::InMemoryCatalogStore;

    async fn seeded_store() -> Arc<InMemoryCatalogStore> {
        let store = Arc::new(InMemoryCatalogStore::new());
        let week: Vec<OpeningHours> = Weekday::ALL
            .into_iter()
            .map(|day| OpeningHours::new(day, None, default_schedule(day)))
            .collect();
        store.insert_missing(&week).await.expect("seed week");
        store
    }

    macro_rules! hours_app {
        ($store:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(memory_state($store)))
                    .wrap(test_session_middleware())
                    .service(
                        web::scope("/api/v1")
                            .service(login)
                            .service(get_opening_hours)
                            .service(get_admin_opening_hours)
                            .service(update_opening_hours),
                    ),
            )
            .await
        };
    }

    async fn public_hours<S, B>(app: &S) -> Vec<Value>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
    {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::get()
                .uri("/api/v1/opening-hours")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        actix_test::read_body_json(response).await
    }

    #[actix_web::test]
    async fn public_listing_is_ordered_and_localised() {
        let app = hours_app!(seeded_store().await);

        let lines = public_hours(&app).await;

        let labels: Vec<&str> = lines.iter().filter_map(|l| l["label"].as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Montag",
                "Dienstag",
                "Mittwoch",
                "Donnerstag",
                "Freitag",
                "Samstag",
                "Sonntag"
            ]
        );
        assert_eq!(lines[0]["status"], "closed");
        assert_eq!(lines[0]["text"], "Geschlossen");
        assert_eq!(lines[1]["text"], "11:30-14:00 & 17:00-22:00");
    }

    #[actix_web::test]
    async fn partial_update_changes_only_the_submitted_day() {
        let app = hours_app!(seeded_store().await);
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/opening-hours")
                .cookie(cookie)
                .set_json(json!({
                    "days": { "tuesday": { "openTime": "11:30", "closeTime": "14:30" } }
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let records: Vec<Value> = actix_test::read_body_json(response).await;
        assert_eq!(records.len(), 7);

        let lines = public_hours(&app).await;
        assert_eq!(lines[1]["text"], "11:30-14:30");
        assert_eq!(lines[2]["text"], "11:30-14:00 & 17:00-22:00");
    }

    #[actix_web::test]
    async fn invalid_day_rejects_the_whole_batch() {
        let app = hours_app!(seeded_store().await);
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/opening-hours")
                .cookie(cookie)
                .set_json(json!({
                    "days": {
                        "monday": { "openTime": "10:00", "closeTime": "12:00" },
                        "tuesday": { "openTime": "14:00", "closeTime": "12:00" }
                    }
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        let violations = body["details"]["violations"]
            .as_array()
            .expect("violations listed");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0]["day"], "tuesday");

        let lines = public_hours(&app).await;
        assert_eq!(lines[0]["text"], "Geschlossen");
    }

    #[actix_web::test]
    async fn full_replacement_requires_every_day() {
        let app = hours_app!(seeded_store().await);
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/opening-hours")
                .cookie(cookie)
                .set_json(json!({
                    "mode": "full_replacement",
                    "days": { "monday": { "closed": true } }
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body["details"]["violations"].as_array().map(Vec::len),
            Some(6)
        );
    }

    #[actix_web::test]
    async fn admin_listing_requires_a_session() {
        let app = hours_app!(seeded_store().await);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/opening-hours")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_weekday_key_is_a_malformed_body() {
        let app = hours_app!(seeded_store().await);
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/opening-hours")
                .cookie(cookie)
                .set_json(json!({ "days": { "funday": { "closed": true } } }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn overlong_label_is_a_violation_not_a_store_error() {
        let app = hours_app!(seeded_store().await);
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/opening-hours")
                .cookie(cookie)
                .set_json(json!({
                    "days": { "sunday": { "closed": true, "label": "R".repeat(101) } }
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["violations"][0]["day"], "sunday");
        assert_eq!(
            body["details"]["violations"][0]["rule"]["code"],
            "label_too_long"
        );
    }

    /// Collects the message of every event emitted on this thread.
    #[derive(Clone, Default)]
    struct Messages(Arc<std::sync::Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Messages {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            struct Text(Option<String>);
            impl tracing::field::Visit for Text {
                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    if field.name() == "message" {
                        self.0 = Some(format!("{value:?}"));
                    }
                }
            }
            let mut text = Text(None);
            event.record(&mut text);
            if let Some(message) = text.0 {
                self.0.lock().expect("messages lock").push(message);
            }
        }
    }

    #[actix_web::test]
    async fn an_update_is_announced_once() {
        use tracing_subscriber::layer::SubscriberExt as _;

        let messages = Messages::default();
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(messages.clone()),
        );
        let app = hours_app!(seeded_store().await);
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/admin/opening-hours")
                .cookie(cookie)
                .set_json(json!({ "days": { "monday": { "closed": true } } }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let logged = messages.0.lock().expect("messages lock");
        let announcements = logged
            .iter()
            .filter(|message| message.as_str() == "opening hours updated")
            .count();
        assert_eq!(announcements, 1);
    }
}
