use super::*;
use rstest::rstest;
use serde_json::json;

const KNOWN_TRACE: &str = "3d6a4b1e-2c8f-4e71-b0a9-5f1d7c2e9a44";

#[rstest]
#[case(Error::invalid_request("x"), "invalid_request")]
#[case(Error::unauthorized("x"), "unauthorized")]
#[case(Error::not_found("x"), "not_found")]
#[case(Error::conflict("x"), "conflict")]
#[case(Error::service_unavailable("x"), "service_unavailable")]
#[case(Error::internal("x"), "internal_error")]
fn codes_serialise_in_snake_case(#[case] error: Error, #[case] wire: &str) {
    assert_eq!(serde_json::to_value(error.code()).expect("serialise"), json!(wire));
}

#[tokio::test]
async fn errors_remember_the_request_they_came_from() {
    let trace_id: TraceId = KNOWN_TRACE.parse().expect("valid uuid");

    let inside = TraceId::scope(trace_id, async { Error::conflict("category 3 has dishes") }).await;
    let outside = Error::conflict("category 3 has dishes");

    assert_eq!(inside.trace_id(), Some(KNOWN_TRACE));
    assert_eq!(outside.trace_id(), None);
}

#[rstest]
fn empty_optionals_are_left_out_of_the_body() {
    let value = serde_json::to_value(Error::not_found("menu item 12 not found")).expect("serialise");

    assert_eq!(
        value,
        json!({ "code": "not_found", "message": "menu item 12 not found" })
    );
}

#[rstest]
fn validation_details_use_camel_case_envelope() {
    let error = Error::invalid_request("opening hours rejected")
        .with_trace_id(KNOWN_TRACE)
        .with_details(json!({ "day": "tuesday", "rule": "close_not_after_open" }));

    let value = serde_json::to_value(&error).expect("serialise");

    assert_eq!(value["traceId"], KNOWN_TRACE);
    assert_eq!(value["details"]["day"], "tuesday");
}

#[rstest]
fn snake_case_trace_field_is_accepted_on_input() {
    let error: Error = serde_json::from_value(json!({
        "code": "unauthorized",
        "message": "login required",
        "trace_id": KNOWN_TRACE,
    }))
    .expect("deserialise");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.trace_id(), Some(KNOWN_TRACE));
}

#[rstest]
fn redaction_strips_internal_errors_only() {
    let leaked = Error::internal("relation \"menu_items\" does not exist")
        .with_trace_id(KNOWN_TRACE)
        .with_details(json!({ "sql": "SELECT 1" }));
    let conflict = Error::conflict("name taken").with_details(json!({ "field": "name" }));

    let redacted = leaked.redacted();

    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.details(), None);
    assert_eq!(redacted.trace_id(), Some(KNOWN_TRACE));
    assert_eq!(conflict.redacted(), conflict);
}
