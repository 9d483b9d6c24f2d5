//! The error every service returns.
//!
//! Nothing here knows about HTTP. The inbound adapter picks a status from
//! [`ErrorCode`] and serialises the payload as is, except that internal
//! errors lose their message and details on the way out.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Header echoing the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Failure category, serialised in snake case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Payload or parameter failed validation.
    InvalidRequest,
    /// No admin session, or bad credentials.
    Unauthorized,
    NotFound,
    /// The change would break a referential rule, such as deleting a
    /// category that still has dishes.
    Conflict,
    /// The database could not be reached.
    ServiceUnavailable,
    InternalError,
}

/// Error payload shared by services and the HTTP layer.
///
/// The trace id in scope when the error is built is captured, so the JSON
/// body and the log line can be matched up.
///
/// ```
/// use menuboard::domain::{Error, ErrorCode};
/// use serde_json::json;
///
/// let err = Error::invalid_request("price must not be negative")
///     .with_details(json!({ "field": "price" }));
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.details(), Some(&json!({ "field": "price" })));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Error {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "menu item 12 not found")]
    message: String,
    #[serde(default, alias = "trace_id", skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    /// Offending field, or weekday and rule for opening-hours violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

macro_rules! error_constructors {
    ($($name:ident => $code:ident),+ $(,)?) => {
        $(
            #[doc = concat!("An [`ErrorCode::", stringify!($code), "`] error.")]
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )+
    };
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    error_constructors! {
        invalid_request => InvalidRequest,
        unauthorized => Unauthorized,
        not_found => NotFound,
        conflict => Conflict,
        service_unavailable => ServiceUnavailable,
        internal => InternalError,
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the captured trace id.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// The client-safe form: internal errors keep only their trace id.
    pub fn redacted(&self) -> Self {
        if self.code != ErrorCode::InternalError {
            return self.clone();
        }
        Self {
            code: ErrorCode::InternalError,
            message: "Internal server error".to_owned(),
            trace_id: self.trace_id.clone(),
            details: None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
