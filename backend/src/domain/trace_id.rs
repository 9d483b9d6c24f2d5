//! Request correlation identifier.
//!
//! Each request runs inside [`TraceId::scope`], a Tokio task-local, so errors
//! and log events anywhere below the handler can read it with
//! [`TraceId::current`]. Work moved to `spawn` or `spawn_blocking` leaves the
//! scope unless it is wrapped again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// UUID tying a request's response to its log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

/// Why an incoming identifier was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceIdError {
    #[error("trace id is not a UUID")]
    Malformed,
    #[error("trace id must not be the nil UUID")]
    Nil,
}

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier of the enclosing request, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use menuboard::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id: TraceId = "6f1c2f1e-8a4b-4d4e-9a51-0c2a3f6d9b10".parse().unwrap();
    /// let seen = TraceId::scope(trace_id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = TraceIdError;

    /// Parse a client-supplied identifier. Surrounding whitespace is ignored;
    /// the nil UUID is refused so clients cannot collapse unrelated requests
    /// onto one id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s.trim()).map_err(|_| TraceIdError::Malformed)?;
        if uuid.is_nil() {
            return Err(TraceIdError::Nil);
        }
        Ok(Self(uuid))
    }
}
