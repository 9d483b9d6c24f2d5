//! Port for opening hours persistence.

use async_trait::async_trait;

use crate::domain::OpeningHours;

use super::define_port_error;

define_port_error! {
    /// Errors raised by opening hours repository adapters.
    pub enum OpeningHoursRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "opening hours repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "opening hours repository query failed: {message}",
    }
}

/// Storage for per-day opening hours.
///
/// Rows are matched by the weekday their stored identifier parses to, so a
/// row stored as `Dienstag` is the Tuesday row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpeningHoursRepository: Send + Sync {
    /// Every stored record in storage order, unrecognised days included.
    ///
    /// Rows whose stored times violate the day invariants are returned with
    /// an unset schedule.
    async fn list_all(&self) -> Result<Vec<OpeningHours>, OpeningHoursRepositoryError>;

    /// Upsert the given days in one transaction.
    ///
    /// A missing row is created; this is the repair path for damaged data.
    async fn save_days(&self, days: &[OpeningHours]) -> Result<(), OpeningHoursRepositoryError>;

    /// Insert the given days that have no row yet, leaving existing rows
    /// untouched. Returns how many rows were inserted.
    async fn insert_missing(
        &self,
        days: &[OpeningHours],
    ) -> Result<usize, OpeningHoursRepositoryError>;
}
