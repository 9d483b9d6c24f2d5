//! Opening hours service implementing the opening hours driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    OpeningHoursCommand, OpeningHoursQuery, OpeningHoursRepository, OpeningHoursRepositoryError,
};
use crate::domain::{
    DisplayLocale, Error, FormattedHours, HoursViolations, OpeningHours, OpeningHoursSubmission,
    format_week, order_for_display,
};

/// Opening hours service backed by an [`OpeningHoursRepository`].
#[derive(Clone)]
pub struct OpeningHoursService<R> {
    repo: Arc<R>,
}

impl<R> OpeningHoursService<R> {
    /// Create a service over `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: OpeningHoursRepositoryError) -> Error {
    match error {
        OpeningHoursRepositoryError::Connection { message } => Error::service_unavailable(
            format!("opening hours repository unavailable: {message}"),
        ),
        OpeningHoursRepositoryError::Query { message } => {
            Error::internal(format!("opening hours repository error: {message}"))
        }
    }
}

fn rejected_submission(violations: &HoursViolations) -> Error {
    Error::invalid_request(violations.to_string()).with_details(json!({
        "code": "invalid_opening_hours",
        "violations": violations.violations(),
    }))
}

impl<R> OpeningHoursService<R>
where
    R: OpeningHoursRepository,
{
    async fn ordered(&self) -> Result<Vec<OpeningHours>, Error> {
        let records = self.repo.list_all().await.map_err(map_repository_error)?;
        Ok(order_for_display(records))
    }
}

#[async_trait]
impl<R> OpeningHoursCommand for OpeningHoursService<R>
where
    R: OpeningHoursRepository,
{
    async fn update(&self, submission: OpeningHoursSubmission) -> Result<Vec<OpeningHours>, Error> {
        let days = submission
            .normalise()
            .map_err(|violations| rejected_submission(&violations))?;
        if days.is_empty() {
            return self.ordered().await;
        }

        let stored = self.repo.list_all().await.map_err(map_repository_error)?;
        let changes: Vec<OpeningHours> = days
            .into_iter()
            .map(|day| {
                match stored
                    .iter()
                    .find(|record| record.weekday() == Some(day.weekday))
                {
                    Some(current) => {
                        let label = day.label.apply(current.label());
                        current.clone().with_changes(day.schedule, label)
                    }
                    None => OpeningHours::new(day.weekday, day.label.apply(None), day.schedule),
                }
            })
            .collect();

        self.repo
            .save_days(&changes)
            .await
            .map_err(map_repository_error)?;
        info!(
            days = changes.len(),
            mode = ?submission.mode(),
            "opening hours updated"
        );
        self.ordered().await
    }
}

#[async_trait]
impl<R> OpeningHoursQuery for OpeningHoursService<R>
where
    R: OpeningHoursRepository,
{
    async fn list(&self) -> Result<Vec<OpeningHours>, Error> {
        self.ordered().await
    }

    async fn formatted(&self, locale: DisplayLocale) -> Result<Vec<FormattedHours>, Error> {
        let records = self.repo.list_all().await.map_err(map_repository_error)?;
        Ok(format_week(records, locale))
    }
}

#[cfg(test)]
#[path = "opening_hours_service_tests.rs"]
mod tests;
