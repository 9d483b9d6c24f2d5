//! Driving port for opening hours edits.

use async_trait::async_trait;

use crate::domain::{Error, OpeningHours, OpeningHoursSubmission};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpeningHoursCommand: Send + Sync {
    /// Validate and store a submission, returning the full ordered week.
    ///
    /// A rejected submission changes nothing; the error details list every
    /// offending weekday with the rule it broke.
    async fn update(&self, submission: OpeningHoursSubmission) -> Result<Vec<OpeningHours>, Error>;
}
