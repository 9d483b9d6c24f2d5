//! Driving port for opening hours reads.

use async_trait::async_trait;

use crate::domain::{DisplayLocale, Error, FormattedHours, OpeningHours};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpeningHoursQuery: Send + Sync {
    /// Stored records in display order.
    async fn list(&self) -> Result<Vec<OpeningHours>, Error>;

    /// Records rendered for `locale`, in display order.
    async fn formatted(&self, locale: DisplayLocale) -> Result<Vec<FormattedHours>, Error>;
}
