//! PostgreSQL-backed `OpeningHoursRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{OpeningHoursRepository, OpeningHoursRepositoryError};
use crate::domain::{DayKey, DaySchedule, OpeningHours, StoredTimes};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOpeningHoursRow, OpeningHoursRow};
use super::pool::{DbPool, PoolError};
use super::schema::opening_hours;

/// Diesel-backed implementation of the opening hours repository port.
#[derive(Clone)]
pub struct DieselOpeningHoursRepository {
    pool: DbPool,
}

impl DieselOpeningHoursRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OpeningHoursRepositoryError {
    map_basic_pool_error(error, OpeningHoursRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> OpeningHoursRepositoryError {
    map_basic_diesel_error(
        error,
        OpeningHoursRepositoryError::query,
        OpeningHoursRepositoryError::connection,
    )
}

fn row_to_hours(row: OpeningHoursRow) -> OpeningHours {
    let times = StoredTimes {
        open_time: row.open_time,
        close_time: row.close_time,
        open_time_2: row.open_time_2,
        close_time_2: row.close_time_2,
    };
    let schedule = DaySchedule::from_stored(row.closed, &times).unwrap_or_else(|| {
        warn!(row_id = row.id, day = %row.day, ?times, "stored opening hours are invalid");
        DaySchedule::Unset
    });
    OpeningHours::new(DayKey::parse(&row.day), row.label, schedule)
}

/// Map each parsed day identity to its oldest row id.
fn index_rows(rows: &[(i32, String)]) -> HashMap<DayKey, i32> {
    let mut index = HashMap::new();
    for (id, day) in rows {
        index.entry(DayKey::parse(day)).or_insert(*id);
    }
    index
}

fn new_row(record: &OpeningHours) -> NewOpeningHoursRow {
    let times = record.schedule().stored_times();
    NewOpeningHoursRow {
        day: record.day().as_str().to_owned(),
        label: record.label().map(str::to_owned),
        closed: record.schedule().is_closed(),
        open_time: times.open_time,
        close_time: times.close_time,
        open_time_2: times.open_time_2,
        close_time_2: times.close_time_2,
    }
}

async fn stored_days(conn: &mut AsyncPgConnection) -> Result<Vec<(i32, String)>, DieselError> {
    opening_hours::table
        .select((opening_hours::id, opening_hours::day))
        .order_by(opening_hours::id)
        .for_update()
        .load(conn)
        .await
}

async fn update_row(
    conn: &mut AsyncPgConnection,
    id: i32,
    record: &OpeningHours,
) -> Result<(), DieselError> {
    let row = new_row(record);
    diesel::update(opening_hours::table.find(id))
        .set((
            opening_hours::label.eq(row.label),
            opening_hours::closed.eq(row.closed),
            opening_hours::open_time.eq(row.open_time),
            opening_hours::close_time.eq(row.close_time),
            opening_hours::open_time_2.eq(row.open_time_2),
            opening_hours::close_time_2.eq(row.close_time_2),
        ))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl OpeningHoursRepository for DieselOpeningHoursRepository {
    async fn list_all(&self) -> Result<Vec<OpeningHours>, OpeningHoursRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OpeningHoursRow> = opening_hours::table
            .select(OpeningHoursRow::as_select())
            .order_by(opening_hours::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_hours).collect())
    }

    async fn save_days(&self, days: &[OpeningHours]) -> Result<(), OpeningHoursRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<(), DieselError, _>(|conn| {
            async move {
                let index = index_rows(&stored_days(conn).await?);
                for record in days {
                    match index.get(record.day()) {
                        Some(id) => update_row(conn, *id, record).await?,
                        None => {
                            warn!(day = %record.day(), "opening hours row missing; recreating");
                            diesel::insert_into(opening_hours::table)
                                .values(new_row(record))
                                .execute(conn)
                                .await?;
                        }
                    }
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn insert_missing(
        &self,
        days: &[OpeningHours],
    ) -> Result<usize, OpeningHoursRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<usize, DieselError, _>(|conn| {
            async move {
                let index = index_rows(&stored_days(conn).await?);
                let missing: Vec<NewOpeningHoursRow> = days
                    .iter()
                    .filter(|record| !index.contains_key(record.day()))
                    .map(new_row)
                    .collect();
                if missing.is_empty() {
                    return Ok(0);
                }
                diesel::insert_into(opening_hours::table)
                    .values(&missing)
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Weekday;
    use rstest::rstest;

    fn row(day: &str, closed: bool, open: Option<&str>, close: Option<&str>) -> OpeningHoursRow {
        OpeningHoursRow {
            id: 1,
            day: day.into(),
            label: None,
            closed,
            open_time: open.map(str::to_owned),
            close_time: close.map(str::to_owned),
            open_time_2: None,
            close_time_2: None,
        }
    }

    #[rstest]
    fn german_rows_map_to_weekdays() {
        let hours = row_to_hours(row("Dienstag", false, Some("11:30"), Some("14:00")));
        assert_eq!(hours.weekday(), Some(Weekday::Tuesday));
        assert_eq!(hours.schedule().ranges().len(), 1);
    }

    #[rstest]
    #[case(row("friday", false, Some("22:00"), Some("11:00")))]
    #[case(row("friday", false, Some("11:00"), None))]
    #[case(row("friday", false, Some("25:00"), Some("26:00")))]
    fn invalid_rows_read_as_unset(#[case] stored: OpeningHoursRow) {
        assert_eq!(*row_to_hours(stored).schedule(), DaySchedule::Unset);
    }

    #[rstest]
    fn closed_flag_wins_over_leftover_times() {
        let hours = row_to_hours(row("monday", true, Some("11:00"), Some("14:00")));
        assert_eq!(*hours.schedule(), DaySchedule::Closed);
    }

    #[rstest]
    fn index_keeps_the_oldest_row_per_weekday() {
        let index = index_rows(&[
            (3, "Dienstag".into()),
            (7, "tuesday".into()),
            (9, "Ruhetag".into()),
        ]);

        assert_eq!(index.get(&DayKey::Known(Weekday::Tuesday)), Some(&3));
        assert_eq!(index.get(&DayKey::Unrecognised("Ruhetag".into())), Some(&9));
        assert_eq!(index.len(), 2);
    }

    #[rstest]
    fn new_rows_store_canonical_day_names() {
        let record = OpeningHours::new(Weekday::Sunday, Some("Sonntag".into()), DaySchedule::Closed);
        let stored = new_row(&record);

        assert_eq!(stored.day, "sunday");
        assert!(stored.closed);
        assert!(stored.open_time.is_none());
    }
}
