//! PostgreSQL-backed `AdminAccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AdminAccountRepository, AdminAccountRepositoryError};
use crate::domain::{AdminAccount, AdminId};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{AdminAccountRow, NewAdminAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::admin_accounts;

/// Diesel-backed implementation of the admin account repository port.
#[derive(Clone)]
pub struct DieselAdminAccountRepository {
    pool: DbPool,
}

impl DieselAdminAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AdminAccountRepositoryError {
    map_basic_pool_error(error, AdminAccountRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> AdminAccountRepositoryError {
    map_basic_diesel_error(
        error,
        AdminAccountRepositoryError::query,
        AdminAccountRepositoryError::connection,
    )
}

fn row_to_account(row: AdminAccountRow) -> AdminAccount {
    AdminAccount {
        id: AdminId::new(row.id),
        username: row.username,
        password_hash: row.password_hash,
    }
}

#[async_trait]
impl AdminAccountRepository for DieselAdminAccountRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AdminAccountRow> = admin_accounts::table
            .filter(admin_accounts::username.eq(username))
            .select(AdminAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_account))
    }

    async fn find_by_id(
        &self,
        id: AdminId,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AdminAccountRow> = admin_accounts::table
            .find(id.get())
            .select(AdminAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_account))
    }

    async fn count(&self) -> Result<i64, AdminAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        admin_accounts::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminAccount, AdminAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AdminAccountRow = diesel::insert_into(admin_accounts::table)
            .values(NewAdminAccountRow {
                username,
                password_hash,
            })
            .returning(AdminAccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match constraint_violation(&err) {
                Some(ConstraintViolation::Unique) => {
                    AdminAccountRepositoryError::duplicate_username(username)
                }
                _ => map_diesel_error(err),
            })?;
        Ok(row_to_account(row))
    }
}
