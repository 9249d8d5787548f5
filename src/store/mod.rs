//! Persistence boundary for employee records.
//!
//! Every implementation validates records before writing them and reports a
//! clash on `employee_code` as [`StoreError::Duplicate`], whatever the
//! underlying mechanism is.

mod memory;
mod postgres;

pub use memory::MemoryEmployeeStore;
pub use postgres::PgEmployeeStore;

use async_trait::async_trait;
use thiserror::Error;
use crate::models::employee::{Employee, EmployeeChanges, NewEmployee};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("employee code {0} already exists")]
    Duplicate(String),
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError>;

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    /// Returns `Ok(None)` when no record has this code.
    async fn update_by_code(
        &self,
        code: &str,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, StoreError>;

    async fn delete_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError>;

    /// All records, most recently created first.
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError>;
}
