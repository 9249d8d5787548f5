use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use super::{EmployeeStore, StoreError};
use crate::models::employee::{Employee, EmployeeChanges, NewEmployee};

/// SQLSTATE raised by PostgreSQL when a unique index rejects a write.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn classify_insert_error(err: sqlx::Error, code: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Duplicate(code.to_string());
        }
    }
    StoreError::Backend(err)
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, employee_code, name, age, phone, address, created_at, updated_at \
             FROM employees WHERE employee_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        employee.check().map_err(StoreError::Validation)?;

        let now = Utc::now();
        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (id, employee_code, name, age, phone, address, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, employee_code, name, age, phone, address, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&employee.employee_code)
        .bind(&employee.name)
        .bind(employee.age)
        .bind(&employee.phone)
        .bind(&employee.address)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| classify_insert_error(err, &employee.employee_code))
    }

    async fn update_by_code(
        &self,
        code: &str,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, StoreError> {
        changes.check().map_err(StoreError::Validation)?;

        let employee = sqlx::query_as::<_, Employee>(
            "UPDATE employees SET \
                 phone = COALESCE($2, phone), \
                 address = COALESCE($3, address), \
                 updated_at = $4 \
             WHERE employee_code = $1 \
             RETURNING id, employee_code, name, age, phone, address, created_at, updated_at",
        )
        .bind(code)
        .bind(&changes.phone)
        .bind(&changes.address)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn delete_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            "DELETE FROM employees WHERE employee_code = $1 \
             RETURNING id, employee_code, name, age, phone, address, created_at, updated_at",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, employee_code, name, age, phone, address, created_at, updated_at \
             FROM employees ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use sqlx::error::{DatabaseError, ErrorKind};
    use thiserror::Error;

    /// Stands in for a `PgDatabaseError` carrying a given SQLSTATE.
    #[derive(Debug, Error)]
    #[error("{message}")]
    struct SqlStateError {
        code: &'static str,
        message: String,
    }

    impl DatabaseError for SqlStateError {
        fn message(&self) -> &str {
            &self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn database_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlStateError {
            code,
            message: format!("sqlstate {}", code),
        }))
    }

    #[test]
    fn unique_violation_is_a_duplicate() {
        let err = classify_insert_error(database_error("23505"), "E001");
        assert!(matches!(err, StoreError::Duplicate(code) if code == "E001"));
    }

    #[test]
    fn other_database_errors_stay_backend() {
        // check_violation, not_null_violation
        for code in ["23514", "23502"] {
            let err = classify_insert_error(database_error(code), "E001");
            assert!(matches!(err, StoreError::Backend(sqlx::Error::Database(_))), "code {}", code);
        }
    }

    #[test]
    fn connection_errors_stay_backend() {
        let err = classify_insert_error(sqlx::Error::PoolTimedOut, "E001");
        assert!(matches!(err, StoreError::Backend(sqlx::Error::PoolTimedOut)));
    }
}
