use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use super::{EmployeeStore, StoreError};
use crate::models::employee::{Employee, EmployeeChanges, NewEmployee};

/// Process-local store kept in insertion order. Used by the test suite and
/// handy for running the API without a database.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    records: RwLock<Vec<Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|e| e.employee_code == code).cloned())
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        employee.check().map_err(StoreError::Validation)?;

        // Uniqueness is decided under the write lock.
        let mut records = self.records.write().await;
        if records.iter().any(|e| e.employee_code == employee.employee_code) {
            return Err(StoreError::Duplicate(employee.employee_code));
        }

        let now = Utc::now();
        let stored = Employee {
            id: Uuid::new_v4(),
            employee_code: employee.employee_code,
            name: employee.name,
            age: employee.age,
            phone: employee.phone,
            address: employee.address,
            created_at: now,
            updated_at: now,
        };
        records.push(stored.clone());
        Ok(stored)
    }

    async fn update_by_code(
        &self,
        code: &str,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, StoreError> {
        changes.check().map_err(StoreError::Validation)?;

        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|e| e.employee_code == code).map(|employee| {
            changes.apply_to(employee);
            employee.clone()
        }))
    }

    async fn delete_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError> {
        let mut records = self.records.write().await;
        let position = records.iter().position(|e| e.employee_code == code);
        Ok(position.map(|index| records.remove(index)))
    }

    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let records = self.records.read().await;
        // Newest insertions first; the stable sort keeps that order for equal timestamps.
        let mut employees: Vec<Employee> = records.iter().rev().cloned().collect();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }
}
