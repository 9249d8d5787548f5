use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;
use crate::utils::validation::validate_payload;

pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

const NEW_EMPLOYEE_FIELDS: &[&str] = &["employee_code", "name", "age", "phone", "address"];
const CHANGE_FIELDS: &[&str] = &["phone", "address"];

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub employee_code: String,
    pub name: String,
    pub age: i32,
    pub phone: String,
    pub address: String,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

/// A record that has not been persisted yet.
#[derive(Validate, Debug, Clone)]
pub struct NewEmployee {
    #[validate(length(min = 1, message = "employeeCode is required"))]
    pub employee_code: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 23, message = "Age must be at least 23"))]
    pub age: i32,
    #[validate(regex(path = "PHONE_RE", message = "Phone number must be exactly 10 digits"))]
    pub phone: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
}

impl NewEmployee {
    pub fn check(&self) -> Result<(), Vec<String>> {
        validate_payload(self, NEW_EMPLOYEE_FIELDS)
    }
}

/// The mutable subset of a record. `None` leaves the stored value untouched.
#[derive(Validate, Debug, Clone, Default)]
pub struct EmployeeChanges {
    #[validate(regex(path = "PHONE_RE", message = "Phone number must be exactly 10 digits"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: Option<String>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.address.is_none()
    }

    pub fn check(&self) -> Result<(), Vec<String>> {
        validate_payload(self, CHANGE_FIELDS)
    }

    /// Applies the changes in place and bumps `updated_at`.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(phone) = &self.phone {
            employee.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            employee.address = address.clone();
        }
        employee.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN_AGE: i32 = 23;

    fn valid() -> NewEmployee {
        NewEmployee {
            employee_code: "E001".to_string(),
            name: "Asha Rao".to_string(),
            age: 30,
            phone: "1234567890".to_string(),
            address: "12 Park Street".to_string(),
        }
    }

    #[test]
    fn accepts_valid_employee() {
        assert!(valid().check().is_ok());
    }

    #[test]
    fn age_lower_bound_is_inclusive() {
        let mut employee = valid();
        employee.age = MIN_AGE;
        assert!(employee.check().is_ok());

        employee.age = MIN_AGE - 1;
        assert_eq!(employee.check().unwrap_err(), vec!["Age must be at least 23"]);
    }

    #[test]
    fn phone_must_be_ten_digits() {
        for phone in ["12345", "12345678901", "12345abcde", " 1234567890", ""] {
            let mut employee = valid();
            employee.phone = phone.to_string();
            assert_eq!(
                employee.check().unwrap_err(),
                vec!["Phone number must be exactly 10 digits"],
                "phone {:?} should be rejected",
                phone
            );
        }
    }

    #[test]
    fn reports_every_violation_in_field_order() {
        let employee = NewEmployee {
            employee_code: String::new(),
            name: "Asha Rao".to_string(),
            age: 18,
            phone: "12".to_string(),
            address: String::new(),
        };
        assert_eq!(
            employee.check().unwrap_err(),
            vec![
                "employeeCode is required",
                "Age must be at least 23",
                "Phone number must be exactly 10 digits",
                "address is required",
            ]
        );
    }

    #[test]
    fn changes_only_validate_present_fields() {
        assert!(EmployeeChanges::default().check().is_ok());
        assert!(EmployeeChanges::default().is_empty());

        let changes = EmployeeChanges { phone: Some("999".to_string()), address: None };
        assert_eq!(changes.check().unwrap_err(), vec!["Phone number must be exactly 10 digits"]);

        let changes = EmployeeChanges { phone: None, address: Some("New Road".to_string()) };
        assert!(changes.check().is_ok());
    }

    #[test]
    fn apply_to_keeps_immutable_fields() {
        let now = Utc::now();
        let mut employee = Employee {
            id: Uuid::new_v4(),
            employee_code: "E001".to_string(),
            name: "Asha Rao".to_string(),
            age: 30,
            phone: "1234567890".to_string(),
            address: "12 Park Street".to_string(),
            created_at: now,
            updated_at: now,
        };
        let changes = EmployeeChanges { phone: Some("9999999999".to_string()), address: None };
        changes.apply_to(&mut employee);

        assert_eq!(employee.phone, "9999999999");
        assert_eq!(employee.address, "12 Park Street");
        assert_eq!(employee.name, "Asha Rao");
        assert_eq!(employee.created_at, now);
        assert!(employee.updated_at >= now);
    }

    #[test]
    fn serializes_with_record_shape() {
        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            employee_code: "E001".to_string(),
            name: "Asha Rao".to_string(),
            age: 30,
            phone: "1234567890".to_string(),
            address: "12 Park Street".to_string(),
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&employee).unwrap();
        for key in ["_id", "employeeCode", "name", "age", "phone", "address", "createdAt", "updatedAt"] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
    }
}
