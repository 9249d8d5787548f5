use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use log::{info, warn};
use crate::errors::AppError;
use crate::models::employee::{EmployeeChanges, NewEmployee};
use crate::store::EmployeeStore;
use crate::utils::body::parse_json_body;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    employee_code: Option<String>,
    name: Option<String>,
    age: Option<i32>,
    phone: Option<String>,
    address: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    employee_code: Option<Value>,
    name: Option<Value>,
    phone: Option<Value>,
    address: Option<Value>,
}

impl CreateEmployeeRequest {
    /// `None` when any field is absent or blank.
    fn into_new_employee(self) -> Option<NewEmployee> {
        Some(NewEmployee {
            employee_code: non_empty(self.employee_code)?,
            name: non_empty(self.name)?,
            age: self.age?,
            phone: non_empty(self.phone)?,
            address: non_empty(self.address)?,
        })
    }
}

impl UpdateEmployeeRequest {
    fn touches_restricted_fields(&self) -> bool {
        is_truthy(self.employee_code.as_ref()) || is_truthy(self.name.as_ref())
    }

    fn into_changes(self) -> Result<EmployeeChanges, AppError> {
        Ok(EmployeeChanges {
            phone: text_field("phone", self.phone)?,
            address: text_field("address", self.address)?,
        })
    }
}

/// Falsy values read as "not provided"; numbers are taken as their digits.
fn text_field(field: &str, value: Option<Value>) -> Result<Option<String>, AppError> {
    match value {
        None => Ok(None),
        Some(value) if !is_truthy(Some(&value)) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(AppError::Validation(vec![format!("{} must be a string", field)])),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

pub async fn create_employee(
    req: HttpRequest,
    store: web::Data<dyn EmployeeStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let new_employee = parse_json_body::<CreateEmployeeRequest>(&req, &body)?
        .into_new_employee()
        .ok_or_else(|| AppError::BadRequest("Missing required fields".to_string()))?;

    // Fast path only; the store's unique constraint has the final say.
    if store.find_by_code(&new_employee.employee_code).await?.is_some() {
        warn!("Rejected duplicate employee code {}", new_employee.employee_code);
        return Err(AppError::Conflict("employeeCode already exists".to_string()));
    }

    let employee = store.insert(new_employee).await?;
    info!("Created employee {}", employee.employee_code);

    Ok(HttpResponse::Created().json(employee))
}

pub async fn get_employees(
    store: web::Data<dyn EmployeeStore>,
) -> Result<HttpResponse, AppError> {
    let employees = store.list_all().await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn update_employee(
    req: HttpRequest,
    store: web::Data<dyn EmployeeStore>,
    employee_code: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let updates: UpdateEmployeeRequest = parse_json_body(&req, &body)?;
    if updates.touches_restricted_fields() {
        return Err(AppError::BadRequest("You cannot update employeeCode or name".to_string()));
    }

    let changes = updates.into_changes()?;
    if changes.is_empty() {
        return Err(AppError::BadRequest(
            "Nothing to update. Only phone and address allowed.".to_string(),
        ));
    }

    let employee_code = employee_code.into_inner();
    let employee = store.update_by_code(&employee_code, changes).await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    info!("Updated employee {}", employee.employee_code);

    Ok(HttpResponse::Ok().json(employee))
}

pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_code: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee_code = employee_code.into_inner();
    let employee = store.delete_by_code(&employee_code).await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    info!("Deleted employee {}", employee.employee_code);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted",
        "employee": employee,
    })))
}
