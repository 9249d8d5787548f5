use actix_web::{web, HttpMessage, HttpRequest};
use serde::de::DeserializeOwned;
use log::warn;
use crate::errors::AppError;

/// Decodes a JSON request body. A missing body, or one not sent as JSON,
/// reads as `{}` so the handler reports which fields are missing.
pub fn parse_json_body<T: DeserializeOwned>(req: &HttpRequest, body: &web::Bytes) -> Result<T, AppError> {
    let is_json = req.content_type().ends_with("json");
    let payload: &[u8] = if is_json && !body.iter().all(u8::is_ascii_whitespace) {
        body
    } else {
        b"{}"
    };

    serde_json::from_slice(payload).map_err(|err| {
        warn!("Rejected body for {} {}: {}", req.method(), req.path(), err);
        AppError::BadRequest("Invalid request body".to_string())
    })
}
