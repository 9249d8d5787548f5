use actix_web::HttpResponse;

pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Employee API is running")
}

/// Answers CORS preflight requests; the headers come from `cors_headers`.
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}
