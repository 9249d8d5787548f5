pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
pub mod utils;

use actix_web::{http::Method, middleware::DefaultHeaders, web};

/// Registers every route. The store must already be attached as
/// `web::Data<dyn EmployeeStore>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(
            web::resource("/")
                .route(web::get().to(handlers::health::liveness)),
        )
        .service(
            web::resource("/app")
                .route(web::get().to(handlers::ui::index)),
        )
        .service(
            web::scope("/api/employees")
                .service(
                    web::resource(["", "/"])
                        .route(web::post().to(handlers::employee::create_employee))
                        .route(web::get().to(handlers::employee::get_employees))
                        .route(web::method(Method::OPTIONS).to(handlers::health::preflight)),
                )
                .service(
                    web::resource("/{employee_code}")
                        .route(web::patch().to(handlers::employee::update_employee))
                        .route(web::delete().to(handlers::employee::delete_employee))
                        .route(web::method(Method::OPTIONS).to(handlers::health::preflight)),
                ),
        );
}

/// Permissive CORS so the UI can also be served from another origin.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, PATCH, DELETE, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}
