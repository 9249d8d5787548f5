use std::process;
use std::sync::Arc;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use employee_manager::config::Config;
use employee_manager::store::{EmployeeStore, PgEmployeeStore};
use employee_manager::{configure, cors_headers, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().unwrap_or_else(|err| {
        error!("Invalid configuration: {}", err);
        process::exit(1);
    });

    let pool = db::create_pool(&config).await.unwrap_or_else(|err| {
        error!("Failed to connect to the database: {}", err);
        process::exit(1);
    });
    if let Err(err) = db::run_migrations(&pool).await {
        error!("Failed to run migrations: {}", err);
        process::exit(1);
    }

    let store: Arc<dyn EmployeeStore> = Arc::new(PgEmployeeStore::new(pool));
    let store = web::Data::from(store);

    info!("Starting server at {}", config.bind_address());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors_headers())
            .app_data(store.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
