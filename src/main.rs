mod errors;
mod handlers;
mod models;
mod store;
mod utils;

use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use log::info;
use env_logger::Env;
use actix_web::middleware::Logger;
use std::collections::HashMap;
use std::io;
use crate::store::AppState;
use crate::utils::config::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    // Users and exercises live for the lifetime of the process
    let state = web::Data::new(AppState::new());
    let config_data = web::Data::new(config.clone());

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "exercise_tracker".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    let server_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // Logging middleware
            .wrap(prometheus.clone()) // Prometheus metrics middleware
            .wrap(handlers::cors()) // CORS, preflights included
            .app_data(state.clone())
            .app_data(config_data.clone())
            .configure(handlers::configure)
            .configure(handlers::pages::configure(&server_config))
    })
    .workers(config.workers)
    .bind(config.bind_address())?;

    for addr in server.addrs() {
        info!("Your app is listening on port {}", addr.port());
    }

    server.run().await
}
