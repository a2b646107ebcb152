use actix_web::{web, App, HttpServer};
use log::info;
use log4rs;

use company_registry::api::{create_company, list_companies};
use company_registry::app_state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("server_log.yaml", Default::default()).unwrap();

    let state = AppState::new();
    let host = state.config.server.host.clone();
    let port = state.config.server.port;
    let workers = state.config.server.workers;
    let max_payload_size = state.config.server.max_payload_size;
    info!("Starting server on {}:{}", host, port);

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(data.clone())
            .service(list_companies)
            .service(create_company)
    })
    .workers(workers)
    .bind((host.as_str(), port))?
    .run()
    .await
}
