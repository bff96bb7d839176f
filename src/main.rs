use std::process;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use llmoonclip::db::{establish_connection_pool, run_migrations};
use llmoonclip::models::config::ServerConfig;
use llmoonclip::repository::DieselRepository;
use llmoonclip::routes::{configure, json_config, query_config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(server_config.log_level.as_str()),
    )
    .init();

    log::info!(
        "Starting LLMoonClip in {} mode",
        server_config.env.as_str()
    );

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        process::exit(1);
    }

    let repo = DieselRepository::new(pool);
    let bind = (server_config.bind_address.clone(), server_config.port);
    let server_config = web::Data::new(server_config);

    log::info!("Listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(json_config())
            .app_data(query_config())
            .app_data(web::Data::new(repo.clone()))
            .app_data(server_config.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
