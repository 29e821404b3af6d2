use actix_web::{web, App, HttpServer};
use tracing::info;
use wisdom_center::config::app::{AppConfig, StoreConfig};
use wisdom_center::infra::state::build_state;
use wisdom_center::middleware::cors::cors_middleware;
use wisdom_center::middleware::request_trace::RequestTrace;
use wisdom_center::middleware::structured_logger::StructuredLogger;
use wisdom_center::middleware::trace_span::TraceSpan;
use wisdom_center::routes;
use wisdom_center::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is fine; the process environment still applies
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let store_kind = match &config.store {
        StoreConfig::Memory => "memory",
        StoreConfig::Postgres { .. } => "postgres",
    };

    let app_state = match build_state()
        .with_env(config.env)
        .with_security(SecurityConfig::new(config.jwt_secret.as_bytes()))
        .with_store(config.store.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        env = ?config.env,
        store = store_kind,
        "Wisdom center app listening"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
