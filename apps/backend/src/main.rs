use actix_web::{middleware::Logger, web, App, HttpServer};
use truco_backend::config::server::ServerConfig;
use truco_backend::routes;
use truco_backend::state::app_state::AppState;
use truco_backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from TRUCO_* environment variables; see ServerConfig.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let host = config.host.clone();
    let port = config.port;
    println!("🚀 Starting Truco Backend on http://{}:{}", host, port);

    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
