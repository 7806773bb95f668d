use tracing::info;

use pdfdrop::web::WebServer;
use pdfdrop::Config;

#[tokio::main]
async fn main() {
    // Load configuration (config.toml if present, then env overrides)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = pdfdrop::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        pdfdrop::logging::init_console_only(&config.logging.level);
    }

    info!("pdfdrop - PDF upload/download service");

    let server = match WebServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
