use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use llm_ask::config::{load_dotenv, Settings};
use llm_ask::errors::AppError;
use llm_ask::handlers::AppState;
use llm_ask::llm::{create_provider, LlmClient};
use llm_ask::logger;
use llm_ask::routes::configure_routes;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // .env is optional; real environment variables take precedence.
    let dotenv = load_dotenv(None);

    // Bootstrap at "info" so problems reading settings are logged.
    let log = logger::init("info")?;
    if let Err(e) = dotenv {
        warn!(error = %e, "ignoring unreadable .env file");
    }
    let settings = Arc::new(Settings::from_env());
    log.set_level(settings.log_level())?;

    let addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .map_err(|e| AppError::BindAddress(format!("{}: {}", settings.bind_addr(), e)))?;

    let provider = create_provider(&settings)?;
    let client = LlmClient::new(provider);

    info!(
        app = %settings.app_name,
        version = %settings.app_version,
        model = client.model(),
        cors_origins = ?settings.cors_origins(),
        "settings loaded"
    );

    let routes = configure_routes(AppState::new(Arc::clone(&settings), client));

    info!(%addr, "starting server");
    warp::serve(routes).run(addr).await;

    Ok(())
}
