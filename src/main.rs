use std::process;
use std::sync::Arc;

use lotto_stock_partners::ai::GeminiProvider;
use lotto_stock_partners::api::create_router;
use lotto_stock_partners::app_state::AppState;
use lotto_stock_partners::config::Config;

#[tokio::main]
async fn main() {
    env_logger::init();

    // The service refuses to start without its credential.
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            process::exit(1);
        }
    };

    let provider = match GeminiProvider::new(
        config.api_key.clone(),
        Some(config.model.clone()),
        Some(config.base_url.clone()),
    ) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Failed to create provider: {}", e);
            process::exit(1);
        }
    };
    log::info!("Completion provider: Gemini ({})", config.model);

    let state = Arc::new(AppState::new(Arc::new(provider)));
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", config.bind_addr, e);
            process::exit(1);
        }
    };
    log::info!("Listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        process::exit(1);
    }
}
