use std::sync::Arc;

use songbasket::{config, info, server, server::AppState, spotify::SpotifyClient, warning};

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file: {}", e);
    }

    let client = SpotifyClient::from_env();
    let state = Arc::new(AppState::new(client));

    info!("Listening on {}", config::server_addr());
    server::start(state).await;
}
