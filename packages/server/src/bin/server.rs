//! Live planning-poker session server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin mitsumori-server
//! cargo run --bin mitsumori-server -- --host 0.0.0.0 --port 3000 --log-level info
//! ```

use std::sync::Arc;

use clap::Parser;
use mitsumori_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemorySessionRegistry,
        repository::InMemorySessionRepository,
    },
    ui::{AppState, Server},
};
use mitsumori_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "mitsumori-server")]
#[command(about = "Live planning-poker session server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(short = 'l', long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        &[env!("CARGO_BIN_NAME"), env!("CARGO_CRATE_NAME"), "tower_http"],
        &args.log_level,
    );

    // Initialize dependencies in order:
    // 1. Clock / SessionRepository
    // 2. SessionRegistry
    // 3. MessagePusher
    // 4. UseCases (AppState)
    // 5. Server

    // 1. Create SessionRepository (in-memory session store)
    let clock = Arc::new(SystemClock);
    let sessions = Arc::new(InMemorySessionRepository::new());

    // 2. Create SessionRegistry (live rooms, created lazily on first join)
    let registry = Arc::new(InMemorySessionRegistry::new(sessions.clone(), clock.clone()));

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 4. Create UseCases
    let state = AppState::new(sessions, registry, message_pusher, clock);

    // 5. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
