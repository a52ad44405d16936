//! Renju room server.
//!
//! Hosts any number of two-player Renju rooms with spectators, and pushes
//! every room change to the room's WebSocket watchers.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin renju-server
//! cargo run --bin renju-server -- --host 0.0.0.0 --port 3000 --board-size 19
//! ```

use std::sync::Arc;

use clap::Parser;
use renju_server::{
    infrastructure::{message_pusher::WebSocketRoomPusher, repository::InMemoryRoomRepository},
    ui::{AppState, Server},
};
use renju_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "renju-server")]
#[command(about = "Room-based Renju game server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Side length of the board of every room created by this server
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u16).range(5..=25))]
    board_size: u16,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. RoomPusher
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create RoomPusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketRoomPusher::new());

    // 3. Create UseCases
    let board_size = usize::from(args.board_size);
    let state = AppState::new(repository, pusher, Arc::new(SystemClock), board_size);
    tracing::info!("Rooms use a {}x{} board", board_size, board_size);

    // 4. Create and run the server
    let server = Server::new(Arc::new(state));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
