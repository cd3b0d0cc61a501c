#[tokio::main]
async fn main() {
    if let Err(e) = watchlist_be::start_server().await {
        tracing::error!("Failed to start server: {}", e);
        eprintln!("Failed to start server: {e}");
        std::process::exit(1);
    }
}
