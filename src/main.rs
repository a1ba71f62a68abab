use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    // stdout belongs to the UCI protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("rook_engine v{} ready", env!("CARGO_PKG_VERSION"));
    rook_engine::uci::uci_top::run_stdio_loop()
}
