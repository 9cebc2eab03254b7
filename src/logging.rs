pub fn setup_logging() {
    let mut builder = env_logger::Builder::new();

    // Log lines go to stderr, below the menu; keep the default quiet.
    builder.filter(None, log::LevelFilter::Warn);

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }

    builder.init();
}
