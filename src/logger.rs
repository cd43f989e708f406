use log::LevelFilter;

/// Initialize the logger, with `RUST_LOG` overridden by `level`.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
