//! Terminal logging using env_logger
//!
//! The filter comes from the config file; `RUST_LOG` (also read from a `.env`
//! file) is applied on top of it.

use env_logger::Builder;

/// Initialize logging with `default_filter` as the base filter
pub fn init(default_filter: &str) {
    let mut builder = Builder::new();
    builder.parse_filters(default_filter);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.format_timestamp_millis();

    if let Err(e) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", e);
    }
}
