use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Filter used when `RUST_LOG` is unset. Verbose mode logs this crate at
/// debug level and keeps the HTTP stack at warnings.
fn default_directives(verbose: bool) -> &'static str {
    if verbose { "warn,fxconv=debug" } else { "off" }
}

/// Installs the global subscriber, writing to stderr so command output stays clean.
pub fn init_logging(verbose: bool) {
    // `--verbose` caps this crate at debug; otherwise `RUST_LOG` decides alone
    let app_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::TRACE
    };
    let app_filter = Targets::new()
        .with_target("fxconv", app_level)
        .with_default(LevelFilter::TRACE);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}
