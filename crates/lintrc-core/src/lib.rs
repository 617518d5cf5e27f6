//! lintrc core
//!
//! Loads declarative linter configuration, layers it over its presets and
//! produces the effective configuration consumed by a linting engine.

pub mod config;
pub mod error;
pub mod result;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigResolver, ConfigWarning, Configuration, EffectiveConfiguration,
    FilePresets, GlobalAccess, InMemoryPresets, PresetRegistry, ResolvedConfiguration,
    RuleSetting, Severity,
};
pub use error::{ErrorKind, LintrcError};
pub use result::Result;

/// Initialize the tracing subscriber for logging
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
