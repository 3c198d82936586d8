use std::env;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(level: &str) -> String {
    format!("bookstore={},sea_orm=warn,sqlx=warn", level)
}

/// Initializes tracing using the provided log level as the default filter.
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init_tracing(level: &str, json: bool) {
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default_directive(level));

    let builder = fmt()
        .with_env_filter(EnvFilter::new(filter_directive))
        .with_target(true);

    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_scopes_level_to_crate() {
        assert_eq!(
            default_directive("debug"),
            "bookstore=debug,sea_orm=warn,sqlx=warn"
        );
    }

    #[test]
    fn repeated_initialization_does_not_panic() {
        init_tracing("info", false);
        init_tracing("debug", true);
    }
}
