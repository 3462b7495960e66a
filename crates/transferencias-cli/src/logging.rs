use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "TRANSFERENCIAS_LOG";
const DEFAULT_DIRECTIVES: &str = "warn";

/// Installs a stderr subscriber. Stdout carries command output only.
pub fn init_logging() {
    let filter = resolve_filter(std::env::var(LOG_ENV).ok());
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

/// `TRANSFERENCIAS_LOG`, then `RUST_LOG`, then `warn`.
fn resolve_filter(custom: Option<String>) -> EnvFilter {
    if let Some(directives) = custom.filter(|value| !value.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

#[cfg(test)]
mod tests {
    use super::resolve_filter;

    #[test]
    fn custom_directives_take_priority() {
        let filter = resolve_filter(Some("transferencias_client=debug".to_string()));
        assert_eq!(filter.to_string(), "transferencias_client=debug");
    }
}
