use tracing_subscriber::fmt::Layer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "photo_catalog=info";
const VERBOSE_FILTER: &str = "photo_catalog=debug,tower_http=debug,info";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Events without target or callsite decorations.
fn bare_layer<S>() -> Layer<S> {
    tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }))
        .with(bare_layer().compact())
        .init();
}

/// JSON lines without timestamps; CloudWatch stamps each line itself.
pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(bare_layer().without_time().json())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for directives in [DEFAULT_FILTER, VERBOSE_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }
}
