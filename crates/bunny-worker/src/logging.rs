//! Tracing setup shared by both binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default per-crate levels; `RUST_LOG` overrides them.
const DEFAULT_DIRECTIVES: [&str; 5] = [
    "bunny_models=info",
    "bunny_queue=info",
    "bunny_storage=info",
    "bunny_transcoder=info",
    "bunny_worker=info",
];

/// Initialize tracing: colored output for dev, JSON when `LOG_FORMAT=json`.
pub fn init() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    for directive in DEFAULT_DIRECTIVES {
        env_filter = env_filter.add_directive(directive.parse().expect("valid directive"));
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::Directive;

    #[test]
    fn test_default_directives_parse_and_name_the_worker_crate() {
        for directive in DEFAULT_DIRECTIVES {
            directive.parse::<Directive>().unwrap();
        }
        assert!(DEFAULT_DIRECTIVES.contains(&"bunny_worker=info"));
    }
}
