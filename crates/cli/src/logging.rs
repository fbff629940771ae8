use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "SWAGEN_LOG";
const TARGETS: [&str; 2] = ["swagen_core", "swagen_cli"];

/// Install the stderr subscriber.
///
/// `SWAGEN_LOG` takes a plain level ("trace", "debug", "info", "warn",
/// "error") applied to both swagen crates, or a full filter spec such as
/// "swagen_core=trace". `verbose` forces debug and wins over the variable.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        level_filter("debug")
    } else {
        filter_spec(std::env::var(LOG_ENV).ok().as_deref())
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(value: Option<&str>) -> String {
    match value {
        Some(level) if is_plain_level(level) => level_filter(level),
        Some(spec) => spec.to_string(),
        None => level_filter("info"),
    }
}

fn level_filter(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_spec() {
        assert_eq!(filter_spec(None), "swagen_core=info,swagen_cli=info");
        assert_eq!(filter_spec(Some("DEBUG")), "swagen_core=DEBUG,swagen_cli=DEBUG");
        assert_eq!(filter_spec(Some("swagen_core=trace")), "swagen_core=trace");
    }
}
