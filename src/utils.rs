//! Utility functions and helpers

use tracing_subscriber::EnvFilter;

/// Renders a segment duration with a unit suited to its magnitude.
pub fn format_seconds(seconds: f64) -> String {
    let nanos = seconds * 1e9;
    let sign = if nanos < 0.0 { "-" } else { "" };
    let nanos = nanos.abs();

    if nanos < 1_000.0 {
        format!("{}{:.0}ns", sign, nanos)
    } else if nanos < 1_000_000.0 {
        format!("{}{:.2}μs", sign, nanos / 1_000.0)
    } else if nanos < 1_000_000_000.0 {
        format!("{}{:.2}ms", sign, nanos / 1_000_000.0)
    } else {
        format!("{}{:.2}s", sign, nanos / 1_000_000_000.0)
    }
}

/// Joins human readable segment durations with ` | `.
pub fn segments_summary(segments: &[f64]) -> String {
    segments
        .iter()
        .map(|seconds| format_seconds(*seconds))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Installs a formatting subscriber honouring `RUST_LOG`. Does nothing if one is already set.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok();
    if installed {
        tracing::info!("{} {} tracing initialized", crate::NAME, crate::VERSION);
    }
}
