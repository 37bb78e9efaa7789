// logging.rs — tracing subscriber setup for the binaries.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr; `RUST_LOG` adds to
/// the default `info` directives for goaltrack crates.
pub fn init(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("gt_goal=info".parse()?)
        .add_directive("gt_daemon=info".parse()?)
        .add_directive("tower_http=info".parse()?);

    let result = if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}
