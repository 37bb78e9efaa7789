// serve.rs — Start the goal API server.
//
// Same behavior as the gt-daemon binary, reachable as `gt serve`.

use gt_daemon::{DaemonConfig, GtConfig, ServeArgs};

pub fn execute(config: &GtConfig, args: &ServeArgs) -> anyhow::Result<()> {
    let mut daemon_config = DaemonConfig::load_or_default(&config.daemon_config)?;
    daemon_config.apply(args);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(gt_daemon::serve(config.clone(), daemon_config))?;
    Ok(())
}
