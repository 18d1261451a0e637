use anyhow::Context;

use dealerdesk_portal::{JsonFileSource, OrdersDashboard, PortalConfig};

fn main() -> anyhow::Result<()> {
    let config = PortalConfig::from_env().context("invalid configuration")?;
    dealerdesk_observability::tracing::init(config.log_format);

    tracing::info!(
        snapshot = %config.snapshot_path.display(),
        refresh_secs = config.refresh_interval.as_secs(),
        "starting dealerdesk report"
    );

    let source = JsonFileSource::new(&config.snapshot_path);
    let dashboard = OrdersDashboard::new(source, &config);

    loop {
        let report = dashboard
            .refresh()
            .with_context(|| format!("refreshing from {}", config.snapshot_path.display()))?;
        println!("{}", serde_json::to_string_pretty(&report)?);

        if dashboard.refresh_interval().is_zero() {
            break;
        }
        std::thread::sleep(dashboard.refresh_interval());
    }

    Ok(())
}
