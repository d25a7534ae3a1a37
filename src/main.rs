use anyhow::{anyhow, Result};
use tracing::{info, warn};

use vitals_monitor::{
    build_slack_payload, load_config, load_vitals, send_to_slack, CollectingNotifier,
    ConsoleNotifier, Monitor, MonitorReport, SimulatedSensor, TracingSink, TranslatingNotifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    let vitals = load_vitals(&cfg)?;
    info!(
        "monitoring {} vitals for {} cycle(s), language = {}",
        vitals.len(),
        cfg.cycles,
        cfg.language
    );

    let mut sensor = match cfg.seed {
        Some(seed) => SimulatedSensor::with_seed(vitals.specs(), seed),
        None => SimulatedSensor::new(vitals.specs()),
    };

    // Alerts go to the console immediately; they are only kept for the Slack
    // batch when a webhook is configured.
    let collected = CollectingNotifier::new();
    let batch = cfg.slack_webhook_url.as_ref().map(|_| &collected);
    let notifier = TranslatingNotifier::new((ConsoleNotifier::new(), batch), cfg.language);
    let monitor = Monitor::new(&vitals, &notifier, &TracingSink);
    let mut report = MonitorReport::new(cfg.clone(), vitals.specs());

    for cycle in 1..=cfg.cycles {
        let result = monitor.poll(&mut sensor)?;
        info!(cycle, overall = result.overall, "snapshot evaluated");
        report.add_result(&result);
        report.add_alerts(collected.take());
    }

    let summary = report.summary();
    info!(
        "Monitoring summary: {} of {} cycles passed, {} out-of-range readings",
        summary.passing_cycles(),
        summary.cycles,
        summary.total_alerts()
    );

    // Send to Slack only if there are alerts
    if summary.has_alerts() {
        match &cfg.slack_webhook_url {
            Some(url) => {
                info!("Alerts raised, sending notification to Slack");
                let payload = build_slack_payload(&report);
                send_to_slack(url, &payload).await?;
            }
            None => info!("Alerts raised, no SLACK_WEBHOOK_URL configured"),
        }
    } else {
        info!("All vitals within range, skipping Slack notification");
    }

    if cfg.exit_on_alert && summary.has_alerts() {
        warn!("exiting with failure: EXIT_ON_ALERT is set");
        return Err(anyhow!(
            "{} out-of-range readings across {} cycles",
            summary.total_alerts(),
            summary.failing_cycles
        ));
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
