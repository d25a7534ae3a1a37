use anyhow::{anyhow, Context, Result};
use tracing::error;

use crate::report::MonitorReport;
use crate::types::SlackPayload;

/// Slack rejects section text longer than this.
pub const MAX_SECTION_CHARS: usize = 3000;

/// Join `lines` under `title`, dropping trailing lines that would push the
/// text past `MAX_SECTION_CHARS`.
fn section_text(title: &str, lines: &[String]) -> String {
    let mut text = format!("*{}*", title);
    for (idx, line) in lines.iter().enumerate() {
        let remaining = lines.len() - idx;
        let marker = format!("\n…and {} more", remaining);
        let used = text.chars().count();
        let needed = line.chars().count() + 1;
        // Leave room for the marker unless this is the last line.
        let reserve = if remaining > 1 { marker.chars().count() + 8 } else { 0 };
        if used + needed + reserve > MAX_SECTION_CHARS {
            text.push_str(&marker);
            break;
        }
        text.push('\n');
        text.push_str(line);
    }
    text
}

fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => format!("{:.1}", v),
        Some(v) => format!("{:.1} {}", v, unit),
        None => "-".to_string(),
    }
}

pub fn build_slack_payload(report: &MonitorReport) -> SlackPayload {
    let mut blocks: Vec<serde_json::Value> = Vec::new();
    let title = match &report.config.monitor_name {
        Some(name) => format!("Vitals Alert - {}", name),
        None => "Vitals Alert".to_string(),
    };
    blocks.push(serde_json::json!({
        "type": "header",
        "text": {"type": "plain_text", "text": title}
    }));

    let summary = report.summary();
    let run_text = format!(
        "Started: {}\nCycles: {} ({} with alerts)\nLanguage: {}",
        report.started_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        summary.cycles,
        summary.failing_cycles,
        report.config.language,
    );
    blocks.push(serde_json::json!({
        "type": "section",
        "text": {"type": "mrkdwn", "text": run_text}
    }));

    // Per-vital section
    let mut vital_lines: Vec<String> = Vec::new();
    for t in &report.vitals {
        let band = t.last_band.map(|b| b.label()).unwrap_or("-");
        vital_lines.push(format!(
            "• `{}` last {} [{}] | out of range {}/{}",
            t.name,
            format_value(t.last_value, &t.unit),
            band,
            t.out_of_range,
            summary.cycles
        ));
    }
    if vital_lines.is_empty() {
        vital_lines.push("No vitals configured.".to_string());
    }
    blocks.push(serde_json::json!({
        "type": "section",
        "text": {"type": "mrkdwn", "text": section_text("Vitals", &vital_lines)}
    }));

    // Alerts section
    let mut alert_lines: Vec<String> = report
        .alerts
        .iter()
        .map(|(message, count)| match count {
            1 => format!("• {}", message),
            n => format!("• {} (x{})", message, n),
        })
        .collect();
    if alert_lines.is_empty() {
        alert_lines.push("No vitals out of range.".to_string());
    }
    blocks.push(serde_json::json!({
        "type": "section",
        "text": {"type": "mrkdwn", "text": section_text("Alerts", &alert_lines)}
    }));

    SlackPayload { text: None, blocks }
}

pub async fn send_to_slack(webhook_url: &str, payload: &SlackPayload) -> Result<()> {
    let client = reqwest::Client::new();
    let res = client
        .post(webhook_url)
        .json(payload)
        .send()
        .await
        .context("Failed to send Slack request")?;
    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        error!("Slack webhook failed: {} - {}", status, body);
        return Err(anyhow!("Slack webhook returned non-success status"));
    }
    Ok(())
}
