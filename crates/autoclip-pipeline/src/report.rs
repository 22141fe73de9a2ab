//! End-of-run outcome table.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use crate::orchestrator::{ItemOutcome, RunReport};

const REPORT_WIDTH: u16 = 120;

/// One row per item: source, base name, status, outcome, stage, detail.
pub fn render_report(report: &RunReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(REPORT_WIDTH)
        .set_header(vec!["Source", "Name", "Status", "Outcome", "Stage", "Detail"]);

    for item in &report.items {
        let detail = match &item.outcome {
            ItemOutcome::Completed if !item.remote_ids.is_empty() => item
                .remote_ids
                .iter()
                .map(|(platform, id)| format!("{}: {}", platform, id))
                .collect::<Vec<_>>()
                .join(", "),
            ItemOutcome::Completed => format!("{} clip(s)", item.clips.len()),
            other => other.reason().unwrap_or_default().to_string(),
        };

        table.add_row(vec![
            item.url.clone(),
            item.base_name.clone().unwrap_or_else(|| "-".to_string()),
            item.status.to_string(),
            item.outcome.label().to_string(),
            item.outcome
                .stage()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            detail,
        ]);
    }

    format!(
        "{}\n{} completed, {} skipped, {} failed",
        table,
        report.completed(),
        report.skipped(),
        report.failed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::ItemReport;
    use autoclip_models::{ItemStatus, Platform, Stage};
    use uuid::Uuid;

    #[test]
    fn test_render_report() {
        let report = RunReport {
            run_id: Uuid::new_v4(),
            items: vec![
                ItemReport {
                    url: "https://youtu.be/a".to_string(),
                    base_name: Some("Aula".to_string()),
                    status: ItemStatus::Published,
                    outcome: ItemOutcome::Completed,
                    clips: Vec::new(),
                    remote_ids: vec![(Platform::Shorts, "vid123".to_string())],
                },
                ItemReport {
                    url: "https://youtu.be/b".to_string(),
                    base_name: None,
                    status: ItemStatus::Failed(Stage::Acquire),
                    outcome: ItemOutcome::Failed {
                        stage: Stage::Acquire,
                        reason: "HTTP Error 404".to_string(),
                    },
                    clips: Vec::new(),
                    remote_ids: Vec::new(),
                },
            ],
        };

        let rendered = render_report(&report);
        assert!(rendered.contains("shorts: vid123"));
        assert!(rendered.contains("HTTP Error 404"));
        assert!(rendered.contains("failed at acquire"));
        assert!(rendered.ends_with("1 completed, 0 skipped, 1 failed"));
    }
}
