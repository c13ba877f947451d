//! JSON output formatting with token efficiency.

use serde_json::{Value, json};

use crate::views::ImpactReport;

/// Create a compact report representation for JSON output.
///
/// Empty sections are omitted entirely; consumers test for presence
/// instead of iterating empty arrays.
#[must_use]
pub fn compact_report(report: &ImpactReport) -> Value {
    let mut obj = json!({
        "organization": report.organization,
        "generated_at": report.generated_at.to_rfc3339(),
        "metrics": {
            "publications": report.key_metrics.total_publications,
            "citations": report.key_metrics.total_citations,
            "organisations": report.key_metrics.affiliated_organisations,
            "countries": report.key_metrics.affiliated_countries,
        },
    });

    if !report.top_cited.is_empty() {
        obj["top_cited"] = json!(
            report
                .top_cited
                .iter()
                .map(|a| {
                    json!({
                        "id": a.id,
                        "title": a.title,
                        "citations": a.citations,
                        "journal": a.journal,
                        "date": a.date,
                    })
                })
                .collect::<Vec<_>>()
        );
    }

    if !report.most_recent.is_empty() {
        obj["most_recent"] = json!(report.most_recent);
    }

    if !report.last_six_months.is_empty() {
        obj["last_six_months"] = json!({
            "window_start": report.window_start,
            "papers": report.last_six_months,
        });
    }

    if !report.organisations.is_empty() {
        obj["organisations"] = json!(report.organisations);
    }

    if !report.countries.is_empty() {
        obj["countries"] = json!(report.countries);
    }

    if !report.citation_distribution.is_empty() {
        obj["citation_distribution"] = json!(report.citation_distribution);
    }

    obj
}
