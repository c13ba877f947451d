//! Markdown output formatting.
//!
//! One section per view, mirroring the dashboard page. Empty sections
//! render an informational placeholder instead of an empty table.

use crate::views::ImpactReport;

/// Format the full report as a Markdown document.
#[must_use]
pub fn format_report_markdown(report: &ImpactReport) -> String {
    let mut output = format!(
        "# Research Impact Report: {}\n\n**Generated:** {}\n\n",
        report.organization,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    output.push_str("## Key Metrics\n\n");
    output.push_str("| Metric | Value |\n|---|---|\n");
    output.push_str(&format!(
        "| Total Publications | {} |\n",
        report.key_metrics.total_publications
    ));
    output.push_str(&format!("| Total Citations | {} |\n", report.key_metrics.total_citations));
    output.push_str(&format!(
        "| Affiliated Organisations | {} |\n",
        report.key_metrics.affiliated_organisations
    ));
    output.push_str(&format!(
        "| Affiliated Countries | {} |\n\n",
        report.key_metrics.affiliated_countries
    ));

    output.push_str(&top_cited_section(report));
    output.push_str(&organisations_section(report));
    output.push_str(&countries_section(report));
    output.push_str(&recent_section(report));
    output.push_str(&six_months_section(report));
    output.push_str(&distribution_section(report));

    output
}

fn top_cited_section(report: &ImpactReport) -> String {
    let mut output = format!("## Top {} Most Cited Articles\n\n", report.top_cited.len().max(5));

    if report.top_cited.is_empty() {
        output.push_str("No cited articles found.\n\n");
        return output;
    }

    output.push_str("| Title | Citations | Journal | Publication Date |\n|---|---|---|---|\n");
    for article in &report.top_cited {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape(&article.title),
            article.citations,
            escape(article.journal.as_deref().unwrap_or("")),
            article.date.as_deref().unwrap_or("")
        ));
    }
    output.push('\n');
    output
}

fn organisations_section(report: &ImpactReport) -> String {
    let mut output = String::from("## Affiliated Organisations\n\n");

    if report.organisations.is_empty() {
        output.push_str("No affiliated organisations found.\n\n");
        return output;
    }

    output.push_str(&format!("**Total Organisations:** {}\n\n", report.organisations.len()));
    if let Some(top) = report.organisations.first() {
        output.push_str(&format!("**Top Contributing Organisation:** {}\n\n", escape(&top.name)));
    }

    output.push_str("| Organisation | Country | Researchers | Total Citations |\n|---|---|---|---|\n");
    for entry in &report.organisations {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape(&entry.name),
            escape(entry.country.as_deref().unwrap_or("Unknown")),
            entry.researcher_count,
            entry.times_cited
        ));
    }
    output.push('\n');
    output
}

fn countries_section(report: &ImpactReport) -> String {
    let mut output = String::from("## Affiliated Countries\n\n");

    if report.countries.is_empty() {
        output.push_str("No affiliated countries found.\n\n");
        return output;
    }

    output.push_str("| Country | Publications |\n|---|---|\n");
    for entry in &report.countries {
        output.push_str(&format!(
            "| {} | {} |\n",
            escape(&entry.country),
            entry.publication_count
        ));
    }
    output.push('\n');
    output
}

fn recent_section(report: &ImpactReport) -> String {
    let mut output = String::from("## Most Recent Papers\n\n");

    if report.most_recent.is_empty() {
        output.push_str("No recent papers found.\n\n");
        return output;
    }

    output.push_str(
        "| Title | First Author | Publication Date | Journal | Citations |\n|---|---|---|---|---|\n",
    );
    for paper in &report.most_recent {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            escape(&paper.title),
            escape(paper.first_author.as_deref().unwrap_or("")),
            paper.date.as_deref().unwrap_or(""),
            escape(paper.journal.as_deref().unwrap_or("")),
            paper.citations
        ));
    }
    output.push('\n');
    output
}

fn six_months_section(report: &ImpactReport) -> String {
    let mut output = String::from("## Papers Published in the Last 6 Months\n\n");

    if report.last_six_months.is_empty() {
        output.push_str("No papers found in the last 6 months.\n\n");
        return output;
    }

    output.push_str(&format!(
        "Found {} papers published since {}.\n\n",
        report.last_six_months.len(),
        report.window_start.format("%B %d, %Y")
    ));

    output.push_str(
        "| Title | First Author | Publication Date | Journal | Citations |\n|---|---|---|---|---|\n",
    );
    for paper in &report.last_six_months {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            escape(&paper.title),
            escape(paper.first_author.as_deref().unwrap_or("")),
            paper.date.as_deref().unwrap_or(""),
            escape(paper.journal.as_deref().unwrap_or("")),
            paper.citations
        ));
    }
    output.push('\n');
    output
}

fn distribution_section(report: &ImpactReport) -> String {
    let mut output = String::from("## Citation Distribution\n\n");

    if report.citation_distribution.is_empty() {
        output.push_str("No citation data available.\n\n");
        return output;
    }

    output.push_str("| Citations | Publications |\n|---|---|\n");
    for bucket in &report.citation_distribution {
        let range = if bucket.lower == bucket.upper {
            bucket.lower.to_string()
        } else {
            format!("{} to {}", bucket.lower, bucket.upper)
        };
        output.push_str(&format!("| {} | {} |\n", range, bucket.count));
    }
    output.push('\n');
    output
}

/// Keep cell text from breaking the table.
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
