//! HTML report view: the document that gets rasterized for PDF export.
//!
//! Layout mirrors the on-screen report: enrichment table first, then one card per gene
//! with a figure per viewer kind. All interpolated text is escaped.

use std::fmt::Write;

use crate::models::{AnalysisReport, EnrichmentTerm, GeneReport, GeneVisual};

const REPORT_CSS: &str = "\
body { font-family: 'Inter', 'Helvetica Neue', Arial, sans-serif; color: #1e293b; background: #ffffff; margin: 0; }\n\
.report { padding: 32px; }\n\
h2 { font-size: 28px; margin: 0 0 4px; }\n\
.generated-at { color: #64748b; font-size: 13px; margin-bottom: 32px; }\n\
h3 { font-size: 22px; color: #334155; border-bottom: 2px solid #e2e8f0; padding-bottom: 8px; margin: 40px 0 16px; }\n\
table { width: 100%; border-collapse: collapse; font-size: 14px; }\n\
th { text-align: left; text-transform: uppercase; font-size: 12px; color: #64748b; background: #f8fafc; padding: 12px 24px; }\n\
td { padding: 16px 24px; border-top: 1px solid #e2e8f0; color: #64748b; }\n\
td.go-id { color: #0f172a; font-weight: 600; white-space: nowrap; }\n\
.gene-card { border: 1px solid #e2e8f0; border-radius: 8px; margin-bottom: 32px; break-inside: avoid; }\n\
.gene-card h4 { margin: 0; padding: 16px 24px; background: #f8fafc; color: #075985; font-size: 18px; }\n\
.visual { padding: 24px; }\n\
.visual h5 { margin: 0 0 8px; color: #475569; font-size: 15px; }\n\
.visual img { width: 100%; height: auto; border-radius: 4px; border: 1px solid #e2e8f0; }\n\
.visual p { font-style: italic; color: #64748b; font-size: 14px; margin-top: 12px; }\n\
.empty { color: #64748b; }\n";

/// Renders the whole report as a standalone HTML document.
pub fn render_report_html(report: &AnalysisReport) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Gene Analysis Report</title>\n<style>\n");
    html.push_str(REPORT_CSS);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"report\">\n");
    html.push_str("<h2>Analysis Report</h2>\n");
    let _ = writeln!(
        html,
        "<div class=\"generated-at\">Generated {}</div>",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    html.push_str("<section>\n<h3>Gene Ontology Enrichment Summary</h3>\n");
    render_enrichment_table(&mut html, &report.enrichment_terms);
    html.push_str("</section>\n");

    html.push_str("<section>\n<h3>Individual Gene Analysis</h3>\n");
    for gene_report in &report.gene_reports {
        render_gene_card(&mut html, gene_report);
    }
    html.push_str("</section>\n</div>\n</body>\n</html>\n");
    html
}

fn render_enrichment_table(html: &mut String, terms: &[EnrichmentTerm]) {
    if terms.is_empty() {
        html.push_str("<p class=\"empty\">No significant GO enrichment terms found.</p>\n");
        return;
    }

    html.push_str("<table>\n<thead><tr><th>GO Term</th><th>Description</th><th>P-Value</th><th>Study Count</th></tr></thead>\n<tbody>\n");
    for term in terms {
        let _ = writeln!(
            html,
            "<tr><td class=\"go-id\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&term.go_id),
            escape_html(&term.name),
            format_p_value(term.p_value),
            term.study_count
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

fn render_gene_card(html: &mut String, gene_report: &GeneReport) {
    let gene = escape_html(gene_report.gene_id.as_str());
    html.push_str("<div class=\"gene-card\">\n");
    let _ = writeln!(html, "<h4>{gene}</h4>");
    for visual in &gene_report.visuals {
        render_visual(html, &gene, visual);
    }
    html.push_str("</div>\n");
}

fn render_visual(html: &mut String, escaped_gene: &str, visual: &GeneVisual) {
    let label = escape_html(visual.kind.label());
    let _ = writeln!(
        html,
        "<div class=\"visual\">\n<h5>{label}</h5>\n<img src=\"{}\" alt=\"Visualization for {escaped_gene} - {label}\">\n<p>{}</p>\n</div>",
        escape_html(visual.image.src()),
        escape_html(&visual.description)
    );
}

/// Scientific notation with two decimals, e.g. `1.20e-3`.
pub fn format_p_value(p_value: f64) -> String {
    format!("{p_value:.2e}")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
