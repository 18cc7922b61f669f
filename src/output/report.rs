use crate::core::Report;
use crate::utils::format_hm;

/// Plain report text: a title line, then `<tag>: H:MM` per tag.
pub(crate) fn render_report_text(report: &Report) -> String {
    let mut lines = vec![report.title()];
    lines.extend(
        report
            .totals
            .iter()
            .map(|(tag, total)| format!("{tag}: {}", format_hm(*total))),
    );
    lines.join("\n")
}

pub(crate) fn output_report_json(report: &Report) -> String {
    let tags: Vec<serde_json::Value> = report
        .totals
        .iter()
        .map(|(tag, total)| {
            serde_json::json!({
                "tag": tag,
                "seconds": total.num_seconds(),
                "duration": format_hm(*total),
            })
        })
        .collect();
    let output = serde_json::json!({
        "range": report.range,
        "title": report.title(),
        "tags": tags,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
