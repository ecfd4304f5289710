use crate::types::SummaryResult;

/// Format a share in [0, 1] as a whole percentage
pub fn format_percent(share: f64) -> String {
    format!("{:.0}%", share * 100.0)
}

/// One-line sentiment breakdown, e.g. `10 comments | 👍 7 (70%) | 👎 3 (30%)`
pub fn format_sentiment(result: &SummaryResult) -> String {
    match result.positive_share() {
        Some(positive) => format!(
            "{} comments | 👍 {} ({}) | 👎 {} ({})",
            result.n_comments,
            result.n_positive,
            format_percent(positive),
            result.n_negative,
            format_percent(result.n_negative as f64 / result.n_comments as f64)
        ),
        None => format!(
            "{} comments | 👍 {} | 👎 {}",
            result.n_comments, result.n_positive, result.n_negative
        ),
    }
}

/// Format a summary result as human-readable markdown
pub fn format_summary_readable(result: &SummaryResult, show_chunks: bool) -> String {
    let mut output = String::new();

    output.push_str("# Summary\n\n");
    output.push_str(result.summary.trim());
    output.push_str("\n\n");

    output.push_str(&format!("**Sentiment:** {}\n", format_sentiment(result)));

    if show_chunks && !result.raw_summary_chunks.is_empty() {
        output.push_str("\n## Summary Chunks\n\n");
        for (i, chunk) in result.raw_summary_chunks.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, chunk.trim()));
        }
    }

    output
}
