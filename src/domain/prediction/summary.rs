//! Plain-text rendering of a display model, for terminals and logs.

use std::fmt::Write;

use super::display::DisplayModel;
use super::formatting::{format_ordinal, format_percentage};

/// Renders one block per disease: score and status badge, the `top`
/// strongest factors, and the population percentile when known.
pub fn render_summary(model: &DisplayModel, top: usize) -> String {
    let mut out = String::new();

    for (name, score) in &model.risk_scores {
        let _ = writeln!(
            out,
            "{}: {} [{}]",
            name,
            format_percentage(Some(score.score)),
            score.status.short_label()
        );

        for (rank, factor) in model.top_factors(name, top).iter().enumerate() {
            let direction = if factor.increases_risk {
                "increases risk"
            } else {
                "decreases risk"
            };
            let _ = writeln!(
                out,
                "  {:<5}{} ({})",
                format_ordinal(rank as u32 + 1),
                factor.display,
                direction
            );
        }

        if let Some(comparison) = model.comparison_data_by_disease.get(name) {
            let percentile = comparison.percentile.round().clamp(0.0, 100.0) as u32;
            let _ = writeln!(
                out,
                "  {} percentile for {} {}",
                format_ordinal(percentile),
                comparison.gender,
                comparison.age_range
            );
        }
    }

    if out.is_empty() {
        out.push_str("No diseases could be scored.\n");
    }
    out
}
