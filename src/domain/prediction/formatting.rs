//! Small display helpers for percentages and ranks.

/// Formats a percentage with at most two decimals, trimming trailing zeros.
///
/// `None` renders as "0%".
pub fn format_percentage(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "0%".to_string();
    };
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", text)
}

/// Formats a rank as an English ordinal (1st, 2nd, 3rd, 4th, 11th, 21st).
pub fn format_ordinal(n: u32) -> String {
    let suffix = if (10..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_percentages_have_no_decimals() {
        assert_eq!(format_percentage(Some(45.0)), "45%");
        assert_eq!(format_percentage(Some(0.0)), "0%");
    }

    #[test]
    fn fractional_percentages_trim_trailing_zeros() {
        assert_eq!(format_percentage(Some(12.5)), "12.5%");
        assert_eq!(format_percentage(Some(33.333)), "33.33%");
        assert_eq!(format_percentage(Some(7.999)), "8%");
    }

    #[test]
    fn missing_percentage_renders_zero() {
        assert_eq!(format_percentage(None), "0%");
    }

    #[test]
    fn ordinals() {
        assert_eq!(format_ordinal(1), "1st");
        assert_eq!(format_ordinal(2), "2nd");
        assert_eq!(format_ordinal(3), "3rd");
        assert_eq!(format_ordinal(4), "4th");
        assert_eq!(format_ordinal(11), "11th");
        assert_eq!(format_ordinal(12), "12th");
        assert_eq!(format_ordinal(21), "21st");
        assert_eq!(format_ordinal(113), "113th");
    }
}
