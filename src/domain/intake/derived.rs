//! Values computed from other answers.

/// Body-mass index from weight in kilograms and height in centimetres,
/// rounded to two decimals.
///
/// Returns `None` when either input is missing, non-positive or non-finite.
pub fn compute_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let height = height_cm.filter(|h| h.is_finite() && *h > 0.0)?;

    let height_m = height / 100.0;
    let bmi = weight / (height_m * height_m);
    bmi.is_finite().then(|| (bmi * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_rounds_to_two_decimals() {
        assert_eq!(compute_bmi(Some(70.0), Some(175.0)), Some(22.86));
        assert_eq!(compute_bmi(Some(80.0), Some(180.0)), Some(24.69));
    }

    #[test]
    fn bmi_is_absent_for_zero_height() {
        assert_eq!(compute_bmi(Some(70.0), Some(0.0)), None);
    }

    #[test]
    fn bmi_is_absent_when_an_input_is_missing() {
        assert_eq!(compute_bmi(None, Some(180.0)), None);
        assert_eq!(compute_bmi(Some(70.0), None), None);
    }

    #[test]
    fn bmi_is_absent_for_negative_inputs() {
        assert_eq!(compute_bmi(Some(-70.0), Some(175.0)), None);
        assert_eq!(compute_bmi(Some(70.0), Some(-175.0)), None);
    }
}
