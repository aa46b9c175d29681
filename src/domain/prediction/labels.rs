//! Human-readable names for diseases and factors, and factor value formatting.

use serde_json::Value;

use crate::domain::features::codes;
use crate::domain::features::mapping::{MappingTable, GENDER, SMOKING_FREQUENCY, YES_NO};

const DISEASE_NAMES: &[(&str, &str)] = &[
    ("cvd", "Cardiovascular Disease"),
    ("diabetes", "Type 2 Diabetes"),
    ("hypertension", "Hypertension"),
    ("ckd", "Chronic Kidney Disease"),
];

const FACTOR_NAMES: &[(&str, &str)] = &[
    (codes::AGE, "Age"),
    (codes::GENDER, "Gender"),
    (codes::WAIST, "Waist Circumference"),
    (codes::BMI, "BMI"),
    ("BMXHT", "Height"),
    ("BMXWT", "Weight"),
    (codes::ALCOHOL, "Alcohol Consumption"),
    (codes::SMOKING_HISTORY, "Smoking History"),
    (codes::SMOKING_FREQUENCY, "Current Smoking"),
    (codes::PHYSICAL_ACTIVITY, "Sedentary Time"),
    (codes::METAL_OBJECTS, "Metal Objects in Body"),
    (codes::CANCER_HISTORY, "Cancer History"),
    (codes::ANGINA_HISTORY, "Angina History"),
    (codes::COPD_HISTORY, "COPD History"),
    (codes::ARTHRITIS_HISTORY, "Arthritis History"),
    (codes::SYSTOLIC_BP_1, "Systolic Blood Pressure"),
    (codes::SYSTOLIC_BP_2, "Systolic Blood Pressure (2nd reading)"),
    (codes::SYSTOLIC_BP_3, "Systolic Blood Pressure (3rd reading)"),
    (codes::SYSTOLIC_BP_4, "Systolic Blood Pressure (4th reading)"),
    ("BPXOSY1", "Systolic Blood Pressure"),
    (codes::DIASTOLIC_BP_1, "Diastolic Blood Pressure"),
    (codes::DIASTOLIC_BP_2, "Diastolic Blood Pressure (2nd reading)"),
    (codes::DIASTOLIC_BP_3, "Diastolic Blood Pressure (3rd reading)"),
    (codes::DIASTOLIC_BP_4, "Diastolic Blood Pressure (4th reading)"),
    (codes::HBA1C, "HbA1c"),
    (codes::FASTING_GLUCOSE, "Fasting Glucose"),
    ("LBDGLUSI", "Fasting Glucose"),
    (codes::TRIGLYCERIDES, "Triglycerides"),
    (codes::FVC, "Lung Capacity (FVC)"),
    (codes::LDL_CHOLESTEROL, "LDL Cholesterol"),
    ("LBDLDLSI", "LDL Cholesterol"),
    (codes::HDL_CHOLESTEROL, "HDL Cholesterol"),
    (codes::TOTAL_CHOLESTEROL, "Total Cholesterol"),
    (codes::ALT, "ALT (Liver Enzyme)"),
    (codes::URIC_ACID, "Uric Acid"),
    (codes::DIABETES_HISTORY, "Diabetes History"),
    (codes::HIGH_BP_HISTORY, "High Blood Pressure History"),
    (codes::RACE, "Race/Ethnicity"),
    (codes::FAMILY_INCOME, "Family Income to Poverty Ratio"),
];

const YES_NO_CODES: &[&str] = &[
    codes::SMOKING_HISTORY,
    codes::METAL_OBJECTS,
    codes::CANCER_HISTORY,
    codes::ANGINA_HISTORY,
    codes::COPD_HISTORY,
    codes::ARTHRITIS_HISTORY,
    codes::DIABETES_HISTORY,
    codes::HIGH_BP_HISTORY,
];

/// Display name for a disease identifier; unknown identifiers are upper-cased.
pub fn disease_display_name(code: &str) -> String {
    DISEASE_NAMES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

/// Display name for a feature code; unknown codes are returned as-is.
pub fn factor_display_name(code: &str) -> &str {
    FACTOR_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Formats a factor's raw value for display.
///
/// Gender, yes/no and smoking-frequency codes render as words; other numbers
/// render with one decimal place. Null values yield `None`.
pub fn format_factor_value(code: &str, value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => {
            let n = n.as_f64()?;
            Some(word_for_code(code, n).unwrap_or_else(|| format!("{:.1}", n)))
        }
        other => Some(other.to_string()),
    }
}

fn word_for_code(code: &str, value: f64) -> Option<String> {
    let table: &MappingTable = if code == codes::GENDER {
        &GENDER
    } else if YES_NO_CODES.contains(&code) {
        &YES_NO
    } else if code == codes::SMOKING_FREQUENCY {
        if value == 0.0 {
            return Some("Non-smoker".to_string());
        }
        &SMOKING_FREQUENCY
    } else {
        return None;
    };

    if value.fract() != 0.0 {
        return None;
    }
    table.label_for(value as i64).map(str::to_string)
}
