//! Categorical label-to-code mapping tables.
//!
//! Each table is an ordered list of the labels a survey control offers and
//! the code the prediction service expects for that label. Lookups by an
//! empty or unrecognized label resolve to absent rather than failing.

use super::FeatureValue;

/// Code the service uses for a "yes" answer.
pub const YES_CODE: i64 = 1;

/// Code the service uses for a "no" answer.
pub const NO_CODE: i64 = 2;

/// Smoking-frequency code written when the respondent never smoked.
pub const NON_SMOKER_CODE: i64 = 0;

/// A static, ordered label → code dictionary.
#[derive(Debug, Clone, Copy)]
pub struct MappingTable {
    name: &'static str,
    entries: &'static [(&'static str, FeatureValue)],
}

impl MappingTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, FeatureValue)]) -> Self {
        Self { name, entries }
    }

    /// Table name, used in log output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolves a label to its code.
    ///
    /// Matching is exact after trimming, then case-insensitive. Empty or
    /// unknown labels return `None`.
    pub fn resolve(&self, label: &str) -> Option<FeatureValue> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .or_else(|| self.entries.iter().find(|(l, _)| l.eq_ignore_ascii_case(label)))
            .map(|(_, code)| *code)
    }

    /// Returns the label registered for an integer code.
    pub fn label_for(&self, code: i64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, value)| value.as_code() == Some(code))
            .map(|(label, _)| *label)
    }

    /// True if `code` is one of the table's integer codes.
    pub fn contains_code(&self, code: i64) -> bool {
        self.label_for(code).is_some()
    }

    /// Labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }
}

pub static GENDER: MappingTable = MappingTable::new(
    "gender",
    &[("Male", FeatureValue::Integer(1)), ("Female", FeatureValue::Integer(2))],
);

pub static YES_NO: MappingTable = MappingTable::new(
    "yes_no",
    &[
        ("Yes", FeatureValue::Integer(YES_CODE)),
        ("No", FeatureValue::Integer(NO_CODE)),
    ],
);

pub static RACE: MappingTable = MappingTable::new(
    "race",
    &[
        ("Mexican American", FeatureValue::Integer(1)),
        ("Other Hispanic", FeatureValue::Integer(2)),
        ("Non-Hispanic White", FeatureValue::Integer(3)),
        ("Non-Hispanic Black", FeatureValue::Integer(4)),
        ("Non-Hispanic Asian", FeatureValue::Integer(6)),
        ("Other Race/Multiracial", FeatureValue::Integer(7)),
    ],
);

/// Annual family income bracket → family income-to-poverty ratio.
pub static FAMILY_INCOME: MappingTable = MappingTable::new(
    "family_income",
    &[
        ("Less than $30k", FeatureValue::Decimal(1.0)),
        ("$30k to less than $45k", FeatureValue::Decimal(1.5)),
        ("$45k to less than $60k", FeatureValue::Decimal(2.5)),
        ("$60k to less than $120k", FeatureValue::Decimal(3.5)),
        ("$120k or more", FeatureValue::Decimal(5.0)),
    ],
);

/// Drinking frequency → days drank in the past 12 months.
pub static ALCOHOL_FREQUENCY: MappingTable = MappingTable::new(
    "alcohol_frequency",
    &[
        ("Never", FeatureValue::Integer(0)),
        ("Less than 1 day per month", FeatureValue::Integer(10)),
        ("1-2 days per month", FeatureValue::Integer(18)),
        ("3-4 days per month", FeatureValue::Integer(42)),
        ("2-3 days per week", FeatureValue::Integer(130)),
        ("4-5 days per week", FeatureValue::Integer(240)),
        ("Nearly every day/Everyday", FeatureValue::Integer(300)),
    ],
);

/// Daily sedentary time bucket → minutes.
pub static PHYSICAL_ACTIVITY: MappingTable = MappingTable::new(
    "physical_activity",
    &[
        ("Less than 1 hour", FeatureValue::Integer(30)),
        ("1-2 hours", FeatureValue::Integer(90)),
        ("2-4 hours", FeatureValue::Integer(180)),
        ("4-6 hours", FeatureValue::Integer(300)),
        ("6-8 hours", FeatureValue::Integer(420)),
        ("8-10 hours", FeatureValue::Integer(540)),
        ("More than 10 hours", FeatureValue::Integer(720)),
    ],
);

pub static SMOKING_FREQUENCY: MappingTable = MappingTable::new(
    "smoking_frequency",
    &[
        ("Every day", FeatureValue::Integer(1)),
        ("Some days", FeatureValue::Integer(2)),
        ("Not at all", FeatureValue::Integer(3)),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_labels() {
        assert_eq!(ALCOHOL_FREQUENCY.resolve("3-4 days per month"), Some(FeatureValue::Integer(42)));
        assert_eq!(PHYSICAL_ACTIVITY.resolve("1-2 hours"), Some(FeatureValue::Integer(90)));
        assert_eq!(SMOKING_FREQUENCY.resolve("Every day"), Some(FeatureValue::Integer(1)));
    }

    #[test]
    fn never_drinking_is_a_real_zero_not_absent() {
        assert_eq!(ALCOHOL_FREQUENCY.resolve("Never"), Some(FeatureValue::Integer(0)));
    }

    #[test]
    fn empty_and_unknown_labels_are_absent() {
        assert_eq!(RACE.resolve(""), None);
        assert_eq!(RACE.resolve("   "), None);
        assert_eq!(RACE.resolve("Martian"), None);
    }

    #[test]
    fn matching_falls_back_to_case_insensitive() {
        assert_eq!(YES_NO.resolve("no"), Some(FeatureValue::Integer(NO_CODE)));
        assert_eq!(GENDER.resolve(" male "), Some(FeatureValue::Integer(1)));
    }

    #[test]
    fn reverse_lookup_by_code() {
        assert_eq!(GENDER.label_for(2), Some("Female"));
        assert_eq!(SMOKING_FREQUENCY.label_for(3), Some("Not at all"));
        assert_eq!(YES_NO.label_for(9), None);
        assert!(RACE.contains_code(6));
        assert!(!RACE.contains_code(5));
    }

    #[test]
    fn labels_keep_declaration_order() {
        let labels: Vec<_> = SMOKING_FREQUENCY.labels().collect();
        assert_eq!(labels, vec!["Every day", "Some days", "Not at all"]);
    }
}
