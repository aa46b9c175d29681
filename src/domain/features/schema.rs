//! Feature schema: the closed universes of feature codes and the survey
//! questions that feed them.
//!
//! The schema is the single place that decides which answers are required,
//! which MappingTable a categorical answer resolves through, and which answer
//! becomes required only when another answer takes a trigger value.

use once_cell::sync::Lazy;
use std::collections::BTreeSet;

use super::mapping::{
    MappingTable, ALCOHOL_FREQUENCY, FAMILY_INCOME, GENDER, NON_SMOKER_CODE, PHYSICAL_ACTIVITY,
    RACE, SMOKING_FREQUENCY, YES_CODE, YES_NO,
};
use super::{FeatureCode, FeatureMap};

/// Feature codes used by the pipeline.
pub mod codes {
    pub const AGE: &str = "RIDAGEYR";
    pub const GENDER: &str = "RIAGENDR";
    pub const WAIST: &str = "BMXWAIST";
    pub const BMI: &str = "BMXBMI";
    pub const ALCOHOL: &str = "ALQ121";
    pub const SMOKING_HISTORY: &str = "SMQ020";
    pub const SMOKING_FREQUENCY: &str = "SMQ040";
    pub const PHYSICAL_ACTIVITY: &str = "PAD680";
    pub const METAL_OBJECTS: &str = "OSQ230";
    pub const CANCER_HISTORY: &str = "MCQ500";
    pub const ANGINA_HISTORY: &str = "MCQ160D";
    pub const COPD_HISTORY: &str = "MCQ160P";
    pub const ARTHRITIS_HISTORY: &str = "MCQ160A";

    pub const SYSTOLIC_BP_1: &str = "BPXSY1";
    pub const SYSTOLIC_BP_2: &str = "BPXSY2";
    pub const SYSTOLIC_BP_3: &str = "BPXSY3";
    pub const SYSTOLIC_BP_4: &str = "BPXSY4";
    pub const DIASTOLIC_BP_1: &str = "BPXDI1";
    pub const DIASTOLIC_BP_2: &str = "BPXDI2";
    pub const DIASTOLIC_BP_3: &str = "BPXDI3";
    pub const DIASTOLIC_BP_4: &str = "BPXDI4";
    pub const HBA1C: &str = "LBXGH";
    pub const FASTING_GLUCOSE: &str = "LBXGLU";
    pub const TRIGLYCERIDES: &str = "LBXSTR";
    pub const FVC: &str = "LUXCAPM";
    pub const LDL_CHOLESTEROL: &str = "LBDLDL";
    pub const HDL_CHOLESTEROL: &str = "LBDHDD";
    pub const TOTAL_CHOLESTEROL: &str = "LBXTC";
    pub const ALT: &str = "LBXSATSI";
    pub const URIC_ACID: &str = "LBXSUA";
    pub const DIABETES_HISTORY: &str = "DIQ010";
    pub const HIGH_BP_HISTORY: &str = "BPQ020";
    pub const RACE: &str = "RIDRETH3";
    pub const FAMILY_INCOME: &str = "INDFMPIR";
}

/// UI keys for answers that only feed derived values.
pub mod keys {
    pub const WEIGHT: &str = "Weight";
    pub const HEIGHT: &str = "Height";
}

/// Which FeatureMap a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Universe {
    Required,
    Optional,
}

/// How a raw answer is interpreted.
#[derive(Debug, Clone, Copy)]
pub enum AnswerKind {
    /// A positive number copied verbatim.
    Measurement,
    /// A pill answer given either as the table's code or as its label.
    Coded(&'static MappingTable),
    /// A select-box label resolved through the table.
    Categorical(&'static MappingTable),
}

/// When an answer must be present for a submission to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    Optional,
    /// Required only when the answer under `trigger` resolves to `equals`;
    /// otherwise the feature is written as `otherwise`.
    RequiredIf {
        trigger: &'static str,
        equals: i64,
        otherwise: i64,
    },
}

/// Where a normalized answer is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Feature(&'static str, Universe),
    /// Feeds a derived value only (weight and height feed BMI).
    DerivedInput,
}

/// One survey question.
#[derive(Debug, Clone, Copy)]
pub struct AnswerField {
    /// Human-readable label used when reporting missing answers.
    pub label: &'static str,
    /// Key the presentation layer stores the raw answer under.
    pub key: &'static str,
    pub target: Target,
    pub kind: AnswerKind,
    pub requirement: Requirement,
}

impl AnswerField {
    const fn new(
        label: &'static str,
        key: &'static str,
        target: Target,
        kind: AnswerKind,
        requirement: Requirement,
    ) -> Self {
        Self {
            label,
            key,
            target,
            kind,
            requirement,
        }
    }

    /// Feature code this answer is written to, if any.
    pub fn code(&self) -> Option<&'static str> {
        match self.target {
            Target::Feature(code, _) => Some(code),
            Target::DerivedInput => None,
        }
    }
}

/// How a derived feature is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// weight (kg) / (height (m))^2, rounded to two decimals.
    BodyMassIndex {
        weight_key: &'static str,
        height_key: &'static str,
    },
}

/// A feature computed from other answers rather than entered directly.
#[derive(Debug, Clone, Copy)]
pub struct DerivedFeature {
    pub code: &'static str,
    pub universe: Universe,
    pub derivation: Derivation,
}

/// The complete schema.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    fields: Vec<AnswerField>,
    derived: Vec<DerivedFeature>,
}

impl FeatureSchema {
    /// Builds a schema, checking that the two universes are disjoint and
    /// that every conditional trigger refers to a declared field.
    pub fn new(fields: Vec<AnswerField>, derived: Vec<DerivedFeature>) -> Result<Self, SchemaError> {
        let schema = Self { fields, derived };
        schema.check()?;
        Ok(schema)
    }

    /// The schema used by the disease-warning prediction service.
    pub fn standard() -> &'static FeatureSchema {
        &STANDARD
    }

    pub fn fields(&self) -> &[AnswerField] {
        &self.fields
    }

    pub fn derived(&self) -> &[DerivedFeature] {
        &self.derived
    }

    pub fn field(&self, key: &str) -> Option<&AnswerField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Every code in one universe, including derived codes.
    pub fn universe(&self, universe: Universe) -> Vec<&'static str> {
        let answered = self.fields.iter().filter_map(|f| match f.target {
            Target::Feature(code, u) if u == universe => Some(code),
            _ => None,
        });
        let derived = self
            .derived
            .iter()
            .filter(|d| d.universe == universe)
            .map(|d| d.code);
        answered.chain(derived).collect()
    }

    pub fn required_codes(&self) -> Vec<&'static str> {
        self.universe(Universe::Required)
    }

    pub fn optional_codes(&self) -> Vec<&'static str> {
        self.universe(Universe::Optional)
    }

    /// A fresh map over the required universe.
    pub fn required_map(&self) -> FeatureMap {
        FeatureMap::new(self.required_codes().into_iter().map(FeatureCode::from_static))
    }

    /// A fresh map over the optional universe.
    pub fn optional_map(&self) -> FeatureMap {
        FeatureMap::new(self.optional_codes().into_iter().map(FeatureCode::from_static))
    }

    fn check(&self) -> Result<(), SchemaError> {
        let required: BTreeSet<_> = self.required_codes().into_iter().collect();
        let mut seen = BTreeSet::new();
        for code in self.optional_codes() {
            if required.contains(code) {
                return Err(SchemaError::OverlappingUniverses(code));
            }
        }
        for code in self.required_codes().into_iter().chain(self.optional_codes()) {
            if !seen.insert(code) {
                return Err(SchemaError::DuplicateCode(code));
            }
        }
        for field in &self.fields {
            if let Requirement::RequiredIf { trigger, .. } = field.requirement {
                if self.field(trigger).is_none() {
                    return Err(SchemaError::UnknownTrigger {
                        field: field.key,
                        trigger,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Inconsistencies detected while building a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("feature '{0}' appears in both the required and optional universes")]
    OverlappingUniverses(&'static str),

    #[error("feature '{0}' is declared more than once")]
    DuplicateCode(&'static str),

    #[error("field '{field}' depends on undeclared trigger '{trigger}'")]
    UnknownTrigger {
        field: &'static str,
        trigger: &'static str,
    },
}

fn standard_fields() -> Vec<AnswerField> {
    use AnswerKind::{Categorical, Coded, Measurement};
    use Requirement::{Always, Optional};
    use Universe::{Optional as Opt, Required as Req};

    let yes_no = Coded(&YES_NO);
    let smoking_rule = Requirement::RequiredIf {
        trigger: codes::SMOKING_HISTORY,
        equals: YES_CODE,
        otherwise: NON_SMOKER_CODE,
    };

    vec![
        // Basic information
        AnswerField::new("Age", codes::AGE, Target::Feature(codes::AGE, Req), Measurement, Always),
        AnswerField::new("Gender", codes::GENDER, Target::Feature(codes::GENDER, Req), Coded(&GENDER), Always),
        AnswerField::new("Weight", keys::WEIGHT, Target::DerivedInput, Measurement, Always),
        AnswerField::new("Height", keys::HEIGHT, Target::DerivedInput, Measurement, Always),
        AnswerField::new("Waist", codes::WAIST, Target::Feature(codes::WAIST, Req), Measurement, Always),
        AnswerField::new("Race", codes::RACE, Target::Feature(codes::RACE, Opt), Categorical(&RACE), Optional),
        AnswerField::new(
            "Annual Family Income",
            codes::FAMILY_INCOME,
            Target::Feature(codes::FAMILY_INCOME, Opt),
            Categorical(&FAMILY_INCOME),
            Optional,
        ),
        // Lifestyle
        AnswerField::new(
            "Physical Activity",
            codes::PHYSICAL_ACTIVITY,
            Target::Feature(codes::PHYSICAL_ACTIVITY, Req),
            Categorical(&PHYSICAL_ACTIVITY),
            Always,
        ),
        AnswerField::new(
            "Smoking History",
            codes::SMOKING_HISTORY,
            Target::Feature(codes::SMOKING_HISTORY, Req),
            yes_no,
            Always,
        ),
        AnswerField::new(
            "Smoking Frequency",
            codes::SMOKING_FREQUENCY,
            Target::Feature(codes::SMOKING_FREQUENCY, Req),
            Categorical(&SMOKING_FREQUENCY),
            smoking_rule,
        ),
        AnswerField::new(
            "Alcohol",
            codes::ALCOHOL,
            Target::Feature(codes::ALCOHOL, Req),
            Categorical(&ALCOHOL_FREQUENCY),
            Always,
        ),
        // Medical history
        AnswerField::new("Cancer History", codes::CANCER_HISTORY, Target::Feature(codes::CANCER_HISTORY, Req), yes_no, Always),
        AnswerField::new("Angina History", codes::ANGINA_HISTORY, Target::Feature(codes::ANGINA_HISTORY, Req), yes_no, Always),
        AnswerField::new("COPD History", codes::COPD_HISTORY, Target::Feature(codes::COPD_HISTORY, Req), yes_no, Always),
        AnswerField::new(
            "Arthritis History",
            codes::ARTHRITIS_HISTORY,
            Target::Feature(codes::ARTHRITIS_HISTORY, Req),
            yes_no,
            Always,
        ),
        AnswerField::new("Metal Objects", codes::METAL_OBJECTS, Target::Feature(codes::METAL_OBJECTS, Req), yes_no, Always),
        AnswerField::new(
            "Diabetes History",
            codes::DIABETES_HISTORY,
            Target::Feature(codes::DIABETES_HISTORY, Opt),
            yes_no,
            Optional,
        ),
        AnswerField::new(
            "High Blood Pressure History",
            codes::HIGH_BP_HISTORY,
            Target::Feature(codes::HIGH_BP_HISTORY, Opt),
            yes_no,
            Optional,
        ),
        // Laboratory values
        lab("Systolic Blood Pressure 1", codes::SYSTOLIC_BP_1),
        lab("Systolic Blood Pressure 2", codes::SYSTOLIC_BP_2),
        lab("Systolic Blood Pressure 3", codes::SYSTOLIC_BP_3),
        lab("Systolic Blood Pressure 4", codes::SYSTOLIC_BP_4),
        lab("Diastolic Blood Pressure 1", codes::DIASTOLIC_BP_1),
        lab("Diastolic Blood Pressure 2", codes::DIASTOLIC_BP_2),
        lab("Diastolic Blood Pressure 3", codes::DIASTOLIC_BP_3),
        lab("Diastolic Blood Pressure 4", codes::DIASTOLIC_BP_4),
        lab("HbA1c", codes::HBA1C),
        lab("Fasting Glucose", codes::FASTING_GLUCOSE),
        lab("Triglycerides", codes::TRIGLYCERIDES),
        lab("FVC", codes::FVC),
        lab("LDL Cholesterol", codes::LDL_CHOLESTEROL),
        lab("HDL Cholesterol", codes::HDL_CHOLESTEROL),
        lab("Total Cholesterol", codes::TOTAL_CHOLESTEROL),
        lab("ALT", codes::ALT),
        lab("Uric Acid", codes::URIC_ACID),
    ]
}

fn lab(label: &'static str, code: &'static str) -> AnswerField {
    AnswerField::new(
        label,
        code,
        Target::Feature(code, Universe::Optional),
        AnswerKind::Measurement,
        Requirement::Optional,
    )
}

static STANDARD: Lazy<FeatureSchema> = Lazy::new(|| FeatureSchema {
    fields: standard_fields(),
    derived: vec![DerivedFeature {
        code: codes::BMI,
        universe: Universe::Required,
        derivation: Derivation::BodyMassIndex {
            weight_key: keys::WEIGHT,
            height_key: keys::HEIGHT,
        },
    }],
});
