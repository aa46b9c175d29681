//! Display model: the presentation-ready shape of a prediction response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::recommendations::{RecommendationTable, DEFAULT_RECOMMENDATION};
use super::response::PopulationComparison;
use super::status::RiskStatus;

/// Score card for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Identifier the service used for this disease.
    pub disease_code: String,
    pub score: f64,
    pub status: RiskStatus,
    pub confidence: f64,
}

/// One enriched, rankable factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub code: String,
    pub name: String,
    pub value: Option<String>,
    /// "<name>: <value>", or just the name when there is no value.
    pub display: String,
    pub modifiable: bool,
    /// `abs(importance) * 100`; used for ranking only.
    pub contribution: f64,
    pub importance: f64,
    pub increases_risk: bool,
    pub recommendation: Option<String>,
}

/// Age group, gender and per-disease population means across all diseases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationOverview {
    pub age_group: String,
    pub gender: String,
    pub population_avg: BTreeMap<String, f64>,
}

/// Everything a presentation layer needs, keyed by disease display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub risk_scores: BTreeMap<String, RiskScore>,
    pub risk_factors_by_disease: BTreeMap<String, Vec<RiskFactor>>,
    pub comparison_data_by_disease: BTreeMap<String, PopulationComparison>,
    pub population_overview: PopulationOverview,
    pub factor_recommendations: RecommendationTable,
}

impl DisplayModel {
    pub fn is_empty(&self) -> bool {
        self.risk_scores.is_empty()
    }

    pub fn diseases(&self) -> impl Iterator<Item = &str> {
        self.risk_scores.keys().map(String::as_str)
    }

    /// Ranked factors for a disease; empty when the disease is unknown.
    pub fn factors_for(&self, disease: &str) -> &[RiskFactor] {
        self.risk_factors_by_disease
            .get(disease)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The `n` highest-ranked factors for a disease.
    pub fn top_factors(&self, disease: &str, n: usize) -> &[RiskFactor] {
        let factors = self.factors_for(disease);
        &factors[..n.min(factors.len())]
    }

    pub fn increasing(&self, disease: &str) -> impl Iterator<Item = &RiskFactor> {
        self.factors_for(disease).iter().filter(|f| f.increases_risk)
    }

    pub fn decreasing(&self, disease: &str) -> impl Iterator<Item = &RiskFactor> {
        self.factors_for(disease).iter().filter(|f| !f.increases_risk)
    }

    /// Text to show beside a factor: the bundle's own text, then the
    /// fallback table, then generic advice for modifiable factors.
    pub fn recommendation_for<'a>(&'a self, factor: &'a RiskFactor) -> Option<&'a str> {
        factor
            .recommendation
            .as_deref()
            .filter(|r| !r.is_empty())
            .or_else(|| self.factor_recommendations.get(&factor.code))
            .or_else(|| factor.modifiable.then_some(DEFAULT_RECOMMENDATION))
    }
}
