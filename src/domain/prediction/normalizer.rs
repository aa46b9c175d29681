//! Response normalization: prediction response → display model.

use tracing::{debug, warn};

use super::display::{DisplayModel, PopulationOverview, RiskFactor, RiskScore};
use super::labels::{disease_display_name, factor_display_name, format_factor_value};
use super::recommendations::RecommendationTable;
use super::response::{FactorAttribution, PredictionBundle, PredictionResponse, ResponseEntry};
use super::status::RiskStatus;

/// Reshapes a prediction response into a [`DisplayModel`].
///
/// Each disease is handled on its own; an error marker or malformed entry
/// never prevents the other diseases from being displayed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Builds the display model. `fallback` supplies recommendation text for
    /// factors the live response did not describe.
    pub fn normalize(
        &self,
        response: &PredictionResponse,
        fallback: &RecommendationTable,
    ) -> DisplayModel {
        let mut model = DisplayModel::default();

        for (code, value) in response.entries() {
            let bundle = match ResponseEntry::classify(code, value) {
                ResponseEntry::Disease(bundle) => bundle,
                ResponseEntry::RoutingMetadata => {
                    debug!("Skipping routing metadata entry");
                    continue;
                }
                ResponseEntry::Error(message) => {
                    warn!(disease = code, "Disease could not be scored: {}", message);
                    continue;
                }
            };
            self.add_disease(&mut model, code, bundle);
        }

        model.factor_recommendations = collect_recommendations(response, fallback);
        model
    }

    fn add_disease(&self, model: &mut DisplayModel, code: &str, bundle: PredictionBundle) {
        let name = disease_display_name(code);
        if model.risk_scores.contains_key(&name) {
            warn!(
                disease = code,
                name = %name,
                "Duplicate disease identifier, replacing earlier result"
            );
        }

        model.risk_scores.insert(
            name.clone(),
            RiskScore {
                disease_code: code.to_string(),
                score: bundle.risk_score,
                status: RiskStatus::from_score(bundle.risk_score),
                confidence: bundle.confidence,
            },
        );

        let factors = rank_factors(&bundle.increasing_risk, &bundle.decreasing_risk);
        debug!(disease = %name, factors = factors.len(), "Ranked risk factors");
        model.risk_factors_by_disease.insert(name.clone(), factors);

        if let Some(mut comparison) = bundle.population_comparison {
            comparison.user_risk.get_or_insert(bundle.risk_score);

            let overview: &mut PopulationOverview = &mut model.population_overview;
            if overview.age_group.is_empty() {
                overview.age_group = comparison.age_range.clone();
                overview.gender = comparison.gender.clone();
            }
            overview
                .population_avg
                .insert(name.clone(), comparison.population_mean);

            model.comparison_data_by_disease.insert(name, comparison);
        }
    }
}

/// Enriches both attribution groups and ranks them by contribution,
/// largest first. The sort is stable: on ties, increasing-risk factors
/// precede decreasing-risk ones and each group keeps its own order.
pub fn rank_factors(
    increasing: &[FactorAttribution],
    decreasing: &[FactorAttribution],
) -> Vec<RiskFactor> {
    let mut factors: Vec<RiskFactor> = increasing
        .iter()
        .map(|a| enrich(a, true))
        .chain(decreasing.iter().map(|a| enrich(a, false)))
        .collect();

    factors.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    factors
}

fn enrich(attribution: &FactorAttribution, increases_risk: bool) -> RiskFactor {
    let code = attribution.feature.as_str();
    let name = factor_display_name(code).to_string();
    let value = attribution
        .value
        .as_ref()
        .and_then(|v| format_factor_value(code, v));
    let display = match &value {
        Some(v) => format!("{}: {}", name, v),
        None => name.clone(),
    };
    let importance = if attribution.importance.is_finite() {
        attribution.importance
    } else {
        0.0
    };

    RiskFactor {
        code: code.to_string(),
        name,
        value,
        display,
        modifiable: attribution.modifiable,
        contribution: importance.abs() * 100.0,
        importance,
        increases_risk,
        recommendation: attribution.recommendation.clone(),
    }
}

/// Live recommendation texts first, then static fallback entries for codes
/// the live response did not cover.
fn collect_recommendations(
    response: &PredictionResponse,
    fallback: &RecommendationTable,
) -> RecommendationTable {
    let mut table = RecommendationTable::new();

    for (code, value) in response.entries() {
        let ResponseEntry::Disease(bundle) = ResponseEntry::classify(code, value) else {
            continue;
        };
        for attribution in bundle.increasing_risk.iter().chain(&bundle.decreasing_risk) {
            if let Some(text) = attribution.recommendation.as_deref().filter(|t| !t.is_empty()) {
                table.insert(attribution.feature.as_str(), text);
            }
        }
    }

    table.overlay_fallback(fallback);
    table
}
