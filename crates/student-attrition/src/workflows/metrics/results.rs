use serde::{Deserialize, Serialize};

/// Per-category share of the prediction, as returned by the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryContribution {
    pub academic: f64,
    pub finance: f64,
    pub support_network: f64,
}

/// Display-ready outcome of one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResult {
    pub category_contribution: CategoryContribution,
    pub main_feature: String,
    pub feature_strength: f64,
    pub label: String,
    pub score: f64,
    pub optimum_category: String,
    pub optimum_category_value: f64,
}

impl PerformanceResult {
    /// Zero contributions, empty labels, zero score.
    pub fn baseline() -> Self {
        Self::default()
    }

    pub fn is_baseline(&self) -> bool {
        *self == Self::baseline()
    }

    /// Score as a percentage with two decimals. A zero score renders as an empty string.
    pub fn display_score(&self) -> String {
        if self.score == 0.0 || self.score.is_nan() {
            return String::new();
        }
        format!("{:.2}", self.score * 100.0)
    }
}

/// Contribution breakdown in the prediction service's naming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteFeatureDict {
    #[serde(default)]
    pub academic: f64,
    #[serde(default)]
    pub finance: f64,
    #[serde(default)]
    pub support_network: f64,
}

/// Response body of the prediction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteAnalysis {
    #[serde(default)]
    pub feature_dict: RemoteFeatureDict,
    #[serde(default)]
    pub feature_main: String,
    #[serde(default)]
    pub feature_strength: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub optimum_category: String,
    #[serde(default)]
    pub optimum_category_value: f64,
}

impl From<RemoteAnalysis> for PerformanceResult {
    fn from(remote: RemoteAnalysis) -> Self {
        Self {
            category_contribution: CategoryContribution {
                academic: remote.feature_dict.academic,
                finance: remote.feature_dict.finance,
                support_network: remote.feature_dict.support_network,
            },
            main_feature: remote.feature_main,
            feature_strength: remote.feature_strength,
            label: remote.label,
            score: remote.score,
            optimum_category: remote.optimum_category,
            optimum_category_value: remote.optimum_category_value,
        }
    }
}

/// Result plus the formatted score, as sent to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResultView {
    #[serde(flatten)]
    pub result: PerformanceResult,
    pub display_score: String,
}

impl From<PerformanceResult> for PerformanceResultView {
    fn from(result: PerformanceResult) -> Self {
        let display_score = result.display_score();
        Self {
            result,
            display_score,
        }
    }
}
