use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::profile::{CompletionSummary, MetricProfile, MetricValue};
use super::results::PerformanceResult;
use super::schema::MetricCategory;
use super::MetricError;

/// Shared "analysis in progress" marker. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct InFlightFlag(Arc<AtomicBool>);

impl InFlightFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Sets the flag until the returned guard drops.
    pub(crate) fn raise(&self) -> InFlightGuard<'_> {
        self.0.store(true, Ordering::Release);
        InFlightGuard { flag: self }
    }
}

pub(crate) struct InFlightGuard<'a> {
    flag: &'a InFlightFlag,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.clear();
    }
}

/// One user's form state: answers, analysis flag and the latest result.
#[derive(Debug, Default)]
pub struct MetricSession {
    pub(crate) profile: MetricProfile,
    pub(crate) analysing: InFlightFlag,
    pub(crate) results_exist: bool,
    pub(crate) results: PerformanceResult,
}

impl MetricSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: MetricProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn set_field(&mut self, name: &str, value: Option<MetricValue>) -> Result<(), MetricError> {
        self.profile.set_field(name, value)
    }

    pub fn profile(&self) -> &MetricProfile {
        &self.profile
    }

    pub fn completion(&self) -> f64 {
        self.profile.completion()
    }

    pub fn category_completion(&self, category: MetricCategory) -> f64 {
        self.profile.category_completion(category)
    }

    pub fn completion_summary(&self) -> CompletionSummary {
        self.profile.completion_summary()
    }

    pub fn is_complete(&self) -> bool {
        self.profile.is_complete()
    }

    pub fn is_analysing(&self) -> bool {
        self.analysing.is_set()
    }

    /// Handle for observers that need to check the flag before submitting.
    pub fn in_flight(&self) -> InFlightFlag {
        self.analysing.clone()
    }

    pub fn results_exist(&self) -> bool {
        self.results_exist
    }

    pub fn results(&self) -> &PerformanceResult {
        &self.results
    }

    pub fn display_score(&self) -> String {
        self.results.display_score()
    }

    pub(crate) fn store_results(&mut self, results: PerformanceResult) {
        self.results = results;
        self.results_exist = true;
    }

    pub fn reset_results(&mut self) {
        self.results = PerformanceResult::baseline();
        self.results_exist = false;
    }

    /// Clears every answer, the result and the analysis flag.
    pub fn reset(&mut self) {
        self.profile.clear();
        self.reset_results();
        self.analysing.clear();
    }
}
