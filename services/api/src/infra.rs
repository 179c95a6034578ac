use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use student_attrition::workflows::catalog::{CatalogRepository, MetricOptions, RepositoryError};
use student_attrition::workflows::feedback::{FeedbackError, FeedbackRecord, FeedbackSink};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog documents keyed by their unique name.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalogRepository {
    records: Arc<Mutex<HashMap<String, MetricOptions>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("catalog store lock poisoned".to_string())
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn find_by_name(&self, name: &str) -> Result<Option<MetricOptions>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(name).cloned())
    }

    fn insert(&self, options: MetricOptions) -> Result<MetricOptions, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&options.name) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(options.name.clone(), options.clone());
        Ok(options)
    }

    fn delete_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.remove(name).is_some())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryFeedbackSink {
    records: Arc<Mutex<Vec<FeedbackRecord>>>,
}

impl FeedbackSink for InMemoryFeedbackSink {
    fn record(&self, record: FeedbackRecord) -> Result<(), FeedbackError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| FeedbackError::Unavailable("feedback store lock poisoned".to_string()))?;
        guard.push(record);
        Ok(())
    }
}

#[cfg(test)]
impl InMemoryFeedbackSink {
    pub(crate) fn records(&self) -> Vec<FeedbackRecord> {
        self.records.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}
