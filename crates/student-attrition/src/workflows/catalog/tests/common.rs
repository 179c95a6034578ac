use std::collections::HashMap;
use std::sync::{Arc, Barrier, Mutex};

use crate::workflows::catalog::{
    CatalogProvisioner, CatalogRepository, MetricOptions, RepositoryError, VocabularyRevision,
};

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<String, MetricOptions>>,
    inserts: Mutex<usize>,
}

impl MemoryRepository {
    pub(super) fn seeded(options: MetricOptions) -> Self {
        let repository = Self::default();
        repository
            .records
            .lock()
            .unwrap()
            .insert(options.name.clone(), options);
        repository
    }

    pub(super) fn insert_attempts(&self) -> usize {
        *self.inserts.lock().unwrap()
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl CatalogRepository for MemoryRepository {
    fn find_by_name(&self, name: &str) -> Result<Option<MetricOptions>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(name).cloned())
    }

    fn insert(&self, options: MetricOptions) -> Result<MetricOptions, RepositoryError> {
        *self.inserts.lock().unwrap() += 1;
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&options.name) {
            return Err(RepositoryError::Conflict);
        }
        records.insert(options.name.clone(), options.clone());
        Ok(options)
    }

    fn delete_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        Ok(self.records.lock().unwrap().remove(name).is_some())
    }
}

/// Both callers see an empty store before either inserts, so the second insert
/// always hits the unique key.
pub(super) struct RacingRepository {
    inner: MemoryRepository,
    barrier: Barrier,
}

impl RacingRepository {
    pub(super) fn new(callers: usize) -> Self {
        Self {
            inner: MemoryRepository::default(),
            barrier: Barrier::new(callers),
        }
    }

    pub(super) fn inner(&self) -> &MemoryRepository {
        &self.inner
    }
}

impl CatalogRepository for RacingRepository {
    fn find_by_name(&self, name: &str) -> Result<Option<MetricOptions>, RepositoryError> {
        let found = self.inner.find_by_name(name)?;
        if found.is_none() {
            self.barrier.wait();
        }
        Ok(found)
    }

    fn insert(&self, options: MetricOptions) -> Result<MetricOptions, RepositoryError> {
        self.inner.insert(options)
    }

    fn delete_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        self.inner.delete_by_name(name)
    }
}

/// Accepts the insert but never returns the record.
pub(super) struct ForgetfulRepository;

impl CatalogRepository for ForgetfulRepository {
    fn find_by_name(&self, _name: &str) -> Result<Option<MetricOptions>, RepositoryError> {
        Ok(None)
    }

    fn insert(&self, options: MetricOptions) -> Result<MetricOptions, RepositoryError> {
        Ok(options)
    }

    fn delete_by_name(&self, _name: &str) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}

pub(super) struct UnavailableRepository;

impl CatalogRepository for UnavailableRepository {
    fn find_by_name(&self, _name: &str) -> Result<Option<MetricOptions>, RepositoryError> {
        Ok(None)
    }

    fn insert(&self, _options: MetricOptions) -> Result<MetricOptions, RepositoryError> {
        Err(RepositoryError::Unavailable("connection reset".to_string()))
    }

    fn delete_by_name(&self, _name: &str) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("connection reset".to_string()))
    }
}

pub(super) fn provisioner<R: CatalogRepository + 'static>(
    repository: Arc<R>,
) -> CatalogProvisioner<R> {
    CatalogProvisioner::new(repository, VocabularyRevision::Current)
}
