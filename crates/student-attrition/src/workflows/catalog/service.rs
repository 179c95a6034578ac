use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{MetricOptions, CATALOG_NAME};
use super::repository::{CatalogRepository, RepositoryError};
use super::vocabulary::{reference_options, VocabularyRevision};

/// Keeps exactly one option catalog in the store, creating it on first access.
pub struct CatalogProvisioner<R> {
    repository: Arc<R>,
    revision: VocabularyRevision,
}

impl<R> CatalogProvisioner<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>, revision: VocabularyRevision) -> Self {
        Self {
            repository,
            revision,
        }
    }

    /// Revision used when the catalog has to be created.
    pub fn revision(&self) -> VocabularyRevision {
        self.revision
    }

    /// Plain read of the stored catalog, without provisioning.
    pub fn options(&self) -> Result<Option<MetricOptions>, CatalogError> {
        Ok(self.repository.find_by_name(CATALOG_NAME)?)
    }

    /// Returns the stored catalog, seeding it first if it is missing.
    pub fn ensure_catalog(&self) -> Result<MetricOptions, CatalogError> {
        if let Some(options) = self.options()? {
            return Ok(options);
        }

        warn!(name = CATALOG_NAME, "option catalog missing, provisioning");
        self.provision(self.revision)?;
        self.options()?.ok_or(CatalogError::Unavailable)
    }

    /// Replaces the stored catalog with a freshly seeded one for `revision`.
    pub fn reseed(&self, revision: VocabularyRevision) -> Result<MetricOptions, CatalogError> {
        let removed = self.repository.delete_by_name(CATALOG_NAME)?;
        info!(%revision, removed, "reseeding option catalog");
        self.provision(revision)?;
        self.options()?.ok_or(CatalogError::Unavailable)
    }

    /// Returns whether this call created the record. A duplicate key means another
    /// caller won the race and is not an error.
    fn provision(&self, revision: VocabularyRevision) -> Result<bool, CatalogError> {
        match self.repository.insert(reference_options(revision)) {
            Ok(_) => {
                info!(%revision, "option catalog provisioned");
                Ok(true)
            }
            Err(RepositoryError::Conflict) => {
                warn!(%revision, "option catalog already exists, keeping stored record");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Errors surfaced by catalog provisioning.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("performance metric options could not be loaded")]
    Unavailable,
    #[error("unknown option category '{0}'")]
    UnknownCategory(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
