use super::domain::MetricOptions;

/// Document store holding catalog records, unique by `name`.
pub trait CatalogRepository: Send + Sync {
    fn find_by_name(&self, name: &str) -> Result<Option<MetricOptions>, RepositoryError>;
    /// Fails with [`RepositoryError::Conflict`] when a record with the same name exists.
    fn insert(&self, options: MetricOptions) -> Result<MetricOptions, RepositoryError>;
    fn delete_by_name(&self, name: &str) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
