//! Reference vocabulary for the categorical answers of the performance metric form.
//!
//! Exactly one catalog record lives in the store under a fixed name. The provisioner
//! seeds it on first access and tolerates a concurrent seeder winning the race.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use domain::{MetricOptions, OptionCategory, CATALOG_NAME};
pub use repository::{CatalogRepository, RepositoryError};
pub use router::catalog_router;
pub use service::{CatalogError, CatalogProvisioner};
pub use vocabulary::{reference_options, VocabularyRevision};
