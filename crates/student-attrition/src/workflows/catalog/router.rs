use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::OptionCategory;
use super::repository::CatalogRepository;
use super::service::{CatalogError, CatalogProvisioner};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OptionsQuery {
    #[serde(default)]
    sorted: bool,
}

/// Router serving the option catalog, provisioning it on first request.
pub fn catalog_router<R>(provisioner: Arc<CatalogProvisioner<R>>) -> Router
where
    R: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/performance-metric-options", get(options_handler::<R>))
        .route(
            "/api/performance-metric-options/:category",
            get(category_handler::<R>),
        )
        .with_state(provisioner)
}

pub(crate) async fn options_handler<R>(
    State(provisioner): State<Arc<CatalogProvisioner<R>>>,
    query: Result<Query<OptionsQuery>, QueryRejection>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match provisioner.ensure_catalog() {
        Ok(options) => {
            let options = if query.sorted { options.sorted() } else { options };
            (StatusCode::OK, axum::Json(options)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn category_handler<R>(
    State(provisioner): State<Arc<CatalogProvisioner<R>>>,
    Path(category): Path<String>,
    query: Result<Query<OptionsQuery>, QueryRejection>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let category = match category.parse::<OptionCategory>() {
        Ok(category) => category,
        Err(raw) => return AppError::from(CatalogError::UnknownCategory(raw)).into_response(),
    };

    match provisioner.ensure_catalog() {
        Ok(options) => {
            let options = if query.sorted { options.sorted() } else { options };
            let payload = json!({
                "category": category,
                "options": options.list(category),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
