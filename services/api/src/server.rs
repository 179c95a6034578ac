use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCatalogRepository, InMemoryFeedbackSink};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use student_attrition::config::AppConfig;
use student_attrition::error::AppError;
use student_attrition::telemetry;
use student_attrition::workflows::catalog::CatalogProvisioner;
use student_attrition::workflows::metrics::{HttpPerformanceAnalyser, SubmissionPipeline};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let analyser = Arc::new(HttpPerformanceAnalyser::from_config(&config.prediction));
    let prediction_endpoint = analyser.endpoint().to_string();
    let pipeline = Arc::new(SubmissionPipeline::new(analyser, &config.prediction));
    let provisioner = Arc::new(CatalogProvisioner::new(
        Arc::new(InMemoryCatalogRepository::default()),
        config.catalog.revision,
    ));
    let catalog_revision = provisioner.revision();
    let feedback = Arc::new(InMemoryFeedbackSink::default());

    let app = with_service_routes(pipeline, provisioner, feedback)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        %prediction_endpoint,
        %catalog_revision,
        "performance analysis service ready"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
