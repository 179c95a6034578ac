use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use student_attrition::config::AppConfig;
use student_attrition::error::AppError;
use student_attrition::workflows::catalog::{
    CatalogProvisioner, MetricOptions, OptionCategory, VocabularyRevision,
};
use student_attrition::workflows::metrics::{
    CompletionSummary, HttpPerformanceAnalyser, MetricCategory, MetricProfile, MetricSession,
    MetricValue, NoOpReason, SubmissionOutcome, SubmissionPipeline,
};

use crate::infra::InMemoryCatalogRepository;

#[derive(Args, Debug)]
pub(crate) struct ProfileReportArgs {
    /// JSON file mapping field names to answers
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyseArgs {
    /// JSON file mapping field names to answers
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Override the configured prediction service URL
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogShowArgs {
    /// Vocabulary revision to provision (legacy|current, defaults to the configured one)
    #[arg(long)]
    pub(crate) revision: Option<VocabularyRevision>,
    /// Order every list alphabetically
    #[arg(long)]
    pub(crate) sorted: bool,
}

pub(crate) fn load_profile(path: &Path) -> Result<MetricProfile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_profile(&raw)
}

pub(crate) fn parse_profile(raw: &str) -> Result<MetricProfile, AppError> {
    let answers: BTreeMap<String, Option<MetricValue>> = serde_json::from_str(raw)?;
    Ok(MetricProfile::from_entries(answers)?)
}

pub(crate) fn run_profile_report(args: ProfileReportArgs) -> Result<(), AppError> {
    let profile = load_profile(&args.profile)?;
    let summary = profile.completion_summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render_completion(&summary);
    }
    Ok(())
}

pub(crate) fn render_completion(summary: &CompletionSummary) {
    println!("Profile completion: {:.1}%", summary.overall);
    for category in MetricCategory::ALL {
        let pct = match category {
            MetricCategory::Academic => summary.academic,
            MetricCategory::SupportNetwork => summary.support_network,
            MetricCategory::Finance => summary.finance,
            MetricCategory::Background => summary.background,
        };
        println!("- {}: {:.1}%", category.label(), pct);
    }

    if summary.missing.is_empty() {
        println!("\nMissing fields: none");
    } else {
        println!("\nMissing fields");
        for field in &summary.missing {
            println!("- {}", field);
        }
    }
}

pub(crate) async fn run_analysis(args: AnalyseArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(endpoint) = args.endpoint {
        config.prediction.endpoint = endpoint;
    }

    let profile = load_profile(&args.profile)?;
    let analyser = Arc::new(HttpPerformanceAnalyser::from_config(&config.prediction));
    let endpoint = analyser.endpoint().to_string();
    let pipeline = SubmissionPipeline::new(analyser, &config.prediction);
    let mut session = MetricSession::with_profile(profile);

    println!(
        "Submitting profile to {} ({} numeric policy)",
        endpoint,
        pipeline.policy()
    );

    match pipeline.submit(&mut session).await {
        SubmissionOutcome::Completed(result) => {
            println!("Label: {}", result.label);
            println!("Score: {}%", result.display_score());
            println!(
                "Main feature: {} (strength {:.2})",
                result.main_feature, result.feature_strength
            );
            println!(
                "Optimum category: {} ({:.2})",
                result.optimum_category, result.optimum_category_value
            );
            println!("Category contribution");
            println!("- academic: {:.2}", result.category_contribution.academic);
            println!("- finance: {:.2}", result.category_contribution.finance);
            println!(
                "- support network: {:.2}",
                result.category_contribution.support_network
            );
            Ok(())
        }
        SubmissionOutcome::NoOp(NoOpReason::EmptyResponse) => {
            println!("Prediction service returned no result");
            Ok(())
        }
        SubmissionOutcome::NoOp(NoOpReason::Incomplete { completion }) => {
            render_completion(&session.completion_summary());
            Err(AppError::IncompleteProfile { completion })
        }
        SubmissionOutcome::NoOp(NoOpReason::AlreadyAnalysing) => Err(AppError::AnalysisInProgress),
        SubmissionOutcome::Failure(failure) => Err(failure.into()),
    }
}

pub(crate) fn run_catalog_show(args: CatalogShowArgs) -> Result<(), AppError> {
    let revision = match args.revision {
        Some(revision) => revision,
        None => AppConfig::load()?.catalog.revision,
    };

    let options = provisioned_options(revision, args.sorted)?;
    println!(
        "Option catalog '{}' (revision {}, v{})",
        options.name,
        options.revision,
        options.revision.number()
    );
    for category in OptionCategory::ALL {
        let list = options.list(category);
        println!("\n{} ({} options)", category, list.len());
        for option in list {
            println!("- {}", option);
        }
    }
    Ok(())
}

pub(crate) fn provisioned_options(
    revision: VocabularyRevision,
    sorted: bool,
) -> Result<MetricOptions, AppError> {
    let repository = Arc::new(InMemoryCatalogRepository::default());
    let provisioner = CatalogProvisioner::new(repository, revision);
    let options = provisioner.ensure_catalog()?;
    tracing::debug!(revision = %provisioner.revision(), "catalog provisioned for display");
    Ok(if sorted { options.sorted() } else { options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_attrition::workflows::metrics::MetricError;

    #[test]
    fn profile_json_is_parsed_by_field_name() {
        let profile = parse_profile(r#"{"course": "Nursing", "gdp": 1.2, "debtor": null}"#)
            .expect("valid profile");

        assert_eq!(profile.filled_count(), 2);
        let summary = profile.completion_summary();
        assert_eq!(summary.missing.len(), 32);
    }

    #[test]
    fn unknown_profile_fields_are_rejected() {
        match parse_profile(r#"{"favourite_colour": "blue"}"#) {
            Err(AppError::Metric(MetricError::UnknownField(name))) => {
                assert_eq!(name, "favourite_colour")
            }
            other => panic!("expected unknown field, got {other:?}"),
        }
    }

    #[test]
    fn malformed_profile_json_is_reported() {
        assert!(matches!(parse_profile("{"), Err(AppError::Json(_))));
    }

    #[test]
    fn provisioned_options_follow_requested_revision() {
        let legacy = provisioned_options(VocabularyRevision::Legacy, true).expect("provisioned");
        assert_eq!(legacy.revision, VocabularyRevision::Legacy);
        assert_eq!(legacy.binary, vec!["no", "yes"]);
    }
}
