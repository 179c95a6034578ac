use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::workflows::metrics::{
    analysis_router, AnalyserError, CoercionPolicy, InFlightFlag, MetricField, MetricProfile,
    MetricValue, PerformanceAnalyser, RemoteAnalysis, SubmissionPipeline,
};

/// Canned answer the fake prediction service gives.
#[derive(Debug, Clone)]
pub(super) enum Reply {
    Analysis(RemoteAnalysis),
    Empty,
    Status(u16),
    Hang,
}

/// Analyser that records every posted profile and whether the in-flight flag
/// was raised while it was being called.
pub(super) struct ScriptedAnalyser {
    reply: Reply,
    calls: Mutex<Vec<Value>>,
    watched: Mutex<Option<InFlightFlag>>,
    flag_seen: Mutex<Vec<bool>>,
}

impl ScriptedAnalyser {
    pub(super) fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
            watched: Mutex::new(None),
            flag_seen: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn watch(&self, flag: InFlightFlag) {
        *self.watched.lock().unwrap() = Some(flag);
    }

    pub(super) fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }

    pub(super) fn flag_seen(&self) -> Vec<bool> {
        self.flag_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl PerformanceAnalyser for ScriptedAnalyser {
    async fn analyse(
        &self,
        profile: &MetricProfile,
    ) -> Result<Option<RemoteAnalysis>, AnalyserError> {
        self.calls
            .lock()
            .unwrap()
            .push(serde_json::to_value(profile).unwrap());
        if let Some(flag) = self.watched.lock().unwrap().as_ref() {
            self.flag_seen.lock().unwrap().push(flag.is_set());
        }

        match &self.reply {
            Reply::Analysis(analysis) => Ok(Some(analysis.clone())),
            Reply::Empty => Ok(None),
            Reply::Status(code) => Err(AnalyserError::Status(*code)),
            Reply::Hang => {
                std::future::pending::<()>().await;
                Ok(None)
            }
        }
    }
}

pub(super) fn at_risk_analysis() -> RemoteAnalysis {
    serde_json::from_value(json!({
        "feature_dict": {"academic": 0.4, "finance": 0.3, "support_network": 0.3},
        "feature_main": "debtor",
        "feature_strength": 0.8,
        "label": "at risk",
        "score": 0.73,
        "optimum_category": "tuition_fees_up_to_date",
        "optimum_category_value": 1
    }))
    .unwrap()
}

/// Sample answer for a field: numbers as text for numeric fields, a vocabulary
/// entry otherwise.
pub(super) fn sample_value(field: MetricField) -> MetricValue {
    match field {
        MetricField::AgeAtEnrolment => MetricValue::Text("19".to_string()),
        MetricField::FirstSemesterGrade | MetricField::SecondSemesterGrade => {
            MetricValue::Text("13.5".to_string())
        }
        MetricField::UnemploymentRate => MetricValue::Number(10.8),
        MetricField::InflationRate => MetricValue::Number(1.4),
        MetricField::Gdp => MetricValue::Number(-0.3),
        MetricField::ApplicationOrder => MetricValue::Number(0.0),
        field if field.is_numeric() => MetricValue::Text("6".to_string()),
        MetricField::MaritalStatus => "Single".into(),
        MetricField::Course => "Nursing".into(),
        MetricField::AttendanceType => "Daytime".into(),
        MetricField::Nationality => "Portuguese".into(),
        MetricField::Gender => "Female".into(),
        MetricField::MothersQualification | MetricField::FathersQualification => {
            "Basic-level".into()
        }
        MetricField::MothersOccupation | MetricField::FathersOccupation => "Technical".into(),
        MetricField::ApplicationMode => "1st phase—general contingent".into(),
        MetricField::PreviousQualification => "Secondary education".into(),
        _ => "No".into(),
    }
}

pub(super) fn complete_profile() -> MetricProfile {
    let mut profile = MetricProfile::new();
    for field in MetricField::ALL {
        profile.set(field, Some(sample_value(field)));
    }
    profile
}

/// Every field answered, as the JSON body a client would post.
pub(super) fn complete_body() -> Value {
    serde_json::to_value(complete_profile()).unwrap()
}

pub(super) fn pipeline(
    analyser: Arc<ScriptedAnalyser>,
    policy: CoercionPolicy,
) -> SubmissionPipeline<ScriptedAnalyser> {
    SubmissionPipeline::with_settings(analyser, Duration::from_millis(50), policy)
}

pub(super) fn router_with(reply: Reply) -> (axum::Router, Arc<ScriptedAnalyser>) {
    let analyser = Arc::new(ScriptedAnalyser::new(reply));
    let pipeline = Arc::new(pipeline(analyser.clone(), CoercionPolicy::Strict));
    (analysis_router(pipeline), analyser)
}
