use async_trait::async_trait;
use reqwest::Client;

use super::pipeline::{AnalyserError, PerformanceAnalyser};
use super::profile::MetricProfile;
use super::results::RemoteAnalysis;
use crate::config::PredictionConfig;

/// Posts profiles as JSON to the prediction service.
#[derive(Debug, Clone)]
pub struct HttpPerformanceAnalyser {
    client: Client,
    endpoint: String,
}

impl HttpPerformanceAnalyser {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &PredictionConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PerformanceAnalyser for HttpPerformanceAnalyser {
    async fn analyse(
        &self,
        profile: &MetricProfile,
    ) -> Result<Option<RemoteAnalysis>, AnalyserError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(profile)
            .send()
            .await
            .map_err(|err| AnalyserError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyserError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| AnalyserError::Transport(err.to_string()))?;
        parse_analysis(&body)
    }
}

/// Blank bodies, `null` and `{}` all count as "no result".
pub(crate) fn parse_analysis(body: &[u8]) -> Result<Option<RemoteAnalysis>, AnalyserError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|err| AnalyserError::Malformed(err.to_string()))?;
    let empty = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| AnalyserError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_comes_from_prediction_config() {
        let config = PredictionConfig {
            endpoint: "http://10.0.0.5:5000/predict".to_string(),
            timeout: std::time::Duration::from_secs(3),
            numeric_policy: Default::default(),
        };
        let analyser = HttpPerformanceAnalyser::from_config(&config);
        assert_eq!(analyser.endpoint(), "http://10.0.0.5:5000/predict");
    }

    #[test]
    fn blank_and_null_bodies_are_empty() {
        assert!(parse_analysis(b"").expect("parses").is_none());
        assert!(parse_analysis(b"  \n").expect("parses").is_none());
        assert!(parse_analysis(b"null").expect("parses").is_none());
        assert!(parse_analysis(b"{}").expect("parses").is_none());
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        assert!(matches!(
            parse_analysis(b"<html>"),
            Err(AnalyserError::Malformed(_))
        ));
        assert!(matches!(
            parse_analysis(b"[1, 2]"),
            Err(AnalyserError::Malformed(_))
        ));
    }

    #[test]
    fn populated_bodies_decode() {
        let body = br#"{"label": "Graduate", "score": 0.91, "feature_dict": {"finance": 0.2}}"#;
        let analysis = parse_analysis(body).expect("parses").expect("present");
        assert_eq!(analysis.label, "Graduate");
        assert_eq!(analysis.feature_dict.finance, 0.2);
    }
}
