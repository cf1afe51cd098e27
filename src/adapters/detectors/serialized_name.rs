use super::Detector;
use super::registry::{Issue, NETWORK_LAYER_CLASS_SERIALIZED_NAME};
use crate::domain::analysis::{Analyzer, EndpointAnalysis};
use crate::domain::coverage::AnnotationCoverageChecker;
use crate::domain::finding::{Finding, Subject, bracketed};

/// Gson: reachable fields without `@SerializedName`
pub struct SerializedNameDetector;

impl Detector for SerializedNameDetector {
    fn issues(&self) -> Vec<&'static Issue> {
        vec![&NETWORK_LAYER_CLASS_SERIALIZED_NAME]
    }

    fn check_endpoint(&self, analysis: &EndpointAnalysis<'_>, analyzer: &Analyzer<'_>) -> Vec<Finding> {
        let checker = AnnotationCoverageChecker::new(&analyzer.config().serialized_name_suffix);
        let names: Vec<String> = checker
            .uncovered_fields(&analysis.fields.fields)
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        if names.is_empty() {
            return Vec::new();
        }

        let endpoint = analysis.endpoint;
        vec![Finding::new(
            Subject::Endpoint {
                interface: endpoint.owner.id.clone(),
                method: endpoint.method.name.clone(),
            },
            NETWORK_LAYER_CLASS_SERIALIZED_NAME.id,
            format!(
                "Return type doesn't have @{} annotation for {} fields.",
                checker.suffix(),
                bracketed(&names)
            ),
            names,
        )]
    }
}
