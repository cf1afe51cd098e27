use super::Detector;
use super::registry::{Issue, NETWORK_LAYER_CLASS_JSON, NETWORK_LAYER_CLASS_JSON_CLASS};
use crate::domain::analysis::{Analyzer, EndpointAnalysis};
use crate::domain::coverage::AnnotationCoverageChecker;
use crate::domain::finding::{Finding, Subject, bracketed};
use crate::domain::types::TypeDecl;
use std::collections::HashSet;

/// Moshi: reachable fields without `@Json`, owner classes without `@JsonClass`
pub struct JsonDetector;

impl Detector for JsonDetector {
    fn issues(&self) -> Vec<&'static Issue> {
        vec![&NETWORK_LAYER_CLASS_JSON, &NETWORK_LAYER_CLASS_JSON_CLASS]
    }

    fn check_endpoint(&self, analysis: &EndpointAnalysis<'_>, analyzer: &Analyzer<'_>) -> Vec<Finding> {
        let config = analyzer.config();
        let endpoint = analysis.endpoint;
        let subject = Subject::Endpoint {
            interface: endpoint.owner.id.clone(),
            method: endpoint.method.name.clone(),
        };
        let mut findings = Vec::new();

        let fields = AnnotationCoverageChecker::new(&config.json_field_suffix);
        let names: Vec<String> = fields
            .uncovered_fields(&analysis.fields.fields)
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        if !names.is_empty() {
            findings.push(Finding::new(
                subject.clone(),
                NETWORK_LAYER_CLASS_JSON.id,
                format!(
                    "Return type doesn't have @{} annotation for {} fields.",
                    fields.suffix(),
                    bracketed(&names)
                ),
                names,
            ));
        }

        let mut seen = HashSet::new();
        let owners: Vec<&TypeDecl> = analysis
            .fields
            .iter()
            .filter(|f| AnnotationCoverageChecker::is_subject(f))
            .map(|f| f.owner)
            .filter(|owner| seen.insert(owner.id.as_str()))
            .collect();
        let classes = AnnotationCoverageChecker::new(&config.json_class_suffix);
        let missing: Vec<String> = classes
            .uncovered_types(&owners)
            .iter()
            .map(|t| t.simple_name().to_string())
            .collect();
        if !missing.is_empty() {
            findings.push(Finding::new(
                subject,
                NETWORK_LAYER_CLASS_JSON_CLASS.id,
                format!(
                    "Return type doesn't have @{} annotation for {} classes.",
                    classes.suffix(),
                    bracketed(&missing)
                ),
                missing,
            ));
        }

        findings
    }
}
