use super::Detector;
use super::registry::{Issue, NETWORK_LAYER_IMMUTABLE_DTO};
use crate::domain::analysis::{Analyzer, EndpointAnalysis};
use crate::domain::finding::{Finding, Subject, bracketed};
use crate::domain::mutability::MutabilityReason;

/// Mutable fields reachable from an endpoint payload
pub struct ImmutableDtoDetector;

impl Detector for ImmutableDtoDetector {
    fn issues(&self) -> Vec<&'static Issue> {
        vec![&NETWORK_LAYER_IMMUTABLE_DTO]
    }

    fn check_endpoint(&self, analysis: &EndpointAnalysis<'_>, analyzer: &Analyzer<'_>) -> Vec<Finding> {
        let mutable = analyzer
            .classifier()
            .mutable_fields(&analysis.fields.fields);
        if mutable.is_empty() {
            return Vec::new();
        }

        let reassignable: Vec<&str> = mutable
            .iter()
            .filter(|(_, reason)| *reason == MutabilityReason::Reassignable)
            .map(|(f, _)| f.name())
            .collect();

        let mut lines = Vec::new();
        if reassignable.is_empty() {
            lines.push("Return type is not immutable.".to_string());
        } else {
            lines.push(format!(
                "Return type is not immutable. {} need to be final or val.",
                bracketed(&reassignable)
            ));
        }
        for (field, reason) in &mutable {
            if *reason == MutabilityReason::MutableType {
                lines.push(format!(
                    "{} has a mutable type. Use an immutable type instead.",
                    field.name()
                ));
            }
        }

        let endpoint = analysis.endpoint;
        vec![Finding::new(
            Subject::Endpoint {
                interface: endpoint.owner.id.clone(),
                method: endpoint.method.name.clone(),
            },
            NETWORK_LAYER_IMMUTABLE_DTO.id,
            lines.join("\n"),
            mutable.iter().map(|(f, _)| f.name().to_string()).collect(),
        )]
    }
}
