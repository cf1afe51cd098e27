use super::Detector;
use super::registry::{IMMUTABLE_DATA_CLASS, Issue};
use crate::domain::analysis::Analyzer;
use crate::domain::finding::{Finding, Subject};
use crate::domain::mutability::MutabilityReason;
use crate::domain::types::TypeDecl;

/// Value classes (declaring `equals` and `hashCode`) with mutable fields
pub struct ImmutableDataClassDetector;

impl Detector for ImmutableDataClassDetector {
    fn issues(&self) -> Vec<&'static Issue> {
        vec![&IMMUTABLE_DATA_CLASS]
    }

    fn check_type(&self, decl: &TypeDecl, analyzer: &Analyzer<'_>) -> Vec<Finding> {
        if decl.is_interface() || !decl.has_value_semantics() {
            return Vec::new();
        }
        let store = analyzer.store();
        let classifier = analyzer.classifier();

        // Synthetic fields carry `$` in their names.
        let problems: Vec<(&str, MutabilityReason)> = store
            .all_fields(decl)
            .into_iter()
            .filter(|(_, field)| !field.name.contains('$'))
            .filter(|(owner, _)| !analyzer.is_excluded(owner))
            .filter_map(|(_, field)| {
                classifier
                    .classify(field)
                    .map(|reason| (field.name.as_str(), reason))
            })
            .collect();
        if problems.is_empty() {
            return Vec::new();
        }

        let message = problems
            .iter()
            .map(|(name, reason)| match reason {
                MutabilityReason::Reassignable => {
                    format!("{name} is a var. It should be a val in a data class.")
                }
                MutabilityReason::MutableType => {
                    format!("{name} has a mutable type. Use an immutable type instead.")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        vec![Finding::new(
            Subject::Type {
                id: decl.id.clone(),
            },
            IMMUTABLE_DATA_CLASS.id,
            message,
            problems.iter().map(|(name, _)| name.to_string()).collect(),
        )]
    }
}
