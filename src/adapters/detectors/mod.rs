//! Detectors: rule renderers over the analysis results
//!
//! Each detector consumes one endpoint analysis (payload and reachable fields) or one type
//! declaration and turns a classification into findings. Detectors never traverse the type
//! graph themselves.

mod data_class;
mod immutability;
mod json;
pub mod registry;
mod serialized_name;

pub use data_class::ImmutableDataClassDetector;
pub use immutability::ImmutableDtoDetector;
pub use json::JsonDetector;
pub use serialized_name::SerializedNameDetector;

use crate::domain::analysis::{Analyzer, EndpointAnalysis};
use crate::domain::finding::Finding;
use crate::domain::types::TypeDecl;
use registry::Issue;
use tracing::debug;

/// Trait for a rule renderer
pub trait Detector: Send + Sync {
    /// Issues this detector can report
    fn issues(&self) -> Vec<&'static Issue>;

    /// Findings for one analyzed endpoint
    fn check_endpoint(&self, _analysis: &EndpointAnalysis<'_>, _analyzer: &Analyzer<'_>) -> Vec<Finding> {
        Vec::new()
    }

    /// Findings for one declared type
    fn check_type(&self, _decl: &TypeDecl, _analyzer: &Analyzer<'_>) -> Vec<Finding> {
        Vec::new()
    }
}

/// Runs every detector in registry order
pub struct DetectorSuite {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorSuite {
    pub fn new() -> Self {
        Self::with_detectors(vec![
            Box::new(ImmutableDtoDetector),
            Box::new(SerializedNameDetector),
            Box::new(JsonDetector),
            Box::new(ImmutableDataClassDetector),
        ])
    }

    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub fn issues(&self) -> Vec<&'static Issue> {
        self.detectors.iter().flat_map(|d| d.issues()).collect()
    }

    /// Run all detectors. Endpoint findings come first (endpoint order, then detector order),
    /// then type findings in declaration order.
    ///
    /// `rules` restricts the output to the given issue ids; disabled rules never report.
    pub fn run(&self, analyzer: &Analyzer<'_>, rules: Option<&[String]>) -> Vec<Finding> {
        let config = analyzer.config();
        let wanted = |rule: &str| {
            config.is_rule_enabled(rule) && rules.is_none_or(|r| r.iter().any(|id| id == rule))
        };

        let mut findings = Vec::new();
        let analyses = analyzer.endpoint_analyses();
        for analysis in &analyses {
            debug!(
                endpoint = %analysis.endpoint.display_name(),
                payload = %analysis.payload,
                fields = analysis.fields.len(),
                "checking endpoint"
            );
            for detector in &self.detectors {
                findings.extend(detector.check_endpoint(analysis, analyzer));
            }
        }
        for decl in analyzer.store().iter() {
            for detector in &self.detectors {
                findings.extend(detector.check_type(decl, analyzer));
            }
        }

        findings.retain(|f| wanted(&f.rule));
        debug!(
            endpoints = analyses.len(),
            findings = findings.len(),
            "detectors finished"
        );
        findings
    }
}

impl Default for DetectorSuite {
    fn default() -> Self {
        Self::new()
    }
}
