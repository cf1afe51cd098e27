//! EndpointResolver: which interface methods are network calls, and what they deliver.

use tracing::debug;

use crate::domain::config::{AnalysisConfig, name_matches};
use crate::domain::types::{MethodDecl, TypeDecl, TypeRef};

/// An endpoint: a call-verb annotated method on an interface.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub owner: &'a TypeDecl,
    pub method: &'a MethodDecl,
}

impl Endpoint<'_> {
    /// `Api.method`
    pub fn display_name(&self) -> String {
        format!("{}.{}", self.owner.simple_name(), self.method.name)
    }
}

pub struct EndpointResolver<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> EndpointResolver<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// True if `method` is declared on an interface and carries a call-verb annotation.
    pub fn is_endpoint(&self, owner: &TypeDecl, method: &MethodDecl) -> bool {
        owner.is_interface()
            && method
                .annotations
                .iter()
                .any(|a| self.config.call_verb_annotations.iter().any(|v| v == a))
    }

    /// Endpoints of `owner`, in method declaration order.
    pub fn endpoints_of<'d>(&self, owner: &'d TypeDecl) -> Vec<Endpoint<'d>> {
        owner
            .methods
            .iter()
            .filter(|m| self.is_endpoint(owner, m))
            .map(|method| Endpoint { owner, method })
            .collect()
    }

    /// Effective payload type of `method`, or `None` when there is nothing to check.
    pub fn payload_type(&self, owner: &TypeDecl, method: &MethodDecl) -> Option<TypeRef> {
        if !self.is_endpoint(owner, method) {
            return None;
        }

        if method.is_suspend {
            // The continuation slot carries the delivered type.
            let Some(last) = method.parameters.last() else {
                debug!(method = %method.name, "suspending endpoint without continuation parameter");
                return None;
            };
            return Some(last.ty.clone());
        }

        let return_type = method.return_type.as_ref()?;
        if return_type.is_primitive() {
            return None;
        }
        if self.is_untyped_payload(return_type) {
            debug!(method = %method.name, return_type = %return_type, "empty or raw payload skipped");
            return None;
        }
        Some(return_type.clone())
    }

    /// True if any reference in `ty` names an empty payload or a raw-body type.
    fn is_untyped_payload(&self, ty: &TypeRef) -> bool {
        ty.any(&mut |r| {
            name_matches(&self.config.empty_payload_types, &r.name)
                || name_matches(&self.config.raw_body_types, &r.name)
        })
    }
}
