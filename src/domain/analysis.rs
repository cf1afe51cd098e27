//! Endpoint → payload → field set pipeline.
//!
//! Every analysis builds its own resolver, collector and visited set; only the store, the
//! configuration and the compiled classifier are shared.

use crate::domain::collector::{FieldCollector, FieldSet};
use crate::domain::config::AnalysisConfig;
use crate::domain::endpoint::{Endpoint, EndpointResolver};
use crate::domain::mutability::MutabilityClassifier;
use crate::domain::resolver::TypeGraphResolver;
use crate::domain::store::DeclarationStore;
use crate::domain::types::{TypeDecl, TypeRef};

/// Result of running the pipeline for one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointAnalysis<'a> {
    pub endpoint: Endpoint<'a>,
    pub payload: TypeRef,
    pub fields: FieldSet<'a>,
}

#[derive(Clone, Copy)]
pub struct Analyzer<'a> {
    store: &'a DeclarationStore,
    config: &'a AnalysisConfig,
    classifier: &'a MutabilityClassifier,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        store: &'a DeclarationStore,
        config: &'a AnalysisConfig,
        classifier: &'a MutabilityClassifier,
    ) -> Self {
        Self {
            store,
            config,
            classifier,
        }
    }

    pub fn store(&self) -> &'a DeclarationStore {
        self.store
    }

    pub fn config(&self) -> &'a AnalysisConfig {
        self.config
    }

    pub fn classifier(&self) -> &'a MutabilityClassifier {
        self.classifier
    }

    pub fn resolver(&self) -> TypeGraphResolver<'a> {
        TypeGraphResolver::new(self.store, self.config.substitution)
    }

    pub fn endpoint_resolver(&self) -> EndpointResolver<'a> {
        EndpointResolver::new(self.config)
    }

    pub fn collector(&self) -> FieldCollector<'a> {
        FieldCollector::new(self.resolver(), &self.config.excluded_ancestors)
    }

    /// All endpoints, interfaces in declaration order then methods in declaration order.
    pub fn endpoints(&self) -> Vec<Endpoint<'a>> {
        let resolver = self.endpoint_resolver();
        self.store
            .interfaces()
            .flat_map(|owner| resolver.endpoints_of(owner))
            .collect()
    }

    /// Look up an endpoint by interface (qualified or simple name) and method name.
    pub fn find_endpoint(&self, interface: &str, method: &str) -> Option<Endpoint<'a>> {
        self.endpoints().into_iter().find(|e| {
            (e.owner.id == interface || e.owner.simple_name() == interface)
                && e.method.name == method
        })
    }

    /// Payload type and reachable fields of one endpoint; `None` if the payload is rejected.
    pub fn analyze_endpoint(&self, endpoint: Endpoint<'a>) -> Option<EndpointAnalysis<'a>> {
        let payload = self
            .endpoint_resolver()
            .payload_type(endpoint.owner, endpoint.method)?;
        let fields = self.collector().collect(&payload);
        Some(EndpointAnalysis {
            endpoint,
            payload,
            fields,
        })
    }

    pub fn endpoint_analyses(&self) -> Vec<EndpointAnalysis<'a>> {
        self.endpoints()
            .into_iter()
            .filter_map(|e| self.analyze_endpoint(e))
            .collect()
    }

    /// True if `decl` descends from (or is) an excluded framework type.
    pub fn is_excluded(&self, decl: &TypeDecl) -> bool {
        self.collector().is_excluded(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{FieldDecl, MethodDecl, ParameterDecl, TypeKind};

    fn class(id: &str, fields: Vec<FieldDecl>) -> TypeDecl {
        TypeDecl {
            id: id.into(),
            kind: TypeKind::Class,
            superclass: None,
            annotations: vec![],
            fields,
            constructors: vec![],
            methods: vec![],
        }
    }

    fn val(name: &str, ty: &str) -> FieldDecl {
        FieldDecl {
            name: name.into(),
            ty: TypeRef::new(ty),
            is_final: true,
            is_static: false,
            is_enum_constant: false,
            annotations: vec![],
            source_text: None,
        }
    }

    fn method(name: &str, return_type: TypeRef) -> MethodDecl {
        MethodDecl {
            name: name.into(),
            annotations: vec!["retrofit2.http.GET".into()],
            return_type: Some(return_type),
            parameters: vec![],
            is_suspend: false,
        }
    }

    fn store() -> DeclarationStore {
        let mut store = DeclarationStore::new();
        let mut suspended = method("suspended", TypeRef::new("java.lang.Object"));
        suspended.is_suspend = true;
        suspended.parameters.push(ParameterDecl {
            name: "continuation".into(),
            ty: TypeRef::generic(
                "kotlin.coroutines.Continuation",
                vec![TypeRef::super_of(TypeRef::new("foo.Dto"))],
            ),
            annotations: vec![],
        });
        let mut api = class("foo.Api", vec![]);
        api.kind = TypeKind::Interface;
        api.methods = vec![
            method("dto", TypeRef::generic("retrofit2.Call", vec![TypeRef::new("foo.Dto")])),
            method("nothing", TypeRef::generic("retrofit2.Call", vec![TypeRef::new("kotlin.Unit")])),
            suspended,
        ];
        store.register(api);
        store.register(class("foo.Dto", vec![val("a", "int"), val("b", "int")]));
        store
    }

    #[test]
    fn test_endpoint_analyses() {
        let store = store();
        let config = AnalysisConfig::default();
        let classifier = MutabilityClassifier::from_config(&config).unwrap();
        let analyzer = Analyzer::new(&store, &config, &classifier);

        assert_eq!(analyzer.endpoints().len(), 3);
        let analyses = analyzer.endpoint_analyses();
        let methods: Vec<_> = analyses.iter().map(|a| a.endpoint.method.name.as_str()).collect();
        assert_eq!(methods, vec!["dto", "suspended"]);
        assert_eq!(analyses[0].fields.field_names(), vec!["a", "b"]);
        assert_eq!(analyses[1].fields.field_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_find_endpoint_by_simple_or_qualified_name() {
        let store = store();
        let config = AnalysisConfig::default();
        let classifier = MutabilityClassifier::from_config(&config).unwrap();
        let analyzer = Analyzer::new(&store, &config, &classifier);
        assert!(analyzer.find_endpoint("Api", "dto").is_some());
        assert!(analyzer.find_endpoint("foo.Api", "nothing").is_some());
        assert!(analyzer.find_endpoint("Api", "missing").is_none());
    }
}
