//! Declaration builders for integration tests.
#![allow(dead_code)]

use netdto_lint::adapters::detectors::DetectorSuite;
use netdto_lint::domain::analysis::Analyzer;
use netdto_lint::domain::config::AnalysisConfig;
use netdto_lint::domain::finding::Finding;
use netdto_lint::domain::mutability::MutabilityClassifier;
use netdto_lint::domain::store::DeclarationStore;
use netdto_lint::domain::types::{
    ConstructorDecl, DeclarationData, FieldDecl, MethodDecl, ParameterDecl, TypeDecl, TypeKind,
    TypeRef,
};

pub const GET: &str = "retrofit2.http.GET";
pub const SERIALIZED_NAME: &str = "com.google.gson.annotations.SerializedName";
pub const JSON: &str = "com.squareup.moshi.Json";
pub const JSON_CLASS: &str = "com.squareup.moshi.JsonClass";

pub fn t(name: &str) -> TypeRef {
    TypeRef::new(name)
}

/// `retrofit2.Call<inner>`
pub fn call(inner: TypeRef) -> TypeRef {
    TypeRef::generic("retrofit2.Call", vec![inner])
}

pub fn list(inner: TypeRef) -> TypeRef {
    TypeRef::generic("kotlin.collections.List", vec![inner])
}

pub fn mutable_list(inner: TypeRef) -> TypeRef {
    TypeRef::generic("kotlin.collections.MutableList", vec![inner])
}

fn field(name: &str, ty: TypeRef, is_final: bool) -> FieldDecl {
    FieldDecl {
        name: name.to_string(),
        ty,
        is_final,
        is_static: false,
        is_enum_constant: false,
        annotations: vec![],
        source_text: None,
    }
}

/// `val name: ty`
pub fn val(name: &str, ty: TypeRef) -> FieldDecl {
    field(name, ty, true)
}

/// `var name: ty`
pub fn var(name: &str, ty: TypeRef) -> FieldDecl {
    field(name, ty, false)
}

pub fn tagged(mut field: FieldDecl, annotations: &[&str]) -> FieldDecl {
    field
        .annotations
        .extend(annotations.iter().map(|a| a.to_string()));
    field
}

pub fn class(id: &str, fields: Vec<FieldDecl>) -> TypeDecl {
    TypeDecl {
        id: id.to_string(),
        kind: TypeKind::Class,
        superclass: None,
        annotations: vec![],
        fields,
        constructors: vec![],
        methods: vec![],
    }
}

pub fn extending(mut decl: TypeDecl, superclass: &str) -> TypeDecl {
    decl.superclass = Some(superclass.to_string());
    decl
}

/// Kotlin data class: declares `equals` and `hashCode`
pub fn data_class(id: &str, fields: Vec<FieldDecl>) -> TypeDecl {
    let mut decl = class(id, fields);
    decl.methods.push(plain_method("equals"));
    decl.methods.push(plain_method("hashCode"));
    decl
}

/// Primary constructor whose parameters mirror `decl`'s fields, tagged as given.
pub fn with_constructor(mut decl: TypeDecl, params: &[(&str, &[&str])]) -> TypeDecl {
    let parameters = params
        .iter()
        .map(|(name, annotations)| {
            let ty = decl
                .fields
                .iter()
                .find(|f| f.name == *name)
                .map(|f| f.ty.clone())
                .unwrap_or_else(|| t("int"));
            ParameterDecl {
                name: name.to_string(),
                ty,
                annotations: annotations.iter().map(|a| a.to_string()).collect(),
            }
        })
        .collect();
    decl.constructors.push(ConstructorDecl { parameters });
    decl
}

/// Enum with the given constants (name, annotations) and no instance fields.
pub fn enum_type(id: &str, constants: &[(&str, &[&str])]) -> TypeDecl {
    let fields = constants
        .iter()
        .map(|(name, annotations)| FieldDecl {
            name: name.to_string(),
            ty: t(id),
            is_final: true,
            is_static: true,
            is_enum_constant: true,
            annotations: annotations.iter().map(|a| a.to_string()).collect(),
            source_text: None,
        })
        .collect();
    TypeDecl {
        kind: TypeKind::Enum,
        ..class(id, fields)
    }
}

pub fn interface(id: &str, methods: Vec<MethodDecl>) -> TypeDecl {
    TypeDecl {
        kind: TypeKind::Interface,
        methods,
        ..class(id, vec![])
    }
}

pub fn plain_method(name: &str) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        annotations: vec![],
        return_type: None,
        parameters: vec![],
        is_suspend: false,
    }
}

/// `@GET fun name(): return_type`
pub fn get(name: &str, return_type: TypeRef) -> MethodDecl {
    MethodDecl {
        annotations: vec![GET.to_string()],
        return_type: Some(return_type),
        ..plain_method(name)
    }
}

/// `@GET suspend fun name(): payload`, as compiled: continuation as the last parameter.
pub fn suspend_get(name: &str, payload: TypeRef) -> MethodDecl {
    MethodDecl {
        annotations: vec![GET.to_string()],
        return_type: Some(t("java.lang.Object")),
        parameters: vec![ParameterDecl {
            name: "$completion".to_string(),
            ty: TypeRef::generic(
                "kotlin.coroutines.Continuation",
                vec![TypeRef::super_of(payload)],
            ),
            annotations: vec![],
        }],
        is_suspend: true,
        ..plain_method(name)
    }
}

pub fn data(types: Vec<TypeDecl>) -> DeclarationData {
    DeclarationData {
        project: Some("fixture".to_string()),
        types,
    }
}

/// Store, config and classifier bundled for running analyses.
pub struct Harness {
    pub store: DeclarationStore,
    pub config: AnalysisConfig,
    pub classifier: MutabilityClassifier,
}

impl Harness {
    pub fn new(types: Vec<TypeDecl>) -> Self {
        Self::with_config(types, AnalysisConfig::default())
    }

    pub fn with_config(types: Vec<TypeDecl>, config: AnalysisConfig) -> Self {
        let classifier = MutabilityClassifier::from_config(&config).expect("valid config");
        Self {
            store: DeclarationStore::from_data(data(types)),
            config,
            classifier,
        }
    }

    pub fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.store, &self.config, &self.classifier)
    }

    pub fn findings(&self) -> Vec<Finding> {
        DetectorSuite::new().run(&self.analyzer(), None)
    }

    pub fn findings_for(&self, rule: &str) -> Vec<Finding> {
        let rules = [rule.to_string()];
        DetectorSuite::new().run(&self.analyzer(), Some(&rules[..]))
    }

    /// Qualified names (`Owner.field`) reachable from an endpoint, empty if rejected.
    pub fn reachable(&self, interface: &str, method: &str) -> Vec<String> {
        let analyzer = self.analyzer();
        let endpoint = analyzer
            .find_endpoint(interface, method)
            .expect("endpoint exists");
        analyzer
            .analyze_endpoint(endpoint)
            .map(|a| a.fields.iter().map(|f| f.qualified_name()).collect())
            .unwrap_or_default()
    }
}
