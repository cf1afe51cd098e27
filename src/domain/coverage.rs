//! AnnotationCoverageChecker: which collected fields and owner types lack a required tag.
//!
//! A tag covers when its qualified name ends with the required suffix
//! (`com.google.gson.annotations.SerializedName` covers `SerializedName`).

use crate::domain::collector::CollectedField;
use crate::domain::types::{FieldDecl, TypeDecl};

/// True if any of `annotations` ends with `suffix`.
pub fn has_tag(annotations: &[String], suffix: &str) -> bool {
    annotations.iter().any(|a| a.ends_with(suffix))
}

#[derive(Debug, Clone, Copy)]
pub struct AnnotationCoverageChecker<'s> {
    suffix: &'s str,
}

impl<'s> AnnotationCoverageChecker<'s> {
    pub fn new(suffix: &'s str) -> Self {
        Self { suffix }
    }

    pub fn suffix(&self) -> &'s str {
        self.suffix
    }

    /// Whether `field`, declared on `owner`, carries the tag directly or through the
    /// same-named parameter of `owner`'s primary constructor.
    ///
    /// Only the owner's constructor is consulted; an equally named parameter on another type
    /// never covers.
    pub fn is_field_covered(&self, owner: &TypeDecl, field: &FieldDecl) -> bool {
        if has_tag(&field.annotations, self.suffix) {
            return true;
        }
        owner.primary_constructor().is_some_and(|ctor| {
            ctor.parameters
                .iter()
                .any(|p| p.name == field.name && has_tag(&p.annotations, self.suffix))
        })
    }

    /// Fields subject to tag coverage. Instance fields of enum types are not serialized by
    /// name, only their constants are.
    pub fn is_subject(field: &CollectedField<'_>) -> bool {
        !(field.owner.is_enum() && !field.field.is_static)
    }

    /// Uncovered fields, in collection order.
    pub fn uncovered_fields<'a>(&self, fields: &[CollectedField<'a>]) -> Vec<CollectedField<'a>> {
        fields
            .iter()
            .filter(|f| Self::is_subject(f))
            .filter(|f| !self.is_field_covered(f.owner, f.field))
            .copied()
            .collect()
    }

    pub fn is_type_covered(&self, decl: &TypeDecl) -> bool {
        has_tag(&decl.annotations, self.suffix)
    }

    /// Types without the class-level tag, in input order.
    pub fn uncovered_types<'a>(&self, types: &[&'a TypeDecl]) -> Vec<&'a TypeDecl> {
        types
            .iter()
            .filter(|t| !self.is_type_covered(t))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ConstructorDecl, ParameterDecl, TypeKind, TypeRef};

    const JSON: &str = "com.squareup.moshi.Json";

    fn field(name: &str, annotations: &[&str]) -> FieldDecl {
        FieldDecl {
            name: name.to_string(),
            ty: TypeRef::new("int"),
            is_final: true,
            is_static: false,
            is_enum_constant: false,
            annotations: annotations.iter().map(|s| s.to_string()).collect(),
            source_text: None,
        }
    }

    fn decl(id: &str, fields: Vec<FieldDecl>) -> TypeDecl {
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

    fn collected(decl: &TypeDecl) -> Vec<CollectedField<'_>> {
        decl.fields
            .iter()
            .map(|field| CollectedField { owner: decl, field })
            .collect()
    }

    fn names(fields: &[CollectedField<'_>]) -> Vec<String> {
        fields.iter().map(|f| f.name().to_string()).collect()
    }

    #[test]
    fn test_field_tag_suffix_covers() {
        let dto = decl("foo.Dto", vec![field("a", &[JSON]), field("b", &[])]);
        let checker = AnnotationCoverageChecker::new("Json");
        assert_eq!(names(&checker.uncovered_fields(&collected(&dto))), vec!["b"]);
    }

    #[test]
    fn test_constructor_parameter_covers_field() {
        let mut dto = decl("foo.Dto", vec![field("a", &[]), field("b", &[])]);
        dto.constructors.push(ConstructorDecl {
            parameters: vec![ParameterDecl {
                name: "a".into(),
                ty: TypeRef::new("int"),
                annotations: vec![JSON.into()],
            }],
        });
        let checker = AnnotationCoverageChecker::new("Json");
        assert_eq!(names(&checker.uncovered_fields(&collected(&dto))), vec!["b"]);
    }

    #[test]
    fn test_constructor_fallback_is_per_type() {
        let mut tagged = decl("foo.Tagged", vec![field("id", &[])]);
        tagged.constructors.push(ConstructorDecl {
            parameters: vec![ParameterDecl {
                name: "id".into(),
                ty: TypeRef::new("int"),
                annotations: vec![JSON.into()],
            }],
        });
        let plain = decl("foo.Plain", vec![field("id", &[])]);
        let mut fields = collected(&tagged);
        fields.extend(collected(&plain));

        let uncovered = AnnotationCoverageChecker::new("Json").uncovered_fields(&fields);
        assert_eq!(uncovered.len(), 1);
        assert_eq!(uncovered[0].owner.id, "foo.Plain");
    }

    #[test]
    fn test_only_primary_constructor_is_consulted() {
        let mut dto = decl("foo.Dto", vec![field("a", &[])]);
        dto.constructors.push(ConstructorDecl::default());
        dto.constructors.push(ConstructorDecl {
            parameters: vec![ParameterDecl {
                name: "a".into(),
                ty: TypeRef::new("int"),
                annotations: vec![JSON.into()],
            }],
        });
        let checker = AnnotationCoverageChecker::new("Json");
        assert_eq!(checker.uncovered_fields(&collected(&dto)).len(), 1);
    }

    #[test]
    fn test_enum_instance_fields_are_not_subject() {
        let mut a = field("A", &["com.google.gson.annotations.SerializedName"]);
        a.is_static = true;
        a.is_enum_constant = true;
        let mut b = field("B", &[]);
        b.is_static = true;
        b.is_enum_constant = true;
        let mut status = decl("foo.Status", vec![a, b, field("code", &[])]);
        status.kind = TypeKind::Enum;

        let checker = AnnotationCoverageChecker::new("SerializedName");
        assert_eq!(names(&checker.uncovered_fields(&collected(&status))), vec!["B"]);
    }

    #[test]
    fn test_uncovered_types() {
        let mut covered = decl("foo.A", vec![]);
        covered.annotations.push("com.squareup.moshi.JsonClass".into());
        let missing = decl("foo.B", vec![]);
        let checker = AnnotationCoverageChecker::new("JsonClass");
        let uncovered = checker.uncovered_types(&[&covered, &missing]);
        assert_eq!(uncovered.len(), 1);
        assert_eq!(uncovered[0].id, "foo.B");
    }

    #[test]
    fn test_class_tag_does_not_cover_field_suffix() {
        assert!(!has_tag(&["com.squareup.moshi.JsonClass".to_string()], "Json"));
        assert!(has_tag(&["Json".to_string()], "Json"));
    }
}
