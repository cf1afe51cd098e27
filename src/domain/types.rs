//! Declared type information: the contract between a declaration source (JSON export of a
//! compiler front end, test fixtures, ...) and the DTO analysis.
//!
//! Everything here describes *declarations*, never runtime values. A [`TypeDecl`] is what the
//! analysis calls a resolved type once a [`TypeRef`] has been resolved against the
//! [`DeclarationStore`](crate::domain::store::DeclarationStore).

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type identity (fully-qualified name, e.g. `com.example.api.UserDto`).
pub type TypeId = String;

/// JVM primitive spellings. These are never reference types and are never expanded.
const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Wildcard kind of a type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Wildcard {
    /// Not a wildcard: a plain type argument.
    #[default]
    None,
    /// `? extends Bound` / `out Bound` (upper bound).
    Extends,
    /// `? super Bound` / `in Bound` (lower bound).
    Super,
    /// `?` / `*` with no usable bound.
    Unbounded,
}

impl Wildcard {
    pub fn is_none(&self) -> bool {
        matches!(self, Wildcard::None)
    }
}

/// Reference to a declared type, as written at a use site.
///
/// For wildcard arguments, `name`/`args` describe the bound; they are ignored when the wildcard
/// is [`Wildcard::Unbounded`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TypeRef {
    pub name: TypeId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Wildcard::is_none")]
    pub wildcard: Wildcard,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl TypeRef {
    pub fn new(name: impl Into<TypeId>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            wildcard: Wildcard::None,
            nullable: false,
        }
    }

    pub fn generic(name: impl Into<TypeId>, args: Vec<TypeRef>) -> Self {
        Self {
            args,
            ..Self::new(name)
        }
    }

    /// `? extends bound`
    pub fn extends(bound: TypeRef) -> Self {
        Self {
            wildcard: Wildcard::Extends,
            ..bound
        }
    }

    /// `? super bound`
    pub fn super_of(bound: TypeRef) -> Self {
        Self {
            wildcard: Wildcard::Super,
            ..bound
        }
    }

    /// `?` / `*`
    pub fn unbounded() -> Self {
        Self {
            wildcard: Wildcard::Unbounded,
            ..Self::new("?")
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The bound of a wildcard (or the reference itself when it is not a wildcard).
    pub fn bound(&self) -> TypeRef {
        Self {
            wildcard: Wildcard::None,
            ..self.clone()
        }
    }

    /// Last segment of the qualified name (`java.util.ArrayList` → `ArrayList`).
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn is_primitive(&self) -> bool {
        self.args.is_empty() && PRIMITIVE_TYPES.contains(&self.name.as_str())
    }

    /// True for class/interface references that may have a declaration to expand.
    pub fn is_reference(&self) -> bool {
        !self.is_primitive() && self.wildcard != Wildcard::Unbounded
    }

    /// Depth-first walk over this reference and every nested argument.
    pub fn any(&self, pred: &mut impl FnMut(&TypeRef) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        self.args.iter().any(|arg| arg.any(&mut *pred))
    }

    /// Canonical spelling, e.g. `retrofit2.Response<java.util.List<? extends foo.Dto>>`.
    pub fn canonical_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wildcard {
            Wildcard::Unbounded => return f.write_str("?"),
            Wildcard::Extends => f.write_str("? extends ")?,
            Wildcard::Super => f.write_str("? super ")?,
            Wildcard::None => {}
        }
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Last `.`-separated segment of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Kind of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// A declared field (property backing field, Java field or enum constant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Binding cannot be reassigned after construction (`val` / `final`).
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_enum_constant: bool,
    /// Fully-qualified names of attached annotations.
    #[serde(default)]
    pub annotations: Vec<String>,
    /// Raw declaration text (e.g. `val items: MutableList<Item>`), used for lexical matching.
    #[serde(default)]
    pub source_text: Option<String>,
}

/// A constructor or method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterDecl {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

/// A declared method. On interfaces these are the endpoint candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    /// Kotlin `suspend` (the last parameter is the continuation slot).
    #[serde(default)]
    pub is_suspend: bool,
}

/// A type declaration as exposed by the declaration store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypeDecl {
    pub id: TypeId,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub superclass: Option<TypeId>,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    /// Declared constructors; the first one is the primary constructor.
    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    pub fn simple_name(&self) -> &str {
        simple_name(&self.id)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn primary_constructor(&self) -> Option<&ConstructorDecl> {
        self.constructors.first()
    }

    /// Value-class shape: declares both `equals` and `hashCode`.
    pub fn has_value_semantics(&self) -> bool {
        let has = |name: &str| self.methods.iter().any(|m| m.name == name);
        has("equals") && has("hashCode")
    }
}

/// Root document of a declaration export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DeclarationData {
    /// Free-form project label (module name, root path, ...).
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}
