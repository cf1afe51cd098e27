//! TypeGraphResolver: from a use-site [`TypeRef`] to the declaration it effectively denotes.
//!
//! Generic references are unwrapped to a single type argument (`Call<List<Dto>>` → `Dto`),
//! wildcard arguments to their bound. The unwrapping follows the single-parameter wrapper idiom
//! (list/optional/response); which argument a multi-argument reference unwraps to is governed by
//! [`SubstitutionPolicy`].

use tracing::trace;

use crate::domain::config::SubstitutionPolicy;
use crate::domain::store::DeclarationStore;
use crate::domain::types::{TypeDecl, TypeRef, Wildcard};

/// A reference after substitution together with the declaration it resolved to.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub reference: TypeRef,
    pub decl: &'a TypeDecl,
}

impl<'a> Resolved<'a> {
    pub fn id(&self) -> &'a str {
        &self.decl.id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeGraphResolver<'a> {
    store: &'a DeclarationStore,
    policy: SubstitutionPolicy,
}

impl<'a> TypeGraphResolver<'a> {
    pub fn new(store: &'a DeclarationStore, policy: SubstitutionPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &'a DeclarationStore {
        self.store
    }

    /// Innermost reference reached by repeatedly taking the substituted argument.
    ///
    /// Terminates: every step descends into a strictly smaller argument subtree.
    pub fn effective_ref(&self, reference: &TypeRef) -> TypeRef {
        let mut current = reference;
        loop {
            let Some(arg) = self.substituted_argument(current) else {
                return current.bound();
            };
            match arg.wildcard {
                Wildcard::None | Wildcard::Extends | Wildcard::Super => current = arg,
                Wildcard::Unbounded => return current.bound(),
            }
        }
    }

    /// Resolve a reference to its declaration; `None` means "nothing to check here".
    pub fn resolve(&self, reference: &TypeRef) -> Option<Resolved<'a>> {
        let effective = self.effective_ref(reference);
        match self.store.get(&effective.name) {
            Some(decl) => Some(Resolved {
                reference: effective,
                decl,
            }),
            None => {
                trace!(type_ref = %reference, effective = %effective, "no visible declaration");
                None
            }
        }
    }

    fn substituted_argument<'r>(&self, reference: &'r TypeRef) -> Option<&'r TypeRef> {
        match self.policy {
            SubstitutionPolicy::First => reference.args.first(),
            SubstitutionPolicy::Last => reference.args.last(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{TypeDecl, TypeKind};

    fn store_with(ids: &[&str]) -> DeclarationStore {
        let mut store = DeclarationStore::new();
        for id in ids {
            store.register(TypeDecl {
                id: id.to_string(),
                kind: TypeKind::Class,
                superclass: None,
                annotations: vec![],
                fields: vec![],
                constructors: vec![],
                methods: vec![],
            });
        }
        store
    }

    #[test]
    fn test_plain_reference_resolves_directly() {
        let store = store_with(&["foo.Dto"]);
        let resolver = TypeGraphResolver::new(&store, SubstitutionPolicy::First);
        assert_eq!(resolver.resolve(&TypeRef::new("foo.Dto")).unwrap().id(), "foo.Dto");
    }

    #[test]
    fn test_nested_wrappers_unwrap_to_innermost() {
        let store = store_with(&["foo.Dto"]);
        let resolver = TypeGraphResolver::new(&store, SubstitutionPolicy::First);
        let r = TypeRef::generic(
            "retrofit2.Call",
            vec![TypeRef::generic("java.util.List", vec![TypeRef::new("foo.Dto")])],
        );
        assert_eq!(resolver.resolve(&r).unwrap().id(), "foo.Dto");
    }

    #[test]
    fn test_wildcard_bounds_are_followed() {
        let store = store_with(&["foo.Dto"]);
        let resolver = TypeGraphResolver::new(&store, SubstitutionPolicy::First);
        let lower = TypeRef::generic(
            "kotlin.coroutines.Continuation",
            vec![TypeRef::super_of(TypeRef::new("foo.Dto"))],
        );
        let upper = TypeRef::generic(
            "java.util.List",
            vec![TypeRef::extends(TypeRef::new("foo.Dto"))],
        );
        assert_eq!(resolver.resolve(&lower).unwrap().id(), "foo.Dto");
        assert_eq!(resolver.resolve(&upper).unwrap().id(), "foo.Dto");
    }

    #[test]
    fn test_unbounded_wildcard_falls_back_to_reference() {
        let store = store_with(&["foo.Page"]);
        let resolver = TypeGraphResolver::new(&store, SubstitutionPolicy::First);
        let r = TypeRef::generic("foo.Page", vec![TypeRef::unbounded()]);
        assert_eq!(resolver.effective_ref(&r).name, "foo.Page");
        assert_eq!(resolver.resolve(&r).unwrap().id(), "foo.Page");
    }

    #[test]
    fn test_library_type_is_unresolved() {
        let store = store_with(&[]);
        let resolver = TypeGraphResolver::new(&store, SubstitutionPolicy::First);
        assert!(resolver.resolve(&TypeRef::new("okhttp3.ResponseBody")).is_none());
    }

    #[test]
    fn test_multi_argument_policy() {
        let store = store_with(&["foo.Key", "foo.Value"]);
        let r = TypeRef::generic(
            "foo.Keyed",
            vec![TypeRef::new("foo.Key"), TypeRef::new("foo.Value")],
        );
        let first = TypeGraphResolver::new(&store, SubstitutionPolicy::First);
        let last = TypeGraphResolver::new(&store, SubstitutionPolicy::Last);
        assert_eq!(first.resolve(&r).unwrap().id(), "foo.Key");
        assert_eq!(last.resolve(&r).unwrap().id(), "foo.Value");
    }

    #[test]
    fn test_effective_ref_drops_wildcard_marker() {
        let store = store_with(&[]);
        let resolver = TypeGraphResolver::new(&store, SubstitutionPolicy::First);
        let r = TypeRef::generic("X", vec![TypeRef::extends(TypeRef::new("foo.Dto"))]);
        assert_eq!(resolver.effective_ref(&r), TypeRef::new("foo.Dto"));
    }
}
