//! Declaration Store - read-only lookup of declared types by identity
//!
//! The store is built once per load and never mutated while an analysis runs, so it can be
//! shared between concurrent endpoint analyses without locking.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::domain::types::{DeclarationData, FieldDecl, TypeDecl, TypeId};

/// Declaration Store - stores all visible type declarations in declaration order
#[derive(Debug, Default)]
pub struct DeclarationStore {
    types: Vec<TypeDecl>,
    index: HashMap<TypeId, usize>,
}

impl DeclarationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a declaration export. The first declaration of an id wins.
    pub fn from_data(data: DeclarationData) -> Self {
        let mut store = Self::new();
        for decl in data.types {
            store.register(decl);
        }
        store
    }

    /// Register a declaration. Returns false (and keeps the existing one) on duplicate ids.
    pub fn register(&mut self, decl: TypeDecl) -> bool {
        if self.index.contains_key(&decl.id) {
            warn!(type_id = %decl.id, "duplicate type declaration ignored");
            return false;
        }
        self.index.insert(decl.id.clone(), self.types.len());
        self.types.push(decl);
        true
    }

    /// Get a declaration by identity
    pub fn get(&self, type_id: &str) -> Option<&TypeDecl> {
        self.index.get(type_id).map(|&i| &self.types[i])
    }

    /// Check if a type is declared
    pub fn contains(&self, type_id: &str) -> bool {
        self.index.contains_key(type_id)
    }

    /// All declarations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter()
    }

    /// Interface declarations in declaration order
    pub fn interfaces(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter().filter(|t| t.is_interface())
    }

    /// Identity of the type followed by its superclass chain, nearest first.
    ///
    /// An undeclared superclass is included by id and ends the walk. Malformed cyclic chains
    /// stop at the first repeated id.
    pub fn ancestry<'a>(&'a self, type_id: &'a str) -> Vec<&'a str> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(type_id);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            chain.push(id);
            current = self.get(id).and_then(|decl| decl.superclass.as_deref());
        }
        chain
    }

    /// Own fields followed by inherited fields from declared superclasses.
    pub fn all_fields<'a>(&'a self, decl: &'a TypeDecl) -> Vec<(&'a TypeDecl, &'a FieldDecl)> {
        self.ancestry(&decl.id)
            .into_iter()
            .filter_map(|id| self.get(id))
            .flat_map(|owner| owner.fields.iter().map(move |field| (owner, field)))
            .collect()
    }

    /// Get count of declared types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{TypeKind, TypeRef};

    fn decl(id: &str, superclass: Option<&str>) -> TypeDecl {
        TypeDecl {
            id: id.to_string(),
            kind: TypeKind::Class,
            superclass: superclass.map(String::from),
            annotations: vec![],
            fields: vec![FieldDecl {
                name: format!("{}_field", id.replace('.', "_")),
                ty: TypeRef::new("int"),
                is_final: true,
                is_static: false,
                is_enum_constant: false,
                annotations: vec![],
                source_text: None,
            }],
            constructors: vec![],
            methods: vec![],
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut store = DeclarationStore::new();
        assert!(store.register(decl("foo.A", None)));
        assert!(store.contains("foo.A"));
        assert!(!store.contains("foo.B"));
        assert_eq!(store.get("foo.A").unwrap().id, "foo.A");
        assert!(store.get("foo.B").is_none());
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut store = DeclarationStore::new();
        store.register(decl("foo.A", None));
        assert!(!store.register(decl("foo.A", Some("foo.Base"))));
        assert_eq!(store.len(), 1);
        assert!(store.get("foo.A").unwrap().superclass.is_none());
    }

    #[test]
    fn test_ancestry_walks_superclasses_and_reports_undeclared_root() {
        let mut store = DeclarationStore::new();
        store.register(decl("foo.Child", Some("foo.Parent")));
        store.register(decl("foo.Parent", Some("java.lang.Throwable")));
        assert_eq!(
            store.ancestry("foo.Child"),
            vec!["foo.Child", "foo.Parent", "java.lang.Throwable"]
        );
    }

    #[test]
    fn test_ancestry_stops_on_cyclic_chain() {
        let mut store = DeclarationStore::new();
        store.register(decl("foo.A", Some("foo.B")));
        store.register(decl("foo.B", Some("foo.A")));
        assert_eq!(store.ancestry("foo.A"), vec!["foo.A", "foo.B"]);
    }

    #[test]
    fn test_all_fields_includes_inherited() {
        let mut store = DeclarationStore::new();
        store.register(decl("foo.Child", Some("foo.Parent")));
        store.register(decl("foo.Parent", None));
        let child = store.get("foo.Child").unwrap();
        let names: Vec<_> = store
            .all_fields(child)
            .iter()
            .map(|(_, f)| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["foo_Child_field", "foo_Parent_field"]);
    }

    #[test]
    fn test_iteration_preserves_declaration_order() {
        let mut store = DeclarationStore::new();
        store.register(decl("foo.Z", None));
        store.register(decl("foo.A", None));
        let ids: Vec<_> = store.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["foo.Z", "foo.A"]);
    }
}
