//! FieldCollector: every field reachable from an entry type through field types.
//!
//! Traversal is a worklist over type references. Each invocation owns a fresh [`VisitedSet`]
//! keyed by resolved type identity (argument-insensitive), so self-referential and mutually
//! referential DTOs terminate and each identity is expanded at most once.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::domain::resolver::TypeGraphResolver;
use crate::domain::types::{FieldDecl, TypeDecl, TypeId, TypeRef};

/// A field together with the declaration it is declared on.
#[derive(Debug, Clone, Copy)]
pub struct CollectedField<'a> {
    pub owner: &'a TypeDecl,
    pub field: &'a FieldDecl,
}

impl<'a> CollectedField<'a> {
    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    /// `Owner.field`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner.simple_name(), self.field.name)
    }
}

impl PartialEq for CollectedField<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.owner.id == other.owner.id && self.field.name == other.field.name
    }
}

impl Eq for CollectedField<'_> {}

/// Type identities already expanded during one collection.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<TypeId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as visited; false if it already was.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Result of one collection: fields in first-discovery order plus the expanded types.
#[derive(Debug, Clone, Default)]
pub struct FieldSet<'a> {
    pub fields: Vec<CollectedField<'a>>,
    /// Types whose fields were expanded, in expansion order.
    pub expanded: Vec<&'a TypeDecl>,
}

impl<'a> FieldSet<'a> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectedField<'a>> {
        self.fields.iter()
    }

    /// Distinct declaring types of the collected fields, in first-discovery order.
    pub fn owners(&self) -> Vec<&'a TypeDecl> {
        let mut seen = HashSet::new();
        self.fields
            .iter()
            .filter(|f| seen.insert(f.owner.id.as_str()))
            .map(|f| f.owner)
            .collect()
    }

    pub fn field_names(&self) -> Vec<&'a str> {
        self.fields.iter().map(|f| f.name()).collect()
    }
}

pub struct FieldCollector<'a> {
    resolver: TypeGraphResolver<'a>,
    excluded_ancestors: &'a [String],
}

impl<'a> FieldCollector<'a> {
    pub fn new(resolver: TypeGraphResolver<'a>, excluded_ancestors: &'a [String]) -> Self {
        Self {
            resolver,
            excluded_ancestors,
        }
    }

    /// Collect every field reachable from `entry`.
    pub fn collect(&self, entry: &TypeRef) -> FieldSet<'a> {
        let mut visited = VisitedSet::new();
        self.collect_with(entry, &mut visited)
    }

    /// Collect with a caller-provided visited set. Identities already in `visited` are not
    /// expanded again.
    pub fn collect_with(&self, entry: &TypeRef, visited: &mut VisitedSet) -> FieldSet<'a> {
        let mut result = FieldSet::default();
        let mut queue: VecDeque<TypeRef> = VecDeque::new();
        queue.push_back(entry.clone());

        while let Some(current) = queue.pop_front() {
            let Some(resolved) = self.resolver.resolve(&current) else {
                continue;
            };
            let decl = resolved.decl;

            if self.is_excluded(decl) {
                debug!(type_id = %decl.id, "excluded framework type, not expanded");
                continue;
            }

            if !visited.insert(&decl.id) {
                debug!(type_id = %decl.id, "already visited, cycle or repeat broken");
                continue;
            }
            result.expanded.push(decl);

            for field in &decl.fields {
                // Enum constants are static by declaration but are logically instances.
                if field.is_static && !field.is_enum_constant {
                    continue;
                }
                result.fields.push(CollectedField { owner: decl, field });

                if !field.is_static && field.ty.is_reference() {
                    queue.push_back(field.ty.clone());
                }
            }
        }

        result
    }

    /// Exception hierarchies and string types are framework leaves, never classified.
    pub fn is_excluded(&self, decl: &TypeDecl) -> bool {
        self.resolver
            .store()
            .ancestry(&decl.id)
            .into_iter()
            .any(|id| self.excluded_ancestors.iter().any(|root| root == id))
    }
}
