use crate::domain::resolver::TypeGraphResolver;
use crate::domain::store::DeclarationStore;
use crate::domain::types::TypeId;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;

/// Relationship between two declared types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeEdge {
    /// Owner declares a field whose type resolves to the target
    Field { name: String },
    /// Owner extends the target
    Extends,
}

/// Declared type graph - a petgraph view of the declaration store, resolved through the
/// same generic substitution the field collector uses.
pub struct TypeGraph {
    pub graph: DiGraph<TypeId, TypeEdge>,
    pub id_to_node: HashMap<TypeId, NodeIndex>,
}

impl TypeGraph {
    pub fn build(store: &DeclarationStore, resolver: TypeGraphResolver<'_>) -> Self {
        let mut graph = DiGraph::new();
        let mut id_to_node = HashMap::with_capacity(store.len());
        for decl in store.iter() {
            let idx = graph.add_node(decl.id.clone());
            id_to_node.insert(decl.id.clone(), idx);
        }

        for decl in store.iter() {
            let source = id_to_node[&decl.id];
            for field in &decl.fields {
                if field.is_static || !field.ty.is_reference() {
                    continue;
                }
                if let Some(resolved) = resolver.resolve(&field.ty) {
                    let target = id_to_node[resolved.id()];
                    graph.add_edge(
                        source,
                        target,
                        TypeEdge::Field {
                            name: field.name.clone(),
                        },
                    );
                }
            }
            if let Some(parent) = decl.superclass.as_deref()
                && let Some(&target) = id_to_node.get(parent)
            {
                graph.add_edge(source, target, TypeEdge::Extends);
            }
        }

        Self { graph, id_to_node }
    }

    pub fn node(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_node.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Ids of the types directly referenced by `id` through its fields
    pub fn field_targets(&self, id: &str) -> Vec<&str> {
        let Some(idx) = self.node(id) else {
            return Vec::new();
        };
        let mut targets: Vec<&str> = self
            .graph
            .edges(idx)
            .filter(|e| matches!(e.weight(), TypeEdge::Field { .. }))
            .map(|e| self.graph[e.target()].as_str())
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Groups of types that reference each other through fields (including self-references).
    /// Each group is sorted; groups are sorted by their first id.
    pub fn cycles(&self) -> Vec<Vec<TypeId>> {
        let fields_only = self
            .graph
            .filter_map(|_, id| Some(id.clone()), |_, e| match e {
                TypeEdge::Field { .. } => Some(()),
                TypeEdge::Extends => None,
            });
        let mut groups: Vec<Vec<TypeId>> = tarjan_scc(&fields_only)
            .into_iter()
            .filter(|scc| scc.len() > 1 || fields_only.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut ids: Vec<TypeId> = scc.into_iter().map(|i| fields_only[i].clone()).collect();
                ids.sort();
                ids
            })
            .collect();
        groups.sort();
        groups
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        let edges = self
            .graph
            .edge_references()
            .map(|e| GraphEdge {
                source: self.graph[e.source()].clone(),
                target: self.graph[e.target()].clone(),
                edge: e.weight().clone(),
            })
            .collect();
        GraphSnapshot {
            nodes: self
                .graph
                .node_indices()
                .map(|i| self.graph[i].clone())
                .collect(),
            edges,
            cycles: self.cycles(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub source: TypeId,
    pub target: TypeId,
    #[serde(flatten)]
    pub edge: TypeEdge,
}

/// Serializable dump of a [`TypeGraph`]
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<TypeId>,
    pub edges: Vec<GraphEdge>,
    pub cycles: Vec<Vec<TypeId>>,
}
