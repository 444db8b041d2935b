//! Aggregation operations over the two authorities

use std::collections::HashSet;
use std::sync::Arc;

use lexigraph_domain::{
    CoreError, CoreResult, MindMap, MindMapEdge, MindMapNode, Relationship, RelationshipGraph,
    Term, TermId, TermLookup,
};

use crate::resolver::ConsistencyResolver;

/// Default cap on concurrent neighbor lookups during composition.
pub const DEFAULT_FAN_OUT: usize = 8;

/// How a caller names the term they want enriched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermSelector {
    /// By opaque id
    ById(TermId),

    /// By unique name
    ByName(String),
}

/// A term joined with its currently-live relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedTerm {
    /// The resolved term
    pub term: Term,

    /// Edges touching the term whose far endpoints still resolve
    pub relationships: Vec<Relationship>,
}

/// Composes glossary terms and graph edges into client-facing views.
///
/// All relationship writes pass through the [`ConsistencyResolver`] guard;
/// all composed reads pass through its liveness filter. The engine itself
/// holds no state beyond the two ports, so one instance is shared freely
/// across request handlers.
#[derive(Clone)]
pub struct AggregationEngine {
    lookup: Arc<dyn TermLookup>,
    graph: Arc<dyn RelationshipGraph>,
    resolver: ConsistencyResolver,
}

impl AggregationEngine {
    /// Build an engine with the default lookup fan-out.
    pub fn new(lookup: Arc<dyn TermLookup>, graph: Arc<dyn RelationshipGraph>) -> Self {
        Self::with_fan_out(lookup, graph, DEFAULT_FAN_OUT)
    }

    /// Build an engine with an explicit cap on concurrent term lookups.
    pub fn with_fan_out(
        lookup: Arc<dyn TermLookup>,
        graph: Arc<dyn RelationshipGraph>,
        fan_out: usize,
    ) -> Self {
        let resolver =
            ConsistencyResolver::with_fan_out(Arc::clone(&lookup), Arc::clone(&graph), fan_out);
        Self {
            lookup,
            graph,
            resolver,
        }
    }

    /// Record a relationship after guarding it against the glossary.
    ///
    /// The guard and the write are not atomic; a term deleted in between
    /// leaves an edge that the read-side filter will hide and the next
    /// purge will remove.
    pub async fn add_relationship(&self, relationship: &Relationship) -> CoreResult<()> {
        self.resolver.guard_new_edge(relationship).await?;
        self.graph.add_relationship(relationship).await
    }

    /// Remove the edge `(from, to)`. Absent edges succeed quietly, and no
    /// glossary check applies: deleting an edge between vanished terms must
    /// work, that is how operators clean up.
    pub async fn delete_relationship(&self, from: &TermId, to: &TermId) -> CoreResult<()> {
        if from.is_empty() || to.is_empty() {
            return Err(CoreError::Invalid(
                "both endpoint term ids are required".to_string(),
            ));
        }
        self.graph.delete_relationship(from, to).await
    }

    /// Raw pass-through of the graph authority's view of a term.
    ///
    /// Deliberately unfiltered, unlike the composed views: operators use
    /// this to see edges whose endpoints no longer resolve.
    pub async fn relationships_for_term(&self, id: &TermId) -> CoreResult<Vec<Relationship>> {
        if id.is_empty() {
            return Err(CoreError::Invalid("term id is required".to_string()));
        }
        self.graph.relationships_for_term(id).await
    }

    /// Fetch a term with its live relationships.
    pub async fn enriched_term(&self, selector: &TermSelector) -> CoreResult<EnrichedTerm> {
        let term = match selector {
            TermSelector::ById(id) => {
                if id.is_empty() {
                    return Err(CoreError::Invalid("term id is required".to_string()));
                }
                self.lookup
                    .get_by_id(id)
                    .await?
                    .ok_or_else(|| CoreError::NotFound(format!("term '{}'", id)))?
            }
            TermSelector::ByName(name) => {
                if name.is_empty() {
                    return Err(CoreError::Invalid("term name is required".to_string()));
                }
                self.lookup
                    .get_by_name(name)
                    .await?
                    .ok_or_else(|| CoreError::NotFound(format!("term named '{}'", name)))?
            }
        };

        let relationships = self.graph.relationships_for_term(&term.id).await?;
        let live = self
            .resolver
            .resolve_live(neighbor_ids(&relationships, &term.id))
            .await;

        let relationships = relationships
            .into_iter()
            .filter(|rel| match rel.other_endpoint(&term.id) {
                Some(other) => live.contains_key(other),
                None => false,
            })
            .collect();

        Ok(EnrichedTerm {
            term,
            relationships,
        })
    }

    /// Build the one-hop mind map centered on a term.
    ///
    /// The center resolves first (missing center is [`CoreError::NotFound`]),
    /// then every distinct neighbor is resolved in parallel under the
    /// fan-out cap. Neighbors that do not resolve are dropped along with
    /// their edges, so every returned edge has both endpoints among the
    /// nodes. Nodes come back center-first, then neighbors ordered by name.
    pub async fn mind_map(&self, id: &TermId) -> CoreResult<MindMap> {
        if id.is_empty() {
            return Err(CoreError::Invalid("term id is required".to_string()));
        }

        let center = self
            .lookup
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("term '{}'", id)))?;

        let relationships = self.graph.relationships_for_term(id).await?;
        let live = self
            .resolver
            .resolve_live(neighbor_ids(&relationships, id))
            .await;

        let mut node_ids: HashSet<TermId> = live.keys().cloned().collect();
        node_ids.insert(center.id.clone());

        let mut nodes = Vec::with_capacity(live.len() + 1);
        nodes.push(MindMapNode::from(center));
        let mut neighbors: Vec<Term> = live.into_values().collect();
        neighbors.sort_by(|a, b| a.name.cmp(&b.name));
        nodes.extend(neighbors.into_iter().map(MindMapNode::from));

        let edges = relationships
            .into_iter()
            .filter(|rel| node_ids.contains(&rel.from) && node_ids.contains(&rel.to))
            .map(|rel| MindMapEdge {
                label: rel.kind.as_str().to_string(),
                from_id: rel.from,
                to_id: rel.to,
            })
            .collect();

        Ok(MindMap { nodes, edges })
    }

    /// Best-effort edge cleanup after the glossary deleted a term.
    ///
    /// Returns how many edges were removed; failure degrades to zero
    /// rather than erroring, and the cleanup task cannot be cancelled by
    /// the caller going away.
    pub async fn purge_after_term_delete(&self, id: &TermId) -> u64 {
        self.resolver.purge_after_term_delete(id).await
    }
}

/// Distinct far endpoints of `relationships` as seen from `center`.
fn neighbor_ids(relationships: &[Relationship], center: &TermId) -> HashSet<TermId> {
    let mut ids = HashSet::new();
    for relationship in relationships {
        if let Some(other) = relationship.other_endpoint(center) {
            if other != center {
                ids.insert(other.clone());
            }
        }
    }
    ids
}
