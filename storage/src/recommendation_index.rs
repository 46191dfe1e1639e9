use crate::index::{AttributeIndex, InteractionGraph, PopularityIndex};
use smartreco_core::model::{InteractionRecord, ProductRecord};

/// RecommendationIndex bundles the graph, popularity and attribute indexes
/// while they are being built. Queries run on the engine that consumes it.
#[derive(Debug, Default)]
pub struct RecommendationIndex {
    graph: InteractionGraph,
    popularity: PopularityIndex,
    attributes: AttributeIndex,
}

impl RecommendationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one raw interaction: the edge is idempotent, the count is not.
    pub fn record_interaction(&mut self, record: &InteractionRecord) {
        self.graph.add_interaction(&record.user, &record.product);
        self.popularity.record_interaction(&record.product);
    }

    /// Register product attributes; the product also becomes a graph node.
    pub fn set_attributes(&mut self, record: &ProductRecord) {
        self.graph.add_product(&record.product);
        self.attributes
            .set(record.product.clone(), record.attributes.clone());
    }

    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    pub fn popularity(&self) -> &PopularityIndex {
        &self.popularity
    }

    pub fn attributes(&self) -> &AttributeIndex {
        &self.attributes
    }
}
