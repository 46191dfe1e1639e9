use smartreco_core::error::{ErrorCode, SmartrecoError};
use smartreco_core::model::{NodeId, ProductId, UserId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node not found in graph: {0}")]
    NodeNotFound(NodeId),
}

impl SmartrecoError for GraphError {
    fn error_code(&self) -> ErrorCode {
        match self {
            GraphError::NodeNotFound(_) => ErrorCode::NotFound,
        }
    }
}

/// Undirected bipartite graph of users and products.
///
/// Edges only ever join a user to a product, and each pair is stored once, so
/// the graph stays simple and bipartite by construction.
#[derive(Debug, Default)]
pub struct InteractionGraph {
    adjacency: HashMap<NodeId, HashSet<NodeId>>,
    edge_count: usize,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user: &UserId) {
        self.adjacency
            .entry(NodeId::User(user.clone()))
            .or_default();
    }

    pub fn add_product(&mut self, product: &ProductId) {
        self.adjacency
            .entry(NodeId::Product(product.clone()))
            .or_default();
    }

    /// Ensure both endpoints and the edge between them exist.
    /// Returns `true` when a new edge was created.
    pub fn add_interaction(&mut self, user: &UserId, product: &ProductId) -> bool {
        let user_node = NodeId::User(user.clone());
        let product_node = NodeId::Product(product.clone());

        let inserted = self
            .adjacency
            .entry(user_node.clone())
            .or_default()
            .insert(product_node.clone());
        self.adjacency
            .entry(product_node)
            .or_default()
            .insert(user_node);

        if inserted {
            self.edge_count += 1;
        }
        inserted
    }

    /// Get 1-hop neighbors
    pub fn neighbors(&self, id: &NodeId) -> Result<&HashSet<NodeId>, GraphError> {
        self.adjacency
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn contains_user(&self, user: &UserId) -> bool {
        self.contains(&NodeId::User(user.clone()))
    }

    /// Products the user interacted with.
    pub fn products_of(
        &self,
        user: &UserId,
    ) -> Result<impl Iterator<Item = &ProductId> + '_, GraphError> {
        let neighbors = self.neighbors(&NodeId::User(user.clone()))?;
        Ok(neighbors.iter().filter_map(NodeId::as_product))
    }

    /// Users who interacted with the product.
    pub fn users_of(
        &self,
        product: &ProductId,
    ) -> Result<impl Iterator<Item = &UserId> + '_, GraphError> {
        let neighbors = self.neighbors(&NodeId::Product(product.clone()))?;
        Ok(neighbors.iter().filter_map(NodeId::as_user))
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn user_count(&self) -> usize {
        self.adjacency
            .keys()
            .filter(|id| matches!(id, NodeId::User(_)))
            .count()
    }

    pub fn product_count(&self) -> usize {
        self.node_count() - self.user_count()
    }
}
