use crate::dsl::{RecommendationRequest, RequestValidationError, Strategy};
use serde::Serialize;
use smartreco_core::error::{ErrorCode, SmartrecoError};
use smartreco_core::model::{ProductId, UserId};
use std::collections::{BTreeSet, HashSet};
use storage::{
    AttributeIndex, GraphError, InteractionGraph, PopularityIndex, RecommendationIndex,
};
use thiserror::Error;
use tracing::debug;

/// Size of the popularity list served to cold-start users.
pub const COLD_START_LIMIT: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("user not found in graph: {0}")]
    UserNotFound(UserId),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

impl SmartrecoError for QueryError {
    fn error_code(&self) -> ErrorCode {
        match self {
            QueryError::InvalidRequest(_) => ErrorCode::InvalidArgument,
            QueryError::UserNotFound(_) => ErrorCode::NotFound,
            QueryError::Graph(_) => ErrorCode::Internal,
        }
    }
}

impl From<RequestValidationError> for QueryError {
    fn from(err: RequestValidationError) -> Self {
        QueryError::InvalidRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResponse {
    /// Strategy that produced `products`.
    pub strategy: Strategy,
    /// Set when the requested strategy could not serve the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fell_back_from: Option<Strategy>,
    pub user: Option<UserId>,
    pub products: Vec<ProductId>,
}

/// Read-only recommender over a fully built [`RecommendationIndex`].
///
/// Owning the index is the transition out of the build phase: nothing here
/// mutates it, so one engine can serve concurrent queries behind an `Arc`.
#[derive(Debug)]
pub struct RecommendationEngine {
    index: RecommendationIndex,
}

impl RecommendationEngine {
    pub fn new(index: RecommendationIndex) -> Self {
        Self { index }
    }

    pub fn graph(&self) -> &InteractionGraph {
        self.index.graph()
    }

    pub fn popularity_index(&self) -> &PopularityIndex {
        self.index.popularity()
    }

    pub fn attributes(&self) -> &AttributeIndex {
        self.index.attributes()
    }

    pub fn has_user(&self, user: &UserId) -> bool {
        self.graph().contains_user(user)
    }

    /// Products reached through users who share at least one product with
    /// `user`, minus the user's own history.
    pub fn collaborative(&self, user: &UserId) -> Result<BTreeSet<ProductId>, QueryError> {
        let graph = self.graph();
        let visited = self.visited(user)?;

        let mut recommended = BTreeSet::new();
        for product in &visited {
            for other in graph.users_of(product)? {
                if other == user {
                    continue;
                }
                for candidate in graph.products_of(other)? {
                    if !visited.contains(candidate) {
                        recommended.insert(candidate.clone());
                    }
                }
            }
        }

        debug!(user = %user, results = recommended.len(), "collaborative recommendation");
        Ok(recommended)
    }

    /// Products sharing a category with something the user interacted with.
    /// Products without attributes are ignored on both sides.
    pub fn content_based(&self, user: &UserId) -> Result<BTreeSet<ProductId>, QueryError> {
        let attributes = self.attributes();
        let visited = self.visited(user)?;

        let categories: HashSet<&str> = visited
            .iter()
            .filter_map(|product| attributes.get(product))
            .map(|attrs| attrs.category.as_str())
            .collect();

        let recommended: BTreeSet<ProductId> = attributes
            .iter()
            .filter(|(product, _)| !visited.contains(*product))
            .filter(|(_, attrs)| categories.contains(attrs.category.as_str()))
            .map(|(product, _)| product.clone())
            .collect();

        debug!(user = %user, results = recommended.len(), "content-based recommendation");
        Ok(recommended)
    }

    /// Cold-start list: the most interacted-with products.
    pub fn popularity(&self) -> Vec<ProductId> {
        let ranked = self.popularity_index().top_n(COLD_START_LIMIT);
        debug!(results = ranked.len(), "popularity recommendation");
        ranked
    }

    pub fn execute_json(&self, raw: &str) -> Result<RecommendationResponse, QueryError> {
        let request = RecommendationRequest::parse_json(raw)
            .map_err(|err| QueryError::InvalidRequest(err.to_string()))?;
        self.execute(&request)
    }

    /// Run one request. With `fallback` set, an unknown user is answered with
    /// the popularity list instead of [`QueryError::UserNotFound`].
    pub fn execute(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, QueryError> {
        request.validate()?;
        let user = request
            .user_key()
            .filter(|_| request.strategy.requires_user())
            .map(UserId::new);

        let outcome = match (request.strategy, &user) {
            (Strategy::Popularity, _) => Ok(self.popularity()),
            (Strategy::Collaborative, Some(user)) => {
                self.collaborative(user).map(|set| set.into_iter().collect())
            }
            (Strategy::ContentBased, Some(user)) => {
                self.content_based(user).map(|set| set.into_iter().collect())
            }
            (strategy, None) => {
                return Err(RequestValidationError::MissingUser(strategy).into());
            }
        };

        match outcome {
            Ok(products) => Ok(RecommendationResponse {
                strategy: request.strategy,
                fell_back_from: None,
                user,
                products,
            }),
            Err(QueryError::UserNotFound(missing)) if request.fallback => {
                debug!(
                    user = %missing,
                    strategy = ?request.strategy,
                    "unknown user, serving popularity"
                );
                Ok(RecommendationResponse {
                    strategy: Strategy::Popularity,
                    fell_back_from: Some(request.strategy),
                    user,
                    products: self.popularity(),
                })
            }
            Err(err) => Err(err),
        }
    }

    fn visited(&self, user: &UserId) -> Result<HashSet<&ProductId>, QueryError> {
        if !self.has_user(user) {
            return Err(QueryError::UserNotFound(user.clone()));
        }
        Ok(self.graph().products_of(user)?.collect())
    }
}
