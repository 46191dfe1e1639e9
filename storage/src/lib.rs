pub mod index;
pub mod recommendation_index;

pub use index::{AttributeIndex, GraphError, InteractionGraph, PopularityIndex};
pub use recommendation_index::RecommendationIndex;
