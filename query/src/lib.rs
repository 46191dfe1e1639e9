pub mod dsl;
pub mod engine;

pub use dsl::{RecommendationRequest, RequestValidationError, Strategy};
pub use engine::{QueryError, RecommendationEngine, RecommendationResponse, COLD_START_LIMIT};
