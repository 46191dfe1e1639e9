pub mod attributes;
pub mod graph;
pub mod popularity;

pub use attributes::AttributeIndex;
pub use graph::{GraphError, InteractionGraph};
pub use popularity::PopularityIndex;
