pub mod catalog;
pub mod processor;
pub mod records;

pub use catalog::ProductCatalog;
pub use processor::{IngestionError, IngestionPipeline, IngestionStats};
