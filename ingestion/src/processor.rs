use crate::records::{read_interactions, read_products};
use smartreco_core::config::IngestionConfig;
use smartreco_core::error::{ErrorCode, SmartrecoError};
use smartreco_core::model::{InteractionRecord, ProductRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use storage::RecommendationIndex;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("malformed record in {source_name} at row {row}: {reason}")]
    Malformed {
        source_name: String,
        row: usize,
        reason: String,
    },
    #[error("unreadable CSV in {source_name}: {error}")]
    Csv {
        source_name: String,
        #[source]
        error: csv::Error,
    },
    #[error("cannot open {}: {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

impl SmartrecoError for IngestionError {
    fn error_code(&self) -> ErrorCode {
        match self {
            IngestionError::Malformed { .. } | IngestionError::Csv { .. } => {
                ErrorCode::InvalidArgument
            }
            IngestionError::Io { error, .. } if error.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::NotFound
            }
            IngestionError::Io { .. } => ErrorCode::Internal,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    pub interaction_records: usize,
    pub product_records: usize,
}

/// Single-writer build phase: feeds interaction and product sources into a
/// [`RecommendationIndex`] and hands it over with [`IngestionPipeline::finish`].
///
/// Each source is parsed and validated in full before the index is touched,
/// so a malformed record never leaves a source half-applied.
#[derive(Debug, Default)]
pub struct IngestionPipeline {
    index: RecommendationIndex,
    stats: IngestionStats,
}

impl IngestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from the interaction and product files named in config.
    pub fn load(config: &IngestionConfig) -> Result<RecommendationIndex, IngestionError> {
        let mut pipeline = Self::new();
        pipeline.ingest_interactions_path(&config.interactions_path)?;
        pipeline.ingest_products_path(&config.products_path)?;
        Ok(pipeline.finish())
    }

    pub fn ingest_interactions<R: Read>(
        &mut self,
        source_name: &str,
        reader: R,
    ) -> Result<usize, IngestionError> {
        let records = read_interactions(source_name, reader)?;
        let applied = self.apply_interactions(records);
        info!(source = %source_name, records = applied, "ingested interaction records");
        Ok(applied)
    }

    pub fn ingest_products<R: Read>(
        &mut self,
        source_name: &str,
        reader: R,
    ) -> Result<usize, IngestionError> {
        let records = read_products(source_name, reader)?;
        let applied = self.apply_products(records);
        info!(source = %source_name, records = applied, "ingested product records");
        Ok(applied)
    }

    pub fn ingest_interactions_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<usize, IngestionError> {
        let path = path.as_ref();
        let reader = open(path)?;
        self.ingest_interactions(&path.display().to_string(), reader)
    }

    pub fn ingest_products_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<usize, IngestionError> {
        let path = path.as_ref();
        let reader = open(path)?;
        self.ingest_products(&path.display().to_string(), reader)
    }

    /// Apply already-validated interaction records.
    pub fn apply_interactions<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = InteractionRecord>,
    {
        let mut applied = 0;
        for record in records {
            self.index.record_interaction(&record);
            applied += 1;
        }
        self.stats.interaction_records += applied;
        applied
    }

    /// Apply already-validated product records.
    pub fn apply_products<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = ProductRecord>,
    {
        let mut applied = 0;
        for record in records {
            self.index.set_attributes(&record);
            applied += 1;
        }
        self.stats.product_records += applied;
        applied
    }

    pub fn stats(&self) -> IngestionStats {
        self.stats
    }

    pub fn index(&self) -> &RecommendationIndex {
        &self.index
    }

    pub fn finish(self) -> RecommendationIndex {
        let graph = self.index.graph();
        info!(
            users = graph.user_count(),
            products = graph.product_count(),
            edges = graph.edge_count(),
            interactions = self.stats.interaction_records,
            product_records = self.stats.product_records,
            "ingestion complete"
        );
        self.index
    }
}

fn open(path: &Path) -> Result<BufReader<File>, IngestionError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|error| IngestionError::Io {
            path: path.to_path_buf(),
            error,
        })
}
