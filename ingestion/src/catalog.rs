use crate::processor::IngestionError;
use crate::records::csv_reader;
use smartreco_core::model::ProductId;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

const NAME_HEADER: &str = "name";

/// Human-readable product names for printing results.
///
/// Names come only from a column headed `name`; the attribute columns are
/// never reinterpreted. Sources without that column give an empty catalog.
#[derive(Debug, Default, Clone)]
pub struct ProductCatalog {
    names: HashMap<ProductId, String>,
}

impl ProductCatalog {
    pub fn from_reader<R: Read>(source_name: &str, reader: R) -> Result<Self, IngestionError> {
        let mut csv = csv_reader(reader);
        let csv_error = |error| IngestionError::Csv {
            source_name: source_name.to_string(),
            error,
        };

        let name_column = csv
            .headers()
            .map_err(csv_error)?
            .iter()
            .position(|header| header.eq_ignore_ascii_case(NAME_HEADER));
        let Some(name_column) = name_column else {
            debug!(source = %source_name, "no name column, display names disabled");
            return Ok(Self::default());
        };

        let mut names = HashMap::new();
        for row in csv.records() {
            let row = row.map_err(csv_error)?;
            let (Some(id), Some(name)) = (row.get(0), row.get(name_column)) else {
                continue;
            };
            if !id.is_empty() && !name.is_empty() {
                names.insert(ProductId::new(id), name.to_string());
            }
        }

        Ok(Self { names })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| IngestionError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_reader(&path.display().to_string(), BufReader::new(file))
    }

    pub fn display_name(&self, product: &ProductId) -> Option<&str> {
        self.names.get(product).map(String::as_str)
    }

    /// `product_<id>` followed by the display name when one is known.
    pub fn label(&self, product: &ProductId) -> String {
        match self.display_name(product) {
            Some(name) => format!("{} ({})", product, name),
            None => product.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
