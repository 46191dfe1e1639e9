use smartreco_core::model::{ProductAttributes, ProductId};
use std::collections::HashMap;

/// Descriptive attributes keyed by product; one record per product.
#[derive(Debug, Default)]
pub struct AttributeIndex {
    records: HashMap<ProductId, ProductAttributes>,
}

impl AttributeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, returning the record that was replaced.
    pub fn set(
        &mut self,
        product: ProductId,
        attributes: ProductAttributes,
    ) -> Option<ProductAttributes> {
        self.records.insert(product, attributes)
    }

    pub fn get(&self, product: &ProductId) -> Option<&ProductAttributes> {
        self.records.get(product)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &ProductAttributes)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
