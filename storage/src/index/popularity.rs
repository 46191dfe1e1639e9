use smartreco_core::model::ProductId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Interaction counts per product, one increment per raw interaction record.
#[derive(Debug, Default)]
pub struct PopularityIndex {
    counts: HashMap<ProductId, u64>,
}

impl PopularityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_interaction(&mut self, product: &ProductId) {
        *self.counts.entry(product.clone()).or_insert(0) += 1;
    }

    pub fn count(&self, product: &ProductId) -> u64 {
        self.counts.get(product).copied().unwrap_or(0)
    }

    /// The `n` most popular products with their counts.
    ///
    /// Ordered by count descending, then product id ascending, so equal
    /// counts never depend on hash iteration order.
    pub fn ranking(&self, n: usize) -> Vec<(ProductId, u64)> {
        if n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(&ProductId, u64)> =
            self.counts.iter().map(|(id, count)| (id, *count)).collect();
        ranked.sort_by(|(a_id, a_count), (b_id, b_count)| match b_count.cmp(a_count) {
            Ordering::Equal => a_id.cmp(b_id),
            ord => ord,
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(id, count)| (id.clone(), count))
            .collect()
    }

    pub fn top_n(&self, n: usize) -> Vec<ProductId> {
        self.ranking(n).into_iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
