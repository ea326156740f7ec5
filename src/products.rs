// 🏆 Product Aggregator - revenue per product + top-N ranking
// Ties keep first-encounter order (stable sort over discovery order)

use crate::enrich::RevenueRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default size of the product ranking
pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRevenue {
    pub product: String,
    pub revenue: f64,
}

/// Sum revenue per product, in the order products are first seen
///
/// Rows with an empty product cell belong to no product and are skipped.
pub fn revenue_by_product(records: &[RevenueRecord]) -> Vec<ProductRevenue> {
    let mut totals: Vec<ProductRevenue> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for rec in records.iter().filter(|r| !r.product().is_empty()) {
        match index.get(rec.product()) {
            Some(&i) => totals[i].revenue += rec.revenue,
            None => {
                index.insert(rec.product(), totals.len());
                totals.push(ProductRevenue {
                    product: rec.product().to_string(),
                    revenue: rec.revenue,
                });
            }
        }
    }

    totals
}

/// Top `n` products by descending total revenue
///
/// Fewer than `n` distinct products returns all of them.
pub fn top_products(records: &[RevenueRecord], n: usize) -> Vec<ProductRevenue> {
    let mut ranked = revenue_by_product(records);

    // sort_by is stable: equal totals stay in discovery order
    ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranked.truncate(n);
    ranked
}
