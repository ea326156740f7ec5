// 🧾 Summary Builder - assembles the four computed facts
// Pure assembly: no aggregation happens here

use crate::loader::SalesTable;
use crate::products::ProductRevenue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Final result of one run
///
/// Field names are the output contract and do not change with the
/// configured ranking size or window length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub row_count: usize,
    pub regions: usize,
    pub top_n_products_by_revenue: Vec<ProductRevenue>,
    pub rolling_7d_revenue_by_region: BTreeMap<String, f64>,
}

impl Summary {
    pub fn summary_line(&self) -> String {
        format!(
            "{} rows, {} regions, {} ranked products",
            self.row_count,
            self.regions,
            self.top_n_products_by_revenue.len()
        )
    }
}

/// Number of distinct non-empty region values in the table
pub fn count_regions(table: &SalesTable) -> usize {
    table
        .iter()
        .map(|r| r.region.as_str())
        .filter(|region| !region.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

#[derive(Debug, Default)]
pub struct SummaryBuilder {
    row_count: usize,
    regions: usize,
    top_products: Vec<ProductRevenue>,
    rolling: BTreeMap<String, f64>,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        SummaryBuilder::default()
    }

    /// Row count and region count straight from the loaded table
    pub fn with_table(mut self, table: &SalesTable) -> Self {
        self.row_count = table.len();
        self.regions = count_regions(table);
        self
    }

    pub fn with_top_products(mut self, top_products: Vec<ProductRevenue>) -> Self {
        self.top_products = top_products;
        self
    }

    pub fn with_rolling(mut self, rolling: BTreeMap<String, f64>) -> Self {
        self.rolling = rolling;
        self
    }

    pub fn build(self) -> Summary {
        Summary {
            row_count: self.row_count,
            regions: self.regions,
            top_n_products_by_revenue: self.top_products,
            rolling_7d_revenue_by_region: self.rolling,
        }
    }
}
