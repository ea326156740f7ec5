// 📅 Daily Region Aggregator - revenue per (region, date)
// Collapses same-day same-region transactions into one point

use crate::enrich::RevenueRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub region: String,
    pub date: NaiveDate,
    pub revenue: f64,
}

/// One entry per distinct (region, date), ordered by region then date
///
/// Rows with an empty region cell are skipped.
pub fn daily_revenue(records: &[RevenueRecord]) -> Vec<DailyRevenue> {
    let mut sums: BTreeMap<(&str, NaiveDate), f64> = BTreeMap::new();

    for rec in records.iter().filter(|r| !r.region().is_empty()) {
        *sums.entry((rec.region(), rec.date())).or_insert(0.0) += rec.revenue;
    }

    sums.into_iter()
        .map(|((region, date), revenue)| DailyRevenue {
            region: region.to_string(),
            date,
            revenue,
        })
        .collect()
}
