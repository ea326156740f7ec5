// 💰 Revenue Enricher - revenue = units × price
// Revenue is always derived here, never taken from input

use crate::loader::{SaleRecord, SalesTable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// RevenueRecord - a loaded record with its derived revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub record: SaleRecord,
    pub revenue: f64,
}

impl RevenueRecord {
    pub fn from_sale(record: SaleRecord) -> Self {
        let revenue = record.units * record.price;
        RevenueRecord { record, revenue }
    }

    pub fn date(&self) -> NaiveDate {
        self.record.date
    }

    pub fn region(&self) -> &str {
        &self.record.region
    }

    pub fn product(&self) -> &str {
        &self.record.product
    }
}

/// Attach revenue to every record, keeping input order
pub fn enrich(table: &SalesTable) -> Vec<RevenueRecord> {
    table
        .iter()
        .cloned()
        .map(RevenueRecord::from_sale)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(product: &str, units: f64, price: f64) -> SaleRecord {
        SaleRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            region: "East".to_string(),
            product: product.to_string(),
            units,
            price,
            line_number: 2,
        }
    }

    #[test]
    fn test_revenue_is_units_times_price() {
        let table = SalesTable::new(vec![
            create_test_record("A", 10.0, 2.0),
            create_test_record("B", 1.5, 4.0),
            create_test_record("C", 0.0, 99.0),
        ]);

        let enriched = enrich(&table);

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].revenue, 20.0);
        assert_eq!(enriched[1].revenue, 6.0);
        assert_eq!(enriched[2].revenue, 0.0);
    }

    #[test]
    fn test_enrich_preserves_order() {
        let table = SalesTable::new(vec![
            create_test_record("Z", 1.0, 1.0),
            create_test_record("A", 1.0, 1.0),
        ]);

        let enriched = enrich(&table);
        let products: Vec<&str> = enriched.iter().map(|r| r.product()).collect();
        assert_eq!(products, vec!["Z", "A"]);
    }
}
