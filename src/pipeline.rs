// 🔗 Pipeline - loader → enrich → {products, daily → rolling} → summary
// Strictly linear, single pass, no shared mutable state between stages

use crate::config::PipelineConfig;
use crate::daily::daily_revenue;
use crate::enrich::enrich;
use crate::error::Result;
use crate::loader::{SalesTable, TableSource};
use crate::products::top_products;
use crate::rolling::RollingWindow;
use crate::summary::{Summary, SummaryBuilder};
use tracing::{debug, info, warn};

pub struct Pipeline {
    top_n: usize,
    window: RollingWindow,
}

impl Pipeline {
    /// Fails on invalid configuration; `run` itself is infallible
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let window = config.rolling_window()?;
        if !window.is_default_length() {
            warn!(
                window_days = window.days(),
                "rolling_7d_revenue_by_region will hold a {}-day mean",
                window.days()
            );
        }

        Ok(Pipeline {
            top_n: config.top_n,
            window,
        })
    }

    pub fn run(&self, table: &SalesTable) -> Summary {
        let enriched = enrich(table);
        debug!(records = enriched.len(), "Derived revenue");

        let top = top_products(&enriched, self.top_n);
        debug!(ranked = top.len(), top_n = self.top_n, "Ranked products");

        let daily = daily_revenue(&enriched);
        debug!(points = daily.len(), "Aggregated daily revenue per region");

        let rolling = self.window.latest_by_region(&daily);
        debug!(
            regions = rolling.len(),
            window_days = self.window.days(),
            "Computed rolling averages"
        );

        let summary = SummaryBuilder::new()
            .with_table(table)
            .with_top_products(top)
            .with_rolling(rolling)
            .build();

        info!("Summary built: {}", summary.summary_line());
        summary
    }

    /// Load from a source and summarize it
    pub fn run_source<S: TableSource>(&self, source: &S) -> Result<Summary> {
        info!(source = %source.name(), "Loading sales data");
        let table = source.load_table()?;
        Ok(self.run(&table))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline {
            top_n: PipelineConfig::default().top_n,
            window: RollingWindow::default(),
        }
    }
}
