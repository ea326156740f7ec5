// Sales Summary - Core Library
// Exposes the pipeline stages for the CLI and for tests

pub mod config;
pub mod daily;
pub mod enrich;
pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod products;
pub mod rolling;
pub mod summary;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use daily::{daily_revenue, DailyRevenue};
pub use enrich::{enrich, RevenueRecord};
pub use error::{Result, SummaryError};
pub use loader::{
    fingerprint, load_csv, parse_csv, CsvFileSource, SaleRecord, SalesTable, TableSource,
    REQUIRED_COLUMNS,
};
pub use output::{render, write_summary, OutputFormat};
pub use pipeline::Pipeline;
pub use products::{revenue_by_product, top_products, ProductRevenue, DEFAULT_TOP_N};
pub use rolling::{RollingPoint, RollingWindow, DEFAULT_WINDOW_DAYS};
pub use summary::{count_regions, Summary, SummaryBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load a CSV file and summarize it in one call
pub fn summarize_csv<P: AsRef<std::path::Path>>(path: P, config: PipelineConfig) -> Result<Summary> {
    let pipeline = Pipeline::new(config)?;
    pipeline.run_source(&CsvFileSource::new(path))
}
