// 📈 Rolling Window Computer - trailing calendar-day mean per region
//
// Window for date t covers t-(days-1) ..= t. Only dates that actually have
// revenue are averaged; missing days shrink the window instead of counting
// as zero.

use crate::daily::DailyRevenue;
use crate::error::{Result, SummaryError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default trailing window length in calendar days
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// RollingPoint - rolling mean at one (region, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub date: NaiveDate,
    pub daily_revenue: f64,
    pub rolling_mean: f64,

    /// Number of dated points averaged into `rolling_mean`
    pub window_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingWindow {
    days: i64,
}

impl RollingWindow {
    pub fn new(days: i64) -> Result<Self> {
        if days < 1 {
            return Err(SummaryError::InvalidConfig(format!(
                "rolling window must span at least 1 day, got {}",
                days
            )));
        }

        Ok(RollingWindow { days })
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    /// Whether the window matches the `rolling_7d_*` output field name
    pub fn is_default_length(&self) -> bool {
        self.days == DEFAULT_WINDOW_DAYS
    }

    /// Rolling mean for every point of one region
    ///
    /// Points are sorted ascending by date first; the window start only ever
    /// moves forward, so the scan is a single two-pointer pass.
    pub fn series(&self, points: &[(NaiveDate, f64)]) -> Vec<RollingPoint> {
        let mut sorted = points.to_vec();
        sorted.sort_by_key(|(date, _)| *date);

        let mut out = Vec::with_capacity(sorted.len());
        let mut start = 0;

        for (end, &(date, daily_revenue)) in sorted.iter().enumerate() {
            let window_start = day_number(date) - (self.days - 1);
            while day_number(sorted[start].0) < window_start {
                start += 1;
            }

            let window = &sorted[start..=end];
            let sum: f64 = window.iter().map(|(_, revenue)| revenue).sum();

            out.push(RollingPoint {
                date,
                daily_revenue,
                rolling_mean: sum / window.len() as f64,
                window_len: window.len(),
            });
        }

        out
    }

    /// Full rolling series for each region
    pub fn series_by_region(&self, daily: &[DailyRevenue]) -> BTreeMap<String, Vec<RollingPoint>> {
        let mut grouped: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for point in daily {
            grouped
                .entry(point.region.as_str())
                .or_default()
                .push((point.date, point.revenue));
        }

        grouped
            .into_iter()
            .map(|(region, points)| (region.to_string(), self.series(&points)))
            .collect()
    }

    /// Rolling mean at each region's latest date
    ///
    /// Exactly one entry per region in `daily`. A region with an empty series
    /// maps to 0.0.
    pub fn latest_by_region(&self, daily: &[DailyRevenue]) -> BTreeMap<String, f64> {
        self.series_by_region(daily)
            .into_iter()
            .map(|(region, series)| {
                let latest = series
                    .last()
                    .map(|p| p.rolling_mean)
                    .unwrap_or(0.0);
                (region, latest)
            })
            .collect()
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        RollingWindow {
            days: DEFAULT_WINDOW_DAYS,
        }
    }
}

fn day_number(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64
}
