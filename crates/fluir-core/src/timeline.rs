//! # Revenue Timeline
//!
//! Revenue summed per calendar day, oldest first. Feeds the revenue
//! evolution chart.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Sale;

/// One point of the revenue timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyRevenue {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue: Money,
    pub sales_count: u64,
}

/// Groups sales by calendar day in `tz`.
///
/// Days with no sales are not emitted.
pub fn daily_revenue<Tz: TimeZone>(sales: &[Sale], tz: &Tz) -> Vec<DailyRevenue> {
    let mut days: BTreeMap<NaiveDate, (Money, u64)> = BTreeMap::new();

    for sale in sales {
        let date = sale.timestamp().with_timezone(tz).date_naive();
        let entry = days.entry(date).or_insert((Money::zero(), 0));
        entry.0 += sale.total();
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(date, (revenue, sales_count))| DailyRevenue {
            date,
            revenue,
            sales_count,
        })
        .collect()
}
