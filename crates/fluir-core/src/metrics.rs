//! # Metrics Deriver
//!
//! Turns the full sale sequence plus an evaluation instant into an immutable
//! [`Metrics`] snapshot.
//!
//! ## Derive Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    derive_metrics(sales, now)                           │
//! │                                                                         │
//! │  1. Fold ──────────► total_revenue, total_sales_count, average_ticket   │
//! │                                                                         │
//! │  2. Period windows ► monthly_revenue (same month+year as now)           │
//! │                      annual_revenue  (same year as now)                 │
//! │                                                                         │
//! │  3. Group by exact product_name ──► {revenue, quantity}                 │
//! │                                                                         │
//! │  4. Summaries ─────► percent_of_revenue, stable sort by revenue desc    │
//! │                                                                         │
//! │  5. Pareto cutoff ─► top max(1, ⌊n × 0.2⌋) are Principal                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole snapshot is recomputed on every call; there is no incremental
//! index. At dashboard scale (hundreds to low thousands of sales) a full pass
//! is negligible, but it is linear in ledger size.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{GoalPeriod, ProductCategory, ProductSummary, Sale};

/// Fraction of distinct products labelled `Principal` (curve A).
pub const PRINCIPAL_FRACTION_DENOMINATOR: usize = 5;

// =============================================================================
// Metrics Snapshot
// =============================================================================

/// Snapshot consumed by every dashboard view.
///
/// ## Invariants
/// - `products` is sorted by descending `total_revenue`, ties in first-seen order
/// - `sum(products.total_revenue) == total_revenue`
/// - `average_ticket` is zero when `total_sales_count` is zero
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Metrics {
    pub total_revenue: Money,
    /// Number of transactions (not units).
    pub total_sales_count: u64,
    /// `total_revenue / total_sales_count`, rounded to the cent.
    pub average_ticket: Money,
    /// Revenue in the evaluation instant's calendar month.
    pub monthly_revenue: Money,
    /// Revenue in the evaluation instant's calendar year.
    pub annual_revenue: Money,
    pub products: Vec<ProductSummary>,
}

impl Metrics {
    /// Revenue for the given goal period.
    pub fn period_revenue(&self, period: GoalPeriod) -> Money {
        match period {
            GoalPeriod::Monthly => self.monthly_revenue,
            GoalPeriod::Annual => self.annual_revenue,
        }
    }

    /// The product with the single highest revenue over the whole ledger.
    ///
    /// On a revenue tie the later product in the sorted list wins.
    pub fn top_product(&self) -> Option<&ProductSummary> {
        self.products
            .iter()
            .reduce(|best, current| {
                if best.total_revenue > current.total_revenue {
                    best
                } else {
                    current
                }
            })
    }

    /// First `n` products by revenue (the "top products" chart).
    pub fn top_products(&self, n: usize) -> &[ProductSummary] {
        &self.products[..n.min(self.products.len())]
    }

    /// Products in the given category, in revenue order.
    pub fn products_in(&self, category: ProductCategory) -> impl Iterator<Item = &ProductSummary> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Revenue split between Principal and Secondary products.
    ///
    /// Categories with zero revenue are omitted, so an empty ledger yields an
    /// empty list.
    pub fn category_breakdown(&self) -> Vec<CategoryRevenue> {
        [ProductCategory::Principal, ProductCategory::Secondary]
            .into_iter()
            .map(|category| CategoryRevenue {
                category,
                revenue: self.products_in(category).map(|p| p.total_revenue).sum(),
            })
            .filter(|entry| entry.revenue.is_positive())
            .collect()
    }
}

/// Revenue attributed to one product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryRevenue {
    pub category: ProductCategory,
    pub revenue: Money,
}

// =============================================================================
// Derivation
// =============================================================================

#[derive(Debug)]
struct ProductAccumulator<'a> {
    name: &'a str,
    revenue: Money,
    quantity: i64,
}

/// Derives a full metrics snapshot.
///
/// `now` is injected rather than read from the clock. Calendar windows are
/// evaluated in `now`'s timezone, so a sale at 23:30 UTC on the 31st can fall
/// in the next month for a caller east of UTC.
///
/// ## Example
/// ```rust
/// use fluir_core::{derive_metrics, Money, SaleLedger};
///
/// let mut ledger = SaleLedger::new();
/// let sale = ledger.append("Camiseta", Money::from_cents(5000), 2).unwrap();
///
/// let metrics = derive_metrics(ledger.all(), &sale.timestamp());
/// assert_eq!(metrics.total_revenue, Money::from_cents(10000));
/// assert_eq!(metrics.monthly_revenue, Money::from_cents(10000));
/// assert_eq!(metrics.annual_revenue, Money::from_cents(10000));
/// ```
pub fn derive_metrics<Tz: TimeZone>(sales: &[Sale], now: &DateTime<Tz>) -> Metrics {
    let tz = now.timezone();

    let mut total_revenue = Money::zero();
    let mut monthly_revenue = Money::zero();
    let mut annual_revenue = Money::zero();

    let mut index_by_name: HashMap<&str, usize> = HashMap::new();
    let mut accumulators: Vec<ProductAccumulator<'_>> = Vec::new();

    for sale in sales {
        total_revenue += sale.total();

        let local = sale.timestamp().with_timezone(&tz);
        if local.year() == now.year() {
            annual_revenue += sale.total();
            if local.month() == now.month() {
                monthly_revenue += sale.total();
            }
        }

        let idx = *index_by_name.entry(sale.product_name()).or_insert_with(|| {
            accumulators.push(ProductAccumulator {
                name: sale.product_name(),
                revenue: Money::zero(),
                quantity: 0,
            });
            accumulators.len() - 1
        });
        let acc = &mut accumulators[idx];
        acc.revenue += sale.total();
        acc.quantity += sale.quantity();
    }

    let total_sales_count = sales.len() as u64;
    let average_ticket = total_revenue.div_round(sales.len() as i64);

    Metrics {
        total_revenue,
        total_sales_count,
        average_ticket,
        monthly_revenue,
        annual_revenue,
        products: summarize_products(accumulators, total_revenue),
    }
}

fn summarize_products(accumulators: Vec<ProductAccumulator<'_>>, grand_total: Money) -> Vec<ProductSummary> {
    let mut products: Vec<ProductSummary> = accumulators
        .into_iter()
        .map(|acc| ProductSummary {
            name: acc.name.to_string(),
            total_revenue: acc.revenue,
            total_quantity: acc.quantity,
            percent_of_revenue: percent_of(acc.revenue, grand_total),
            category: ProductCategory::Secondary,
        })
        .collect();

    // sort_by is stable: equal revenue keeps first-seen order
    products.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));

    classify(&mut products);
    products
}

/// Applies the Pareto cutoff to a revenue-sorted product list.
///
/// `cutoff = max(1, ⌊n × 0.2⌋)`; indexes below it are `Principal`. With two
/// or fewer products only index 0 qualifies, which the cutoff already yields.
pub fn classify(products: &mut [ProductSummary]) {
    let n = products.len();
    let cutoff = principal_cutoff(n);

    for (index, product) in products.iter_mut().enumerate() {
        product.category = if index < cutoff || (n <= 2 && index == 0) {
            ProductCategory::Principal
        } else {
            ProductCategory::Secondary
        };
    }
}

/// Number of `Principal` products for `n` distinct products.
pub fn principal_cutoff(n: usize) -> usize {
    (n / PRINCIPAL_FRACTION_DENOMINATOR).max(1)
}

fn percent_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    part.cents() as f64 / whole.cents() as f64 * 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SaleLedger;
    use chrono::{FixedOffset, Utc};

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn ledger_with(entries: &[(&str, i64, i64, &str)]) -> SaleLedger {
        let mut ledger = SaleLedger::new();
        for (name, cents, qty, ts) in entries {
            ledger
                .append_at(name, Money::from_cents(*cents), *qty, at(ts))
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_empty_ledger() {
        let metrics = derive_metrics(&[], &at("2026-06-15T10:00:00Z"));
        assert_eq!(metrics.total_revenue, Money::zero());
        assert_eq!(metrics.total_sales_count, 0);
        assert_eq!(metrics.average_ticket, Money::zero());
        assert_eq!(metrics.monthly_revenue, Money::zero());
        assert!(metrics.products.is_empty());
        assert!(metrics.top_product().is_none());
        assert!(metrics.category_breakdown().is_empty());
    }

    #[test]
    fn test_totals_and_average_ticket() {
        let ledger = ledger_with(&[
            ("A", 10_000, 1, "2026-06-01T10:00:00Z"),
            ("B", 5_000, 2, "2026-06-02T10:00:00Z"),
            ("A", 10_000, 3, "2026-06-03T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));

        assert_eq!(metrics.total_revenue, Money::from_cents(50_000));
        assert_eq!(metrics.total_sales_count, 3);
        assert_eq!(metrics.average_ticket, Money::from_cents(16_667));
    }

    #[test]
    fn test_product_revenue_sums_to_total() {
        let ledger = ledger_with(&[
            ("A", 333, 3, "2026-06-01T10:00:00Z"),
            ("B", 1_999, 7, "2026-06-02T10:00:00Z"),
            ("C", 1, 1, "2026-06-03T10:00:00Z"),
            ("B", 17, 13, "2026-01-03T10:00:00Z"),
            ("D", 250_000, 1, "2024-02-03T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));

        let sum: Money = metrics.products.iter().map(|p| p.total_revenue).sum();
        assert_eq!(sum, metrics.total_revenue);

        let pct: f64 = metrics.products.iter().map(|p| p.percent_of_revenue).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_grouping_is_exact_match() {
        let ledger = ledger_with(&[
            ("Camiseta", 100, 1, "2026-06-01T10:00:00Z"),
            ("camiseta", 100, 1, "2026-06-01T10:00:00Z"),
            ("Camiseta ", 100, 1, "2026-06-01T10:00:00Z"),
            ("Camiseta", 100, 2, "2026-06-01T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));

        assert_eq!(metrics.products.len(), 3);
        assert_eq!(metrics.products[0].name, "Camiseta");
        assert_eq!(metrics.products[0].total_quantity, 3);
        assert_eq!(metrics.products[0].total_revenue, Money::from_cents(300));
    }

    #[test]
    fn test_quantity_differs_from_transaction_count() {
        let ledger = ledger_with(&[
            ("A", 100, 5, "2026-06-01T10:00:00Z"),
            ("A", 100, 7, "2026-06-01T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));
        assert_eq!(metrics.total_sales_count, 2);
        assert_eq!(metrics.products[0].total_quantity, 12);
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let ledger = ledger_with(&[
            ("Low", 100, 1, "2026-06-01T10:00:00Z"),
            ("TieFirst", 500, 1, "2026-06-01T10:00:00Z"),
            ("High", 900, 1, "2026-06-01T10:00:00Z"),
            ("TieSecond", 500, 1, "2026-06-01T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));
        let names: Vec<&str> = metrics.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["High", "TieFirst", "TieSecond", "Low"]);
    }

    #[test]
    fn test_period_windows() {
        let ledger = ledger_with(&[
            ("A", 1_000, 1, "2026-06-01T00:00:00Z"),
            ("A", 2_000, 1, "2026-06-30T23:59:59Z"),
            ("A", 4_000, 1, "2026-05-31T23:59:59Z"),
            ("A", 8_000, 1, "2026-01-01T00:00:00Z"),
            ("A", 16_000, 1, "2025-06-15T12:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));

        assert_eq!(metrics.monthly_revenue, Money::from_cents(3_000));
        assert_eq!(metrics.annual_revenue, Money::from_cents(15_000));
        assert_eq!(metrics.total_revenue, Money::from_cents(31_000));
        assert_eq!(metrics.period_revenue(GoalPeriod::Monthly), metrics.monthly_revenue);
        assert_eq!(metrics.period_revenue(GoalPeriod::Annual), metrics.annual_revenue);
    }

    #[test]
    fn test_period_windows_follow_evaluation_timezone() {
        // 2026-06-30 23:30 UTC is already July 1st in UTC+3
        let ledger = ledger_with(&[("A", 1_000, 1, "2026-06-30T23:30:00Z")]);

        let utc_now = at("2026-07-01T12:00:00Z");
        assert_eq!(derive_metrics(ledger.all(), &utc_now).monthly_revenue, Money::zero());

        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let local_now = utc_now.with_timezone(&plus_three);
        assert_eq!(
            derive_metrics(ledger.all(), &local_now).monthly_revenue,
            Money::from_cents(1_000)
        );
    }

    #[test]
    fn test_sale_lands_in_both_buckets_at_its_own_instant() {
        let mut ledger = SaleLedger::new();
        let sale = ledger.append("X", Money::from_cents(12_345), 2).unwrap();

        let metrics = derive_metrics(ledger.all(), &sale.timestamp());
        assert_eq!(metrics.monthly_revenue, sale.total());
        assert_eq!(metrics.annual_revenue, sale.total());
    }

    #[test]
    fn test_classification_single_product() {
        let ledger = ledger_with(&[("Only", 100, 1, "2026-06-01T10:00:00Z")]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));
        assert_eq!(metrics.products[0].category, ProductCategory::Principal);
    }

    #[test]
    fn test_classification_two_products() {
        let ledger = ledger_with(&[
            ("Small", 100, 1, "2026-06-01T10:00:00Z"),
            ("Big", 900, 1, "2026-06-01T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));
        assert_eq!(metrics.products[0].name, "Big");
        assert_eq!(metrics.products[0].category, ProductCategory::Principal);
        assert_eq!(metrics.products[1].category, ProductCategory::Secondary);
    }

    #[test]
    fn test_classification_ten_equal_products() {
        let names: Vec<String> = (0..10).map(|i| format!("P{}", i)).collect();
        let mut ledger = SaleLedger::new();
        for name in &names {
            ledger
                .append_at(name, Money::from_cents(1_000), 1, at("2026-06-01T10:00:00Z"))
                .unwrap();
        }
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));

        let principal: Vec<&str> = metrics
            .products_in(ProductCategory::Principal)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(principal, vec!["P0", "P1"]);
        assert_eq!(metrics.products_in(ProductCategory::Secondary).count(), 8);
    }

    #[test]
    fn test_principal_cutoff() {
        assert_eq!(principal_cutoff(0), 1);
        assert_eq!(principal_cutoff(1), 1);
        assert_eq!(principal_cutoff(2), 1);
        assert_eq!(principal_cutoff(9), 1);
        assert_eq!(principal_cutoff(10), 2);
        assert_eq!(principal_cutoff(14), 2);
        assert_eq!(principal_cutoff(15), 3);
    }

    #[test]
    fn test_top_product_and_top_n() {
        let ledger = ledger_with(&[
            ("A", 100, 1, "2026-06-01T10:00:00Z"),
            ("B", 300, 1, "2026-06-01T10:00:00Z"),
            ("C", 200, 1, "2026-06-01T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));

        assert_eq!(metrics.top_product().map(|p| p.name.as_str()), Some("B"));
        assert_eq!(metrics.top_products(2).len(), 2);
        assert_eq!(metrics.top_products(10).len(), 3);
    }

    #[test]
    fn test_top_product_tie_picks_later_entry() {
        let ledger = ledger_with(&[
            ("First", 500, 1, "2026-06-01T10:00:00Z"),
            ("Second", 250, 2, "2026-06-01T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));
        assert_eq!(metrics.top_product().map(|p| p.name.as_str()), Some("Second"));
    }

    #[test]
    fn test_category_breakdown() {
        let ledger = ledger_with(&[
            ("A", 700, 1, "2026-06-01T10:00:00Z"),
            ("B", 200, 1, "2026-06-01T10:00:00Z"),
            ("C", 100, 1, "2026-06-01T10:00:00Z"),
        ]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));
        let breakdown = metrics.category_breakdown();

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, ProductCategory::Principal);
        assert_eq!(breakdown[0].revenue, Money::from_cents(700));
        assert_eq!(breakdown[1].revenue, Money::from_cents(300));
    }

    #[test]
    fn test_single_product_breakdown_omits_secondary() {
        let ledger = ledger_with(&[("A", 700, 1, "2026-06-01T10:00:00Z")]);
        let metrics = derive_metrics(ledger.all(), &at("2026-06-15T10:00:00Z"));
        let breakdown = metrics.category_breakdown();
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].category, ProductCategory::Principal);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let ledger = ledger_with(&[
            ("A", 333, 3, "2026-06-01T10:00:00Z"),
            ("B", 1_999, 7, "2026-05-02T10:00:00Z"),
            ("C", 77, 1, "2025-06-03T10:00:00Z"),
        ]);
        let now = at("2026-06-15T10:00:00Z");
        let first = derive_metrics(ledger.all(), &now);
        let second = derive_metrics(ledger.all(), &now);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
