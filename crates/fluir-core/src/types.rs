//! # Domain Types
//!
//! Core domain types used throughout the Fluir dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │ ProductSummary  │   │   GoalPeriod    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  name           │   │  Monthly        │       │
//! │  │  product_name   │──►│  total_revenue  │   │  Annual         │       │
//! │  │  unit_price     │   │  total_quantity │   └─────────────────┘       │
//! │  │  quantity       │   │  percent        │                              │
//! │  │  total          │   │  category       │   ┌─────────────────┐       │
//! │  │  timestamp      │   └─────────────────┘   │ProductCategory  │       │
//! │  └─────────────────┘                         │  Principal      │       │
//! │                                              │  Secondary      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! A `Sale` has no setters. It is built once by the ledger and never changed,
//! so `total == unit_price * quantity` holds for its whole lifetime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Sale
// =============================================================================

/// One recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    id: String,
    product_name: String,
    unit_price: Money,
    quantity: i64,
    total: Money,
    #[ts(as = "String")]
    timestamp: DateTime<Utc>,
}

impl Sale {
    /// Builds a sale whose inputs have already been validated.
    pub(crate) fn new(
        id: String,
        product_name: String,
        unit_price: Money,
        quantity: i64,
        total: Money,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Sale {
            id,
            product_name,
            unit_price,
            quantity,
            total,
            timestamp,
        }
    }

    /// Unique identifier (UUID v4), never reused.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Product label exactly as entered. Grouping is an exact string match.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `unit_price * quantity`, fixed when the sale was recorded.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

// =============================================================================
// Product Category
// =============================================================================

/// ABC/Pareto label for a product.
///
/// `Principal` is curve A (the top revenue earners); everything else is
/// `Secondary` (curves B and C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Principal,
    Secondary,
}

impl Default for ProductCategory {
    fn default() -> Self {
        ProductCategory::Secondary
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::Principal => write!(f, "Principal"),
            ProductCategory::Secondary => write!(f, "Secondary"),
        }
    }
}

// =============================================================================
// Product Summary
// =============================================================================

/// Aggregate over every sale sharing a product name.
///
/// Only exists inside a [`crate::metrics::Metrics`] snapshot and is rebuilt
/// from scratch on every derive pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSummary {
    pub name: String,
    /// Sum of `total` over this product's sales.
    pub total_revenue: Money,
    /// Sum of `quantity` (units, not transactions).
    pub total_quantity: i64,
    /// Share of grand total revenue, `0.0` when the grand total is zero.
    pub percent_of_revenue: f64,
    pub category: ProductCategory,
}

// =============================================================================
// Goal Period
// =============================================================================

/// Calendar window a revenue goal is tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GoalPeriod {
    /// Same calendar month and year as the evaluation instant.
    #[default]
    Monthly,
    /// Same calendar year as the evaluation instant.
    Annual,
}

impl fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalPeriod::Monthly => write!(f, "monthly"),
            GoalPeriod::Annual => write!(f, "annual"),
        }
    }
}

impl FromStr for GoalPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "mensal" => Ok(GoalPeriod::Monthly),
            "annual" | "year" | "yearly" | "anual" => Ok(GoalPeriod::Annual),
            other => Err(CoreError::UnknownPeriod(other.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_period_parsing() {
        assert_eq!("monthly".parse::<GoalPeriod>().unwrap(), GoalPeriod::Monthly);
        assert_eq!("Annual".parse::<GoalPeriod>().unwrap(), GoalPeriod::Annual);
        assert_eq!("year".parse::<GoalPeriod>().unwrap(), GoalPeriod::Annual);
        assert!("weekly".parse::<GoalPeriod>().is_err());
    }

    #[test]
    fn test_goal_period_default() {
        assert_eq!(GoalPeriod::default(), GoalPeriod::Monthly);
    }

    #[test]
    fn test_sale_serializes_camel_case() {
        let sale = Sale::new(
            "id-1".to_string(),
            "Camiseta".to_string(),
            Money::from_cents(2500),
            2,
            Money::from_cents(5000),
            DateTime::parse_from_rfc3339("2026-03-10T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["productName"], "Camiseta");
        assert_eq!(json["unitPrice"], 2500);
        assert_eq!(json["total"], 5000);
    }
}
