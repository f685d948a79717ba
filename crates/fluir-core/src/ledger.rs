//! # Sale Ledger
//!
//! The append-only, ordered record of sales. It is the only source of truth
//! the metrics deriver reads from.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  append(name, price, qty) ──► validate ──► Sale pushed at the end       │
//! │                                   │                                     │
//! │                                   └──► ValidationError (nothing stored) │
//! │                                                                         │
//! │  all()   ──► &[Sale] in insertion order                                 │
//! │  clear() ──► empty ledger (dashboard reset)                             │
//! │                                                                         │
//! │  The running revenue total must fit the money range, so every sum       │
//! │  a derive pass computes over the ledger fits as well.                   │
//! │                                                                         │
//! │  NOTE: There is no update or delete. A mistake is corrected by          │
//! │        resetting and re-entering the sales.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Sale;
use crate::validation::{validate_product_name, validate_quantity, validate_unit_price, ValidationResult};

/// Append-only sequence of sales.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaleLedger {
    sales: Vec<Sale>,
    #[serde(skip)]
    revenue: Money,
}

impl SaleLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        SaleLedger {
            sales: Vec::new(),
            revenue: Money::zero(),
        }
    }

    /// Records a sale stamped with the current wall-clock instant.
    pub fn append(
        &mut self,
        product_name: &str,
        unit_price: Money,
        quantity: i64,
    ) -> ValidationResult<Sale> {
        self.append_at(product_name, unit_price, quantity, Utc::now())
    }

    /// Records a sale stamped with an explicit instant.
    ///
    /// ## Rules
    /// - `product_name` non-empty after trimming (stored untrimmed)
    /// - `unit_price > 0`
    /// - `quantity > 0`
    /// - `unit_price * quantity` must fit the money range
    /// - the ledger's revenue including this sale must fit the money range
    ///
    /// On error nothing is recorded.
    pub fn append_at(
        &mut self,
        product_name: &str,
        unit_price: Money,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> ValidationResult<Sale> {
        validate_product_name(product_name)?;
        validate_unit_price(unit_price)?;
        validate_quantity(quantity)?;

        let total = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| ValidationError::Overflow {
                field: "total".to_string(),
            })?;
        let revenue = self
            .revenue
            .checked_add(total)
            .ok_or_else(|| ValidationError::Overflow {
                field: "ledger revenue".to_string(),
            })?;

        let sale = Sale::new(
            Uuid::new_v4().to_string(),
            product_name.to_string(),
            unit_price,
            quantity,
            total,
            timestamp,
        );
        self.sales.push(sale.clone());
        self.revenue = revenue;
        Ok(sale)
    }

    /// All sales in insertion order.
    pub fn all(&self) -> &[Sale] {
        &self.sales
    }

    /// Removes every sale.
    pub fn clear(&mut self) {
        self.sales.clear();
        self.revenue = Money::zero();
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_append_computes_total() {
        let mut ledger = SaleLedger::new();
        let sale = ledger
            .append("Camiseta", Money::from_cents(4990), 3)
            .unwrap();

        assert_eq!(sale.total(), Money::from_cents(14970));
        assert_eq!(sale.unit_price(), Money::from_cents(4990));
        assert_eq!(sale.quantity(), 3);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.all()[0], sale);
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut ledger = SaleLedger::new();
        ledger.append("B", Money::from_cents(100), 1).unwrap();
        ledger.append("A", Money::from_cents(100), 1).unwrap();
        ledger.append("C", Money::from_cents(100), 1).unwrap();

        let names: Vec<&str> = ledger.all().iter().map(|s| s.product_name()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ledger = SaleLedger::new();
        for _ in 0..50 {
            ledger.append("X", Money::from_cents(100), 1).unwrap();
        }
        let ids: HashSet<&str> = ledger.all().iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_product_name_stored_untrimmed() {
        let mut ledger = SaleLedger::new();
        let sale = ledger.append(" Camiseta ", Money::from_cents(100), 1).unwrap();
        assert_eq!(sale.product_name(), " Camiseta ");
    }

    #[test]
    fn test_append_rejects_invalid_input() {
        let mut ledger = SaleLedger::new();

        assert_eq!(
            ledger.append("   ", Money::from_cents(100), 1),
            Err(ValidationError::Required {
                field: "product_name".to_string()
            })
        );
        assert!(matches!(
            ledger.append("X", Money::zero(), 1),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            ledger.append("X", Money::from_cents(-5), 1),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            ledger.append("X", Money::from_cents(100), 0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            ledger.append("X", Money::from_cents(i64::MAX), 2),
            Err(ValidationError::Overflow { .. })
        ));

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_append_rejects_ledger_revenue_overflow() {
        let mut ledger = SaleLedger::new();
        let price: Money = "50000000000000000".parse().unwrap();

        ledger.append("Lote", price, 1).unwrap();
        assert_eq!(
            ledger.append("Lote", price, 1),
            Err(ValidationError::Overflow {
                field: "ledger revenue".to_string()
            })
        );
        assert_eq!(ledger.len(), 1);

        let now = ledger.all()[0].timestamp();
        let metrics = crate::derive_metrics(ledger.all(), &now);
        assert_eq!(metrics.total_revenue, price);
        assert_eq!(metrics.monthly_revenue, price);
    }

    #[test]
    fn test_clear_releases_revenue_headroom() {
        let mut ledger = SaleLedger::new();
        let price = Money::from_cents(i64::MAX / 2 + 1);
        ledger.append("Lote", price, 1).unwrap();
        assert!(ledger.append("Lote", price, 1).is_err());

        ledger.clear();
        assert!(ledger.append("Lote", price, 1).is_ok());
    }

    #[test]
    fn test_clear() {
        let mut ledger = SaleLedger::new();
        ledger.append("X", Money::from_cents(100), 1).unwrap();
        ledger.clear();
        assert!(ledger.is_empty());
        assert!(ledger.all().is_empty());
    }

    #[test]
    fn test_append_at_uses_given_timestamp() {
        let mut ledger = SaleLedger::new();
        let at = DateTime::parse_from_rfc3339("2025-12-31T23:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        let sale = ledger.append_at("X", Money::from_cents(100), 1, at).unwrap();
        assert_eq!(sale.timestamp(), at);
    }
}
